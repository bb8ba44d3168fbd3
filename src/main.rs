use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;

use pushkind_catalog::db::{establish_connection_pool, run_migrations};
use pushkind_catalog::models::config::ServerConfig;
use pushkind_catalog::notifications::{Mailer, SmtpMailer};
use pushkind_catalog::repository::DieselRepository;
use pushkind_catalog::routes::{configure, json_config, multipart_config};
use pushkind_catalog::storage::{HttpObjectStorage, ObjectStorage};

fn cors(origin: &str) -> Cors {
    let cors = if origin == "*" {
        Cors::default().allow_any_origin()
    } else {
        Cors::default().allowed_origin(origin)
    };
    cors.allowed_methods(["GET", "POST", "PUT", "DELETE"])
        .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .add((header::X_FRAME_OPTIONS, "SAMEORIGIN"))
        .add((header::REFERRER_POLICY, "no-referrer"))
        .add((header::X_XSS_PROTECTION, "0"))
        .add((header::STRICT_TRANSPORT_SECURITY, "max-age=15552000; includeSubDomains"))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to run database migrations: {e}");
        std::process::exit(1);
    }
    let repo = DieselRepository::new(pool);

    let mailer: Arc<dyn Mailer> = match SmtpMailer::new(&server_config.smtp) {
        Ok(mailer) => Arc::new(mailer),
        Err(e) => {
            log::error!("Failed to configure mailer: {e}");
            std::process::exit(1);
        }
    };
    let storage: Arc<dyn ObjectStorage> = match HttpObjectStorage::new(&server_config.storage) {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
            log::error!("Failed to configure object storage: {e}");
            std::process::exit(1);
        }
    };

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Server is running on http://{}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(security_headers())
            .wrap(cors(&server_config.cors_origin))
            .wrap(Logger::default())
            .app_data(json_config())
            .app_data(multipart_config(server_config.upload_limit))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::from(mailer.clone()))
            .app_data(web::Data::from(storage.clone()))
            .configure(configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
