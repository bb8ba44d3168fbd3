use actix_multipart::form::MultipartFormConfig;
use actix_web::error::InternalError;
use actix_web::{HttpRequest, HttpResponse, Responder, get, web};

use crate::dto::{ErrorBody, ValidationErrorBody};
use crate::services::ServiceError;

pub mod categories;
pub mod products;

pub const WELCOME_BANNER: &str = "Bem-vindo à API! Use /api para acessar as rotas disponíveis.";

/// Maps a failed pipeline onto its status code and JSON envelope.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Validation(errors) => {
            HttpResponse::BadRequest().json(ValidationErrorBody { errors })
        }
        ServiceError::NotFound(message) => HttpResponse::NotFound().json(ErrorBody::new(message)),
        ServiceError::UnsupportedMedia(message) => {
            HttpResponse::BadRequest().json(ErrorBody::new(message))
        }
        ServiceError::Dependency(message) => {
            HttpResponse::InternalServerError().json(ErrorBody::new(message))
        }
    }
}

fn bad_request<E>(err: E) -> actix_web::Error
where
    E: std::fmt::Display + std::fmt::Debug + 'static,
{
    let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
    InternalError::from_response(err, response).into()
}

/// JSON extractor settings: malformed bodies answer `{error}` with 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| bad_request(err))
}

/// Multipart extractor settings. `limit` caps the in-memory size of a request.
pub fn multipart_config(limit: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(limit)
        .memory_limit(limit)
        .error_handler(|err, _req| bad_request(err))
}

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(WELCOME_BANNER)
}

pub async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new(format!(
        "Route {} {} not found",
        req.method(),
        req.uri()
    )))
}

/// Registers the banner, the `/api` scope and the fallback for unknown routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(
            web::scope("/api")
                .service(categories::list_categories)
                .service(categories::get_category)
                .service(categories::create_category)
                .service(categories::update_category)
                .service(categories::delete_category)
                .service(products::list_products)
                .service(products::get_product)
                .service(products::create_product)
                .service(products::update_product)
                .service(products::delete_product),
        )
        .default_service(web::to(not_found));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::validation::FieldViolation;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn validation_lists_every_violation() {
        let response = error_response(ServiceError::Validation(vec![
            FieldViolation {
                path: "name",
                msg: "Nome é obrigatório",
            },
            FieldViolation {
                path: "price",
                msg: "O preço deve ser numérico",
            },
        ]));

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["errors"][0]["msg"], "Nome é obrigatório");
        assert_eq!(json["errors"][1]["path"], "price");
    }

    #[actix_web::test]
    async fn other_failures_use_error_envelope() {
        let cases = [
            (ServiceError::NotFound("missing"), StatusCode::NOT_FOUND),
            (ServiceError::UnsupportedMedia("gif"), StatusCode::BAD_REQUEST),
            (
                ServiceError::Dependency("smtp down".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let message = err.to_string();
            let response = error_response(err);
            assert_eq!(response.status(), status);
            assert_eq!(body_json(response).await["error"], message);
        }
    }
}
