use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::dto::categories::{CategoryDto, CategoryWithProductsDto};
use crate::dto::{CategoryMessage, MessageBody};
use crate::forms::categories::CategoryForm;
use crate::notifications::Mailer;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::categories::{
    create_category as create_category_service, delete_category as delete_category_service,
    get_category as get_category_service, list_categories as list_categories_service,
    update_category as update_category_service,
};

pub const CATEGORY_CREATED: &str = "Categoria criada com sucesso!";
pub const CATEGORY_UPDATED: &str = "Categoria atualizada com sucesso!";
pub const CATEGORY_DELETED: &str = "Categoria deletada com sucesso";

#[get("/categories")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_categories_service(repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(
            categories
                .into_iter()
                .map(CategoryDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => error_response(err),
    }
}

#[get("/categories/{id}")]
pub async fn get_category(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match get_category_service(&id, repo.get_ref()) {
        Ok(category) => HttpResponse::Ok().json(CategoryDto::from(category)),
        Err(err) => error_response(err),
    }
}

#[post("/categories")]
pub async fn create_category(
    repo: web::Data<DieselRepository>,
    mailer: web::Data<dyn Mailer>,
    web::Json(form): web::Json<CategoryForm>,
) -> impl Responder {
    match create_category_service(form, repo.get_ref(), mailer.get_ref()).await {
        Ok(category) => HttpResponse::Created().json(CategoryMessage {
            message: CATEGORY_CREATED,
            category: CategoryDto::from(category),
        }),
        Err(err) => error_response(err),
    }
}

#[put("/categories/{id}")]
pub async fn update_category(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    mailer: web::Data<dyn Mailer>,
    web::Json(form): web::Json<CategoryForm>,
) -> impl Responder {
    match update_category_service(&id, form, repo.get_ref(), mailer.get_ref()).await {
        Ok(category) => HttpResponse::Ok().json(CategoryMessage {
            message: CATEGORY_UPDATED,
            category: CategoryWithProductsDto::from(category),
        }),
        Err(err) => error_response(err),
    }
}

#[delete("/categories/{id}")]
pub async fn delete_category(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_category_service(&id, repo.get_ref()) {
        Ok(()) => HttpResponse::Ok().json(MessageBody {
            message: CATEGORY_DELETED,
        }),
        Err(err) => error_response(err),
    }
}
