use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::dto::MessageBody;
use crate::dto::products::ProductDto;
use crate::forms::products::ProductMultipartForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::products::{
    create_product as create_product_service, delete_product as delete_product_service,
    get_product as get_product_service, list_products as list_products_service,
    update_product as update_product_service,
};
use crate::storage::ObjectStorage;

pub const PRODUCT_DELETED: &str = "Produto deletado com sucesso";

#[get("/products")]
pub async fn list_products(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_products_service(repo.get_ref()) {
        Ok(products) => HttpResponse::Ok().json(
            products
                .into_iter()
                .map(ProductDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => error_response(err),
    }
}

#[get("/products/{id}")]
pub async fn get_product(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match get_product_service(&id, repo.get_ref()) {
        Ok(product) => HttpResponse::Ok().json(ProductDto::from(product)),
        Err(err) => error_response(err),
    }
}

#[post("/products")]
pub async fn create_product(
    repo: web::Data<DieselRepository>,
    storage: web::Data<dyn ObjectStorage>,
    MultipartForm(form): MultipartForm<ProductMultipartForm>,
) -> impl Responder {
    let (fields, image) = form.into_parts();
    match create_product_service(fields, image, repo.get_ref(), storage.get_ref()).await {
        Ok(product) => HttpResponse::Created().json(ProductDto::from(product)),
        Err(err) => error_response(err),
    }
}

#[put("/products/{id}")]
pub async fn update_product(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    storage: web::Data<dyn ObjectStorage>,
    MultipartForm(form): MultipartForm<ProductMultipartForm>,
) -> impl Responder {
    let (fields, image) = form.into_parts();
    match update_product_service(&id, fields, image, repo.get_ref(), storage.get_ref()).await {
        Ok(product) => HttpResponse::Ok().json(ProductDto::from(product)),
        Err(err) => error_response(err),
    }
}

#[delete("/products/{id}")]
pub async fn delete_product(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_product_service(&id, repo.get_ref()) {
        Ok(()) => HttpResponse::Ok().json(MessageBody {
            message: PRODUCT_DELETED,
        }),
        Err(err) => error_response(err),
    }
}
