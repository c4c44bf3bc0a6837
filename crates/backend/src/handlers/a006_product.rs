use axum::extract::{Multipart, Path};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a006_product::aggregate::{Product, ProductDto};

use super::{parse_id, read_form, ApiError, FormData};
use crate::domain::a006_product::service;
use crate::shared::error::DomainError;

fn dto_from_form(form: &FormData) -> ProductDto {
    ProductDto {
        name: form.text("name"),
        category_ref: form.text("categoryRef"),
        subcategory_ref: form.text("subcategoryRef"),
    }
}

/// POST /api/products (multipart)
pub async fn create(multipart: Multipart) -> Result<Json<Product>, ApiError> {
    let form = read_form(multipart).await?;
    let dto = dto_from_form(&form);
    let product = service::create(dto, form.single_file()).await?;
    Ok(Json(product))
}

/// GET /api/products
pub async fn list_all() -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(service::list_all().await?))
}

/// GET /api/products/by-subcategory/:subcategory_id
pub async fn list_by_subcategory(
    Path(subcategory_id): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    parse_id(&subcategory_id)?;
    Ok(Json(service::list_by_subcategory(&subcategory_id).await?))
}

/// GET /api/products/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    let product = service::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Product not found"))?;
    Ok(Json(product))
}

/// PUT /api/products/:id (multipart)
pub async fn update(
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    let form = read_form(multipart).await?;
    let dto = dto_from_form(&form);
    let product = service::update(id, dto, form.single_file()).await?;
    Ok(Json(product))
}

/// DELETE /api/products/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    service::delete(id).await?;
    Ok(StatusCode::OK)
}
