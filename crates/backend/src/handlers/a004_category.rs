use axum::extract::{Multipart, Path};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a004_category::aggregate::Category;

use super::{parse_id, read_form, ApiError};
use crate::domain::a004_category::service;
use crate::shared::error::DomainError;

/// POST /api/categories (multipart: name + optional image)
pub async fn create(multipart: Multipart) -> Result<Json<Category>, ApiError> {
    let form = read_form(multipart).await?;
    let name = form
        .text("name")
        .ok_or_else(|| ApiError::validation("Category name is required"))?;
    let category = service::create(name, form.single_file()).await?;
    Ok(Json(category))
}

/// GET /api/categories
pub async fn list_all() -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(service::list_all().await?))
}

/// GET /api/categories/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Category>, ApiError> {
    let id = parse_id(&id)?;
    let category = service::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Category not found"))?;
    Ok(Json(category))
}

/// PUT /api/categories/:id (multipart)
pub async fn update(
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Category>, ApiError> {
    let id = parse_id(&id)?;
    let form = read_form(multipart).await?;
    let name = form.text("name");
    let category = service::update(id, name, form.single_file()).await?;
    Ok(Json(category))
}

/// DELETE /api/categories/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    service::delete(id).await?;
    Ok(StatusCode::OK)
}
