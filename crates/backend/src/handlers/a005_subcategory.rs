use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a005_subcategory::aggregate::{Subcategory, SubcategoryDto};

use super::{parse_id, ApiError};
use crate::domain::a005_subcategory::service;
use crate::shared::error::DomainError;

/// POST /api/subcategories
pub async fn create(Json(dto): Json<SubcategoryDto>) -> Result<Json<Subcategory>, ApiError> {
    Ok(Json(service::create(dto).await?))
}

/// GET /api/subcategories
pub async fn list_all() -> Result<Json<Vec<Subcategory>>, ApiError> {
    Ok(Json(service::list_all().await?))
}

/// GET /api/subcategories/by-category/:category_id
pub async fn list_by_category(
    Path(category_id): Path<String>,
) -> Result<Json<Vec<Subcategory>>, ApiError> {
    parse_id(&category_id)?;
    Ok(Json(service::list_by_category(&category_id).await?))
}

/// GET /api/subcategories/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Subcategory>, ApiError> {
    let id = parse_id(&id)?;
    let subcategory = service::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Subcategory not found"))?;
    Ok(Json(subcategory))
}

/// PUT /api/subcategories/:id
pub async fn update(
    Path(id): Path<String>,
    Json(dto): Json<SubcategoryDto>,
) -> Result<Json<Subcategory>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(service::update(id, dto).await?))
}

/// DELETE /api/subcategories/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    service::delete(id).await?;
    Ok(StatusCode::OK)
}
