use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a008_land_product::aggregate::{
    LandProduct, LandProductDto, UpdateLandProductDto,
};
use serde::Deserialize;

use super::{parse_id, ApiError};
use crate::domain::a008_land_product::service;
use crate::shared::error::DomainError;

/// POST /api/land-products
pub async fn create(Json(dto): Json<LandProductDto>) -> Result<Json<LandProduct>, ApiError> {
    Ok(Json(service::create(dto).await?))
}

/// GET /api/land-products/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<LandProduct>, ApiError> {
    let id = parse_id(&id)?;
    let land_product = service::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Land product not found"))?;
    Ok(Json(land_product))
}

/// GET /api/land-products/by-land/:user_id/:land_id
pub async fn list_by_land(
    Path((user_id, land_id)): Path<(String, String)>,
) -> Result<Json<Vec<LandProduct>>, ApiError> {
    parse_id(&user_id)?;
    parse_id(&land_id)?;
    Ok(Json(service::list_by_land(&user_id, &land_id).await?))
}

#[derive(Debug, Deserialize)]
pub struct ByUserQuery {
    pub category: Option<String>,
}

/// GET /api/land-products/by-user/:user_id?category=Food
pub async fn list_by_user(
    Path(user_id): Path<String>,
    Query(query): Query<ByUserQuery>,
) -> Result<Json<Vec<LandProduct>>, ApiError> {
    parse_id(&user_id)?;
    Ok(Json(
        service::list_by_user(&user_id, query.category.as_deref()).await?,
    ))
}

/// PUT /api/land-products/:id
pub async fn update(
    Path(id): Path<String>,
    Json(dto): Json<UpdateLandProductDto>,
) -> Result<Json<LandProduct>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(service::update(id, dto.details).await?))
}

/// DELETE /api/land-products/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    service::delete(id).await?;
    Ok(StatusCode::OK)
}
