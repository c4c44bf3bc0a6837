use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a007_land::aggregate::{Land, LandDto};

use super::{parse_id, ApiError};
use crate::domain::a007_land::service;
use crate::shared::error::DomainError;

/// POST /api/lands
pub async fn create(Json(dto): Json<LandDto>) -> Result<Json<Land>, ApiError> {
    Ok(Json(service::create(dto).await?))
}

/// GET /api/lands/by-user/:user_id
pub async fn list_by_user(Path(user_id): Path<String>) -> Result<Json<Vec<Land>>, ApiError> {
    parse_id(&user_id)?;
    Ok(Json(service::list_by_user(&user_id).await?))
}

/// GET /api/lands/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Land>, ApiError> {
    let id = parse_id(&id)?;
    let land = service::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Land not found"))?;
    Ok(Json(land))
}

/// PUT /api/lands/:id
pub async fn update(
    Path(id): Path<String>,
    Json(dto): Json<LandDto>,
) -> Result<Json<Land>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(service::update(id, dto).await?))
}

/// DELETE /api/lands/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    service::delete(id).await?;
    Ok(StatusCode::OK)
}
