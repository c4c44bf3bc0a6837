use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a009_crop_plan::aggregate::{CropPlan, CropPlanDto};

use super::{parse_id, ApiError};
use crate::domain::a009_crop_plan::service;
use crate::shared::error::DomainError;

/// POST /api/crop-plans
pub async fn create(Json(dto): Json<CropPlanDto>) -> Result<Json<CropPlan>, ApiError> {
    Ok(Json(service::create(dto).await?))
}

/// GET /api/crop-plans/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<CropPlan>, ApiError> {
    let id = parse_id(&id)?;
    let plan = service::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Crop plan not found"))?;
    Ok(Json(plan))
}

/// GET /api/crop-plans/by-user/:user_id
pub async fn list_by_user(Path(user_id): Path<String>) -> Result<Json<Vec<CropPlan>>, ApiError> {
    parse_id(&user_id)?;
    Ok(Json(service::list_by_user(&user_id).await?))
}

/// PUT /api/crop-plans/:id
pub async fn update(
    Path(id): Path<String>,
    Json(dto): Json<CropPlanDto>,
) -> Result<Json<CropPlan>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(service::update(id, dto).await?))
}

/// DELETE /api/crop-plans/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    service::delete(id).await?;
    Ok(StatusCode::OK)
}
