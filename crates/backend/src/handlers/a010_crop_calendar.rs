use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a010_crop_calendar::aggregate::{CropCalendar, CropCalendarDto};

use super::{parse_id, ApiError};
use crate::domain::a010_crop_calendar::service;
use crate::shared::error::DomainError;

/// POST /api/crop-calendars
pub async fn create(Json(dto): Json<CropCalendarDto>) -> Result<Json<CropCalendar>, ApiError> {
    Ok(Json(service::create(dto).await?))
}

/// GET /api/crop-calendars
pub async fn list_all() -> Result<Json<Vec<CropCalendar>>, ApiError> {
    Ok(Json(service::list_all().await?))
}

/// GET /api/crop-calendars/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<CropCalendar>, ApiError> {
    let id = parse_id(&id)?;
    let calendar = service::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Crop calendar not found"))?;
    Ok(Json(calendar))
}

/// GET /api/crop-calendars/by-product/:product_id
pub async fn list_by_product(
    Path(product_id): Path<String>,
) -> Result<Json<Vec<CropCalendar>>, ApiError> {
    parse_id(&product_id)?;
    Ok(Json(service::list_by_product(&product_id).await?))
}

/// PUT /api/crop-calendars/:id
pub async fn update(
    Path(id): Path<String>,
    Json(dto): Json<CropCalendarDto>,
) -> Result<Json<CropCalendar>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(service::update(id, dto).await?))
}

/// DELETE /api/crop-calendars/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    service::delete(id).await?;
    Ok(StatusCode::OK)
}
