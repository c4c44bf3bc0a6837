use axum::Json;
use contracts::domain::a002_admin::aggregate::{Admin, AdminDto};
use serde_json::json;

use super::ApiError;
use crate::domain::a002_admin::service;

/// POST /api/admins/register
pub async fn register(Json(dto): Json<AdminDto>) -> Result<Json<serde_json::Value>, ApiError> {
    let admin = service::register(dto).await?;
    Ok(Json(json!({ "message": "Admin registered", "admin": admin })))
}

/// GET /api/admins
pub async fn list_all() -> Result<Json<Vec<Admin>>, ApiError> {
    Ok(Json(service::list_all().await?))
}
