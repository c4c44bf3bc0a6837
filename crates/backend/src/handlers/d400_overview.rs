use axum::Json;
use contracts::dashboards::d400_overview::OverviewStats;

use super::ApiError;
use crate::dashboards::d400_overview::service;

/// GET /api/d400/overview
pub async fn get_overview() -> Result<Json<OverviewStats>, ApiError> {
    Ok(Json(service::overview().await?))
}
