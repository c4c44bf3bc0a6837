use axum::extract::Query;
use axum::Json;
use contracts::domain::a013_notification::dto::{
    DeviceToken, DispatchOutcome, NotificationLog, SaveTokenRequest, SendTargetedRequest,
    SendToAllRequest,
};
use serde::Deserialize;

use super::ApiError;
use crate::domain::a013_notification::service;

/// POST /api/notifications/token
pub async fn save_token(
    Json(request): Json<SaveTokenRequest>,
) -> Result<Json<DeviceToken>, ApiError> {
    Ok(Json(service::save_token(request).await?))
}

/// POST /api/notifications/send-to-all
pub async fn send_to_all(
    Json(request): Json<SendToAllRequest>,
) -> Result<Json<DispatchOutcome>, ApiError> {
    Ok(Json(service::send_to_all(request).await?))
}

/// POST /api/notifications/send-targeted
pub async fn send_targeted(
    Json(request): Json<SendTargetedRequest>,
) -> Result<Json<DispatchOutcome>, ApiError> {
    Ok(Json(service::send_targeted(request).await?))
}

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// GET /api/notifications/logs
pub async fn list_logs(
    Query(query): Query<LogsQuery>,
) -> Result<Json<Vec<NotificationLog>>, ApiError> {
    let limit = query.limit.unwrap_or(50);
    let offset = query.offset.unwrap_or(0);
    Ok(Json(service::list_logs(limit, offset).await?))
}
