use axum::http::StatusCode;
use axum::Json;
use contracts::shared::logger::{CreateLogRequest, LogEntry};

use crate::shared::logger::repository;

/// GET /api/logs
pub async fn list_all() -> Result<Json<Vec<LogEntry>>, StatusCode> {
    match repository::get_all_logs().await {
        Ok(logs) => Ok(Json(logs)),
        Err(e) => {
            tracing::error!("Failed to list logs: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/logs
pub async fn create(Json(request): Json<CreateLogRequest>) -> StatusCode {
    match repository::log_event(&request.source, &request.category, &request.message).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Failed to write log entry: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// DELETE /api/logs
pub async fn clear_all() -> StatusCode {
    match repository::clear_all_logs().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Failed to clear logs: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
