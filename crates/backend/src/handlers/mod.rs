pub mod a001_user;
pub mod a002_admin;
pub mod a003_subadmin;
pub mod a004_category;
pub mod a005_subcategory;
pub mod a006_product;
pub mod a007_land;
pub mod a008_land_product;
pub mod a009_crop_plan;
pub mod a010_crop_calendar;
pub mod a011_ad;
pub mod a012_news;
pub mod a013_notification;
pub mod d400_overview;
pub mod logs;

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::collections::HashMap;
use uuid::Uuid;

use crate::shared::error::DomainError;

/// HTTP wrapper around the service error taxonomy. Every variant keeps
/// its message except Internal, which is logged and reported generically.
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            DomainError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            DomainError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            DomainError::Forbidden(message) => (StatusCode::FORBIDDEN, message),
            DomainError::Conflict(message) => (StatusCode::CONFLICT, message),
            DomainError::Internal(error) => {
                tracing::error!("Internal error: {:#}", error);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError(DomainError::Validation(message.into()))
    }
}

/// Parse a path id, mapping bad input to 400
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::validation("Invalid id"))
}

/// Text fields and file parts collected from a multipart form. Parts
/// carrying a filename are treated as uploads, everything else as text.
#[derive(Debug, Default)]
pub struct FormData {
    pub fields: HashMap<String, String>,
    pub files: Vec<(String, Vec<u8>)>,
}

impl FormData {
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned().filter(|v| !v.is_empty())
    }

    /// Take at most one uploaded file
    pub fn single_file(mut self) -> Option<(String, Vec<u8>)> {
        if self.files.is_empty() {
            None
        } else {
            Some(self.files.remove(0))
        }
    }
}

pub async fn read_form(mut multipart: Multipart) -> Result<FormData, ApiError> {
    let mut form = FormData::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::validation("Malformed multipart body"))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name() {
            Some(filename) => {
                let filename = filename.to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::validation("Failed to read uploaded file"))?;
                form.files.push((filename, bytes.to_vec()));
            }
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|_| ApiError::validation("Failed to read form field"))?;
                form.fields.insert(name, value);
            }
        }
    }

    Ok(form)
}

/// Parse a list field sent either as a JSON array or as a
/// comma-separated string.
pub fn parse_list(raw: &str) -> Vec<String> {
    if let Ok(values) = serde_json::from_str::<Vec<String>>(raw) {
        return values;
    }
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_fields_accept_json_and_csv() {
        assert_eq!(
            parse_list(r#"["Thanjavur","Madurai"]"#),
            vec!["Thanjavur".to_string(), "Madurai".to_string()]
        );
        assert_eq!(
            parse_list("Thanjavur, Madurai"),
            vec!["Thanjavur".to_string(), "Madurai".to_string()]
        );
        assert!(parse_list("").is_empty());
    }
}
