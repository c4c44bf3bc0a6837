use axum::extract::{Multipart, Path};
use axum::Json;
use contracts::domain::a001_user::aggregate::{User, UserDto};
use serde::Deserialize;

use super::{parse_id, read_form, ApiError};
use crate::domain::a001_user::service;
use crate::shared::error::DomainError;

#[derive(Debug, Deserialize)]
pub struct SyncUserRequest {
    #[serde(rename = "externalUid")]
    pub external_uid: String,
    pub email: String,
    pub username: Option<String>,
    #[serde(rename = "profileImageUrl")]
    pub profile_image_url: Option<String>,
}

/// POST /api/users/sync — first-login find-or-create
pub async fn sync(Json(request): Json<SyncUserRequest>) -> Result<Json<User>, ApiError> {
    let user = service::find_or_create(
        request.external_uid,
        request.email,
        request.username,
        request.profile_image_url,
    )
    .await?;
    Ok(Json(user))
}

/// GET /api/users
pub async fn list_all() -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(service::list_all().await?))
}

/// GET /api/users/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<User>, ApiError> {
    let id = parse_id(&id)?;
    let user = service::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("User not found"))?;
    Ok(Json(user))
}

/// GET /api/users/by-uid/:uid
pub async fn get_by_uid(Path(uid): Path<String>) -> Result<Json<User>, ApiError> {
    let user = service::get_by_external_uid(&uid)
        .await?
        .ok_or_else(|| DomainError::not_found("User not found"))?;
    Ok(Json(user))
}

/// PUT /api/users/:uid/basic-details
pub async fn update_basic_details(
    Path(uid): Path<String>,
    Json(dto): Json<UserDto>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(service::update_basic_details(&uid, dto).await?))
}

/// PUT /api/users/:uid/additional-details
pub async fn update_additional_details(
    Path(uid): Path<String>,
    Json(dto): Json<UserDto>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(service::update_additional_details(&uid, dto).await?))
}

/// POST /api/users/:uid/verify
pub async fn verify(Path(uid): Path<String>) -> Result<Json<User>, ApiError> {
    Ok(Json(service::verify(&uid).await?))
}

/// POST /api/users/:uid/profile-image (multipart)
pub async fn update_profile_image(
    Path(uid): Path<String>,
    multipart: Multipart,
) -> Result<Json<User>, ApiError> {
    let form = read_form(multipart).await?;
    let (filename, bytes) = form
        .single_file()
        .ok_or_else(|| ApiError::validation("An image file is required"))?;
    Ok(Json(service::update_profile_image(&uid, filename, bytes).await?))
}

/// POST /api/users/:id/block
pub async fn block(Path(id): Path<String>) -> Result<Json<User>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(service::set_blocked(id, true).await?))
}

/// POST /api/users/:id/unblock
pub async fn unblock(Path(id): Path<String>) -> Result<Json<User>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(service::set_blocked(id, false).await?))
}
