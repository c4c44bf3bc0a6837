use axum::extract::{Multipart, Path};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a003_subadmin::aggregate::{Subadmin, SubadminDto};

use super::{parse_id, parse_list, read_form, ApiError, FormData};
use crate::domain::a003_subadmin::service;
use crate::shared::error::DomainError;

fn dto_from_form(form: &FormData) -> SubadminDto {
    SubadminDto {
        name: form.text("name"),
        email: form.text("email"),
        password: form.text("password"),
        number: form.text("number").or_else(|| form.text("phone")),
        qualification: form.text("qualification"),
        address: form.text("address"),
        districts: form.text("districts").map(|raw| parse_list(&raw)),
        page_access: form.text("pageAccess").map(|raw| parse_list(&raw)),
    }
}

/// POST /api/subadmins (multipart)
pub async fn create(multipart: Multipart) -> Result<Json<Subadmin>, ApiError> {
    let form = read_form(multipart).await?;
    let dto = dto_from_form(&form);
    let subadmin = service::create(dto, form.single_file()).await?;
    Ok(Json(subadmin))
}

/// GET /api/subadmins
pub async fn list_all() -> Result<Json<Vec<Subadmin>>, ApiError> {
    Ok(Json(service::list_all().await?))
}

/// GET /api/subadmins/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Subadmin>, ApiError> {
    let id = parse_id(&id)?;
    let subadmin = service::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Subadmin not found"))?;
    Ok(Json(subadmin))
}

/// PUT /api/subadmins/:id (multipart)
pub async fn update(
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Subadmin>, ApiError> {
    let id = parse_id(&id)?;
    let form = read_form(multipart).await?;
    let dto = dto_from_form(&form);
    let subadmin = service::update(id, dto, form.single_file()).await?;
    Ok(Json(subadmin))
}

/// DELETE /api/subadmins/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    service::delete(id).await?;
    Ok(StatusCode::OK)
}
