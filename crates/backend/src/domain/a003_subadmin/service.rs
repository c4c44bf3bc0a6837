use contracts::domain::a003_subadmin::aggregate::{Subadmin, SubadminDto};
use uuid::Uuid;

use super::repository;
use crate::shared::error::{DomainError, DomainResult};
use crate::shared::media;
use crate::system::auth::password;

/// Create a new subadmin. `image` is the raw upload from the multipart
/// request, already read into memory by the handler.
pub async fn create(dto: SubadminDto, image: Option<(String, Vec<u8>)>) -> DomainResult<Subadmin> {
    let name = dto.name.clone().unwrap_or_default();
    let email = dto.email.clone().unwrap_or_default();
    let plain_password = dto.password.clone().unwrap_or_default();

    if name.trim().is_empty() || email.trim().is_empty() || plain_password.is_empty() {
        return Err(DomainError::validation("name, email and password are required"));
    }

    if repository::get_by_email(&email).await?.is_some() {
        return Err(DomainError::conflict("Subadmin already exists"));
    }

    password::validate_password_strength(&plain_password)
        .map_err(|e| DomainError::validation(e.to_string()))?;
    let hash = password::hash_password(&plain_password)?;

    let code = format!("SUB-{}", &Uuid::new_v4().simple().to_string()[..8].to_uppercase());
    let mut aggregate = Subadmin::new_for_insert(code, name, email);
    aggregate.update(&dto);

    if let Some((filename, bytes)) = image {
        let asset = media::client().upload(&filename, bytes).await?;
        aggregate.image_url = Some(asset.url);
        aggregate.image_ref = Some(asset.asset_ref);
    }

    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate, &hash).await?;
    Ok(aggregate)
}

/// Update a subadmin. A new image replaces the stored one; the old asset
/// is removed from the media host best-effort.
pub async fn update(
    id: Uuid,
    dto: SubadminDto,
    image: Option<(String, Vec<u8>)>,
) -> DomainResult<Subadmin> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Subadmin not found"))?;

    aggregate.update(&dto);

    if let Some((filename, bytes)) = image {
        if let Some(ref old_ref) = aggregate.image_ref {
            media::client().delete_best_effort(old_ref).await;
        }
        let asset = media::client().upload(&filename, bytes).await?;
        aggregate.image_url = Some(asset.url);
        aggregate.image_ref = Some(asset.asset_ref);
    }

    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await?;
    Ok(aggregate)
}

/// Delete a subadmin, removing its avatar from the media host
pub async fn delete(id: Uuid) -> DomainResult<()> {
    let existing = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Subadmin not found"))?;

    if let Some(ref image_ref) = existing.image_ref {
        media::client().delete_best_effort(image_ref).await;
    }

    repository::delete(id).await?;
    Ok(())
}

/// Check login credentials; returns the subadmin when they match
pub async fn verify_credentials(
    email: &str,
    plain_password: &str,
) -> DomainResult<Option<Subadmin>> {
    let Some((subadmin, hash)) = repository::get_by_email_with_hash(email).await? else {
        return Ok(None);
    };

    if password::verify_password(plain_password, &hash)? {
        Ok(Some(subadmin))
    } else {
        Ok(None)
    }
}

pub async fn get_by_id(id: Uuid) -> DomainResult<Option<Subadmin>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> DomainResult<Vec<Subadmin>> {
    Ok(repository::list_all().await?)
}
