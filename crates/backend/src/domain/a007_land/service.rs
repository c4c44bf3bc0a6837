use contracts::domain::a007_land::aggregate::{Land, LandDto};
use uuid::Uuid;

use super::repository;
use crate::domain::a001_user;
use crate::shared::error::{DomainError, DomainResult};

pub async fn create(dto: LandDto) -> DomainResult<Land> {
    let user_ref = dto.user_ref.clone().unwrap_or_default();
    let land_name = dto.land_name.clone().unwrap_or_default();
    let farm_size = dto
        .farm_size
        .ok_or_else(|| DomainError::validation("farmSize is required"))?;

    if user_ref.trim().is_empty() || land_name.trim().is_empty() {
        return Err(DomainError::validation("userRef and landName are required"));
    }

    let user_id =
        Uuid::parse_str(&user_ref).map_err(|_| DomainError::validation("Invalid userRef"))?;
    a001_user::service::require_active(user_id).await?;

    let code = format!("LND-{}", &Uuid::new_v4().simple().to_string()[..8].to_uppercase());
    let mut aggregate = Land::new_for_insert(code, land_name, user_ref, farm_size);
    aggregate.update(&dto);

    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await?;
    Ok(aggregate)
}

pub async fn update(id: Uuid, dto: LandDto) -> DomainResult<Land> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Land not found"))?;

    let user_id = Uuid::parse_str(&aggregate.user_ref)
        .map_err(|_| DomainError::validation("Invalid userRef on land"))?;
    a001_user::service::require_active(user_id).await?;

    aggregate.update(&dto);

    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await?;
    Ok(aggregate)
}

pub async fn delete(id: Uuid) -> DomainResult<()> {
    let existing = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Land not found"))?;

    let user_id = Uuid::parse_str(&existing.user_ref)
        .map_err(|_| DomainError::validation("Invalid userRef on land"))?;
    a001_user::service::require_active(user_id).await?;

    repository::delete(id).await?;
    Ok(())
}

pub async fn get_by_id(id: Uuid) -> DomainResult<Option<Land>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_by_user(user_ref: &str) -> DomainResult<Vec<Land>> {
    Ok(repository::list_by_user(user_ref).await?)
}
