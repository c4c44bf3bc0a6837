use contracts::domain::a002_admin::aggregate::{Admin, AdminDto};
use uuid::Uuid;

use super::repository;
use crate::shared::error::{DomainError, DomainResult};
use crate::system::auth::password;

/// Register a new administrator
pub async fn register(dto: AdminDto) -> DomainResult<Admin> {
    if dto.name.trim().is_empty() || dto.email.trim().is_empty() || dto.password.is_empty() {
        return Err(DomainError::validation("name, email and password are required"));
    }

    if repository::get_by_email(&dto.email).await?.is_some() {
        return Err(DomainError::conflict("Admin already exists"));
    }

    password::validate_password_strength(&dto.password)
        .map_err(|e| DomainError::validation(e.to_string()))?;
    let hash = password::hash_password(&dto.password)?;

    let code = format!("ADM-{}", &Uuid::new_v4().simple().to_string()[..8].to_uppercase());
    let mut aggregate = Admin::new_for_insert(code, dto.name, dto.email);

    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate, &hash).await?;
    Ok(aggregate)
}

/// Check login credentials; returns the admin when they match
pub async fn verify_credentials(email: &str, plain_password: &str) -> DomainResult<Option<Admin>> {
    let Some((admin, hash)) = repository::get_by_email_with_hash(email).await? else {
        return Ok(None);
    };

    if password::verify_password(plain_password, &hash)? {
        Ok(Some(admin))
    } else {
        Ok(None)
    }
}

pub async fn get_by_id(id: Uuid) -> DomainResult<Option<Admin>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> DomainResult<Vec<Admin>> {
    Ok(repository::list_all().await?)
}
