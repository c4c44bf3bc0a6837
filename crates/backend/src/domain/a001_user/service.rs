use contracts::domain::a001_user::aggregate::{User, UserDto};
use uuid::Uuid;

use super::repository;
use crate::shared::error::{DomainError, DomainResult};
use crate::shared::media;

/// First-login entry point: returns the existing profile for the identity
/// or creates a fresh one.
pub async fn find_or_create(
    external_uid: String,
    email: String,
    username: Option<String>,
    profile_image_url: Option<String>,
) -> DomainResult<User> {
    if external_uid.trim().is_empty() || email.trim().is_empty() {
        return Err(DomainError::validation("externalUid and email are required"));
    }

    if let Some(existing) = repository::get_by_external_uid(&external_uid).await? {
        return Ok(existing);
    }

    let code = format!("USR-{}", &Uuid::new_v4().simple().to_string()[..8].to_uppercase());
    let username = username.unwrap_or_else(|| email.clone());
    let mut aggregate =
        User::new_for_insert(code, username, external_uid, email, profile_image_url);

    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await?;
    Ok(aggregate)
}

/// Profile step 1: contact and locality basics. Mobile numbers are unique
/// across identities.
pub async fn update_basic_details(external_uid: &str, dto: UserDto) -> DomainResult<User> {
    let mut user = repository::get_by_external_uid(external_uid)
        .await?
        .ok_or_else(|| DomainError::not_found("User not found"))?;

    if let Some(ref mobile) = dto.mobile {
        if repository::is_mobile_taken_by_other(mobile, external_uid).await? {
            return Err(DomainError::conflict("Mobile number already in use"));
        }
        user.mobile = Some(mobile.clone());
    }
    if dto.district.is_some() {
        user.district = dto.district.clone();
    }
    if dto.profession.is_some() {
        user.profession = dto.profession.clone();
    }
    if dto.age.is_some() {
        user.age = dto.age;
    }

    user.before_write();
    repository::update(&user).await?;
    Ok(user)
}

/// Profile step 2: administrative locality details
pub async fn update_additional_details(external_uid: &str, dto: UserDto) -> DomainResult<User> {
    let mut user = repository::get_by_external_uid(external_uid)
        .await?
        .ok_or_else(|| DomainError::not_found("User not found"))?;

    if dto.taluk.is_some() {
        user.taluk = dto.taluk.clone();
    }
    if dto.village.is_some() {
        user.village = dto.village.clone();
    }
    if dto.panchayat.is_some() {
        user.panchayat = dto.panchayat.clone();
    }

    user.before_write();
    repository::update(&user).await?;
    Ok(user)
}

/// Mark the identity as OTP-verified
pub async fn verify(external_uid: &str) -> DomainResult<User> {
    let mut user = repository::get_by_external_uid(external_uid)
        .await?
        .ok_or_else(|| DomainError::not_found("User not found"))?;

    user.is_verified = true;
    user.before_write();
    repository::update(&user).await?;
    Ok(user)
}

/// Replace the profile image; the previous asset is removed best-effort
pub async fn update_profile_image(
    external_uid: &str,
    filename: String,
    bytes: Vec<u8>,
) -> DomainResult<User> {
    let mut user = repository::get_by_external_uid(external_uid)
        .await?
        .ok_or_else(|| DomainError::not_found("User not found"))?;

    if let Some(ref old_ref) = user.profile_image_ref {
        media::client().delete_best_effort(old_ref).await;
    }

    let asset = media::client().upload(&filename, bytes).await?;
    user.profile_image_url = Some(asset.url);
    user.profile_image_ref = Some(asset.asset_ref);

    user.before_write();
    repository::update(&user).await?;
    Ok(user)
}

pub async fn set_blocked(id: Uuid, blocked: bool) -> DomainResult<User> {
    let mut user = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("User not found"))?;

    user.is_blocked = blocked;
    user.before_write();
    repository::update(&user).await?;
    Ok(user)
}

pub async fn get_by_id(id: Uuid) -> DomainResult<Option<User>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn get_by_external_uid(external_uid: &str) -> DomainResult<Option<User>> {
    Ok(repository::get_by_external_uid(external_uid).await?)
}

pub async fn list_all() -> DomainResult<Vec<User>> {
    Ok(repository::list_all().await?)
}

/// Load a user and refuse the caller when the account is blocked.
/// Shared guard for every operation a blocked user must not perform.
pub async fn require_active(id: Uuid) -> DomainResult<User> {
    let user = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("User not found"))?;

    if user.is_blocked {
        return Err(DomainError::forbidden("User is blocked. Action not allowed."));
    }
    Ok(user)
}
