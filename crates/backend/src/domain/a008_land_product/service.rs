use contracts::domain::a008_land_product::aggregate::{
    LandProduct, LandProductDetails, LandProductDto,
};
use sea_orm::TransactionTrait;
use uuid::Uuid;

use super::repository;
use crate::domain::capacity::{capacity_error, exceeds_capacity};
use crate::domain::{a001_user, a006_product, a007_land};
use crate::shared::data::db::get_connection;
use crate::shared::error::{DomainError, DomainResult};

const ALLOWED_CATEGORIES: [&str; 3] = ["Food", "Machinery", "Animal"];

/// Create a land-product allocation. The Food-acreage capacity check and
/// the insert run in one transaction so concurrent allocations against
/// the same land cannot both slip past the limit.
pub async fn create(dto: LandProductDto) -> DomainResult<LandProduct> {
    let user_id =
        Uuid::parse_str(&dto.user_ref).map_err(|_| DomainError::validation("Invalid userRef"))?;
    a001_user::service::require_active(user_id).await?;

    let land_id =
        Uuid::parse_str(&dto.land_ref).map_err(|_| DomainError::validation("Invalid landRef"))?;
    if a007_land::repository::get_by_id(land_id).await?.is_none() {
        return Err(DomainError::not_found("Land not found"));
    }

    let product_id = Uuid::parse_str(&dto.product_ref)
        .map_err(|_| DomainError::validation("Invalid productRef"))?;
    let (product, category_name) = a006_product::service::get_with_category_name(product_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Product not found"))?;

    if !ALLOWED_CATEGORIES.contains(&category_name.as_str()) {
        return Err(DomainError::validation(
            "Only Food, Machinery and Animal category products are allowed",
        ));
    }
    if dto.details.category_name() != category_name {
        return Err(DomainError::validation(format!(
            "Details do not match product category ({})",
            category_name
        )));
    }
    dto.details.validate().map_err(DomainError::Validation)?;

    if repository::exists(&dto.user_ref, &dto.land_ref, &dto.product_ref).await? {
        return Err(DomainError::conflict(
            "This product is already placed on the selected land",
        ));
    }

    let code = format!("LPR-{}", &Uuid::new_v4().simple().to_string()[..8].to_uppercase());
    let mut aggregate = LandProduct::new_for_insert(
        code,
        product.base.description.clone(),
        dto.user_ref,
        dto.land_ref,
        dto.product_ref,
        dto.details,
    );
    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    let requested = aggregate.details.consumed_acres();
    let txn = get_connection().begin().await?;

    // Re-read the committed total inside the transaction; the land row is
    // re-read too so the capacity reflects the current farm_size.
    let land_in_txn = a007_land::repository::get_by_id_in(&txn, land_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Land not found"))?;
    let committed = repository::total_food_acres_in(&txn, &aggregate.land_ref, None).await?;

    if requested > 0.0 && exceeds_capacity(committed, requested, land_in_txn.farm_size) {
        return Err(DomainError::validation(capacity_error(
            committed,
            requested,
            land_in_txn.farm_size,
        )));
    }

    repository::insert_in(&txn, &aggregate).await?;
    txn.commit().await.map_err(DomainError::from)?;

    Ok(aggregate)
}

/// Update the details payload of an allocation. The user, land, product
/// and category are frozen after creation.
pub async fn update(id: Uuid, details: LandProductDetails) -> DomainResult<LandProduct> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Land product not found"))?;

    let user_id = Uuid::parse_str(&aggregate.user_ref)
        .map_err(|_| DomainError::validation("Invalid userRef on land product"))?;
    a001_user::service::require_active(user_id).await?;

    if details.category_name() != aggregate.details.category_name() {
        return Err(DomainError::validation(
            "Category of a land product cannot be changed",
        ));
    }
    details.validate().map_err(DomainError::Validation)?;

    aggregate.details = details;
    aggregate.before_write();

    let land_id = Uuid::parse_str(&aggregate.land_ref)
        .map_err(|_| DomainError::validation("Invalid landRef on land product"))?;
    let requested = aggregate.details.consumed_acres();

    let txn = get_connection().begin().await?;

    let land = a007_land::repository::get_by_id_in(&txn, land_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Land not found"))?;
    let committed =
        repository::total_food_acres_in(&txn, &aggregate.land_ref, Some(id)).await?;

    if requested > 0.0 && exceeds_capacity(committed, requested, land.farm_size) {
        return Err(DomainError::validation(capacity_error(
            committed,
            requested,
            land.farm_size,
        )));
    }

    repository::update_in(&txn, &aggregate).await?;
    txn.commit().await.map_err(DomainError::from)?;

    Ok(aggregate)
}

pub async fn delete(id: Uuid) -> DomainResult<()> {
    let existing = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Land product not found"))?;

    let user_id = Uuid::parse_str(&existing.user_ref)
        .map_err(|_| DomainError::validation("Invalid userRef on land product"))?;
    a001_user::service::require_active(user_id).await?;

    repository::delete(id).await?;
    Ok(())
}

pub async fn get_by_id(id: Uuid) -> DomainResult<Option<LandProduct>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_by_land(user_ref: &str, land_ref: &str) -> DomainResult<Vec<LandProduct>> {
    Ok(repository::list_by_land(user_ref, land_ref).await?)
}

pub async fn list_by_user(
    user_ref: &str,
    category: Option<&str>,
) -> DomainResult<Vec<LandProduct>> {
    Ok(repository::list_by_user(user_ref, category).await?)
}
