use contracts::domain::a009_crop_plan::aggregate::{CropPlan, CropPlanDto};
use sea_orm::TransactionTrait;
use uuid::Uuid;

use super::repository;
use crate::domain::capacity::{capacity_error, exceeds_capacity};
use crate::domain::{a001_user, a006_product, a007_land};
use crate::shared::data::db::get_connection;
use crate::shared::error::{DomainError, DomainResult};

/// The land must exist and belong to the planning user
async fn require_owned_land(
    land_ref: &str,
    user_ref: &str,
) -> DomainResult<contracts::domain::a007_land::aggregate::Land> {
    let land_id =
        Uuid::parse_str(land_ref).map_err(|_| DomainError::validation("Invalid landRef"))?;
    let land = a007_land::repository::get_by_id(land_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Land not found"))?;

    if land.user_ref != user_ref {
        return Err(DomainError::forbidden(
            "Selected land does not belong to this user",
        ));
    }
    Ok(land)
}

/// Create a crop plan. The per-land area total is re-read and the row
/// inserted inside one transaction, so two concurrent plans cannot both
/// pass the capacity check.
pub async fn create(dto: CropPlanDto) -> DomainResult<CropPlan> {
    let user_ref = dto.user_ref.clone().unwrap_or_default();
    let land_ref = dto.land_ref.clone().unwrap_or_default();
    let product_ref = dto.product_ref.clone().unwrap_or_default();
    let area_acres = dto
        .area_acres
        .ok_or_else(|| DomainError::validation("areaAcres is required"))?;
    let planning_date = dto
        .planning_date
        .clone()
        .ok_or_else(|| DomainError::validation("planningDate is required"))?;

    if user_ref.trim().is_empty() || land_ref.trim().is_empty() || product_ref.trim().is_empty() {
        return Err(DomainError::validation(
            "userRef, landRef and productRef are required",
        ));
    }

    let user_id =
        Uuid::parse_str(&user_ref).map_err(|_| DomainError::validation("Invalid userRef"))?;
    a001_user::service::require_active(user_id).await?;

    require_owned_land(&land_ref, &user_ref).await?;

    let product_id = Uuid::parse_str(&product_ref)
        .map_err(|_| DomainError::validation("Invalid productRef"))?;
    let product = a006_product::repository::get_by_id(product_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Product not found"))?;

    if repository::exists_product_under_land(&land_ref, &product_ref, None).await? {
        return Err(DomainError::conflict(
            "This product is already planned for the selected land",
        ));
    }

    let code = format!("CPL-{}", &Uuid::new_v4().simple().to_string()[..8].to_uppercase());
    let mut aggregate = CropPlan::new_for_insert(
        code,
        product.base.description.clone(),
        user_ref,
        land_ref,
        product_ref,
        area_acres,
        planning_date,
    );
    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    let land_id = Uuid::parse_str(&aggregate.land_ref)
        .map_err(|_| DomainError::validation("Invalid landRef"))?;
    let txn = get_connection().begin().await?;

    let land = a007_land::repository::get_by_id_in(&txn, land_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Land not found"))?;
    let committed = repository::total_area_in(&txn, &aggregate.land_ref, None).await?;

    if exceeds_capacity(committed, aggregate.area_acres, land.farm_size) {
        return Err(DomainError::validation(capacity_error(
            committed,
            aggregate.area_acres,
            land.farm_size,
        )));
    }

    repository::insert_in(&txn, &aggregate).await?;
    txn.commit().await.map_err(DomainError::from)?;

    Ok(aggregate)
}

/// Update a crop plan, re-running the duplicate and capacity checks
/// against the effective (merged) row.
pub async fn update(id: Uuid, dto: CropPlanDto) -> DomainResult<CropPlan> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Crop plan not found"))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(DomainError::Validation)?;

    let user_id = Uuid::parse_str(&aggregate.user_ref)
        .map_err(|_| DomainError::validation("Invalid userRef"))?;
    a001_user::service::require_active(user_id).await?;

    require_owned_land(&aggregate.land_ref, &aggregate.user_ref).await?;

    if repository::exists_product_under_land(&aggregate.land_ref, &aggregate.product_ref, Some(id))
        .await?
    {
        return Err(DomainError::conflict(
            "This product is already planned for the selected land",
        ));
    }

    aggregate.before_write();

    let land_id = Uuid::parse_str(&aggregate.land_ref)
        .map_err(|_| DomainError::validation("Invalid landRef"))?;
    let txn = get_connection().begin().await?;

    let land = a007_land::repository::get_by_id_in(&txn, land_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Land not found"))?;
    let committed = repository::total_area_in(&txn, &aggregate.land_ref, Some(id)).await?;

    if exceeds_capacity(committed, aggregate.area_acres, land.farm_size) {
        return Err(DomainError::validation(capacity_error(
            committed,
            aggregate.area_acres,
            land.farm_size,
        )));
    }

    repository::update_in(&txn, &aggregate).await?;
    txn.commit().await.map_err(DomainError::from)?;

    Ok(aggregate)
}

pub async fn delete(id: Uuid) -> DomainResult<()> {
    if repository::get_by_id(id).await?.is_none() {
        return Err(DomainError::not_found("Crop plan not found"));
    }
    repository::delete(id).await?;
    Ok(())
}

pub async fn get_by_id(id: Uuid) -> DomainResult<Option<CropPlan>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_by_user(user_ref: &str) -> DomainResult<Vec<CropPlan>> {
    Ok(repository::list_by_user(user_ref).await?)
}
