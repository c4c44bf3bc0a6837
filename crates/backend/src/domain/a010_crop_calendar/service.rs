use contracts::domain::a010_crop_calendar::aggregate::{CropCalendar, CropCalendarDto};
use uuid::Uuid;

use super::repository;
use crate::domain::{a005_subcategory, a006_product};
use crate::shared::error::{DomainError, DomainResult};

pub async fn create(dto: CropCalendarDto) -> DomainResult<CropCalendar> {
    let subcategory_ref = dto.subcategory_ref.clone().unwrap_or_default();
    let product_ref = dto.product_ref.clone().unwrap_or_default();

    if subcategory_ref.trim().is_empty() || product_ref.trim().is_empty() {
        return Err(DomainError::validation(
            "subcategoryRef and productRef are required",
        ));
    }

    let subcategory_id = Uuid::parse_str(&subcategory_ref)
        .map_err(|_| DomainError::validation("Invalid subcategoryRef"))?;
    if a005_subcategory::repository::get_by_id(subcategory_id).await?.is_none() {
        return Err(DomainError::not_found("Subcategory not found"));
    }

    let product_id = Uuid::parse_str(&product_ref)
        .map_err(|_| DomainError::validation("Invalid productRef"))?;
    let product = a006_product::repository::get_by_id(product_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Product not found"))?;

    let code = format!("CAL-{}", &Uuid::new_v4().simple().to_string()[..8].to_uppercase());
    let mut aggregate = CropCalendar::new_for_insert(
        code,
        product.base.description.clone(),
        subcategory_ref,
        product_ref,
    );
    aggregate.update(&dto);

    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await?;
    Ok(aggregate)
}

pub async fn update(id: Uuid, dto: CropCalendarDto) -> DomainResult<CropCalendar> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Crop calendar not found"))?;

    aggregate.update(&dto);

    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await?;
    Ok(aggregate)
}

pub async fn delete(id: Uuid) -> DomainResult<()> {
    if repository::get_by_id(id).await?.is_none() {
        return Err(DomainError::not_found("Crop calendar not found"));
    }
    repository::delete(id).await?;
    Ok(())
}

pub async fn get_by_id(id: Uuid) -> DomainResult<Option<CropCalendar>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> DomainResult<Vec<CropCalendar>> {
    Ok(repository::list_all().await?)
}

pub async fn list_by_product(product_ref: &str) -> DomainResult<Vec<CropCalendar>> {
    Ok(repository::list_by_product(product_ref).await?)
}
