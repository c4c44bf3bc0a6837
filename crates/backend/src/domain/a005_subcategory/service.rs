use contracts::domain::a005_subcategory::aggregate::{Subcategory, SubcategoryDto};
use uuid::Uuid;

use super::repository;
use crate::domain::a004_category;
use crate::shared::error::{DomainError, DomainResult};

pub async fn create(dto: SubcategoryDto) -> DomainResult<Subcategory> {
    let name = dto.name.clone().unwrap_or_default();
    let category_ref = dto.category_ref.clone().unwrap_or_default();

    if name.trim().is_empty() || category_ref.trim().is_empty() {
        return Err(DomainError::validation("name and categoryRef are required"));
    }

    let category_id = Uuid::parse_str(&category_ref)
        .map_err(|_| DomainError::validation("Invalid categoryRef"))?;
    if a004_category::repository::get_by_id(category_id).await?.is_none() {
        return Err(DomainError::not_found("Category not found"));
    }

    let code = format!("SCA-{}", &Uuid::new_v4().simple().to_string()[..8].to_uppercase());
    let mut aggregate = Subcategory::new_for_insert(code, name, category_ref);

    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await?;
    Ok(aggregate)
}

pub async fn update(id: Uuid, dto: SubcategoryDto) -> DomainResult<Subcategory> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Subcategory not found"))?;

    if let Some(name) = dto.name {
        aggregate.base.description = name;
    }
    if let Some(category_ref) = dto.category_ref {
        let category_id = Uuid::parse_str(&category_ref)
            .map_err(|_| DomainError::validation("Invalid categoryRef"))?;
        if a004_category::repository::get_by_id(category_id).await?.is_none() {
            return Err(DomainError::not_found("Category not found"));
        }
        aggregate.category_ref = category_ref;
    }

    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    repository::update(&aggregate).await?;
    Ok(aggregate)
}

pub async fn delete(id: Uuid) -> DomainResult<()> {
    if repository::get_by_id(id).await?.is_none() {
        return Err(DomainError::not_found("Subcategory not found"));
    }
    repository::soft_delete(id).await?;
    Ok(())
}

pub async fn get_by_id(id: Uuid) -> DomainResult<Option<Subcategory>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> DomainResult<Vec<Subcategory>> {
    Ok(repository::list_all().await?)
}

pub async fn list_by_category(category_ref: &str) -> DomainResult<Vec<Subcategory>> {
    Ok(repository::list_by_category(category_ref).await?)
}
