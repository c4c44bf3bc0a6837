use contracts::domain::a004_category::aggregate::Category;
use uuid::Uuid;

use super::repository;
use crate::shared::error::{DomainError, DomainResult};
use crate::shared::media;

pub async fn create(name: String, image: Option<(String, Vec<u8>)>) -> DomainResult<Category> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("Category name is required"));
    }

    let code = format!("CAT-{}", &Uuid::new_v4().simple().to_string()[..8].to_uppercase());
    let mut aggregate = Category::new_for_insert(code, name);

    if let Some((filename, bytes)) = image {
        let asset = media::client().upload(&filename, bytes).await?;
        aggregate.image_url = Some(asset.url);
        aggregate.image_ref = Some(asset.asset_ref);
    }

    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await?;
    Ok(aggregate)
}

pub async fn update(
    id: Uuid,
    name: Option<String>,
    image: Option<(String, Vec<u8>)>,
) -> DomainResult<Category> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Category not found"))?;

    if let Some(name) = name {
        aggregate.base.description = name;
    }

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

pub async fn delete(id: Uuid) -> DomainResult<()> {
    let existing = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Category not found"))?;

    if let Some(ref image_ref) = existing.image_ref {
        media::client().delete_best_effort(image_ref).await;
    }

    repository::soft_delete(id).await?;
    Ok(())
}

pub async fn get_by_id(id: Uuid) -> DomainResult<Option<Category>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> DomainResult<Vec<Category>> {
    Ok(repository::list_all().await?)
}
