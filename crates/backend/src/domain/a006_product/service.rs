use contracts::domain::a006_product::aggregate::{Product, ProductDto};
use uuid::Uuid;

use super::repository;
use crate::domain::{a004_category, a005_subcategory};
use crate::shared::error::{DomainError, DomainResult};
use crate::shared::media;

async fn require_refs(category_ref: &str, subcategory_ref: &str) -> DomainResult<()> {
    let category_id = Uuid::parse_str(category_ref)
        .map_err(|_| DomainError::validation("Invalid categoryRef"))?;
    if a004_category::repository::get_by_id(category_id).await?.is_none() {
        return Err(DomainError::not_found("Category not found"));
    }

    let subcategory_id = Uuid::parse_str(subcategory_ref)
        .map_err(|_| DomainError::validation("Invalid subcategoryRef"))?;
    if a005_subcategory::repository::get_by_id(subcategory_id).await?.is_none() {
        return Err(DomainError::not_found("Subcategory not found"));
    }
    Ok(())
}

pub async fn create(dto: ProductDto, image: Option<(String, Vec<u8>)>) -> DomainResult<Product> {
    let name = dto.name.clone().unwrap_or_default();
    let category_ref = dto.category_ref.clone().unwrap_or_default();
    let subcategory_ref = dto.subcategory_ref.clone().unwrap_or_default();

    if name.trim().is_empty() || category_ref.trim().is_empty() || subcategory_ref.trim().is_empty()
    {
        return Err(DomainError::validation(
            "name, categoryRef and subcategoryRef are required",
        ));
    }

    require_refs(&category_ref, &subcategory_ref).await?;

    let code = format!("PRD-{}", &Uuid::new_v4().simple().to_string()[..8].to_uppercase());
    let mut aggregate = Product::new_for_insert(code, name, category_ref, subcategory_ref);

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
    dto: ProductDto,
    image: Option<(String, Vec<u8>)>,
) -> DomainResult<Product> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Product not found"))?;

    if let Some(name) = dto.name {
        aggregate.base.description = name;
    }
    if let Some(category_ref) = dto.category_ref {
        aggregate.category_ref = category_ref;
    }
    if let Some(subcategory_ref) = dto.subcategory_ref {
        aggregate.subcategory_ref = subcategory_ref;
    }
    require_refs(&aggregate.category_ref, &aggregate.subcategory_ref).await?;

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
        .ok_or_else(|| DomainError::not_found("Product not found"))?;

    if let Some(ref image_ref) = existing.image_ref {
        media::client().delete_best_effort(image_ref).await;
    }

    repository::soft_delete(id).await?;
    Ok(())
}

pub async fn get_by_id(id: Uuid) -> DomainResult<Option<Product>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> DomainResult<Vec<Product>> {
    Ok(repository::list_all().await?)
}

pub async fn list_by_subcategory(subcategory_ref: &str) -> DomainResult<Vec<Product>> {
    Ok(repository::list_by_subcategory(subcategory_ref).await?)
}

/// Product joined with the name of its category, needed wherever
/// category-specific validation runs.
pub async fn get_with_category_name(id: Uuid) -> DomainResult<Option<(Product, String)>> {
    let Some(product) = repository::get_by_id(id).await? else {
        return Ok(None);
    };

    let category_id = Uuid::parse_str(&product.category_ref)
        .map_err(|_| DomainError::validation("Invalid categoryRef on product"))?;
    let category = a004_category::repository::get_by_id(category_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Category not found"))?;

    let name = category.base.description.clone();
    Ok(Some((product, name)))
}
