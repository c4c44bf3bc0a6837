use contracts::domain::a012_news::aggregate::{News, NewsDto, NewsLog};
use uuid::Uuid;

use super::{log_repository, repository};
use crate::shared::error::{DomainError, DomainResult};
use crate::shared::media;

pub async fn create(dto: NewsDto, image: Option<(String, Vec<u8>)>) -> DomainResult<News> {
    let title = dto.title.clone().unwrap_or_default();
    let url = dto.url.clone().unwrap_or_default();

    if title.trim().is_empty() || url.trim().is_empty() {
        return Err(DomainError::validation("title and url are required"));
    }

    let code = format!("NWS-{}", &Uuid::new_v4().simple().to_string()[..8].to_uppercase());
    let mut aggregate = News::new_for_insert(code, title, url);

    if let Some((filename, bytes)) = image {
        let asset = media::client().upload(&filename, bytes).await?;
        aggregate.image_url = Some(asset.url);
        aggregate.image_ref = Some(asset.asset_ref);
    }

    aggregate.validate().map_err(DomainError::Validation)?;
    aggregate.before_write();

    repository::insert(&aggregate).await?;
    log_repository::insert(
        &aggregate.base.id.value().to_string(),
        &aggregate.base.description,
        &aggregate.url,
        "create",
        dto.actor_name.as_deref(),
        dto.actor_role.as_deref(),
    )
    .await?;

    Ok(aggregate)
}

pub async fn update(
    id: Uuid,
    dto: NewsDto,
    image: Option<(String, Vec<u8>)>,
) -> DomainResult<News> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("News not found"))?;

    if let Some(title) = dto.title.clone() {
        aggregate.base.description = title;
    }
    if let Some(url) = dto.url.clone() {
        aggregate.url = url;
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
    log_repository::insert(
        &aggregate.base.id.value().to_string(),
        &aggregate.base.description,
        &aggregate.url,
        "update",
        dto.actor_name.as_deref(),
        dto.actor_role.as_deref(),
    )
    .await?;

    Ok(aggregate)
}

pub async fn delete(
    id: Uuid,
    actor_name: Option<String>,
    actor_role: Option<String>,
) -> DomainResult<()> {
    let existing = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("News not found"))?;

    if let Some(ref image_ref) = existing.image_ref {
        media::client().delete_best_effort(image_ref).await;
    }

    repository::soft_delete(id).await?;
    log_repository::insert(
        &id.to_string(),
        &existing.base.description,
        &existing.url,
        "delete",
        actor_name.as_deref(),
        actor_role.as_deref(),
    )
    .await?;

    Ok(())
}

pub async fn get_by_id(id: Uuid) -> DomainResult<Option<News>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> DomainResult<Vec<News>> {
    Ok(repository::list_all().await?)
}

pub async fn list_logs() -> DomainResult<Vec<NewsLog>> {
    Ok(log_repository::list_all().await?)
}
