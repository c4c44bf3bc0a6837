use axum::extract::{Multipart, Path, Query};
use axum::Json;
use contracts::domain::a012_news::aggregate::{News, NewsDto, NewsLog};
use serde::Deserialize;
use serde_json::json;

use super::{parse_id, read_form, ApiError, FormData};
use crate::domain::a012_news::service;
use crate::shared::error::DomainError;

fn dto_from_form(form: &FormData) -> NewsDto {
    NewsDto {
        title: form.text("title"),
        url: form.text("url"),
        actor_name: form.text("actorName"),
        actor_role: form.text("actorRole"),
    }
}

/// POST /api/news (multipart)
pub async fn create(multipart: Multipart) -> Result<Json<News>, ApiError> {
    let form = read_form(multipart).await?;
    let dto = dto_from_form(&form);
    let news = service::create(dto, form.single_file()).await?;
    Ok(Json(news))
}

/// GET /api/news
pub async fn list_all() -> Result<Json<Vec<News>>, ApiError> {
    Ok(Json(service::list_all().await?))
}

/// GET /api/news/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<News>, ApiError> {
    let id = parse_id(&id)?;
    let news = service::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("News not found"))?;
    Ok(Json(news))
}

/// PUT /api/news/:id (multipart)
pub async fn update(
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<News>, ApiError> {
    let id = parse_id(&id)?;
    let form = read_form(multipart).await?;
    let dto = dto_from_form(&form);
    let news = service::update(id, dto, form.single_file()).await?;
    Ok(Json(news))
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    #[serde(rename = "actorName")]
    pub actor_name: Option<String>,
    #[serde(rename = "actorRole")]
    pub actor_role: Option<String>,
}

/// DELETE /api/news/:id
pub async fn delete(
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&id)?;
    service::delete(id, query.actor_name, query.actor_role).await?;
    Ok(Json(json!({ "message": "News deleted" })))
}

/// GET /api/news-logs
pub async fn list_logs() -> Result<Json<Vec<NewsLog>>, ApiError> {
    Ok(Json(service::list_logs().await?))
}
