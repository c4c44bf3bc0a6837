use axum::extract::{Multipart, Path, Query};
use axum::Json;
use contracts::domain::a011_ad::aggregate::{
    Ad, AdDetails, AdDto, AdStatus, AdType, AdWithCreator, CreatorRole,
};
use contracts::domain::a011_ad::log::AdLog;
use serde::Deserialize;
use serde_json::json;

use super::{parse_id, parse_list, read_form, ApiError, FormData};
use crate::domain::a011_ad::service::{self, AdQuery, AdSort};
use crate::domain::a011_ad::sweep;
use crate::shared::error::DomainError;
use crate::system::clock::SystemClock;

fn parse_number(form: &FormData, name: &str) -> Result<Option<f64>, ApiError> {
    match form.text(name) {
        Some(raw) => raw
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ApiError::validation(format!("{} must be a number", name))),
        None => Ok(None),
    }
}

fn dto_from_form(form: &FormData) -> Result<AdDto, ApiError> {
    let details = match form.text("details") {
        Some(raw) => Some(
            serde_json::from_str::<AdDetails>(&raw)
                .map_err(|e| ApiError::validation(format!("Invalid details: {}", e)))?,
        ),
        None => None,
    };

    Ok(AdDto {
        title: form.text("title"),
        category_ref: form.text("categoryRef"),
        subcategory_ref: form.text("subcategoryRef"),
        product_ref: form.text("productRef"),
        product_name: form.text("productName"),
        unit: form.text("unit"),
        quantity: parse_number(form, "quantity")?,
        price: parse_number(form, "price")?,
        description: form.text("description"),
        districts: form.text("districts").map(|raw| parse_list(&raw)),
        ad_type: form.text("adType"),
        post_type: form.text("postType"),
        scheduled_at: form.text("scheduledAt"),
        expiry_date: form.text("expiryDate"),
        video_url: form.text("videoUrl"),
        created_by_role: form.text("createdByRole"),
        creator_ref: form.text("creatorRef"),
        details,
        actor_name: form.text("actorName"),
        actor_role: form.text("actorRole"),
        keep_images: form.text("keepImages").map(|raw| parse_list(&raw)),
    })
}

/// POST /api/ads (multipart: fields + up to 10 images)
pub async fn create(multipart: Multipart) -> Result<Json<serde_json::Value>, ApiError> {
    let form = read_form(multipart).await?;
    let dto = dto_from_form(&form)?;
    let ad = service::create(dto, form.files).await?;
    Ok(Json(json!({ "message": "Ad created", "ad": ad })))
}

/// GET /api/ads
pub async fn list_all() -> Result<Json<Vec<AdWithCreator>>, ApiError> {
    Ok(Json(service::list_all().await?))
}

/// GET /api/ads/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Ad>, ApiError> {
    let id = parse_id(&id)?;
    let ad = service::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Ad not found"))?;
    Ok(Json(ad))
}

#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    #[serde(rename = "productRef")]
    pub product_ref: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "adType")]
    pub ad_type: Option<String>,
    pub districts: Option<String>,
    #[serde(rename = "creatorRole")]
    pub creator_role: Option<String>,
    #[serde(rename = "creatorRef")]
    pub creator_ref: Option<String>,
}

/// GET /api/ads/filter
pub async fn filter(
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<AdWithCreator>>, ApiError> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(AdStatus::parse(raw).map_err(ApiError::validation)?),
        None => None,
    };
    let ad_type = match query.ad_type.as_deref() {
        Some(raw) => Some(AdType::parse(raw).map_err(ApiError::validation)?),
        None => None,
    };
    let created_by_role = match query.creator_role.as_deref() {
        Some(raw) => Some(CreatorRole::parse(raw).map_err(ApiError::validation)?),
        None => None,
    };

    let filter = AdQuery {
        product_ref: query.product_ref,
        status,
        ad_type,
        created_by_role,
        creator_ref: query.creator_ref,
    };
    let districts = query
        .districts
        .map(|raw| parse_list(&raw))
        .unwrap_or_default();

    Ok(Json(service::query(filter, districts).await?))
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub district: String,
}

/// GET /api/ads/recent?district=X — active ads of the last 48 hours
pub async fn recent_by_district(
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<AdWithCreator>>, ApiError> {
    if query.district.trim().is_empty() {
        return Err(ApiError::validation("district query parameter is required"));
    }
    Ok(Json(service::recent_by_district(&query.district).await?))
}

#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    #[serde(rename = "productRef")]
    pub product_ref: String,
    pub district: Option<String>,
    /// JSON array or single value
    pub breed: Option<String>,
    pub sort: Option<String>,
}

/// GET /api/ads/browse — active ads for a product with optional
/// district/breed narrowing and price sorting
pub async fn browse(
    Query(query): Query<BrowseQuery>,
) -> Result<Json<Vec<AdWithCreator>>, ApiError> {
    if query.product_ref.trim().is_empty() {
        return Err(ApiError::validation("productRef is required"));
    }
    let breeds = query.breed.map(|raw| parse_list(&raw)).unwrap_or_default();
    let sort = AdSort::parse(query.sort.as_deref());

    Ok(Json(
        service::browse_by_product(&query.product_ref, query.district.as_deref(), breeds, sort)
            .await?,
    ))
}

/// PUT /api/ads/:id (multipart)
pub async fn update(
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&id)?;
    let form = read_form(multipart).await?;
    let dto = dto_from_form(&form)?;
    let ad = service::update(id, dto, form.files).await?;
    Ok(Json(json!({ "message": "Ad updated", "ad": ad })))
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    #[serde(rename = "actorName")]
    pub actor_name: Option<String>,
    #[serde(rename = "actorRole")]
    pub actor_role: Option<String>,
}

/// DELETE /api/ads/:id
pub async fn delete(
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&id)?;
    service::delete(id, query.actor_name, query.actor_role).await?;
    Ok(Json(json!({ "message": "Ad deleted" })))
}

/// GET /api/ad-logs
pub async fn list_logs() -> Result<Json<Vec<AdLog>>, ApiError> {
    Ok(Json(service::list_logs().await?))
}

/// POST /api/ads/sweep/run — manual trigger of the daily sweep
pub async fn run_sweep() -> Json<serde_json::Value> {
    let summary = sweep::run(&SystemClock).await;
    Json(json!({
        "activated": summary.activated,
        "expired": summary.expired,
        "failed": summary.failed,
    }))
}
