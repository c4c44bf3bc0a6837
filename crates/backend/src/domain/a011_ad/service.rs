use chrono::{NaiveDate, Utc};
use contracts::domain::a011_ad::aggregate::{
    Ad, AdDto, AdStatus, AdType, AdWithCreator, CreatorRole, PostType,
};
use std::collections::HashMap;
use contracts::domain::a011_ad::log::AdLogAction;
use sea_orm::TransactionTrait;
use uuid::Uuid;

use super::{log_repository, repository};
use crate::domain::{a001_user, a002_admin, a003_subadmin, a004_category};
use crate::shared::data::db::get_connection;
use crate::shared::error::{DomainError, DomainResult};
use crate::shared::media;
use crate::system::clock::{default_expiry, local_midnight};

pub use repository::AdQuery;

/// Parse a civil date sent by clients as either `YYYY-MM-DD` or
/// `DD-MM-YYYY`, to the UTC instant of local midnight of that day.
pub fn parse_civil_date(value: &str) -> Result<chrono::DateTime<Utc>, String> {
    let parts: Vec<&str> = value.split('-').collect();
    if parts.len() != 3 {
        return Err(format!("Invalid date: {}", value));
    }

    let (y, m, d) = if parts[0].len() == 4 {
        (parts[0], parts[1], parts[2])
    } else {
        (parts[2], parts[1], parts[0])
    };

    let date = NaiveDate::parse_from_str(&format!("{}-{}-{}", y, m, d), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date: {}", value))?;
    Ok(local_midnight(date))
}

fn new_ad_code() -> String {
    format!("AD-{}", &Uuid::new_v4().simple().to_string()[..8].to_uppercase())
}

/// The creator named on an ad must exist, and user accounts must not be
/// blocked. Returns the display name used for audit rows.
async fn validate_creator(role: CreatorRole, creator_ref: &str) -> DomainResult<String> {
    let creator_id =
        Uuid::parse_str(creator_ref).map_err(|_| DomainError::validation("Invalid creatorRef"))?;

    match role {
        CreatorRole::User => {
            let user = a001_user::service::require_active(creator_id).await?;
            Ok(user.base.description.clone())
        }
        CreatorRole::Subadmin => {
            let subadmin = a003_subadmin::repository::get_by_id(creator_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Subadmin not found"))?;
            Ok(subadmin.base.description.clone())
        }
        CreatorRole::Admin => {
            let admin = a002_admin::repository::get_by_id(creator_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Admin not found"))?;
            Ok(admin.base.description.clone())
        }
    }
}

async fn category_name(category_ref: &str) -> DomainResult<String> {
    let category_id = Uuid::parse_str(category_ref)
        .map_err(|_| DomainError::validation("Invalid category"))?;
    let category = a004_category::repository::get_by_id(category_id)
        .await?
        .ok_or_else(|| DomainError::validation("Invalid category"))?;
    Ok(category.base.description.clone())
}

async fn upload_images(
    files: Vec<(String, Vec<u8>)>,
) -> DomainResult<Vec<contracts::domain::a011_ad::aggregate::AdImage>> {
    let mut images = Vec::with_capacity(files.len());
    for (filename, bytes) in files {
        let asset = media::client().upload(&filename, bytes).await?;
        images.push(contracts::domain::a011_ad::aggregate::AdImage {
            url: asset.url,
            asset_ref: asset.asset_ref,
        });
    }
    Ok(images)
}

/// Create an ad from form-data fields plus uploaded image files.
pub async fn create(dto: AdDto, files: Vec<(String, Vec<u8>)>) -> DomainResult<Ad> {
    let title = dto
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| DomainError::validation("title is required"))?;
    let category_ref = dto
        .category_ref
        .clone()
        .ok_or_else(|| DomainError::validation("categoryRef is required"))?;
    let product_ref = dto
        .product_ref
        .clone()
        .ok_or_else(|| DomainError::validation("productRef is required"))?;
    let product_name = dto
        .product_name
        .clone()
        .ok_or_else(|| DomainError::validation("productName is required"))?;
    let districts = dto
        .districts
        .clone()
        .filter(|d| !d.is_empty())
        .ok_or_else(|| DomainError::validation("districts are required"))?;
    let ad_type = dto
        .ad_type
        .as_deref()
        .ok_or_else(|| DomainError::validation("adType is required"))
        .and_then(|s| AdType::parse(s).map_err(DomainError::Validation))?;
    let role = dto
        .created_by_role
        .as_deref()
        .ok_or_else(|| DomainError::validation("createdByRole is required"))
        .and_then(|s| CreatorRole::parse(s).map_err(DomainError::Validation))?;
    let creator_ref = dto
        .creator_ref
        .clone()
        .ok_or_else(|| DomainError::validation("creatorRef is required"))?;

    let category = category_name(&category_ref).await?;
    let creator_name = validate_creator(role, &creator_ref).await?;

    let post_type = match dto.post_type.as_deref() {
        Some(s) => PostType::parse(s).map_err(DomainError::Validation)?,
        None => PostType::PostNow,
    };

    let details = dto.details.clone().unwrap_or_default();
    details
        .validate_for_category(&category)
        .map_err(DomainError::Validation)?;

    let scheduled_at = match dto.scheduled_at.as_deref() {
        Some(raw) => Some(parse_civil_date(raw).map_err(DomainError::Validation)?),
        None => None,
    };
    let mut expiry_date = match dto.expiry_date.as_deref() {
        Some(raw) => Some(parse_civil_date(raw).map_err(DomainError::Validation)?),
        None => None,
    };

    let status = match post_type {
        PostType::PostNow => AdStatus::Active,
        PostType::Schedule => AdStatus::Pending,
    };
    // Posted-now ads always carry an expiry: default is local midnight
    // plus 15 days.
    if post_type == PostType::PostNow && expiry_date.is_none() {
        expiry_date = Some(default_expiry(Utc::now()));
    }

    let mut ad = Ad::new_for_insert(
        new_ad_code(),
        title,
        category_ref,
        product_ref,
        product_name,
        districts,
        ad_type,
        post_type,
        role,
        creator_ref,
        details,
    );
    ad.subcategory_ref = dto.subcategory_ref.clone();
    ad.unit = dto.unit.clone();
    ad.quantity = dto.quantity;
    ad.price = dto.price;
    ad.base.comment = dto.description.clone();
    ad.video_url = dto.video_url.clone();
    ad.status = status;
    ad.scheduled_at = scheduled_at;
    ad.expiry_date = expiry_date;

    ad.validate().map_err(DomainError::Validation)?;
    ad.before_write();

    ad.images = upload_images(files).await?;

    let actor_name = dto.actor_name.clone().or(Some(creator_name));
    let actor_role = dto.actor_role.clone().or_else(|| Some(role.as_str().to_string()));
    let snapshot = serde_json::to_value(&ad).unwrap_or(serde_json::Value::Null);

    let txn = get_connection().begin().await?;
    repository::insert_in(&txn, &ad).await?;
    log_repository::insert_in(
        &txn,
        &ad.base.id.value().to_string(),
        AdLogAction::Create,
        actor_name.as_deref(),
        actor_role.as_deref(),
        Some(&snapshot),
    )
    .await?;
    txn.commit().await.map_err(DomainError::from)?;

    Ok(ad)
}

/// Update an ad: merge the partial DTO over the stored row, re-run
/// category validation, recompute status/expiry on a post-type switch,
/// and replace the image set based on the client's keep-list.
pub async fn update(id: Uuid, dto: AdDto, files: Vec<(String, Vec<u8>)>) -> DomainResult<Ad> {
    let mut ad = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Ad not found"))?;

    let creator_name = validate_creator(ad.created_by_role, &ad.creator_ref).await?;

    if let Some(ref category_ref) = dto.category_ref {
        ad.category_ref = category_ref.clone();
    }
    let category = category_name(&ad.category_ref).await?;

    if let Some(ref title) = dto.title {
        ad.base.description = title.clone();
    }
    if dto.subcategory_ref.is_some() {
        ad.subcategory_ref = dto.subcategory_ref.clone();
    }
    if let Some(ref product_ref) = dto.product_ref {
        ad.product_ref = product_ref.clone();
    }
    if let Some(ref product_name) = dto.product_name {
        ad.product_name = product_name.clone();
    }
    if dto.unit.is_some() {
        ad.unit = dto.unit.clone();
    }
    if dto.quantity.is_some() {
        ad.quantity = dto.quantity;
    }
    if dto.price.is_some() {
        ad.price = dto.price;
    }
    if dto.description.is_some() {
        ad.base.comment = dto.description.clone();
    }
    if let Some(ref districts) = dto.districts {
        ad.districts = districts.clone();
    }
    if let Some(ref raw) = dto.ad_type {
        ad.ad_type = AdType::parse(raw).map_err(DomainError::Validation)?;
    }
    if dto.video_url.is_some() {
        ad.video_url = dto.video_url.clone();
    }
    if let Some(ref details) = dto.details {
        ad.details = details.clone();
    }

    // Category validation runs against the effective category, whether or
    // not it changed in this request.
    ad.details
        .validate_for_category(&category)
        .map_err(DomainError::Validation)?;

    if let Some(ref raw) = dto.scheduled_at {
        ad.scheduled_at = Some(parse_civil_date(raw).map_err(DomainError::Validation)?);
    }
    if let Some(ref raw) = dto.expiry_date {
        ad.expiry_date = Some(parse_civil_date(raw).map_err(DomainError::Validation)?);
    }

    if let Some(ref raw) = dto.post_type {
        let new_post_type = PostType::parse(raw).map_err(DomainError::Validation)?;
        if new_post_type != ad.post_type {
            match new_post_type {
                PostType::PostNow => {
                    ad.scheduled_at = None;
                    ad.expiry_date = Some(default_expiry(Utc::now()));
                    ad.status = AdStatus::Active;
                }
                PostType::Schedule => {
                    ad.status = AdStatus::Pending;
                }
            }
        }
        ad.post_type = new_post_type;
    }

    // Image replacement: anything not in the keep-list is removed from
    // the media host (failures are warnings), new uploads are appended.
    if let Some(ref keep) = dto.keep_images {
        let (kept, dropped): (Vec<_>, Vec<_>) = ad
            .images
            .drain(..)
            .partition(|img| keep.contains(&img.asset_ref));
        for img in dropped {
            media::client().delete_best_effort(&img.asset_ref).await;
        }
        ad.images = kept;
    }
    ad.images.extend(upload_images(files).await?);

    ad.validate().map_err(DomainError::Validation)?;
    ad.before_write();

    let actor_name = dto.actor_name.clone().or(Some(creator_name));
    let actor_role = dto
        .actor_role
        .clone()
        .or_else(|| Some(ad.created_by_role.as_str().to_string()));
    let snapshot = serde_json::to_value(&ad).unwrap_or(serde_json::Value::Null);

    let txn = get_connection().begin().await?;
    repository::update_in(&txn, &ad).await?;
    log_repository::insert_in(
        &txn,
        &ad.base.id.value().to_string(),
        AdLogAction::Update,
        actor_name.as_deref(),
        actor_role.as_deref(),
        Some(&snapshot),
    )
    .await?;
    txn.commit().await.map_err(DomainError::from)?;

    Ok(ad)
}

/// Delete an ad. The audit row and the row deletion commit atomically;
/// media cleanup runs afterwards and never fails the operation.
pub async fn delete(
    id: Uuid,
    actor_name: Option<String>,
    actor_role: Option<String>,
) -> DomainResult<()> {
    let ad = repository::get_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Ad not found"))?;

    let creator_name = validate_creator(ad.created_by_role, &ad.creator_ref).await?;

    let actor_name = actor_name.or(Some(creator_name));
    let actor_role = actor_role.or_else(|| Some(ad.created_by_role.as_str().to_string()));
    let snapshot = serde_json::to_value(&ad).unwrap_or(serde_json::Value::Null);

    let txn = get_connection().begin().await?;
    log_repository::insert_in(
        &txn,
        &id.to_string(),
        AdLogAction::Delete,
        actor_name.as_deref(),
        actor_role.as_deref(),
        Some(&snapshot),
    )
    .await?;
    repository::delete_in(&txn, id).await?;
    txn.commit().await.map_err(DomainError::from)?;

    for image in &ad.images {
        media::client().delete_best_effort(&image.asset_ref).await;
    }

    Ok(())
}

pub async fn get_by_id(id: Uuid) -> DomainResult<Option<Ad>> {
    Ok(repository::get_by_id(id).await?)
}

/// Resolve creator name/email for each ad from the table matching its
/// creator role. Lookups are cached per (role, ref) pair across the list.
async fn with_creators(ads: Vec<Ad>) -> DomainResult<Vec<AdWithCreator>> {
    let mut cache: HashMap<(CreatorRole, String), Option<(String, String)>> = HashMap::new();
    let mut result = Vec::with_capacity(ads.len());

    for ad in ads {
        let key = (ad.created_by_role, ad.creator_ref.clone());
        if !cache.contains_key(&key) {
            let resolved = lookup_creator(ad.created_by_role, &ad.creator_ref).await?;
            cache.insert(key.clone(), resolved);
        }
        let (creator_name, creator_email) = match cache.get(&key).and_then(|v| v.clone()) {
            Some((name, email)) => (Some(name), Some(email)),
            None => (None, None),
        };
        result.push(AdWithCreator {
            ad,
            creator_name,
            creator_email,
        });
    }

    Ok(result)
}

async fn lookup_creator(
    role: CreatorRole,
    creator_ref: &str,
) -> DomainResult<Option<(String, String)>> {
    let Ok(id) = Uuid::parse_str(creator_ref) else {
        return Ok(None);
    };
    let resolved = match role {
        CreatorRole::User => a001_user::repository::get_by_id(id)
            .await?
            .map(|u| (u.base.description.clone(), u.email.clone())),
        CreatorRole::Subadmin => a003_subadmin::repository::get_by_id(id)
            .await?
            .map(|s| (s.base.description.clone(), s.email.clone())),
        CreatorRole::Admin => a002_admin::repository::get_by_id(id)
            .await?
            .map(|a| (a.base.description.clone(), a.email.clone())),
    };
    Ok(resolved)
}

pub async fn list_all() -> DomainResult<Vec<AdWithCreator>> {
    let ads = repository::list_all().await?;
    with_creators(ads).await
}

/// Filtered listing; districts match when the ad covers any of them
pub async fn query(filter: AdQuery, districts: Vec<String>) -> DomainResult<Vec<AdWithCreator>> {
    let mut ads = repository::query(&filter).await?;
    if !districts.is_empty() {
        ads.retain(|ad| districts.iter().any(|d| ad.districts.contains(d)));
    }
    with_creators(ads).await
}

/// Active ads in one district created within the last 48 hours
pub async fn recent_by_district(district: &str) -> DomainResult<Vec<AdWithCreator>> {
    let since = Utc::now() - chrono::Duration::hours(48);
    let mut ads = repository::list_recent_active(since).await?;
    ads.retain(|ad| ad.districts.iter().any(|d| d == district));
    with_creators(ads).await
}

/// Sort order for product listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdSort {
    Newest,
    PriceLowToHigh,
    PriceHighToLow,
}

impl AdSort {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("price_low_to_high") => AdSort::PriceLowToHigh,
            Some("price_high_to_low") => AdSort::PriceHighToLow,
            _ => AdSort::Newest,
        }
    }
}

/// Active ads for a product, optionally narrowed by district and breed
/// substrings, sorted as requested.
pub async fn browse_by_product(
    product_ref: &str,
    district: Option<&str>,
    breeds: Vec<String>,
    sort: AdSort,
) -> DomainResult<Vec<AdWithCreator>> {
    let filter = AdQuery {
        product_ref: Some(product_ref.to_string()),
        status: Some(AdStatus::Active),
        ..Default::default()
    };
    let mut ads = repository::query(&filter).await?;

    if let Some(district) = district {
        ads.retain(|ad| ad.districts.iter().any(|d| d == district));
    }
    if !breeds.is_empty() {
        let needles: Vec<String> = breeds.iter().map(|b| b.to_lowercase()).collect();
        ads.retain(|ad| match ad.details.breed() {
            Some(breed) => {
                let haystack = breed.to_lowercase();
                needles.iter().any(|needle| haystack.contains(needle))
            }
            None => false,
        });
    }

    match sort {
        AdSort::PriceLowToHigh => {
            ads.sort_by(|a, b| {
                a.price
                    .unwrap_or(f64::MAX)
                    .partial_cmp(&b.price.unwrap_or(f64::MAX))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        AdSort::PriceHighToLow => {
            ads.sort_by(|a, b| {
                b.price
                    .unwrap_or(f64::MIN)
                    .partial_cmp(&a.price.unwrap_or(f64::MIN))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        AdSort::Newest => {}
    }

    with_creators(ads).await
}

pub async fn list_logs() -> DomainResult<Vec<contracts::domain::a011_ad::log::AdLog>> {
    Ok(log_repository::list_all().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::clock::local_date;

    #[test]
    fn civil_dates_parse_in_both_orders() {
        let iso = parse_civil_date("2025-11-24").unwrap();
        let dmy = parse_civil_date("24-11-2025").unwrap();
        assert_eq!(iso, dmy);
        assert_eq!(local_date(iso), NaiveDate::from_ymd_opt(2025, 11, 24).unwrap());
    }

    #[test]
    fn garbage_dates_are_rejected() {
        assert!(parse_civil_date("someday").is_err());
        assert!(parse_civil_date("2025-13-40").is_err());
        assert!(parse_civil_date("").is_err());
    }

    #[test]
    fn sort_parse_defaults_to_newest() {
        assert_eq!(AdSort::parse(None), AdSort::Newest);
        assert_eq!(AdSort::parse(Some("price_low_to_high")), AdSort::PriceLowToHigh);
        assert_eq!(AdSort::parse(Some("bogus")), AdSort::Newest);
    }
}
