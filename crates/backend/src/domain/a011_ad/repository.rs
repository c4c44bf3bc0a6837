use chrono::Utc;
use contracts::domain::a011_ad::aggregate::{
    Ad, AdDetails, AdId, AdImage, AdStatus, AdType, CreatorRole, PostType,
};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a011_ad")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Short public code, e.g. "AD-4F9A21C3"
    pub code: String,
    /// Listing title
    pub description: String,
    pub comment: Option<String>,
    pub category_ref: String,
    pub subcategory_ref: Option<String>,
    pub product_ref: String,
    pub product_name: String,
    pub unit: Option<String>,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    /// JSON array of district names
    pub districts: String,
    pub ad_type: String,
    pub post_type: String,
    pub status: String,
    pub scheduled_at: Option<chrono::DateTime<chrono::Utc>>,
    pub expiry_date: Option<chrono::DateTime<chrono::Utc>>,
    /// JSON array of {url, assetRef}
    pub images: String,
    pub video_url: Option<String>,
    pub created_by_role: String,
    pub creator_ref: String,
    /// JSON object tagged with `category`
    pub details: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Ad {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        let districts: Vec<String> = serde_json::from_str(&m.districts).unwrap_or_default();
        let images: Vec<AdImage> = serde_json::from_str(&m.images).unwrap_or_default();
        let details: AdDetails = serde_json::from_str(&m.details).unwrap_or_default();

        Ad {
            base: BaseAggregate::with_metadata(
                AdId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            category_ref: m.category_ref,
            subcategory_ref: m.subcategory_ref,
            product_ref: m.product_ref,
            product_name: m.product_name,
            unit: m.unit,
            quantity: m.quantity,
            price: m.price,
            districts,
            ad_type: AdType::parse(&m.ad_type).unwrap_or(AdType::Sell),
            post_type: PostType::parse(&m.post_type).unwrap_or(PostType::PostNow),
            status: AdStatus::parse(&m.status).unwrap_or(AdStatus::Pending),
            scheduled_at: m.scheduled_at,
            expiry_date: m.expiry_date,
            images,
            video_url: m.video_url,
            created_by_role: CreatorRole::parse(&m.created_by_role).unwrap_or(CreatorRole::User),
            creator_ref: m.creator_ref,
            details,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Ad) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        category_ref: Set(aggregate.category_ref.clone()),
        subcategory_ref: Set(aggregate.subcategory_ref.clone()),
        product_ref: Set(aggregate.product_ref.clone()),
        product_name: Set(aggregate.product_name.clone()),
        unit: Set(aggregate.unit.clone()),
        quantity: Set(aggregate.quantity),
        price: Set(aggregate.price),
        districts: Set(serde_json::to_string(&aggregate.districts).unwrap_or_else(|_| "[]".into())),
        ad_type: Set(aggregate.ad_type.as_str().to_string()),
        post_type: Set(aggregate.post_type.as_str().to_string()),
        status: Set(aggregate.status.as_str().to_string()),
        scheduled_at: Set(aggregate.scheduled_at),
        expiry_date: Set(aggregate.expiry_date),
        images: Set(serde_json::to_string(&aggregate.images).unwrap_or_else(|_| "[]".into())),
        video_url: Set(aggregate.video_url.clone()),
        created_by_role: Set(aggregate.created_by_role.as_str().to_string()),
        creator_ref: Set(aggregate.creator_ref.clone()),
        details: Set(serde_json::to_string(&aggregate.details).unwrap_or_else(|_| "{}".into())),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: sea_orm::ActiveValue::NotSet,
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

/// SQL-level filters for ad listings. District and breed filtering happen
/// after the fetch, since both live inside JSON columns.
#[derive(Debug, Default, Clone)]
pub struct AdQuery {
    pub product_ref: Option<String>,
    pub status: Option<AdStatus>,
    pub ad_type: Option<AdType>,
    pub created_by_role: Option<CreatorRole>,
    pub creator_ref: Option<String>,
}

pub async fn list_all() -> anyhow::Result<Vec<Ad>> {
    let items: Vec<Ad> = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Ad>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn query(filter: &AdQuery) -> anyhow::Result<Vec<Ad>> {
    let mut query = Entity::find();

    if let Some(ref product_ref) = filter.product_ref {
        query = query.filter(Column::ProductRef.eq(product_ref.as_str()));
    }
    if let Some(status) = filter.status {
        query = query.filter(Column::Status.eq(status.as_str()));
    }
    if let Some(ad_type) = filter.ad_type {
        query = query.filter(Column::AdType.eq(ad_type.as_str()));
    }
    if let Some(role) = filter.created_by_role {
        query = query.filter(Column::CreatedByRole.eq(role.as_str()));
    }
    if let Some(ref creator_ref) = filter.creator_ref {
        query = query.filter(Column::CreatorRef.eq(creator_ref.as_str()));
    }

    let items: Vec<Ad> = query
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Active ads created within the last 48 hours (the district filter is
/// applied by the caller)
pub async fn list_recent_active(since: chrono::DateTime<chrono::Utc>) -> anyhow::Result<Vec<Ad>> {
    let items: Vec<Ad> = Entity::find()
        .filter(Column::Status.eq(AdStatus::Active.as_str()))
        .filter(Column::CreatedAt.gte(since))
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Scheduled ads still waiting for activation
pub async fn list_pending_scheduled() -> anyhow::Result<Vec<Ad>> {
    let items: Vec<Ad> = Entity::find()
        .filter(Column::PostType.eq(PostType::Schedule.as_str()))
        .filter(Column::Status.eq(AdStatus::Pending.as_str()))
        .filter(Column::ScheduledAt.is_not_null())
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Ads carrying an expiry date (the date comparison is done by the sweep)
pub async fn list_expirable() -> anyhow::Result<Vec<Ad>> {
    let items: Vec<Ad> = Entity::find()
        .filter(Column::ExpiryDate.is_not_null())
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn count() -> anyhow::Result<u64> {
    Ok(Entity::find().count(conn()).await?)
}

pub async fn insert_in<C: ConnectionTrait>(db: &C, aggregate: &Ad) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let mut active = to_active(aggregate);
    active.created_at = Set(Some(aggregate.base.metadata.created_at));
    active.insert(db).await?;
    Ok(uuid)
}

pub async fn update_in<C: ConnectionTrait>(db: &C, aggregate: &Ad) -> anyhow::Result<()> {
    let active = to_active(aggregate);
    active.update(db).await?;
    Ok(())
}

/// Hard delete; expired and deleted ads leave only their audit log rows
pub async fn delete_in<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
