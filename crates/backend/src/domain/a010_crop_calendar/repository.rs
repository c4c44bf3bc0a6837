use chrono::Utc;
use contracts::domain::a010_crop_calendar::aggregate::{CropCalendar, CropCalendarId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a010_crop_calendar")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub subcategory_ref: String,
    pub product_ref: String,
    pub crop_details: Option<String>,
    /// JSON arrays serialized into TEXT columns
    pub cost_estimate: String,
    pub cultivation_tips: String,
    pub pests_and_diseases: String,
    pub stages_selection: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn parse_section(raw: &str) -> Vec<serde_json::Value> {
    serde_json::from_str(raw).unwrap_or_default()
}

fn dump_section(values: &[serde_json::Value]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".into())
}

impl From<Model> for CropCalendar {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        CropCalendar {
            base: BaseAggregate::with_metadata(
                CropCalendarId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            subcategory_ref: m.subcategory_ref,
            product_ref: m.product_ref,
            crop_details: m.crop_details,
            cost_estimate: parse_section(&m.cost_estimate),
            cultivation_tips: parse_section(&m.cultivation_tips),
            pests_and_diseases: parse_section(&m.pests_and_diseases),
            stages_selection: parse_section(&m.stages_selection),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &CropCalendar) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        subcategory_ref: Set(aggregate.subcategory_ref.clone()),
        product_ref: Set(aggregate.product_ref.clone()),
        crop_details: Set(aggregate.crop_details.clone()),
        cost_estimate: Set(dump_section(&aggregate.cost_estimate)),
        cultivation_tips: Set(dump_section(&aggregate.cultivation_tips)),
        pests_and_diseases: Set(dump_section(&aggregate.pests_and_diseases)),
        stages_selection: Set(dump_section(&aggregate.stages_selection)),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: sea_orm::ActiveValue::NotSet,
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all() -> anyhow::Result<Vec<CropCalendar>> {
    let items: Vec<CropCalendar> = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<CropCalendar>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn list_by_product(product_ref: &str) -> anyhow::Result<Vec<CropCalendar>> {
    let items: Vec<CropCalendar> = Entity::find()
        .filter(Column::ProductRef.eq(product_ref))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn insert(aggregate: &CropCalendar) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let mut active = to_active(aggregate);
    active.created_at = Set(Some(aggregate.base.metadata.created_at));
    active.insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &CropCalendar) -> anyhow::Result<()> {
    let active = to_active(aggregate);
    active.update(conn()).await?;
    Ok(())
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}
