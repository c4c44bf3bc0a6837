use chrono::Utc;
use contracts::domain::a009_crop_plan::aggregate::{CropPlan, CropPlanId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a009_crop_plan")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub user_ref: String,
    pub land_ref: String,
    pub product_ref: String,
    pub area_acres: f64,
    pub planning_date: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CropPlan {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        CropPlan {
            base: BaseAggregate::with_metadata(
                CropPlanId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            user_ref: m.user_ref,
            land_ref: m.land_ref,
            product_ref: m.product_ref,
            area_acres: m.area_acres,
            planning_date: m.planning_date,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &CropPlan) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        user_ref: Set(aggregate.user_ref.clone()),
        land_ref: Set(aggregate.land_ref.clone()),
        product_ref: Set(aggregate.product_ref.clone()),
        area_acres: Set(aggregate.area_acres),
        planning_date: Set(aggregate.planning_date.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: sea_orm::ActiveValue::NotSet,
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<CropPlan>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn list_by_user(user_ref: &str) -> anyhow::Result<Vec<CropPlan>> {
    let items: Vec<CropPlan> = Entity::find()
        .filter(Column::UserRef.eq(user_ref))
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Does the (land, product) pair already carry a plan? Optionally
/// excludes the plan being updated.
pub async fn exists_product_under_land(
    land_ref: &str,
    product_ref: &str,
    exclude: Option<Uuid>,
) -> anyhow::Result<bool> {
    let mut query = Entity::find()
        .filter(Column::LandRef.eq(land_ref))
        .filter(Column::ProductRef.eq(product_ref));
    if let Some(exclude) = exclude {
        query = query.filter(Column::Id.ne(exclude.to_string()));
    }
    Ok(query.one(conn()).await?.is_some())
}

/// Sum of planned acres on a land, optionally excluding one plan. Runs on
/// the caller's connection so the read can share a transaction with the
/// subsequent write.
pub async fn total_area_in<C: ConnectionTrait>(
    db: &C,
    land_ref: &str,
    exclude: Option<Uuid>,
) -> anyhow::Result<f64> {
    let mut query = Entity::find().filter(Column::LandRef.eq(land_ref));
    if let Some(exclude) = exclude {
        query = query.filter(Column::Id.ne(exclude.to_string()));
    }
    let rows = query.all(db).await?;
    Ok(rows.iter().map(|m| m.area_acres).sum())
}

pub async fn insert_in<C: ConnectionTrait>(db: &C, aggregate: &CropPlan) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let mut active = to_active(aggregate);
    active.created_at = Set(Some(aggregate.base.metadata.created_at));
    active.insert(db).await?;
    Ok(uuid)
}

pub async fn update_in<C: ConnectionTrait>(db: &C, aggregate: &CropPlan) -> anyhow::Result<()> {
    let active = to_active(aggregate);
    active.update(db).await?;
    Ok(())
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}
