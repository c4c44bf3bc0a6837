use chrono::Utc;
use contracts::domain::a008_land_product::aggregate::{
    LandProduct, LandProductDetails, LandProductId,
};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a008_land_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub user_ref: String,
    pub land_ref: String,
    pub product_ref: String,
    /// "Food" | "Machinery" | "Animal", mirrors the details variant
    pub category: String,
    pub acres: Option<f64>,
    pub model_no: Option<String>,
    pub registration_no: Option<String>,
    pub chassi_no: Option<String>,
    pub rc_copy_no: Option<String>,
    pub quantity: Option<i64>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn details_from_columns(m: &Model) -> LandProductDetails {
    match m.category.as_str() {
        "Food" => LandProductDetails::Food {
            acres: m.acres.unwrap_or(0.0),
        },
        "Machinery" => LandProductDetails::Machinery {
            model_no: m.model_no.clone().unwrap_or_default(),
            registration_no: m.registration_no.clone().unwrap_or_default(),
            chassi_no: m.chassi_no.clone().unwrap_or_default(),
            rc_copy_no: m.rc_copy_no.clone().unwrap_or_default(),
        },
        _ => LandProductDetails::Animal {
            quantity: m.quantity.unwrap_or(0),
        },
    }
}

impl From<Model> for LandProduct {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let details = details_from_columns(&m);

        LandProduct {
            base: BaseAggregate::with_metadata(
                LandProductId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            user_ref: m.user_ref,
            land_ref: m.land_ref,
            product_ref: m.product_ref,
            details,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &LandProduct) -> ActiveModel {
    let (acres, model_no, registration_no, chassi_no, rc_copy_no, quantity) =
        match &aggregate.details {
            LandProductDetails::Food { acres } => (Some(*acres), None, None, None, None, None),
            LandProductDetails::Machinery {
                model_no,
                registration_no,
                chassi_no,
                rc_copy_no,
            } => (
                None,
                Some(model_no.clone()),
                Some(registration_no.clone()),
                Some(chassi_no.clone()),
                Some(rc_copy_no.clone()),
                None,
            ),
            LandProductDetails::Animal { quantity } => {
                (None, None, None, None, None, Some(*quantity))
            }
        };

    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        user_ref: Set(aggregate.user_ref.clone()),
        land_ref: Set(aggregate.land_ref.clone()),
        product_ref: Set(aggregate.product_ref.clone()),
        category: Set(aggregate.details.category_name().to_string()),
        acres: Set(acres),
        model_no: Set(model_no),
        registration_no: Set(registration_no),
        chassi_no: Set(chassi_no),
        rc_copy_no: Set(rc_copy_no),
        quantity: Set(quantity),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: sea_orm::ActiveValue::NotSet,
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<LandProduct>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn list_by_land(user_ref: &str, land_ref: &str) -> anyhow::Result<Vec<LandProduct>> {
    let items: Vec<LandProduct> = Entity::find()
        .filter(Column::UserRef.eq(user_ref))
        .filter(Column::LandRef.eq(land_ref))
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_by_user(
    user_ref: &str,
    category: Option<&str>,
) -> anyhow::Result<Vec<LandProduct>> {
    let mut query = Entity::find().filter(Column::UserRef.eq(user_ref));
    if let Some(category) = category {
        query = query.filter(Column::Category.eq(category));
    }
    let items: Vec<LandProduct> = query
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn exists(user_ref: &str, land_ref: &str, product_ref: &str) -> anyhow::Result<bool> {
    let result = Entity::find()
        .filter(Column::UserRef.eq(user_ref))
        .filter(Column::LandRef.eq(land_ref))
        .filter(Column::ProductRef.eq(product_ref))
        .one(conn())
        .await?;
    Ok(result.is_some())
}

/// Sum of Food acres on a land, optionally excluding one row (the row
/// being updated). Runs on the caller's connection so the read can share
/// a transaction with the subsequent write.
pub async fn total_food_acres_in<C: ConnectionTrait>(
    db: &C,
    land_ref: &str,
    exclude: Option<Uuid>,
) -> anyhow::Result<f64> {
    let mut query = Entity::find()
        .filter(Column::LandRef.eq(land_ref))
        .filter(Column::Category.eq("Food"));
    if let Some(exclude) = exclude {
        query = query.filter(Column::Id.ne(exclude.to_string()));
    }
    let rows = query.all(db).await?;
    Ok(rows.iter().filter_map(|m| m.acres).sum())
}

pub async fn insert_in<C: ConnectionTrait>(db: &C, aggregate: &LandProduct) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let mut active = to_active(aggregate);
    active.created_at = Set(Some(aggregate.base.metadata.created_at));
    active.insert(db).await?;
    Ok(uuid)
}

pub async fn update_in<C: ConnectionTrait>(db: &C, aggregate: &LandProduct) -> anyhow::Result<()> {
    let active = to_active(aggregate);
    active.update(db).await?;
    Ok(())
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}
