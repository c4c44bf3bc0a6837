use chrono::Utc;
use contracts::domain::a007_land::aggregate::{Land, LandId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a007_land")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub user_ref: String,
    pub district: Option<String>,
    pub taluk: Option<String>,
    pub village: Option<String>,
    pub panchayat: Option<String>,
    pub survey_no: Option<String>,
    pub hissa_no: Option<String>,
    pub farm_size: f64,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Land {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Land {
            base: BaseAggregate::with_metadata(
                LandId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            user_ref: m.user_ref,
            district: m.district,
            taluk: m.taluk,
            village: m.village,
            panchayat: m.panchayat,
            survey_no: m.survey_no,
            hissa_no: m.hissa_no,
            farm_size: m.farm_size,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Land) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        user_ref: Set(aggregate.user_ref.clone()),
        district: Set(aggregate.district.clone()),
        taluk: Set(aggregate.taluk.clone()),
        village: Set(aggregate.village.clone()),
        panchayat: Set(aggregate.panchayat.clone()),
        survey_no: Set(aggregate.survey_no.clone()),
        hissa_no: Set(aggregate.hissa_no.clone()),
        farm_size: Set(aggregate.farm_size),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: sea_orm::ActiveValue::NotSet,
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_by_user(user_ref: &str) -> anyhow::Result<Vec<Land>> {
    let items: Vec<Land> = Entity::find()
        .filter(Column::UserRef.eq(user_ref))
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Land>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Transaction-scoped lookup, used by capacity-checked writes
pub async fn get_by_id_in<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<Option<Land>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Land) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let mut active = to_active(aggregate);
    active.created_at = Set(Some(aggregate.base.metadata.created_at));
    active.insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Land) -> anyhow::Result<()> {
    let active = to_active(aggregate);
    active.update(conn()).await?;
    Ok(())
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}
