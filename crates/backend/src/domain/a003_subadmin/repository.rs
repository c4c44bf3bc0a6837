use chrono::Utc;
use contracts::domain::a003_subadmin::aggregate::{Subadmin, SubadminId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_subadmin")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub number: Option<String>,
    pub qualification: Option<String>,
    pub address: Option<String>,
    /// JSON array of district names
    pub districts: String,
    /// JSON array of page keys
    pub page_access: String,
    pub image_url: Option<String>,
    pub image_ref: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn parse_string_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

impl From<Model> for Subadmin {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Subadmin {
            base: BaseAggregate::with_metadata(
                SubadminId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            email: m.email,
            number: m.number,
            qualification: m.qualification,
            address: m.address,
            districts: parse_string_list(&m.districts),
            page_access: parse_string_list(&m.page_access),
            image_url: m.image_url,
            image_ref: m.image_ref,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Subadmin) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        email: Set(aggregate.email.clone()),
        password_hash: sea_orm::ActiveValue::NotSet,
        number: Set(aggregate.number.clone()),
        qualification: Set(aggregate.qualification.clone()),
        address: Set(aggregate.address.clone()),
        districts: Set(serde_json::to_string(&aggregate.districts).unwrap_or_else(|_| "[]".into())),
        page_access: Set(
            serde_json::to_string(&aggregate.page_access).unwrap_or_else(|_| "[]".into())
        ),
        image_url: Set(aggregate.image_url.clone()),
        image_ref: Set(aggregate.image_ref.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: sea_orm::ActiveValue::NotSet,
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all() -> anyhow::Result<Vec<Subadmin>> {
    let items: Vec<Subadmin> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Subadmin>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_email(email: &str) -> anyhow::Result<Option<Subadmin>> {
    let result = Entity::find()
        .filter(Column::Email.eq(email))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Aggregate plus its stored password hash, for credential checks
pub async fn get_by_email_with_hash(email: &str) -> anyhow::Result<Option<(Subadmin, String)>> {
    let result = Entity::find()
        .filter(Column::Email.eq(email))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(|m| {
        let hash = m.password_hash.clone();
        (m.into(), hash)
    }))
}

pub async fn count() -> anyhow::Result<u64> {
    let count = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .count(conn())
        .await?;
    Ok(count)
}

pub async fn insert(aggregate: &Subadmin, password_hash: &str) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let mut active = to_active(aggregate);
    active.password_hash = Set(password_hash.to_string());
    active.created_at = Set(Some(aggregate.base.metadata.created_at));
    active.insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Subadmin) -> anyhow::Result<()> {
    let active = to_active(aggregate);
    active.update(conn()).await?;
    Ok(())
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn()).await?;
    Ok(result.rows_affected > 0)
}
