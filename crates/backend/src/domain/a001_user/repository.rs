use chrono::Utc;
use contracts::domain::a001_user::aggregate::{User, UserId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub external_uid: String,
    pub email: String,
    pub mobile: Option<String>,
    pub district: Option<String>,
    pub profession: Option<String>,
    pub age: Option<i32>,
    pub taluk: Option<String>,
    pub village: Option<String>,
    pub panchayat: Option<String>,
    pub profile_image_url: Option<String>,
    pub profile_image_ref: Option<String>,
    pub is_verified: bool,
    pub is_blocked: bool,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        User {
            base: BaseAggregate::with_metadata(
                UserId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            external_uid: m.external_uid,
            email: m.email,
            mobile: m.mobile,
            district: m.district,
            profession: m.profession,
            age: m.age,
            taluk: m.taluk,
            village: m.village,
            panchayat: m.panchayat,
            profile_image_url: m.profile_image_url,
            profile_image_ref: m.profile_image_ref,
            is_verified: m.is_verified,
            is_blocked: m.is_blocked,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &User) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        external_uid: Set(aggregate.external_uid.clone()),
        email: Set(aggregate.email.clone()),
        mobile: Set(aggregate.mobile.clone()),
        district: Set(aggregate.district.clone()),
        profession: Set(aggregate.profession.clone()),
        age: Set(aggregate.age),
        taluk: Set(aggregate.taluk.clone()),
        village: Set(aggregate.village.clone()),
        panchayat: Set(aggregate.panchayat.clone()),
        profile_image_url: Set(aggregate.profile_image_url.clone()),
        profile_image_ref: Set(aggregate.profile_image_ref.clone()),
        is_verified: Set(aggregate.is_verified),
        is_blocked: Set(aggregate.is_blocked),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: sea_orm::ActiveValue::NotSet,
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all() -> anyhow::Result<Vec<User>> {
    let items: Vec<User> = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<User>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_external_uid(external_uid: &str) -> anyhow::Result<Option<User>> {
    let result = Entity::find()
        .filter(Column::ExternalUid.eq(external_uid))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Is the mobile number already claimed by a different identity?
pub async fn is_mobile_taken_by_other(mobile: &str, external_uid: &str) -> anyhow::Result<bool> {
    let result = Entity::find()
        .filter(Column::Mobile.eq(mobile))
        .filter(Column::ExternalUid.ne(external_uid))
        .one(conn())
        .await?;
    Ok(result.is_some())
}

pub async fn insert(aggregate: &User) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let mut active = to_active(aggregate);
    active.created_at = Set(Some(aggregate.base.metadata.created_at));
    active.insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &User) -> anyhow::Result<()> {
    let active = to_active(aggregate);
    active.update(conn()).await?;
    Ok(())
}
