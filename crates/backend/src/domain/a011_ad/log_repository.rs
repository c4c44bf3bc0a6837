use chrono::Utc;
use contracts::domain::a011_ad::log::{AdLog, AdLogAction};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a011_ad_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub ad_ref: String,
    pub action: String,
    pub actor_name: Option<String>,
    pub actor_role: Option<String>,
    pub payload: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AdLog {
    fn from(m: Model) -> Self {
        let action = match m.action.as_str() {
            "create" => AdLogAction::Create,
            "update" => AdLogAction::Update,
            "delete" => AdLogAction::Delete,
            "activate_scheduled" => AdLogAction::ActivateScheduled,
            _ => AdLogAction::AutoExpired,
        };
        AdLog {
            id: m.id,
            ad_ref: m.ad_ref,
            action,
            actor_name: m.actor_name,
            actor_role: m.actor_role,
            payload: m.payload.and_then(|raw| serde_json::from_str(&raw).ok()),
            created_at: m.created_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Append an audit row. Runs on the caller's connection so the row
/// commits atomically with the ad change it describes.
pub async fn insert_in<C: ConnectionTrait>(
    db: &C,
    ad_ref: &str,
    action: AdLogAction,
    actor_name: Option<&str>,
    actor_role: Option<&str>,
    payload: Option<&serde_json::Value>,
) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        ad_ref: Set(ad_ref.to_string()),
        action: Set(action.as_str().to_string()),
        actor_name: Set(actor_name.map(str::to_string)),
        actor_role: Set(actor_role.map(str::to_string)),
        payload: Set(payload.map(|p| p.to_string())),
        created_at: Set(Utc::now()),
    };
    active.insert(db).await?;
    Ok(())
}

/// Full audit trail, newest first
pub async fn list_all() -> anyhow::Result<Vec<AdLog>> {
    let items: Vec<AdLog> = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}
