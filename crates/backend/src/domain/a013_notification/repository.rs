use chrono::Utc;
use contracts::domain::a013_notification::dto::{DeviceToken, NotificationLog, NotificationType};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, Statement,
};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a013_device_token")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_ref: String,
    pub token: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for DeviceToken {
    fn from(m: Model) -> Self {
        DeviceToken {
            id: m.id,
            user_ref: m.user_ref,
            token: m.token,
            created_at: m.created_at,
        }
    }
}

pub mod log {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "a013_notification_log")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub title: String,
        pub description: String,
        pub created_by: Option<String>,
        pub created_by_name: Option<String>,
        #[sea_orm(column_name = "type")]
        pub notification_type: String,
        pub target_info: Option<String>,
        pub recipients_count: i64,
        pub payload: Option<String>,
        pub sent_at: chrono::DateTime<chrono::Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for NotificationLog {
        fn from(m: Model) -> Self {
            let notification_type = if m.notification_type == "targeted" {
                NotificationType::Targeted
            } else {
                NotificationType::General
            };
            NotificationLog {
                id: m.id,
                title: m.title,
                description: m.description,
                created_by: m.created_by,
                created_by_name: m.created_by_name,
                notification_type,
                target_info: m.target_info.and_then(|raw| serde_json::from_str(&raw).ok()),
                recipients_count: m.recipients_count,
                payload: m.payload.and_then(|raw| serde_json::from_str(&raw).ok()),
                sent_at: m.sent_at,
            }
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Register a token, reassigning it when another user claims the same
/// device (last write wins).
pub async fn upsert_token(user_ref: &str, token: &str) -> anyhow::Result<DeviceToken> {
    use sea_orm::sea_query::OnConflict;

    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        user_ref: Set(user_ref.to_string()),
        token: Set(token.to_string()),
        created_at: Set(Utc::now()),
    };
    Entity::insert(active)
        .on_conflict(
            OnConflict::column(Column::Token)
                .update_columns([Column::UserRef, Column::CreatedAt])
                .to_owned(),
        )
        .exec(conn())
        .await?;

    let saved = Entity::find()
        .filter(Column::Token.eq(token))
        .one(conn())
        .await?
        .ok_or_else(|| anyhow::anyhow!("Token upsert did not persist"))?;
    Ok(saved.into())
}

pub async fn delete_token(token: &str) -> anyhow::Result<()> {
    Entity::delete_many()
        .filter(Column::Token.eq(token))
        .exec(conn())
        .await?;
    Ok(())
}

pub async fn delete_tokens(tokens: &[String]) -> anyhow::Result<u64> {
    if tokens.is_empty() {
        return Ok(0);
    }
    let result = Entity::delete_many()
        .filter(Column::Token.is_in(tokens.iter().map(String::as_str)))
        .exec(conn())
        .await?;
    Ok(result.rows_affected)
}

pub async fn all_tokens() -> anyhow::Result<Vec<String>> {
    let tokens: Vec<String> = Entity::find()
        .select_only()
        .column(Column::Token)
        .into_tuple()
        .all(conn())
        .await?;
    Ok(tokens)
}

/// Distinct tokens of users located in any of the districts who own a
/// land product referencing the given product.
pub async fn tokens_for_districts_and_product(
    districts: &[String],
    product_ref: &str,
) -> anyhow::Result<Vec<String>> {
    if districts.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; districts.len()].join(", ");
    let sql = format!(
        "SELECT DISTINCT dt.token
         FROM a013_device_token dt
         JOIN a001_user u ON u.id = dt.user_ref
         JOIN a008_land_product lp ON lp.user_ref = u.id
         WHERE u.district IN ({}) AND lp.product_ref = ?",
        placeholders
    );

    let mut values: Vec<sea_orm::Value> = districts.iter().map(|d| d.as_str().into()).collect();
    values.push(product_ref.into());

    let rows = conn()
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            sql,
            values,
        ))
        .await?;

    let mut tokens = Vec::with_capacity(rows.len());
    for row in rows {
        tokens.push(row.try_get("", "token")?);
    }
    Ok(tokens)
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_log(
    title: &str,
    description: &str,
    created_by: Option<&str>,
    created_by_name: Option<&str>,
    notification_type: NotificationType,
    target_info: Option<&serde_json::Value>,
    recipients_count: i64,
    payload: Option<&serde_json::Value>,
) -> anyhow::Result<()> {
    let active = log::ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        title: Set(title.to_string()),
        description: Set(description.to_string()),
        created_by: Set(created_by.map(str::to_string)),
        created_by_name: Set(created_by_name.map(str::to_string)),
        notification_type: Set(notification_type.as_str().to_string()),
        target_info: Set(target_info.map(|v| v.to_string())),
        recipients_count: Set(recipients_count),
        payload: Set(payload.map(|v| v.to_string())),
        sent_at: Set(Utc::now()),
    };
    active.insert(conn()).await?;
    Ok(())
}

pub async fn list_logs(limit: u64, offset: u64) -> anyhow::Result<Vec<NotificationLog>> {
    let items: Vec<NotificationLog> = log::Entity::find()
        .order_by_desc(log::Column::SentAt)
        .limit(limit)
        .offset(offset)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}
