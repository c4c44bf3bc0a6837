use chrono::Utc;
use contracts::domain::a012_news::aggregate::NewsLog;
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a012_news_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub news_ref: String,
    pub title: String,
    pub url: String,
    pub action: String,
    pub actor_name: Option<String>,
    pub actor_role: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for NewsLog {
    fn from(m: Model) -> Self {
        NewsLog {
            id: m.id,
            news_ref: m.news_ref,
            title: m.title,
            url: m.url,
            action: m.action,
            actor_name: m.actor_name,
            actor_role: m.actor_role,
            created_at: m.created_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn insert(
    news_ref: &str,
    title: &str,
    url: &str,
    action: &str,
    actor_name: Option<&str>,
    actor_role: Option<&str>,
) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        news_ref: Set(news_ref.to_string()),
        title: Set(title.to_string()),
        url: Set(url.to_string()),
        action: Set(action.to_string()),
        actor_name: Set(actor_name.map(str::to_string)),
        actor_role: Set(actor_role.map(str::to_string)),
        created_at: Set(Utc::now()),
    };
    active.insert(conn()).await?;
    Ok(())
}

pub async fn list_all() -> anyhow::Result<Vec<NewsLog>> {
    let items: Vec<NewsLog> = Entity::find()
        .order_by_desc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}
