use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a news item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewsId(pub Uuid);

impl NewsId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for NewsId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(NewsId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Curated news link shown in the app feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct News {
    #[serde(flatten)]
    pub base: BaseAggregate<NewsId>,

    /// External article URL
    pub url: String,

    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,

    #[serde(rename = "imageRef")]
    pub image_ref: Option<String>,
}

impl News {
    pub fn new_for_insert(code: String, title: String, url: String) -> Self {
        let base = BaseAggregate::new(NewsId::new_v4(), code, title);
        Self {
            base,
            url,
            image_url: None,
            image_ref: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.base.description
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("title cannot be empty".into());
        }
        if self.url.trim().is_empty() {
            return Err("url cannot be empty".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for News {
    type Id = NewsId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a012"
    }

    fn collection_name() -> &'static str {
        "news"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NewsDto {
    pub title: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "actorName")]
    pub actor_name: Option<String>,
    #[serde(rename = "actorRole")]
    pub actor_role: Option<String>,
}

/// Append-only audit record of a news change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsLog {
    pub id: i64,
    #[serde(rename = "newsRef")]
    pub news_ref: String,
    pub title: String,
    pub url: String,
    /// create | update | delete
    pub action: String,
    #[serde(rename = "actorName")]
    pub actor_name: Option<String>,
    #[serde(rename = "actorRole")]
    pub actor_role: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}
