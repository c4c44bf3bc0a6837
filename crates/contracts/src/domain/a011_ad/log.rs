use serde::{Deserialize, Serialize};

/// Action recorded in the ad audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdLogAction {
    Create,
    Update,
    Delete,
    ActivateScheduled,
    AutoExpired,
}

impl AdLogAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdLogAction::Create => "create",
            AdLogAction::Update => "update",
            AdLogAction::Delete => "delete",
            AdLogAction::ActivateScheduled => "activate_scheduled",
            AdLogAction::AutoExpired => "auto_expired",
        }
    }
}

/// Append-only audit record of an action against an ad. Rows are written
/// in the same transaction as the change they describe and are never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdLog {
    pub id: i64,
    #[serde(rename = "adRef")]
    pub ad_ref: String,
    pub action: AdLogAction,
    #[serde(rename = "actorName")]
    pub actor_name: Option<String>,
    #[serde(rename = "actorRole")]
    pub actor_role: Option<String>,
    /// JSON snapshot of the ad at the time of the action
    pub payload: Option<serde_json::Value>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}
