use serde::{Deserialize, Serialize};

/// Registered push token of a user device. One user may hold several
/// tokens; a token always belongs to exactly one user (last write wins).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceToken {
    pub id: i64,
    #[serde(rename = "userRef")]
    pub user_ref: String,
    pub token: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Audience of a dispatched notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    General,
    Targeted,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::General => "general",
            NotificationType::Targeted => "targeted",
        }
    }
}

/// Record of one dispatch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationLog {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "createdBy")]
    pub created_by: Option<String>,
    #[serde(rename = "createdByName")]
    pub created_by_name: Option<String>,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// Targeting parameters for targeted sends: districts + productRef
    #[serde(rename = "targetInfo")]
    pub target_info: Option<serde_json::Value>,
    #[serde(rename = "recipientsCount")]
    pub recipients_count: i64,
    /// Gateway result summary
    pub payload: Option<serde_json::Value>,
    #[serde(rename = "sentAt")]
    pub sent_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveTokenRequest {
    #[serde(rename = "userRef")]
    pub user_ref: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendToAllRequest {
    pub title: String,
    pub description: String,
    #[serde(rename = "createdBy")]
    pub created_by: Option<String>,
    #[serde(rename = "createdByName")]
    pub created_by_name: Option<String>,
    /// Extra data forwarded to devices
    pub payload: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendTargetedRequest {
    pub title: String,
    pub description: String,
    pub districts: Vec<String>,
    #[serde(rename = "productRef")]
    pub product_ref: String,
    #[serde(rename = "createdBy")]
    pub created_by: Option<String>,
    #[serde(rename = "createdByName")]
    pub created_by_name: Option<String>,
    pub payload: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Aggregated result of a dispatch run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchOutcome {
    #[serde(rename = "successCount")]
    pub success_count: usize,
    #[serde(rename = "failureCount")]
    pub failure_count: usize,
    /// Tokens the gateway reported as no longer valid; pruned after the run
    #[serde(rename = "prunedTokens")]
    pub pruned_tokens: usize,
}
