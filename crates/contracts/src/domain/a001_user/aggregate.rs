use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Unique identifier of a platform user (farmer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
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

impl AggregateId for UserId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(UserId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Platform user. Signs in through the external identity provider; the
/// profile is created on first login and filled in over later steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub base: BaseAggregate<UserId>,

    /// Identity-provider uid (unique)
    #[serde(rename = "externalUid")]
    pub external_uid: String,

    pub email: String,

    pub mobile: Option<String>,

    pub district: Option<String>,

    pub profession: Option<String>,

    pub age: Option<i32>,

    pub taluk: Option<String>,

    pub village: Option<String>,

    pub panchayat: Option<String>,

    /// Profile image on the media host
    #[serde(rename = "profileImageUrl")]
    pub profile_image_url: Option<String>,

    /// Deletion handle of the profile image
    #[serde(rename = "profileImageRef")]
    pub profile_image_ref: Option<String>,

    /// OTP verification completed
    #[serde(rename = "isVerified")]
    pub is_verified: bool,

    /// Blocked users cannot create ads, lands or allocations
    #[serde(rename = "isBlocked")]
    pub is_blocked: bool,
}

impl User {
    /// Create a new user for insertion (first login)
    pub fn new_for_insert(
        code: String,
        username: String,
        external_uid: String,
        email: String,
        profile_image_url: Option<String>,
    ) -> Self {
        let base = BaseAggregate::new(UserId::new_v4(), code, username);

        Self {
            base,
            external_uid,
            email,
            mobile: None,
            district: None,
            profession: None,
            age: None,
            taluk: None,
            village: None,
            panchayat: None,
            profile_image_url,
            profile_image_ref: None,
            is_verified: false,
            is_blocked: false,
        }
    }

    /// Display name (username)
    pub fn username(&self) -> &str {
        &self.base.description
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.external_uid.trim().is_empty() {
            return Err("externalUid cannot be empty".into());
        }
        if self.email.trim().is_empty() {
            return Err("email cannot be empty".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for User {
    type Id = UserId;

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
        "a001"
    }

    fn collection_name() -> &'static str {
        "user"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for the basic-details profile step
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserDto {
    pub mobile: Option<String>,
    pub district: Option<String>,
    pub profession: Option<String>,
    pub age: Option<i32>,
    pub taluk: Option<String>,
    pub village: Option<String>,
    pub panchayat: Option<String>,
}
