use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Unique identifier of a classified ad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdId(pub Uuid);

impl AdId {
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

impl AggregateId for AdId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(AdId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Listing intent of an ad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdType {
    Sell,
    Rent,
}

impl AdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdType::Sell => "sell",
            AdType::Rent => "rent",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "sell" => Ok(AdType::Sell),
            "rent" => Ok(AdType::Rent),
            other => Err(format!("Invalid adType: {}", other)),
        }
    }
}

/// How the ad enters the board: immediately or on a scheduled date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    #[serde(rename = "postnow")]
    PostNow,
    Schedule,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::PostNow => "postnow",
            PostType::Schedule => "schedule",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "postnow" => Ok(PostType::PostNow),
            "schedule" => Ok(PostType::Schedule),
            other => Err(format!("Invalid postType: {}", other)),
        }
    }
}

/// Lifecycle status. Expired ads are removed by the daily sweep, so the
/// `Expired` state is only ever observable in audit-log snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdStatus {
    Pending,
    Active,
    Expired,
}

impl AdStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdStatus::Pending => "pending",
            AdStatus::Active => "active",
            AdStatus::Expired => "expired",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "pending" => Ok(AdStatus::Pending),
            "active" => Ok(AdStatus::Active),
            "expired" => Ok(AdStatus::Expired),
            other => Err(format!("Invalid status: {}", other)),
        }
    }
}

/// Kind of actor an ad was created by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatorRole {
    User,
    Subadmin,
    Admin,
}

impl CreatorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreatorRole::User => "user",
            CreatorRole::Subadmin => "subadmin",
            CreatorRole::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "user" => Ok(CreatorRole::User),
            "subadmin" => Ok(CreatorRole::Subadmin),
            "admin" => Ok(CreatorRole::Admin),
            other => Err(format!("Invalid createdByRole: {}", other)),
        }
    }
}

// ============================================================================
// Category-specific details
// ============================================================================

/// Category-specific attributes of an ad, keyed by the name of the ad's
/// category. Categories without structured attributes use `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum AdDetails {
    Food {
        breed: String,
        unit: String,
    },
    Animal {
        breed: String,
        quantity: i64,
    },
    Machinery {
        brand: String,
        model: String,
        #[serde(rename = "manufactureYear")]
        manufacture_year: i32,
        #[serde(rename = "registrationNo")]
        registration_no: String,
        #[serde(rename = "prevOwners")]
        prev_owners: i32,
        #[serde(rename = "drivenHours")]
        driven_hours: f64,
        #[serde(rename = "kmsCovered")]
        kms_covered: f64,
        #[serde(rename = "insuranceRunning")]
        insurance_running: bool,
        #[serde(rename = "fcValue")]
        fc_value: String,
    },
    Other {
        #[serde(flatten)]
        fields: serde_json::Map<String, serde_json::Value>,
    },
}

impl Default for AdDetails {
    fn default() -> Self {
        AdDetails::Other {
            fields: serde_json::Map::new(),
        }
    }
}

impl AdDetails {
    /// Check the details against the name of the ad's effective category.
    /// Food and Animal require a breed; Machinery requires its full field
    /// set; any other category accepts the free-form variant.
    pub fn validate_for_category(&self, category_name: &str) -> Result<(), String> {
        match category_name {
            "Food" => match self {
                AdDetails::Food { breed, unit } => {
                    if breed.trim().is_empty() {
                        return Err("Breed is required for Food category".into());
                    }
                    if unit.trim().is_empty() {
                        return Err("Unit is required for Food category".into());
                    }
                    Ok(())
                }
                _ => Err("Food category requires Food details".into()),
            },
            "Animal" => match self {
                AdDetails::Animal { breed, quantity } => {
                    if breed.trim().is_empty() {
                        return Err("Breed is required for Animal category".into());
                    }
                    if *quantity <= 0 {
                        return Err("Quantity must be a positive number".into());
                    }
                    Ok(())
                }
                _ => Err("Animal category requires Animal details".into()),
            },
            "Machinery" => match self {
                AdDetails::Machinery {
                    brand,
                    model,
                    registration_no,
                    fc_value,
                    ..
                } => {
                    for (name, value) in [
                        ("brand", brand),
                        ("model", model),
                        ("registrationNo", registration_no),
                        ("fcValue", fc_value),
                    ] {
                        if value.trim().is_empty() {
                            return Err(format!(
                                "Missing required field for machinery: {}",
                                name
                            ));
                        }
                    }
                    Ok(())
                }
                _ => Err("Machinery category requires Machinery details".into()),
            },
            _ => Ok(()),
        }
    }

    /// Breed carried by Food/Animal details, used by breed filters
    pub fn breed(&self) -> Option<&str> {
        match self {
            AdDetails::Food { breed, .. } | AdDetails::Animal { breed, .. } => Some(breed),
            _ => None,
        }
    }
}

/// Image stored on the media host: public URL plus the opaque handle the
/// host expects for deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdImage {
    pub url: String,
    /// Deletion handle on the media host
    #[serde(rename = "assetRef")]
    pub asset_ref: String,
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Classified ad. `base.code` is the short public code shown to users;
/// `base.description` is the listing title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ad {
    #[serde(flatten)]
    pub base: BaseAggregate<AdId>,

    #[serde(rename = "categoryRef")]
    pub category_ref: String,

    #[serde(rename = "subcategoryRef")]
    pub subcategory_ref: Option<String>,

    #[serde(rename = "productRef")]
    pub product_ref: String,

    #[serde(rename = "productName")]
    pub product_name: String,

    pub unit: Option<String>,

    pub quantity: Option<f64>,

    pub price: Option<f64>,

    /// Districts the ad is visible in
    pub districts: Vec<String>,

    #[serde(rename = "adType")]
    pub ad_type: AdType,

    #[serde(rename = "postType")]
    pub post_type: PostType,

    pub status: AdStatus,

    /// Midnight (in the platform timezone) of the scheduled posting day
    #[serde(rename = "scheduledAt")]
    pub scheduled_at: Option<chrono::DateTime<chrono::Utc>>,

    /// Midnight (in the platform timezone) of the day the ad is removed
    #[serde(rename = "expiryDate")]
    pub expiry_date: Option<chrono::DateTime<chrono::Utc>>,

    pub images: Vec<AdImage>,

    #[serde(rename = "videoUrl")]
    pub video_url: Option<String>,

    #[serde(rename = "createdByRole")]
    pub created_by_role: CreatorRole,

    /// Creator record in the table matching `created_by_role`
    #[serde(rename = "creatorRef")]
    pub creator_ref: String,

    pub details: AdDetails,
}

impl Ad {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        title: String,
        category_ref: String,
        product_ref: String,
        product_name: String,
        districts: Vec<String>,
        ad_type: AdType,
        post_type: PostType,
        created_by_role: CreatorRole,
        creator_ref: String,
        details: AdDetails,
    ) -> Self {
        let base = BaseAggregate::new(AdId::new_v4(), code, title);

        Self {
            base,
            category_ref,
            subcategory_ref: None,
            product_ref,
            product_name,
            unit: None,
            quantity: None,
            price: None,
            districts,
            ad_type,
            post_type,
            status: AdStatus::Pending,
            scheduled_at: None,
            expiry_date: None,
            images: Vec::new(),
            video_url: None,
            created_by_role,
            creator_ref,
            details,
        }
    }

    /// Listing title
    pub fn title(&self) -> &str {
        &self.base.description
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("title cannot be empty".into());
        }
        if self.category_ref.trim().is_empty() {
            return Err("categoryRef cannot be empty".into());
        }
        if self.product_ref.trim().is_empty() {
            return Err("productRef cannot be empty".into());
        }
        if self.product_name.trim().is_empty() {
            return Err("productName cannot be empty".into());
        }
        if self.districts.is_empty() {
            return Err("districts cannot be empty".into());
        }
        if self.creator_ref.trim().is_empty() {
            return Err("creatorRef cannot be empty".into());
        }
        // A scheduled ad without a date would never activate
        if self.post_type == PostType::Schedule
            && self.status == AdStatus::Pending
            && self.scheduled_at.is_none()
        {
            return Err("scheduledAt is required for scheduled posts".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Ad {
    type Id = AdId;

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
        "a011"
    }

    fn collection_name() -> &'static str {
        "ad"
    }
}

/// Listing view of an ad with the creator's display fields resolved from
/// the table matching `created_by_role`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdWithCreator {
    #[serde(flatten)]
    pub ad: Ad,
    #[serde(rename = "creatorName")]
    pub creator_name: Option<String>,
    #[serde(rename = "creatorEmail")]
    pub creator_email: Option<String>,
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for ad create/update. On create the service requires title,
/// categoryRef, productRef, productName, districts, adType, createdByRole
/// and creatorRef; on update every field is an optional overlay on the
/// stored row.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdDto {
    pub title: Option<String>,
    #[serde(rename = "categoryRef")]
    pub category_ref: Option<String>,
    #[serde(rename = "subcategoryRef")]
    pub subcategory_ref: Option<String>,
    #[serde(rename = "productRef")]
    pub product_ref: Option<String>,
    #[serde(rename = "productName")]
    pub product_name: Option<String>,
    pub unit: Option<String>,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub districts: Option<Vec<String>>,
    #[serde(rename = "adType")]
    pub ad_type: Option<String>,
    #[serde(rename = "postType")]
    pub post_type: Option<String>,
    /// Civil date, `YYYY-MM-DD` or `DD-MM-YYYY`
    #[serde(rename = "scheduledAt")]
    pub scheduled_at: Option<String>,
    /// Civil date, `YYYY-MM-DD` or `DD-MM-YYYY`
    #[serde(rename = "expiryDate")]
    pub expiry_date: Option<String>,
    #[serde(rename = "videoUrl")]
    pub video_url: Option<String>,
    #[serde(rename = "createdByRole")]
    pub created_by_role: Option<String>,
    #[serde(rename = "creatorRef")]
    pub creator_ref: Option<String>,
    /// Category-specific attributes (JSON object tagged with `category`)
    pub details: Option<AdDetails>,
    /// Actor written into the audit log
    #[serde(rename = "actorName")]
    pub actor_name: Option<String>,
    #[serde(rename = "actorRole")]
    pub actor_role: Option<String>,
    /// On update: asset refs of already-stored images to keep. Images not
    /// listed here are removed from the media host.
    #[serde(rename = "keepImages")]
    pub keep_images: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food_details() -> AdDetails {
        AdDetails::Food {
            breed: "Roho".into(),
            unit: "kg".into(),
        }
    }

    #[test]
    fn details_reject_category_mismatch() {
        let details = food_details();
        assert!(details.validate_for_category("Food").is_ok());
        assert!(details.validate_for_category("Machinery").is_err());
    }

    #[test]
    fn details_reject_blank_breed() {
        let details = AdDetails::Food {
            breed: "  ".into(),
            unit: "kg".into(),
        };
        let err = details.validate_for_category("Food").unwrap_err();
        assert!(err.contains("Breed"));
    }

    #[test]
    fn other_category_accepts_free_form_details() {
        let details: AdDetails =
            serde_json::from_str(r#"{"category":"Other","warranty":"6 months"}"#).unwrap();
        assert!(details.validate_for_category("Seeds").is_ok());
        assert_eq!(details.breed(), None);
    }

    #[test]
    fn scheduled_ad_requires_date() {
        let mut ad = Ad::new_for_insert(
            "AD-TEST0001".into(),
            "Fresh catla".into(),
            Uuid::new_v4().to_string(),
            Uuid::new_v4().to_string(),
            "Catla".into(),
            vec!["Thanjavur".into()],
            AdType::Sell,
            PostType::Schedule,
            CreatorRole::User,
            Uuid::new_v4().to_string(),
            food_details(),
        );
        assert!(ad.validate().is_err());
        ad.scheduled_at = Some(chrono::Utc::now());
        assert!(ad.validate().is_ok());
    }

    #[test]
    fn enum_wire_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&PostType::PostNow).unwrap(), "\"postnow\"");
        assert_eq!(serde_json::to_string(&AdStatus::Pending).unwrap(), "\"pending\"");
        assert_eq!(serde_json::to_string(&CreatorRole::Subadmin).unwrap(), "\"subadmin\"");
        assert_eq!(AdType::parse("rent").unwrap(), AdType::Rent);
    }
}
