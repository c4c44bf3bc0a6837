use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a land parcel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LandId(pub Uuid);

impl LandId {
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

impl AggregateId for LandId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(LandId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Land parcel owned by exactly one user. `farm_size` is the fixed acreage
/// capacity against which land products and crop plans are accounted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Land {
    #[serde(flatten)]
    pub base: BaseAggregate<LandId>,

    /// Owner (a001)
    #[serde(rename = "userRef")]
    pub user_ref: String,

    pub district: Option<String>,

    pub taluk: Option<String>,

    pub village: Option<String>,

    pub panchayat: Option<String>,

    #[serde(rename = "surveyNo")]
    pub survey_no: Option<String>,

    #[serde(rename = "hissaNo")]
    pub hissa_no: Option<String>,

    /// Total acreage of the parcel, e.g. 2.6 or 3.75 acres
    #[serde(rename = "farmSize")]
    pub farm_size: f64,
}

impl Land {
    pub fn new_for_insert(code: String, land_name: String, user_ref: String, farm_size: f64) -> Self {
        let base = BaseAggregate::new(LandId::new_v4(), code, land_name);

        Self {
            base,
            user_ref,
            district: None,
            taluk: None,
            village: None,
            panchayat: None,
            survey_no: None,
            hissa_no: None,
            farm_size,
        }
    }

    /// Parcel display name
    pub fn land_name(&self) -> &str {
        &self.base.description
    }

    /// Merge updatable fields from the DTO. Ownership never changes here.
    pub fn update(&mut self, dto: &LandDto) {
        if let Some(ref name) = dto.land_name {
            self.base.description = name.clone();
        }
        if dto.district.is_some() {
            self.district = dto.district.clone();
        }
        if dto.taluk.is_some() {
            self.taluk = dto.taluk.clone();
        }
        if dto.village.is_some() {
            self.village = dto.village.clone();
        }
        if dto.panchayat.is_some() {
            self.panchayat = dto.panchayat.clone();
        }
        if dto.survey_no.is_some() {
            self.survey_no = dto.survey_no.clone();
        }
        if dto.hissa_no.is_some() {
            self.hissa_no = dto.hissa_no.clone();
        }
        if let Some(farm_size) = dto.farm_size {
            self.farm_size = farm_size;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("landName cannot be empty".into());
        }
        if self.user_ref.trim().is_empty() {
            return Err("userRef cannot be empty".into());
        }
        if !self.farm_size.is_finite() || self.farm_size <= 0.0 {
            return Err("farmSize must be a positive number".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Land {
    type Id = LandId;

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
        "a007"
    }

    fn collection_name() -> &'static str {
        "land"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LandDto {
    #[serde(rename = "userRef")]
    pub user_ref: Option<String>,
    #[serde(rename = "landName")]
    pub land_name: Option<String>,
    pub district: Option<String>,
    pub taluk: Option<String>,
    pub village: Option<String>,
    pub panchayat: Option<String>,
    #[serde(rename = "surveyNo")]
    pub survey_no: Option<String>,
    #[serde(rename = "hissaNo")]
    pub hissa_no: Option<String>,
    #[serde(rename = "farmSize")]
    pub farm_size: Option<f64>,
}
