use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a crop calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropCalendarId(pub Uuid);

impl CropCalendarId {
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

impl AggregateId for CropCalendarId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CropCalendarId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Agronomy reference sheet for a product: costs, tips, diseases and growth
/// stages, each an ordered JSON section authored in the admin panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropCalendar {
    #[serde(flatten)]
    pub base: BaseAggregate<CropCalendarId>,

    #[serde(rename = "subcategoryRef")]
    pub subcategory_ref: String,

    #[serde(rename = "productRef")]
    pub product_ref: String,

    #[serde(rename = "cropDetails")]
    pub crop_details: Option<String>,

    #[serde(rename = "costEstimate")]
    pub cost_estimate: Vec<serde_json::Value>,

    #[serde(rename = "cultivationTips")]
    pub cultivation_tips: Vec<serde_json::Value>,

    #[serde(rename = "pestsAndDiseases")]
    pub pests_and_diseases: Vec<serde_json::Value>,

    #[serde(rename = "stagesSelection")]
    pub stages_selection: Vec<serde_json::Value>,
}

impl CropCalendar {
    pub fn new_for_insert(
        code: String,
        description: String,
        subcategory_ref: String,
        product_ref: String,
    ) -> Self {
        let base = BaseAggregate::new(CropCalendarId::new_v4(), code, description);

        Self {
            base,
            subcategory_ref,
            product_ref,
            crop_details: None,
            cost_estimate: Vec::new(),
            cultivation_tips: Vec::new(),
            pests_and_diseases: Vec::new(),
            stages_selection: Vec::new(),
        }
    }

    /// Merge updatable fields from the DTO
    pub fn update(&mut self, dto: &CropCalendarDto) {
        if let Some(ref subcategory_ref) = dto.subcategory_ref {
            self.subcategory_ref = subcategory_ref.clone();
        }
        if let Some(ref product_ref) = dto.product_ref {
            self.product_ref = product_ref.clone();
        }
        if dto.crop_details.is_some() {
            self.crop_details = dto.crop_details.clone();
        }
        if let Some(ref cost_estimate) = dto.cost_estimate {
            self.cost_estimate = cost_estimate.clone();
        }
        if let Some(ref cultivation_tips) = dto.cultivation_tips {
            self.cultivation_tips = cultivation_tips.clone();
        }
        if let Some(ref pests_and_diseases) = dto.pests_and_diseases {
            self.pests_and_diseases = pests_and_diseases.clone();
        }
        if let Some(ref stages_selection) = dto.stages_selection {
            self.stages_selection = stages_selection.clone();
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.subcategory_ref.trim().is_empty() {
            return Err("subcategoryRef cannot be empty".into());
        }
        if self.product_ref.trim().is_empty() {
            return Err("productRef cannot be empty".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for CropCalendar {
    type Id = CropCalendarId;

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
        "a010"
    }

    fn collection_name() -> &'static str {
        "crop_calendar"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CropCalendarDto {
    #[serde(rename = "subcategoryRef")]
    pub subcategory_ref: Option<String>,
    #[serde(rename = "productRef")]
    pub product_ref: Option<String>,
    #[serde(rename = "cropDetails")]
    pub crop_details: Option<String>,
    #[serde(rename = "costEstimate")]
    pub cost_estimate: Option<Vec<serde_json::Value>>,
    #[serde(rename = "cultivationTips")]
    pub cultivation_tips: Option<Vec<serde_json::Value>>,
    #[serde(rename = "pestsAndDiseases")]
    pub pests_and_diseases: Option<Vec<serde_json::Value>>,
    #[serde(rename = "stagesSelection")]
    pub stages_selection: Option<Vec<serde_json::Value>>,
}
