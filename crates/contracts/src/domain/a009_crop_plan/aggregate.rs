use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a crop plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropPlanId(pub Uuid);

impl CropPlanId {
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

impl AggregateId for CropPlanId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CropPlanId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Planned allocation of acreage on a land to a product. A (land, product)
/// pair may carry at most one plan, and the planned areas on a land must
/// never sum past its farm_size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropPlan {
    #[serde(flatten)]
    pub base: BaseAggregate<CropPlanId>,

    /// Planning user (a001); must own the land
    #[serde(rename = "userRef")]
    pub user_ref: String,

    /// Land parcel (a007)
    #[serde(rename = "landRef")]
    pub land_ref: String,

    /// Planned product (a006)
    #[serde(rename = "productRef")]
    pub product_ref: String,

    /// Planned acreage
    #[serde(rename = "areaAcres")]
    pub area_acres: f64,

    /// Civil date of the plan, `YYYY-MM-DD`
    #[serde(rename = "planningDate")]
    pub planning_date: String,
}

impl CropPlan {
    pub fn new_for_insert(
        code: String,
        description: String,
        user_ref: String,
        land_ref: String,
        product_ref: String,
        area_acres: f64,
        planning_date: String,
    ) -> Self {
        let base = BaseAggregate::new(CropPlanId::new_v4(), code, description);

        Self {
            base,
            user_ref,
            land_ref,
            product_ref,
            area_acres,
            planning_date,
        }
    }

    /// Merge updatable fields from the DTO
    pub fn update(&mut self, dto: &CropPlanDto) {
        if let Some(ref user_ref) = dto.user_ref {
            self.user_ref = user_ref.clone();
        }
        if let Some(ref land_ref) = dto.land_ref {
            self.land_ref = land_ref.clone();
        }
        if let Some(ref product_ref) = dto.product_ref {
            self.product_ref = product_ref.clone();
        }
        if let Some(area_acres) = dto.area_acres {
            self.area_acres = area_acres;
        }
        if let Some(ref planning_date) = dto.planning_date {
            self.planning_date = planning_date.clone();
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.user_ref.trim().is_empty() {
            return Err("userRef cannot be empty".into());
        }
        if self.land_ref.trim().is_empty() {
            return Err("landRef cannot be empty".into());
        }
        if self.product_ref.trim().is_empty() {
            return Err("productRef cannot be empty".into());
        }
        if !self.area_acres.is_finite() || self.area_acres <= 0.0 {
            return Err("areaAcres must be a positive number".into());
        }
        if !is_valid_planning_date(&self.planning_date) {
            return Err("Invalid planningDate format. Use YYYY-MM-DD".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

/// A planning date is exactly `YYYY-MM-DD` and must name a real civil date.
pub fn is_valid_planning_date(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

impl AggregateRoot for CropPlan {
    type Id = CropPlanId;

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
        "a009"
    }

    fn collection_name() -> &'static str {
        "crop_plan"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CropPlanDto {
    #[serde(rename = "userRef")]
    pub user_ref: Option<String>,
    #[serde(rename = "landRef")]
    pub land_ref: Option<String>,
    #[serde(rename = "productRef")]
    pub product_ref: Option<String>,
    #[serde(rename = "areaAcres")]
    pub area_acres: Option<f64>,
    #[serde(rename = "planningDate")]
    pub planning_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planning_date_must_be_iso() {
        assert!(is_valid_planning_date("2025-11-24"));
        assert!(!is_valid_planning_date("24-11-2025"));
        assert!(!is_valid_planning_date("2025-13-01"));
        assert!(!is_valid_planning_date("2025-1-1"));
    }

    #[test]
    fn validate_rejects_non_positive_area() {
        let mut plan = CropPlan::new_for_insert(
            "CP-1".into(),
            "Paddy on north field".into(),
            Uuid::new_v4().to_string(),
            Uuid::new_v4().to_string(),
            Uuid::new_v4().to_string(),
            0.0,
            "2025-11-24".into(),
        );
        assert!(plan.validate().is_err());
        plan.area_acres = 1.5;
        assert!(plan.validate().is_ok());
    }
}
