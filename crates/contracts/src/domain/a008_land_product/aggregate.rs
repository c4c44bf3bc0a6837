use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a land-product allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LandProductId(pub Uuid);

impl LandProductId {
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

impl AggregateId for LandProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(LandProductId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Category-specific details
// ============================================================================

/// Category-specific shape of a land-product allocation. The variant must
/// match the category of the referenced product; only these three
/// categories may be placed on a land.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum LandProductDetails {
    /// Crop grown on the parcel; `acres` counts against the land's farm_size
    Food { acres: f64 },
    /// Machine kept on the parcel
    Machinery {
        #[serde(rename = "modelNo")]
        model_no: String,
        #[serde(rename = "registrationNo")]
        registration_no: String,
        #[serde(rename = "chassiNo")]
        chassi_no: String,
        #[serde(rename = "rcCopyNo")]
        rc_copy_no: String,
    },
    /// Livestock headcount
    Animal { quantity: i64 },
}

impl LandProductDetails {
    /// Category name the variant corresponds to
    pub fn category_name(&self) -> &'static str {
        match self {
            LandProductDetails::Food { .. } => "Food",
            LandProductDetails::Machinery { .. } => "Machinery",
            LandProductDetails::Animal { .. } => "Animal",
        }
    }

    /// Acres consumed on the land. Only Food allocations consume acreage.
    pub fn consumed_acres(&self) -> f64 {
        match self {
            LandProductDetails::Food { acres } => *acres,
            _ => 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            LandProductDetails::Food { acres } => {
                if !acres.is_finite() || *acres <= 0.0 {
                    return Err("acres must be a positive number".into());
                }
            }
            LandProductDetails::Machinery {
                model_no,
                registration_no,
                chassi_no,
                rc_copy_no,
            } => {
                for (name, value) in [
                    ("modelNo", model_no),
                    ("registrationNo", registration_no),
                    ("chassiNo", chassi_no),
                    ("rcCopyNo", rc_copy_no),
                ] {
                    if value.trim().is_empty() {
                        return Err(format!("{} is required for machinery", name));
                    }
                }
            }
            LandProductDetails::Animal { quantity } => {
                if *quantity <= 0 {
                    return Err("quantity must be a positive number".into());
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Association of a product with a land parcel under category-specific
/// terms. Food allocations on a given land must never sum past the land's
/// farm_size; the backend enforces that transactionally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandProduct {
    #[serde(flatten)]
    pub base: BaseAggregate<LandProductId>,

    /// Owner (a001)
    #[serde(rename = "userRef")]
    pub user_ref: String,

    /// Land parcel (a007)
    #[serde(rename = "landRef")]
    pub land_ref: String,

    /// Catalog product (a006)
    #[serde(rename = "productRef")]
    pub product_ref: String,

    #[serde(flatten)]
    pub details: LandProductDetails,
}

impl LandProduct {
    pub fn new_for_insert(
        code: String,
        description: String,
        user_ref: String,
        land_ref: String,
        product_ref: String,
        details: LandProductDetails,
    ) -> Self {
        let base = BaseAggregate::new(LandProductId::new_v4(), code, description);

        Self {
            base,
            user_ref,
            land_ref,
            product_ref,
            details,
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
        self.details.validate()
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for LandProduct {
    type Id = LandProductId;

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
        "a008"
    }

    fn collection_name() -> &'static str {
        "land_product"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for creating a land product. The details variant must match the
/// category of the referenced product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandProductDto {
    #[serde(rename = "userRef")]
    pub user_ref: String,
    #[serde(rename = "landRef")]
    pub land_ref: String,
    #[serde(rename = "productRef")]
    pub product_ref: String,
    #[serde(flatten)]
    pub details: LandProductDetails,
}

/// DTO for updating a land product. user/land/product/category are frozen
/// after creation; only the details payload may change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLandProductDto {
    #[serde(flatten)]
    pub details: LandProductDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_tagged_by_category() {
        let details: LandProductDetails =
            serde_json::from_str(r#"{"category":"Food","acres":2.5}"#).unwrap();
        assert_eq!(details, LandProductDetails::Food { acres: 2.5 });
        assert_eq!(details.consumed_acres(), 2.5);
    }

    #[test]
    fn machinery_requires_all_fields() {
        let details = LandProductDetails::Machinery {
            model_no: "MF-241".into(),
            registration_no: "KA-01-1234".into(),
            chassi_no: "".into(),
            rc_copy_no: "RC-9".into(),
        };
        let err = details.validate().unwrap_err();
        assert!(err.contains("chassiNo"));
    }

    #[test]
    fn only_food_consumes_acreage() {
        let details = LandProductDetails::Animal { quantity: 12 };
        assert_eq!(details.consumed_acres(), 0.0);
        assert!(details.validate().is_ok());
    }
}
