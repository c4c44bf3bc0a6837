use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a subcategory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubcategoryId(pub Uuid);

impl SubcategoryId {
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

impl AggregateId for SubcategoryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SubcategoryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Subcategory under a top-level category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subcategory {
    #[serde(flatten)]
    pub base: BaseAggregate<SubcategoryId>,

    /// Parent category (a004)
    #[serde(rename = "categoryRef")]
    pub category_ref: String,
}

impl Subcategory {
    pub fn new_for_insert(code: String, name: String, category_ref: String) -> Self {
        let base = BaseAggregate::new(SubcategoryId::new_v4(), code, name);
        Self { base, category_ref }
    }

    pub fn name(&self) -> &str {
        &self.base.description
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("name cannot be empty".into());
        }
        if self.category_ref.trim().is_empty() {
            return Err("categoryRef cannot be empty".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Subcategory {
    type Id = SubcategoryId;

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
        "a005"
    }

    fn collection_name() -> &'static str {
        "subcategory"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SubcategoryDto {
    pub name: Option<String>,
    #[serde(rename = "categoryRef")]
    pub category_ref: Option<String>,
}
