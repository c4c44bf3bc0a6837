use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a catalog product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
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

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProductId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Catalog product. Belongs to exactly one category and one subcategory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(flatten)]
    pub base: BaseAggregate<ProductId>,

    #[serde(rename = "categoryRef")]
    pub category_ref: String,

    #[serde(rename = "subcategoryRef")]
    pub subcategory_ref: String,

    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,

    #[serde(rename = "imageRef")]
    pub image_ref: Option<String>,
}

impl Product {
    pub fn new_for_insert(
        code: String,
        name: String,
        category_ref: String,
        subcategory_ref: String,
    ) -> Self {
        let base = BaseAggregate::new(ProductId::new_v4(), code, name);
        Self {
            base,
            category_ref,
            subcategory_ref,
            image_url: None,
            image_ref: None,
        }
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
        if self.subcategory_ref.trim().is_empty() {
            return Err("subcategoryRef cannot be empty".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

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
        "a006"
    }

    fn collection_name() -> &'static str {
        "product"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductDto {
    pub name: Option<String>,
    #[serde(rename = "categoryRef")]
    pub category_ref: Option<String>,
    #[serde(rename = "subcategoryRef")]
    pub subcategory_ref: Option<String>,
}
