use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a subadmin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubadminId(pub Uuid);

impl SubadminId {
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

impl AggregateId for SubadminId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SubadminId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Subadmin: a district-scoped operator account managed by admins.
/// `districts` limits which regions the account may act on, `page_access`
/// limits which admin-panel pages it sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subadmin {
    #[serde(flatten)]
    pub base: BaseAggregate<SubadminId>,

    /// Login email (unique)
    pub email: String,

    pub number: Option<String>,

    pub qualification: Option<String>,

    pub address: Option<String>,

    /// District scope of the account
    pub districts: Vec<String>,

    /// Admin-panel pages the account may open
    #[serde(rename = "pageAccess")]
    pub page_access: Vec<String>,

    /// Avatar on the media host
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,

    /// Deletion handle of the avatar
    #[serde(rename = "imageRef")]
    pub image_ref: Option<String>,
}

impl Subadmin {
    pub fn new_for_insert(code: String, name: String, email: String) -> Self {
        let base = BaseAggregate::new(SubadminId::new_v4(), code, name);

        Self {
            base,
            email,
            number: None,
            qualification: None,
            address: None,
            districts: Vec::new(),
            page_access: Vec::new(),
            image_url: None,
            image_ref: None,
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.base.description
    }

    /// Merge updatable fields from the DTO
    pub fn update(&mut self, dto: &SubadminDto) {
        if let Some(ref name) = dto.name {
            self.base.description = name.clone();
        }
        if let Some(ref email) = dto.email {
            self.email = email.clone();
        }
        if dto.number.is_some() {
            self.number = dto.number.clone();
        }
        if dto.qualification.is_some() {
            self.qualification = dto.qualification.clone();
        }
        if dto.address.is_some() {
            self.address = dto.address.clone();
        }
        if let Some(ref districts) = dto.districts {
            self.districts = districts.clone();
        }
        if let Some(ref page_access) = dto.page_access {
            self.page_access = page_access.clone();
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("name cannot be empty".into());
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err("a valid email is required".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Subadmin {
    type Id = SubadminId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "subadmin"
    }
}

/// DTO for subadmin create/update. `password` is only honored on create.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SubadminDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub number: Option<String>,
    pub qualification: Option<String>,
    pub address: Option<String>,
    pub districts: Option<Vec<String>>,
    #[serde(rename = "pageAccess")]
    pub page_access: Option<Vec<String>>,
}
