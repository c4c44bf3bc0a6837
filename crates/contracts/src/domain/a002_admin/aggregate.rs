use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of an administrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdminId(pub Uuid);

impl AdminId {
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

impl AggregateId for AdminId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(AdminId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Platform administrator. The password hash never leaves the backend;
/// it is stored by the repository next to the aggregate row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    #[serde(flatten)]
    pub base: BaseAggregate<AdminId>,

    /// Login email (unique)
    pub email: String,
}

impl Admin {
    pub fn new_for_insert(code: String, name: String, email: String) -> Self {
        let base = BaseAggregate::new(AdminId::new_v4(), code, name);
        Self { base, email }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.base.description
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

impl AggregateRoot for Admin {
    type Id = AdminId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "admin"
    }
}

/// DTO for admin registration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdminDto {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_mailless_email() {
        let admin = Admin::new_for_insert("ADM-1".into(), "Root".into(), "not-an-email".into());
        assert!(admin.validate().is_err());
    }

    #[test]
    fn validate_accepts_regular_admin() {
        let admin = Admin::new_for_insert("ADM-1".into(), "Root".into(), "root@agri.example".into());
        assert!(admin.validate().is_ok());
    }
}
