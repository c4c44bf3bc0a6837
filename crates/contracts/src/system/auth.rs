use serde::{Deserialize, Serialize};

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Admin or subadmin record id
    pub sub: String,
    pub email: String,
    /// "admin" | "subadmin"
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

impl TokenClaims {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// "admin" | "subadmin"
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub user: ActorInfo,
}

/// Signed-in actor returned by login and `/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    /// District scope, subadmins only
    pub districts: Option<Vec<String>>,
    /// Page access list, subadmins only
    #[serde(rename = "pageAccess")]
    pub page_access: Option<Vec<String>>,
}
