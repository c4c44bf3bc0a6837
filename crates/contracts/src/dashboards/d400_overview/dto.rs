use serde::{Deserialize, Serialize};

/// Entity counts shown on the admin dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverviewStats {
    #[serde(rename = "totalCategories")]
    pub total_categories: u64,
    #[serde(rename = "totalSubcategories")]
    pub total_subcategories: u64,
    #[serde(rename = "totalProducts")]
    pub total_products: u64,
    #[serde(rename = "totalAds")]
    pub total_ads: u64,
    #[serde(rename = "totalAdmins")]
    pub total_admins: u64,
    #[serde(rename = "totalSubadmins")]
    pub total_subadmins: u64,
}
