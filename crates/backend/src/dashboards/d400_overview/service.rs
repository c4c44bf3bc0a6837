use contracts::dashboards::d400_overview::OverviewStats;

use crate::domain::{a002_admin, a003_subadmin, a004_category, a005_subcategory, a006_product, a011_ad};
use crate::shared::error::DomainResult;

/// Entity counts for the admin dashboard
pub async fn overview() -> DomainResult<OverviewStats> {
    let total_categories = a004_category::repository::count().await?;
    let total_subcategories = a005_subcategory::repository::count().await?;
    let total_products = a006_product::repository::count().await?;
    let total_ads = a011_ad::repository::count().await?;
    let total_admins = a002_admin::repository::count().await?;
    let total_subadmins = a003_subadmin::repository::count().await?;

    Ok(OverviewStats {
        total_categories,
        total_subcategories,
        total_products,
        total_ads,
        total_admins,
        total_subadmins,
    })
}
