use anyhow::Result;
use contracts::domain::a002_admin::aggregate::AdminDto;

use crate::domain::a002_admin;

/// Make sure at least one administrator exists. Credentials come from
/// ADMIN_EMAIL / ADMIN_PASSWORD, falling back to a development default.
pub async fn ensure_admin_exists() -> Result<()> {
    let count = a002_admin::repository::count().await?;
    if count > 0 {
        return Ok(());
    }

    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@agrimarket.local".into());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "change-me".into());

    tracing::info!("No admins found. Creating default admin user {}", email);

    a002_admin::service::register(AdminDto {
        name: "Administrator".into(),
        email,
        password,
    })
    .await
    .map_err(|e| anyhow::anyhow!("Failed to create default admin: {}", e))?;

    tracing::warn!("Default admin created. Change its password after first login.");
    Ok(())
}
