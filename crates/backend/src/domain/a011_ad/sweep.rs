use chrono::NaiveDate;
use contracts::domain::a011_ad::aggregate::{Ad, AdStatus};
use contracts::domain::a011_ad::log::AdLogAction;
use sea_orm::TransactionTrait;

use super::{log_repository, repository};
use crate::shared::data::db::get_connection;
use crate::shared::logger;
use crate::shared::media;
use crate::system::clock::{local_date, local_midnight, Clock};

/// Counters reported by one sweep run
#[derive(Debug, Default, Clone, Copy)]
pub struct SweepSummary {
    pub activated: usize,
    pub expired: usize,
    pub failed: usize,
}

/// A pending scheduled ad activates on the day its scheduled date
/// arrives, evaluated as a civil date in the platform timezone.
pub fn is_due_for_activation(ad: &Ad, today: NaiveDate) -> bool {
    match ad.scheduled_at {
        Some(scheduled_at) => ad.status == AdStatus::Pending && local_date(scheduled_at) <= today,
        None => false,
    }
}

/// An ad expires once its expiry civil date is today or earlier. `<=`
/// rather than `==`, so ads whose date passed during downtime are still
/// removed on the next run.
pub fn is_expired(ad: &Ad, today: NaiveDate) -> bool {
    match ad.expiry_date {
        Some(expiry_date) => local_date(expiry_date) <= today,
        None => false,
    }
}

/// Daily sweep: activation first, then expiry, so an ad scheduled for
/// today that also expires today is activated, logged, and removed in the
/// same run. Each ad transitions in its own transaction; one failure
/// never aborts the rest of the batch.
pub async fn run(clock: &dyn Clock) -> SweepSummary {
    let today = local_date(clock.now_utc());
    let mut summary = SweepSummary::default();

    match activate_scheduled(clock, today).await {
        Ok((activated, failed)) => {
            summary.activated = activated;
            summary.failed += failed;
        }
        Err(e) => {
            tracing::error!("Activation pass failed: {:#}", e);
            summary.failed += 1;
        }
    }

    match expire_due(today).await {
        Ok((expired, failed)) => {
            summary.expired = expired;
            summary.failed += failed;
        }
        Err(e) => {
            tracing::error!("Expiry pass failed: {:#}", e);
            summary.failed += 1;
        }
    }

    logger::log(
        "sweep",
        &format!(
            "Sweep finished: {} activated, {} expired, {} failed",
            summary.activated, summary.expired, summary.failed
        ),
    );
    summary
}

async fn activate_scheduled(clock: &dyn Clock, today: NaiveDate) -> anyhow::Result<(usize, usize)> {
    let candidates = repository::list_pending_scheduled().await?;
    let mut activated = 0;
    let mut failed = 0;

    for ad in candidates {
        if !is_due_for_activation(&ad, today) {
            continue;
        }
        match activate_one(clock, ad).await {
            Ok(()) => activated += 1,
            Err(e) => {
                failed += 1;
                tracing::warn!("Failed to activate scheduled ad: {:#}", e);
            }
        }
    }

    tracing::info!("Activated {} scheduled ads", activated);
    Ok((activated, failed))
}

async fn activate_one(clock: &dyn Clock, mut ad: Ad) -> anyhow::Result<()> {
    ad.status = AdStatus::Active;
    // An activated ad always carries an expiry; default it from the
    // activation day when none was supplied.
    if ad.expiry_date.is_none() {
        ad.expiry_date =
            Some(local_midnight(local_date(clock.now_utc())) + chrono::Duration::days(15));
    }
    ad.before_write();

    let payload = serde_json::json!({ "scheduledAt": ad.scheduled_at });
    let txn = get_connection().begin().await?;
    repository::update_in(&txn, &ad).await?;
    log_repository::insert_in(
        &txn,
        &ad.base.id.value().to_string(),
        AdLogAction::ActivateScheduled,
        Some("system"),
        Some("system"),
        Some(&payload),
    )
    .await?;
    txn.commit().await?;
    Ok(())
}

async fn expire_due(today: NaiveDate) -> anyhow::Result<(usize, usize)> {
    let candidates = repository::list_expirable().await?;
    let mut expired = 0;
    let mut failed = 0;

    for ad in candidates {
        if !is_expired(&ad, today) {
            continue;
        }
        match expire_one(&ad).await {
            Ok(()) => expired += 1,
            Err(e) => {
                failed += 1;
                tracing::warn!("Failed to expire ad {}: {:#}", ad.base.code, e);
            }
        }
    }

    tracing::info!("Expired {} ads", expired);
    Ok((expired, failed))
}

/// Audit row and row deletion commit atomically; media cleanup follows
/// outside the transaction and is best-effort.
async fn expire_one(ad: &Ad) -> anyhow::Result<()> {
    let snapshot = serde_json::to_value(ad).unwrap_or(serde_json::Value::Null);

    let txn = get_connection().begin().await?;
    log_repository::insert_in(
        &txn,
        &ad.base.id.value().to_string(),
        AdLogAction::AutoExpired,
        Some("system"),
        Some("system"),
        Some(&snapshot),
    )
    .await?;
    repository::delete_in(&txn, ad.base.id.value()).await?;
    txn.commit().await?;

    for image in &ad.images {
        media::client().delete_best_effort(&image.asset_ref).await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use contracts::domain::a011_ad::aggregate::{AdDetails, AdType, CreatorRole, PostType};
    use uuid::Uuid;

    fn scheduled_ad(scheduled: chrono::DateTime<chrono::Utc>) -> Ad {
        let mut ad = Ad::new_for_insert(
            "AD-TEST0001".into(),
            "Paddy seedlings".into(),
            Uuid::new_v4().to_string(),
            Uuid::new_v4().to_string(),
            "Paddy".into(),
            vec!["Thanjavur".into()],
            AdType::Sell,
            PostType::Schedule,
            CreatorRole::User,
            Uuid::new_v4().to_string(),
            AdDetails::Food {
                breed: "Ponni".into(),
                unit: "kg".into(),
            },
        );
        ad.scheduled_at = Some(scheduled);
        ad
    }

    #[test]
    fn activation_waits_for_the_scheduled_day() {
        let scheduled = crate::system::clock::local_midnight(
            NaiveDate::from_ymd_opt(2025, 11, 25).unwrap(),
        );
        let ad = scheduled_ad(scheduled);

        let before = NaiveDate::from_ymd_opt(2025, 11, 24).unwrap();
        let on_day = NaiveDate::from_ymd_opt(2025, 11, 25).unwrap();
        assert!(!is_due_for_activation(&ad, before));
        assert!(is_due_for_activation(&ad, on_day));
    }

    #[test]
    fn active_ads_are_not_reactivated() {
        let scheduled = crate::system::clock::local_midnight(
            NaiveDate::from_ymd_opt(2025, 11, 25).unwrap(),
        );
        let mut ad = scheduled_ad(scheduled);
        ad.status = AdStatus::Active;
        assert!(!is_due_for_activation(
            &ad,
            NaiveDate::from_ymd_opt(2025, 11, 25).unwrap()
        ));
    }

    #[test]
    fn expiry_includes_past_dates() {
        let expiry = crate::system::clock::local_midnight(
            NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
        );
        let mut ad = scheduled_ad(chrono::Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap());
        ad.expiry_date = Some(expiry);

        // Expiry day itself and every later day qualify
        assert!(is_expired(&ad, NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()));
        assert!(is_expired(&ad, NaiveDate::from_ymd_opt(2025, 11, 24).unwrap()));
        assert!(!is_expired(&ad, NaiveDate::from_ymd_opt(2025, 11, 19).unwrap()));
    }

    #[test]
    fn ads_without_expiry_never_expire() {
        let ad = scheduled_ad(chrono::Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap());
        assert!(!is_expired(&ad, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
    }
}
