use chrono::{DateTime, Utc};
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info};

use crate::domain::a011_ad::sweep;
use crate::system::clock::{platform_tz, Clock};

/// The sweep fires at midnight in the platform timezone, every day
const SWEEP_SCHEDULE: &str = "0 0 0 * * *";

/// Next sweep instant strictly after `now`
pub fn next_run_after(now: DateTime<Utc>) -> DateTime<Utc> {
    let schedule = Schedule::from_str(SWEEP_SCHEDULE).expect("static cron expression parses");
    schedule
        .after(&now.with_timezone(&platform_tz()))
        .next()
        .map(|at| at.with_timezone(&Utc))
        // A daily schedule always yields a next occurrence; fall back to
        // +24h to keep the loop alive regardless.
        .unwrap_or(now + chrono::Duration::hours(24))
}

/// Background worker driving the daily ad lifecycle sweep
pub struct SweepWorker {
    clock: Arc<dyn Clock>,
}

impl SweepWorker {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Sleep until the next platform-timezone midnight, run the sweep,
    /// repeat. Intended to be spawned once at startup.
    pub async fn run_loop(self) {
        info!("Ad sweep worker started (runs daily at 00:00 platform time)");

        loop {
            let now = self.clock.now_utc();
            let next = next_run_after(now);
            let wait = (next - now)
                .to_std()
                .unwrap_or(std::time::Duration::from_secs(1));

            info!("Next ad sweep at {}", next);
            tokio::time::sleep(wait).await;

            let summary = sweep::run(self.clock.as_ref()).await;
            if summary.failed > 0 {
                error!(
                    "Ad sweep completed with failures: {} activated, {} expired, {} failed",
                    summary.activated, summary.expired, summary.failed
                );
            } else {
                info!(
                    "Ad sweep completed: {} activated, {} expired",
                    summary.activated, summary.expired
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn next_run_is_platform_midnight() {
        // 10:00 UTC = 15:30 IST, so the next run is the coming IST midnight
        let now = Utc.with_ymd_and_hms(2025, 11, 24, 10, 0, 0).unwrap();
        let next = next_run_after(now);
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 11, 24, 18, 30, 0).unwrap());
    }

    #[test]
    fn next_run_is_strictly_in_the_future() {
        // Exactly at IST midnight the next run is the following midnight
        let now = Utc.with_ymd_and_hms(2025, 11, 23, 18, 30, 0).unwrap();
        let next = next_run_after(now);
        assert!(next > now);
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 11, 24, 18, 30, 0).unwrap());
    }
}
