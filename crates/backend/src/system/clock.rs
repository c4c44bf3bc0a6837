use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

/// Civil timezone all ad-lifecycle date arithmetic is evaluated in
/// (IST, UTC+05:30). Scheduling and expiry compare *dates* in this zone,
/// never raw UTC timestamps.
pub const PLATFORM_TZ_SECS: i32 = 5 * 3600 + 30 * 60;

pub fn platform_tz() -> FixedOffset {
    FixedOffset::east_opt(PLATFORM_TZ_SECS).expect("valid fixed offset")
}

/// Wall-clock seam. The sweep and its tests take a `Clock` instead of
/// calling `Utc::now()` directly.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Production clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock for tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Civil date of an instant in the platform timezone
pub fn local_date(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&platform_tz()).date_naive()
}

/// The UTC instant of local midnight on the given civil date
pub fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_hms_opt(0, 0, 0).expect("midnight exists");
    platform_tz()
        .from_local_datetime(&naive)
        .single()
        .expect("fixed offsets have no DST gaps")
        .with_timezone(&Utc)
}

/// Default ad expiry: local midnight of the current day plus 15 days
pub fn default_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    local_midnight(local_date(now)) + Duration::days(15)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_date_crosses_utc_midnight() {
        // 2025-11-23 20:00 UTC is already 2025-11-24 01:30 in IST
        let at = Utc.with_ymd_and_hms(2025, 11, 23, 20, 0, 0).unwrap();
        assert_eq!(local_date(at), NaiveDate::from_ymd_opt(2025, 11, 24).unwrap());
    }

    #[test]
    fn local_midnight_is_half_past_six_utc() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 24).unwrap();
        let midnight = local_midnight(date);
        assert_eq!(midnight, Utc.with_ymd_and_hms(2025, 11, 23, 18, 30, 0).unwrap());
    }

    #[test]
    fn default_expiry_is_fifteen_days_after_local_midnight() {
        let now = Utc.with_ymd_and_hms(2025, 11, 24, 10, 0, 0).unwrap();
        let expiry = default_expiry(now);
        assert_eq!(local_date(expiry), NaiveDate::from_ymd_opt(2025, 12, 9).unwrap());
        // Still a local-midnight instant
        assert_eq!(expiry, local_midnight(NaiveDate::from_ymd_opt(2025, 12, 9).unwrap()));
    }
}
