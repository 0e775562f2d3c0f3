//! Civil clock for stamping and day-boundary computations.
//!
//! All timestamps are rendered in the Asia/Kolkata civil calendar as
//! `YYYY-MM-DD HH:mm:ss`. The format is fixed-width and big-endian, so
//! lexicographic order of two stamps equals their chronological order. Range
//! and same-day queries rely on that.

use crate::{error::Result, Error};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::sync::atomic::{AtomicI64, Ordering};

/// Civil timezone of the fleet.
pub const TIMEZONE: Tz = chrono_tz::Asia::Kolkata;

/// `YYYY-MM-DD HH:mm:ss`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `YYYY-MM-DD`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render an instant as a civil timestamp.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&TIMEZONE)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Render the civil date of an instant.
pub fn format_date(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&TIMEZONE).format(DATE_FORMAT).to_string()
}

/// Parse a civil timestamp back into an instant.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(text.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| Error::InvalidDate(text.to_string()))?;

    TIMEZONE
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| Error::InvalidDate(text.to_string()))
}

/// Parse a query date.
///
/// Accepts `YYYY-MM-DD`, or a full civil timestamp whose date part is used.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT).map(|dt| dt.date()))
        .map_err(|_| Error::InvalidDate(text.to_string()))
}

/// First stamp of a civil day (inclusive lower bound).
pub fn day_start(date: NaiveDate) -> String {
    format!("{} 00:00:00", date.format(DATE_FORMAT))
}

/// Last stamp of a civil day (inclusive upper bound).
pub fn day_end(date: NaiveDate) -> String {
    format!("{} 23:59:59", date.format(DATE_FORMAT))
}

/// Source of "now" for the reconciler.
pub trait CivilClock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Current civil timestamp.
    fn timestamp(&self) -> String {
        format_timestamp(self.now())
    }

    /// Current civil date.
    fn today(&self) -> String {
        format_date(self.now())
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl CivilClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    /// Create a clock frozen at `instant`.
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(instant.timestamp_millis()),
        }
    }

    /// Create a clock frozen at a civil timestamp.
    pub fn at_civil(timestamp: &str) -> Result<Self> {
        parse_timestamp(timestamp).map(Self::at)
    }

    /// Move the clock to `instant`.
    pub fn set(&self, instant: DateTime<Utc>) {
        self.millis
            .store(instant.timestamp_millis(), Ordering::SeqCst);
    }

    /// Move the clock to a civil timestamp.
    pub fn set_civil(&self, timestamp: &str) -> Result<()> {
        self.set(parse_timestamp(timestamp)?);
        Ok(())
    }

    /// Move the clock forward (or backward, for negative durations).
    pub fn advance(&self, by: chrono::Duration) {
        self.millis
            .fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl CivilClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_in_kolkata() {
        // 18:30 UTC is midnight of the next day in Kolkata (UTC+05:30).
        let instant = Utc.with_ymd_and_hms(2024, 3, 9, 18, 30, 0).unwrap();
        assert_eq!(format_timestamp(instant), "2024-03-10 00:00:00");
        assert_eq!(format_date(instant), "2024-03-10");

        let instant = Utc.with_ymd_and_hms(2024, 3, 9, 18, 29, 59).unwrap();
        assert_eq!(format_timestamp(instant), "2024-03-09 23:59:59");
    }

    #[test]
    fn parse_is_inverse_of_format() {
        let instant = Utc.with_ymd_and_hms(2024, 12, 31, 20, 5, 9).unwrap();
        let text = format_timestamp(instant);
        assert_eq!(parse_timestamp(&text).unwrap(), instant);
    }

    #[test]
    fn parse_date_accepts_date_or_timestamp() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(parse_date("2024-03-10").unwrap(), expected);
        assert_eq!(parse_date(" 2024-03-10 ").unwrap(), expected);
        assert_eq!(parse_date("2024-03-10 17:45:00").unwrap(), expected);
        assert_eq!(
            parse_date("10/03/2024"),
            Err(Error::InvalidDate("10/03/2024".into()))
        );
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn day_bounds() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(day_start(date), "2024-03-10 00:00:00");
        assert_eq!(day_end(date), "2024-03-10 23:59:59");
    }

    #[test]
    fn fixed_clock_moves_only_when_told() {
        let clock = FixedClock::at_civil("2024-03-10 23:59:59").unwrap();
        assert_eq!(clock.timestamp(), "2024-03-10 23:59:59");
        assert_eq!(clock.today(), "2024-03-10");

        clock.advance(chrono::Duration::seconds(1));
        assert_eq!(clock.timestamp(), "2024-03-11 00:00:00");
        assert_eq!(clock.today(), "2024-03-11");

        clock.set_civil("2024-01-01 08:00:00").unwrap();
        assert_eq!(clock.timestamp(), "2024-01-01 08:00:00");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        // 2000-01-01 .. 2100-01-01
        const RANGE: std::ops::Range<i64> = 946_684_800..4_102_444_800;

        proptest! {
            #[test]
            fn prop_format_preserves_order(a in RANGE, b in RANGE) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                let lo = DateTime::from_timestamp(lo, 0).unwrap();
                let hi = DateTime::from_timestamp(hi, 0).unwrap();

                prop_assert!(format_timestamp(lo) <= format_timestamp(hi));
            }

            #[test]
            fn prop_date_is_prefix_of_timestamp(secs in RANGE) {
                let instant = DateTime::from_timestamp(secs, 0).unwrap();
                let stamp = format_timestamp(instant);

                prop_assert!(stamp.starts_with(&format_date(instant)));
                prop_assert_eq!(stamp.len(), 19);
            }

            #[test]
            fn prop_stamp_within_its_day_bounds(secs in RANGE) {
                let instant = DateTime::from_timestamp(secs, 0).unwrap();
                let stamp = format_timestamp(instant);
                let date = parse_date(&stamp).unwrap();

                prop_assert!(day_start(date) <= stamp);
                prop_assert!(stamp <= day_end(date));
            }
        }
    }
}
