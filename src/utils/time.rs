//! Calendar keys in the business time zone
//!
//! Statistics are bucketed by string keys (`2025-06-30`, `2025-06`, `2025`)
//! derived from the submission instant in the business time zone. Boundary
//! crossings are detected by string inequality of these keys, never by date
//! arithmetic, so rollover semantics stay exactly keyed to the formatted
//! calendar day.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Business time zone of the deployment
pub const BUSINESS_TZ: Tz = chrono_tz::Africa::Cairo;

/// Calendar-day key (`%Y-%m-%d`) of `now` in the business time zone
pub fn day_key(now: DateTime<Utc>) -> String {
    now.with_timezone(&BUSINESS_TZ).format("%Y-%m-%d").to_string()
}

/// Month key: first 7 chars of the day key (`%Y-%m`)
pub fn month_key(day: &str) -> String {
    day[..7].to_string()
}

/// Year key: first 4 chars of the day key (`%Y`)
pub fn year_key(day: &str) -> String {
    day[..4].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn day_key_formats_in_business_zone() {
        let noon = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(day_key(noon), "2025-06-15");
    }

    #[test]
    fn day_key_rolls_over_ahead_of_utc() {
        // Cairo is ahead of UTC, so a late-UTC instant already belongs to
        // the next local calendar day.
        let late = Utc.with_ymd_and_hms(2025, 6, 30, 22, 30, 0).unwrap();
        assert_eq!(day_key(late), "2025-07-01");
    }

    #[test]
    fn month_and_year_are_prefixes_of_the_day_key() {
        let day = "2025-06-15";
        assert_eq!(month_key(day), "2025-06");
        assert_eq!(year_key(day), "2025");
    }
}
