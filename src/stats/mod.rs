//! Submission statistics - rolling daily/monthly/yearly/lifetime counters
//!
//! A single process-wide [`StatsRecord`] tracks how many orders were
//! submitted today, this month, this year and overall, keyed by calendar
//! boundaries in the business time zone. Resetting the order queue does not
//! touch these counters: they measure historical submission volume, not
//! queue depth.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::time;

/// Statistics errors
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StatsResult<T> = Result<T, StatsError>;

/// Process-wide singleton aggregate.
///
/// The default record (all counts zero, empty keys) doubles as the
/// "no submissions yet" state: the first increment never matches an empty
/// key, so every bucket starts at 1 with the current key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsRecord {
    pub daily_count: u64,
    /// Calendar-day key (`%Y-%m-%d`, business time zone) of the last increment
    pub daily_date: String,
    pub monthly_count: u64,
    /// Month key (`%Y-%m`)
    pub monthly_month: String,
    pub yearly_count: u64,
    /// Year key (`%Y`)
    pub yearly_year: String,
    /// Lifetime submissions; never reset
    pub total_count: u64,
}

/// Maintains and persists the singleton [`StatsRecord`]
#[derive(Clone)]
pub struct StatsAggregator {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    record: Mutex<StatsRecord>,
}

impl StatsAggregator {
    /// Open the aggregator at `path`, loading the persisted record if
    /// present. Corrupt state is absorbed as the all-zero default.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let record = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<StatsRecord>(&raw) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(
                        "Discarding unparsable stats record at {}: {}",
                        path.display(),
                        e
                    );
                    StatsRecord::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => StatsRecord::default(),
            Err(e) => {
                tracing::warn!("Cannot read stats record at {}: {}", path.display(), e);
                StatsRecord::default()
            }
        };

        Self {
            inner: Arc::new(Inner {
                path,
                record: Mutex::new(record),
            }),
        }
    }

    /// Record one successful order submission at `now_utc`.
    ///
    /// Each bucket resets to 1 when its key no longer matches the current
    /// calendar key, otherwise increments. Key comparison is plain string
    /// inequality on the formatted keys - intentionally not date arithmetic,
    /// so a stale key from an adjacent day can never false-positive as
    /// "same day". The total always increments. The record is persisted
    /// before returning.
    pub fn record_submission(&self, now_utc: DateTime<Utc>) -> StatsResult<StatsRecord> {
        let today = time::day_key(now_utc);
        let month = time::month_key(&today);
        let year = time::year_key(&today);

        let mut record = self.inner.record.lock();

        if record.daily_date != today {
            record.daily_count = 1;
            record.daily_date = today;
        } else {
            record.daily_count += 1;
        }

        if record.monthly_month != month {
            record.monthly_count = 1;
            record.monthly_month = month;
        } else {
            record.monthly_count += 1;
        }

        if record.yearly_year != year {
            record.yearly_count = 1;
            record.yearly_year = year;
        } else {
            record.yearly_count += 1;
        }

        record.total_count += 1;

        persist(&self.inner.path, &record)?;
        Ok(record.clone())
    }

    /// Current record; all-zero defaults before the first submission
    pub fn read(&self) -> StatsRecord {
        self.inner.record.lock().clone()
    }
}

fn persist(path: &Path, record: &StatsRecord) -> StatsResult<()> {
    let json = serde_json::to_string_pretty(record)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon_utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn open_temp() -> (tempfile::TempDir, StatsAggregator) {
        let dir = tempfile::tempdir().unwrap();
        let stats = StatsAggregator::open(dir.path().join("stats.json"));
        (dir, stats)
    }

    #[test]
    fn read_before_any_submission_is_all_zero() {
        let (_dir, stats) = open_temp();
        assert_eq!(stats.read(), StatsRecord::default());
    }

    #[test]
    fn first_submission_initializes_every_bucket() {
        let (_dir, stats) = open_temp();
        let record = stats.record_submission(noon_utc(2025, 6, 15)).unwrap();

        assert_eq!(record.daily_count, 1);
        assert_eq!(record.daily_date, "2025-06-15");
        assert_eq!(record.monthly_count, 1);
        assert_eq!(record.monthly_month, "2025-06");
        assert_eq!(record.yearly_count, 1);
        assert_eq!(record.yearly_year, "2025");
        assert_eq!(record.total_count, 1);
    }

    #[test]
    fn same_day_submissions_accumulate() {
        let (_dir, stats) = open_temp();
        stats.record_submission(noon_utc(2025, 6, 15)).unwrap();
        let record = stats.record_submission(noon_utc(2025, 6, 15)).unwrap();

        assert_eq!(record.daily_count, 2);
        assert_eq!(record.total_count, 2);
    }

    #[test]
    fn day_rollover_resets_daily_but_keeps_month_and_year() {
        let (_dir, stats) = open_temp();
        stats.record_submission(noon_utc(2025, 6, 15)).unwrap();
        stats.record_submission(noon_utc(2025, 6, 15)).unwrap();
        let record = stats.record_submission(noon_utc(2025, 6, 16)).unwrap();

        assert_eq!(record.daily_count, 1);
        assert_eq!(record.daily_date, "2025-06-16");
        assert_eq!(record.monthly_count, 3);
        assert_eq!(record.yearly_count, 3);
        assert_eq!(record.total_count, 3);
    }

    #[test]
    fn month_rollover_resets_month_but_keeps_year() {
        let (_dir, stats) = open_temp();
        stats.record_submission(noon_utc(2025, 6, 30)).unwrap();
        let record = stats.record_submission(noon_utc(2025, 7, 1)).unwrap();

        assert_eq!(record.daily_count, 1);
        assert_eq!(record.monthly_count, 1);
        assert_eq!(record.monthly_month, "2025-07");
        assert_eq!(record.yearly_count, 2);
        assert_eq!(record.total_count, 2);
    }

    #[test]
    fn year_rollover_resets_everything_but_the_total() {
        let (_dir, stats) = open_temp();
        stats.record_submission(noon_utc(2025, 12, 31)).unwrap();
        let record = stats.record_submission(noon_utc(2026, 1, 1)).unwrap();

        assert_eq!(record.daily_count, 1);
        assert_eq!(record.monthly_count, 1);
        assert_eq!(record.yearly_count, 1);
        assert_eq!(record.yearly_year, "2026");
        assert_eq!(record.total_count, 2);
    }

    #[test]
    fn record_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");

        let stats = StatsAggregator::open(&path);
        stats.record_submission(noon_utc(2025, 6, 15)).unwrap();
        drop(stats);

        let reopened = StatsAggregator::open(&path);
        let record = reopened.read();
        assert_eq!(record.total_count, 1);
        assert_eq!(record.daily_date, "2025-06-15");
    }

    #[test]
    fn corrupt_record_initializes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, "][").unwrap();

        let stats = StatsAggregator::open(&path);
        assert_eq!(stats.read(), StatsRecord::default());
    }

    #[test]
    fn record_serializes_camel_case_for_the_dashboard() {
        let (_dir, stats) = open_temp();
        stats.record_submission(noon_utc(2025, 6, 15)).unwrap();

        let json = serde_json::to_value(stats.read()).unwrap();
        assert_eq!(json["dailyCount"], 1);
        assert_eq!(json["monthlyCount"], 1);
        assert_eq!(json["yearlyCount"], 1);
        assert_eq!(json["totalCount"], 1);
    }
}
