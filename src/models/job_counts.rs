use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::error::AppError;

/// Counts for the three title variants collected in one run.
///
/// Immutable once constructed; negative counts are rejected at the boundary
/// even though the extractors only ever hand back values >= 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JobCountRecord {
    baseline_count: i64,
    junior_count: i64,
    senior_count: i64,
}

impl JobCountRecord {
    pub fn new(
        baseline_count: i64,
        junior_count: i64,
        senior_count: i64,
    ) -> Result<Self, AppError> {
        for (field, value) in [
            ("baseline_count", baseline_count),
            ("junior_count", junior_count),
            ("senior_count", senior_count),
        ] {
            if value < 0 {
                return Err(AppError::InvalidCount(format!(
                    "{field} must be >= 0, got {value}"
                )));
            }
        }
        Ok(Self {
            baseline_count,
            junior_count,
            senior_count,
        })
    }

    pub fn baseline_count(&self) -> i64 {
        self.baseline_count
    }

    pub fn junior_count(&self) -> i64 {
        self.junior_count
    }

    pub fn senior_count(&self) -> i64 {
        self.senior_count
    }
}

/// A persisted weekly row, unique per (week_starting, location).
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct StoredRecord {
    pub id: i32,
    pub week_starting: NaiveDate,
    pub location: String,
    pub baseline_count: i64,
    pub junior_count: i64,
    pub senior_count: i64,
    pub collected_at: DateTime<Utc>,
}

impl StoredRecord {
    pub fn total(&self) -> i64 {
        self.baseline_count + self.junior_count + self.senior_count
    }
}

/// Monday of the week containing `today`.
pub fn week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_keeps_fields_exactly() {
        let record = JobCountRecord::new(237, 10, 191).unwrap();
        assert_eq!(record.baseline_count(), 237);
        assert_eq!(record.junior_count(), 10);
        assert_eq!(record.senior_count(), 191);
    }

    #[test]
    fn zero_counts_are_valid() {
        let record = JobCountRecord::new(0, 0, 0).unwrap();
        assert_eq!(record.baseline_count(), 0);
    }

    #[test]
    fn negative_counts_are_rejected_in_every_field() {
        assert!(JobCountRecord::new(-5, 10, 191).is_err());
        assert!(JobCountRecord::new(237, -1, 191).is_err());
        assert!(JobCountRecord::new(237, 10, -191).is_err());
    }

    #[test]
    fn rejection_names_the_offending_field() {
        let err = JobCountRecord::new(1, -2, 3).unwrap_err();
        assert!(err.to_string().contains("junior_count"));
    }

    #[test]
    fn week_start_normalizes_to_monday() {
        // 2026-08-27 is a Thursday
        let thursday = NaiveDate::from_ymd_opt(2026, 8, 27).unwrap();
        assert_eq!(
            week_start(thursday),
            NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
        );

        // Monday maps to itself
        let monday = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        assert_eq!(week_start(monday), monday);

        // Sunday maps back six days
        let sunday = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        assert_eq!(
            week_start(sunday),
            NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
        );
    }
}
