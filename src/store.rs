use chrono::{NaiveDate, Utc};
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{JobCountRecord, StoredRecord};

/// Postgres-backed history of weekly counts, one row per (week, location).
pub struct ResultStore {
    pool: PgPool,
}

impl ResultStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert-or-update the row for `(week_starting, location)`. A second run
    /// for the same week and location overwrites the counts and the
    /// `collected_at` timestamp instead of adding a row.
    ///
    /// Storage errors propagate to the caller; a silently dropped write would
    /// corrupt the history the trend views are built on.
    pub async fn save(
        &self,
        record: &JobCountRecord,
        week_starting: NaiveDate,
        location: &str,
    ) -> Result<StoredRecord, AppError> {
        let stored = sqlx::query_as::<_, StoredRecord>(
            "INSERT INTO job_counts (week_starting, location, baseline_count, junior_count, senior_count, collected_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (week_starting, location) DO UPDATE SET
                 baseline_count = EXCLUDED.baseline_count,
                 junior_count = EXCLUDED.junior_count,
                 senior_count = EXCLUDED.senior_count,
                 collected_at = EXCLUDED.collected_at
             RETURNING *",
        )
        .bind(week_starting)
        .bind(location)
        .bind(record.baseline_count())
        .bind(record.junior_count())
        .bind(record.senior_count())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .inspect_err(|e| tracing::error!("Failed to save job counts: {e}"))?;

        tracing::info!(
            "Saved job counts for week {} in {}",
            stored.week_starting,
            stored.location
        );
        Ok(stored)
    }

    /// Most recent rows for a location, newest week first.
    pub async fn latest(&self, location: &str, limit: i64) -> Result<Vec<StoredRecord>, AppError> {
        let records = sqlx::query_as::<_, StoredRecord>(
            "SELECT * FROM job_counts WHERE location = $1 ORDER BY week_starting DESC LIMIT $2",
        )
        .bind(location)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .inspect_err(|e| tracing::error!("Failed to retrieve job counts: {e}"))?;
        Ok(records)
    }
}
