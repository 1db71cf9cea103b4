use crate::config::TimePeriod;
use crate::error::AppError;
use crate::models::JobCountRecord;
use crate::serp::SearchClient;

/// Runs the three title-variant searches and assembles one record.
pub struct JobCountCollector<'a> {
    client: &'a dyn SearchClient,
}

impl<'a> JobCountCollector<'a> {
    pub fn new(client: &'a dyn SearchClient) -> Self {
        Self { client }
    }

    /// One collection run. The three searches are sequential so the per-term
    /// log lines come out in a stable order: base, junior, senior.
    pub async fn collect(
        &self,
        title: &str,
        location: &str,
        period: TimePeriod,
    ) -> Result<JobCountRecord, AppError> {
        tracing::info!("Fetching job counts for '{title}' in {location}");

        let city = city_token(location);

        let baseline = self.count_or_zero(title, city, period).await;
        let junior = self
            .count_or_zero(&format!("Junior {title}"), city, period)
            .await;
        let senior = self
            .count_or_zero(&format!("Senior {title}"), city, period)
            .await;

        JobCountRecord::new(baseline, junior, senior)
    }

    /// A failed lookup degrades to 0 for that term only; the error log line
    /// is the only place the difference from a genuine zero survives.
    async fn count_or_zero(&self, term: &str, city: &str, period: TimePeriod) -> i64 {
        match self.client.count_for(term, city, period).await {
            Ok(count) => i64::try_from(count).unwrap_or(i64::MAX),
            Err(e) => {
                tracing::error!("Error fetching count for \"{term}\": {e}");
                0
            }
        }
    }
}

/// Text before the first comma, trimmed: "Berlin, Germany" -> "Berlin".
fn city_token(location: &str) -> &str {
    location.split(',').next().unwrap_or(location).trim()
}
