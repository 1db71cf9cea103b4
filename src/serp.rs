use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::config::TimePeriod;
use crate::error::AppError;

const SEARCH_URL: &str = "https://serpapi.com/search.json";
const SITE_FILTER: &str = "site:linkedin.com/jobs";

/// One external search reduced to an estimated result count.
///
/// Failures surface as `Err`; callers that only want a best-effort number
/// collapse them to 0 themselves, so the failed-vs-zero distinction is not
/// lost inside the client.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn count_for(
        &self,
        term: &str,
        city: &str,
        period: TimePeriod,
    ) -> Result<u64, AppError>;
}

/// SerpApi-backed client searching Google restricted to LinkedIn job listings.
pub struct SerpClient {
    http: reqwest::Client,
    api_key: String,
    page_size: u32,
}

impl SerpClient {
    pub fn new(api_key: impl Into<String>, page_size: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            page_size,
        }
    }
}

#[async_trait]
impl SearchClient for SerpClient {
    async fn count_for(
        &self,
        term: &str,
        city: &str,
        period: TimePeriod,
    ) -> Result<u64, AppError> {
        let query = format!("\"{term}\" {city} {SITE_FILTER}");

        let mut params = vec![
            ("api_key", self.api_key.clone()),
            ("engine", "google".to_string()),
            ("q", query),
            ("num", self.page_size.to_string()),
        ];
        if let Some(code) = period.qdr_code() {
            params.push(("tbs", format!("qdr:{code}")));
        }

        // Exactly one request, first page only.
        let response: SearchResponse = self
            .http
            .get(SEARCH_URL)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let count = extract_count(&response);
        tracing::info!("Query \"{term}\": ~{count} results found");
        Ok(count)
    }
}

/// The subset of the provider response we read. Every field is optional;
/// an absent or malformed field drops through to the next tier.
#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    search_information: Option<SearchInformation>,
    #[serde(default)]
    organic_results: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchInformation {
    /// Arrives as a number or as a string with thousands separators.
    #[serde(default)]
    total_results: Option<Value>,
}

/// Two-tier extraction: `search_information.total_results` is authoritative
/// when present and positive; otherwise count the entries on the single
/// result page, which under-counts once the true total exceeds the page size.
fn extract_count(response: &SearchResponse) -> u64 {
    if let Some(info) = &response.search_information
        && let Some(total) = info.total_results.as_ref().and_then(parse_total)
        && total > 0
    {
        return total;
    }

    response
        .organic_results
        .as_ref()
        .map(|results| results.len() as u64)
        .unwrap_or(0)
}

fn parse_total(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.replace(',', "").trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> SearchResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn total_results_string_with_separators_wins() {
        let resp = response(json!({
            "search_information": { "total_results": "1,234" },
            "organic_results": [{}, {}]
        }));
        assert_eq!(extract_count(&resp), 1234);
    }

    #[test]
    fn total_results_as_number_is_accepted() {
        let resp = response(json!({
            "search_information": { "total_results": 237 }
        }));
        assert_eq!(extract_count(&resp), 237);
    }

    #[test]
    fn falls_back_to_organic_result_count() {
        let resp = response(json!({
            "organic_results": [{}, {}, {}, {}, {}, {}, {}]
        }));
        assert_eq!(extract_count(&resp), 7);
    }

    #[test]
    fn zero_total_falls_through_to_organic_results() {
        let resp = response(json!({
            "search_information": { "total_results": "0" },
            "organic_results": [{}, {}, {}]
        }));
        assert_eq!(extract_count(&resp), 3);
    }

    #[test]
    fn malformed_total_falls_through_to_organic_results() {
        let resp = response(json!({
            "search_information": { "total_results": "about a thousand" },
            "organic_results": [{}]
        }));
        assert_eq!(extract_count(&resp), 1);
    }

    #[test]
    fn empty_response_counts_as_zero() {
        let resp = response(json!({}));
        assert_eq!(extract_count(&resp), 0);
    }

    #[test]
    fn unexpected_fields_are_ignored() {
        let resp = response(json!({
            "search_metadata": { "status": "Success" },
            "search_information": { "total_results": "56", "time_taken": 0.4 },
            "pagination": { "next": "..." }
        }));
        assert_eq!(extract_count(&resp), 56);
    }
}
