use clap::{Parser, ValueEnum};

use crate::error::AppError;

#[derive(Parser, Debug, Clone)]
#[command(name = "jobtrends", about = "Weekly LinkedIn job posting counts per title variant")]
pub struct Config {
    /// SerpApi key used for the search requests
    #[arg(long, env = "SERP_API_KEY", hide_env_values = true)]
    pub serp_api_key: Option<String>,

    /// Job title to track
    #[arg(long, env = "JOB_TITLE", default_value = "Data Engineer")]
    pub job_title: String,

    /// Location to search in, e.g. "Berlin, Germany"
    #[arg(long, env = "LOCATION", default_value = "Berlin, Germany")]
    pub location: String,

    /// Recency window applied to every search
    #[arg(long, env = "TIME_PERIOD", value_enum, default_value = "week")]
    pub time_period: TimePeriod,

    /// Results per page requested from the search provider
    #[arg(long, env = "PAGE_SIZE", default_value = "100")]
    pub page_size: u32,

    /// Postgres connection URL
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Run database migrations before touching the table
    #[arg(long, env = "RUN_MIGRATIONS", default_value = "true")]
    pub run_migrations: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Collect this week's counts and display them
    Collect {
        /// Also persist the collected counts
        #[arg(long)]
        store: bool,
    },
    /// Show stored counts for a location
    View {
        /// Location to query
        #[arg(long, default_value = "Berlin, Germany")]
        location: String,

        /// Maximum number of records to show
        #[arg(long, default_value = "10")]
        limit: i64,
    },
}

/// Recency window for a search, mapped to the Google `tbs=qdr:` parameter.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[value(rename_all = "lower")]
pub enum TimePeriod {
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimePeriod {
    /// `qdr:` code for this window. `All` leaves the filter off entirely.
    pub fn qdr_code(self) -> Option<&'static str> {
        match self {
            TimePeriod::Day => Some("d"),
            TimePeriod::Week => Some("w"),
            TimePeriod::Month => Some("m"),
            TimePeriod::Year => Some("y"),
            TimePeriod::All => None,
        }
    }
}

impl Config {
    /// Credential checks happen up front, before any network activity.
    pub fn require_serp_api_key(&self) -> Result<&str, AppError> {
        self.serp_api_key.as_deref().ok_or_else(|| {
            AppError::Config(
                "SERP API key required. Set SERP_API_KEY or pass --serp-api-key.".to_string(),
            )
        })
    }

    pub fn require_database_url(&self) -> Result<&str, AppError> {
        self.database_url.as_deref().ok_or_else(|| {
            AppError::Config(
                "Database URL required. Set DATABASE_URL or pass --database-url.".to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qdr_codes_match_google_parameters() {
        assert_eq!(TimePeriod::Day.qdr_code(), Some("d"));
        assert_eq!(TimePeriod::Week.qdr_code(), Some("w"));
        assert_eq!(TimePeriod::Month.qdr_code(), Some("m"));
        assert_eq!(TimePeriod::Year.qdr_code(), Some("y"));
        assert_eq!(TimePeriod::All.qdr_code(), None);
    }

    #[test]
    fn missing_credentials_fail_with_descriptive_errors() {
        let config = Config {
            serp_api_key: None,
            database_url: None,
            ..Config::parse_from(["jobtrends", "collect"])
        };

        let err = config.require_serp_api_key().unwrap_err();
        assert!(err.to_string().contains("SERP_API_KEY"));

        let err = config.require_database_url().unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn defaults_match_the_reference_deployment() {
        let config = Config::parse_from([
            "jobtrends",
            "--job-title",
            "Data Engineer",
            "--location",
            "Berlin, Germany",
            "collect",
        ]);
        assert_eq!(config.job_title, "Data Engineer");
        assert_eq!(config.location, "Berlin, Germany");
        assert_eq!(config.page_size, 100);
    }
}
