mod collector;
mod config;
mod db;
mod error;
mod models;
mod report;
mod serp;
mod store;

use chrono::Utc;
use clap::Parser;
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use crate::collector::JobCountCollector;
use crate::config::{Command, Config};
use crate::serp::SerpClient;
use crate::store::ResultStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jobtrends=info")),
        )
        .init();

    let config = Config::parse();

    match config.command.clone() {
        Command::Collect { store } => collect(&config, store).await?,
        Command::View { location, limit } => view(&config, &location, limit).await?,
    }

    Ok(())
}

async fn collect(config: &Config, store: bool) -> anyhow::Result<()> {
    let api_key = config.require_serp_api_key()?;

    // Both credentials are checked before the first search goes out.
    let pool = if store {
        let database_url = config.require_database_url()?;
        Some(connect(config, database_url).await?)
    } else {
        None
    };

    let client = SerpClient::new(api_key, config.page_size);
    let collector = JobCountCollector::new(&client);

    let record = collector
        .collect(&config.job_title, &config.location, config.time_period)
        .await?;

    let week_starting = models::week_start(Utc::now().date_naive());
    report::print_collected(&record, week_starting, &config.location, &config.job_title);

    if let Some(pool) = pool {
        let store = ResultStore::new(pool);
        store.save(&record, week_starting, &config.location).await?;
    }

    Ok(())
}

async fn view(config: &Config, location: &str, limit: i64) -> anyhow::Result<()> {
    let database_url = config.require_database_url()?;
    let pool = connect(config, database_url).await?;

    let store = ResultStore::new(pool);
    let records = store.latest(location, limit).await?;
    report::print_history(&records, location);

    Ok(())
}

async fn connect(config: &Config, database_url: &str) -> anyhow::Result<PgPool> {
    tracing::info!("Connecting to database...");
    let pool = db::create_pool(database_url).await?;

    if config.run_migrations {
        tracing::info!("Running database migrations...");
        db::run_migrations(&pool).await?;
    }

    Ok(pool)
}
