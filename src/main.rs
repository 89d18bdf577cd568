use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use tripfinder::api::AppState;
use tripfinder::config::LoggingConfig;
use tripfinder::{
    InMemorySessionStore, PersistentSessionStore, RecommendationClient, RequestMapper,
    SessionStore, TripFinderConfig, TripPlanner, web,
};

fn init_tracing(logging: &LoggingConfig) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}

fn session_store(config: &TripFinderConfig) -> Result<Arc<dyn SessionStore>> {
    if config.session.backend == "persistent" {
        let ttl = Duration::from_secs(u64::from(config.session.ttl_hours) * 60 * 60);
        let store = PersistentSessionStore::open(&config.session.location, ttl)
            .context("Failed to open session database")?;
        Ok(Arc::new(store))
    } else {
        Ok(Arc::new(InMemorySessionStore::new()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = TripFinderConfig::load()?;
    init_tracing(&config.logging);

    tracing::info!(
        "Starting TripFinder {} against {}",
        tripfinder::VERSION,
        config.recommendation.base_url
    );

    let client = RecommendationClient::new(&config.recommendation)?;
    let planner = TripPlanner::new(
        Arc::new(client),
        session_store(&config)?,
        RequestMapper::new(config.currency.exchange_rate()),
    );

    let state = AppState {
        planner: Arc::new(planner),
        default_limit: config.server.default_limit,
    };

    web::run(config.server.port, state).await
}
