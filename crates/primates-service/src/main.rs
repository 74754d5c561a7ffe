//! Primates registry service
//!
//! Pulls primate conservation data from the IUCN Red List into PostgreSQL
//! and serves it over HTTP.

use primates_service::config::{load_dotenv, EnvFile};
use primates_service::{
    logging, start_server, Config, Ingester, PgStore, Result, ServerState, SharedState,
    SpeciesStore,
};
use redlist_api::{Pacer, RedListClient};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let env_file = load_dotenv();

    // Load configuration from environment
    let config = Config::from_env()?;
    let _log_guards = logging::init(&config.log)?;

    info!("Starting primates service...");
    match env_file {
        EnvFile::Loaded(path) => info!("Loaded environment from {}", path.display()),
        EnvFile::Skipped => debug!("Production environment, skipping .env"),
        EnvFile::Failed { path, error } => warn!("Could not load {}: {}", path, error),
    }
    debug!(config = ?config, "Configuration loaded");

    let store = PgStore::connect(&config.database).await?;
    store.ensure_schema().await?;
    let store: Arc<dyn SpeciesStore> = Arc::new(store);

    let client = RedListClient::new(&config.api.url, &config.api.token)?
        .with_pacer(Pacer::new(config.api.pacing));
    info!(url = %config.api.url, pacing = ?config.api.pacing, "Red List client ready");

    let ingester = Ingester::new(Arc::new(client), store.clone());
    let state: SharedState = Arc::new(ServerState::new(ingester, store));

    // Start HTTP server (blocking)
    start_server(state, config.port).await?;

    Ok(())
}
