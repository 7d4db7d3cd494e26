pub mod dataset;
pub mod models;
pub mod query;
pub mod store;
pub mod validation;

use crate::error::{ConfigError, InitializationError};
use crate::store::{DocumentStore, Keyspace, MemoryDocumentStore, PgDocumentStore};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Deserializer};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

pub const ENV_VAR_PREFIX: &str = "TRAVEL_SAMPLE__";
pub const SETTINGS_FILE: &str = "Settings.toml";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub keyspace: KeyspaceConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub postgres: Option<PostgresConfig>,
    pub memory: Option<MemoryConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KeyspaceConfig {
    pub bucket: String,
    pub scope: String,
}

impl Default for KeyspaceConfig {
    fn default() -> Self {
        Self {
            bucket: "travel-sample".to_string(),
            scope: "inventory".to_string(),
        }
    }
}

impl From<&KeyspaceConfig> for Keyspace {
    fn from(config: &KeyspaceConfig) -> Self {
        Keyspace::new(&config.bucket, &config.scope)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Origins allowed by CORS. Empty allows any origin.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct PostgresConfig {
    pub connection_string: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(
        default = "default_acquire_timeout",
        deserialize_with = "deserialize_duration"
    )]
    pub acquire_timeout: Duration,
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> Duration {
    Duration::from_secs(5)
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize, Clone)]
pub struct MemoryConfig {
    pub seed_file: Option<PathBuf>,
}

pub fn load_config() -> Result<Config, ConfigError> {
    Ok(Figment::new()
        .merge(Toml::file(SETTINGS_FILE))
        .merge(Env::prefixed(ENV_VAR_PREFIX).split("__"))
        .extract::<Config>()?)
}

pub mod error {
    use thiserror::Error;
    use tracing::dispatcher::SetGlobalDefaultError;

    #[derive(Debug, Error)]
    pub enum ConfigError {
        #[error("failed to load configuration: {0}")]
        Figment(#[from] figment::Error),
    }

    #[derive(Debug, Error)]
    pub enum InitializationError {
        #[error(transparent)]
        Tracing(#[from] SetGlobalDefaultError),
        #[error(transparent)]
        Config(#[from] ConfigError),
        #[error(transparent)]
        Migration(#[from] sqlx::migrate::MigrateError),
        #[error(transparent)]
        Db(#[from] sqlx::Error),
        #[error(transparent)]
        Store(#[from] crate::store::StoreError),
        #[error("failed to seed in-memory store: {0}")]
        Seed(#[from] crate::dataset::DatasetError),
    }
}

pub fn init_tracing() -> Result<(), InitializationError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_file(true)
        .with_line_number(true)
        .with_env_filter(env_filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[instrument(skip(pg_config))]
pub async fn initialize_db(
    pg_config: &PostgresConfig,
    migrate: bool,
) -> Result<Pool<Postgres>, InitializationError> {
    let pool = PgPoolOptions::new()
        .max_connections(pg_config.max_connections)
        .acquire_timeout(pg_config.acquire_timeout)
        .connect(&pg_config.connection_string)
        .await?;

    info!(name: "db.connected", "db pool created and connected");

    if migrate {
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    Ok(pool)
}

/// Builds the document store selected by `config`: Postgres when a `[postgres]` section is
/// present, otherwise an in-memory store optionally seeded from a dataset file.
pub async fn initialize_store(
    config: &Config,
) -> Result<Arc<dyn DocumentStore>, InitializationError> {
    let keyspace = Keyspace::from(&config.keyspace);

    let store: Arc<dyn DocumentStore> = match &config.postgres {
        Some(pg_config) => {
            let pool = initialize_db(pg_config, true).await?;
            Arc::new(PgDocumentStore::new(pool, keyspace))
        }
        None => {
            warn!("no [postgres] section configured, using in-memory document store");
            let store = MemoryDocumentStore::new(keyspace);
            if let Some(seed_file) = config.memory.as_ref().and_then(|m| m.seed_file.as_ref()) {
                let count = dataset::seed_memory_store(&store, seed_file).await?;
                info!(name: "store.seeded", count, file = %seed_file.display(), "seeded in-memory store");
            }
            Arc::new(store)
        }
    };

    if store.is_empty().await? {
        let keyspace = store.keyspace();
        warn!(
            bucket = %keyspace.bucket,
            scope = %keyspace.scope,
            "keyspace holds no documents; import data with dataset_loader"
        );
    }

    Ok(store)
}

pub async fn shutdown_listener(token: Option<CancellationToken>) {
    let ctrl_c = signal::ctrl_c();
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = ?e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(name: "signal.ctrlc.received", "received Ctrl+C signal, shutting down"),
        _ = terminate => info!(name: "signal.sigterm.received", "received SIGTERM signal, shutting down"),
    }

    if let Some(token) = token {
        token.cancel();
    }
}
