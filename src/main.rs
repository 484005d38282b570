mod handlers;

use actions_relay::dispatch::GithubDispatcher;
use actions_relay::error::RelayError;
use actions_relay::relay::RelayHandler;
use actions_relay::secrets::FileSecretStore;
use actions_relay::training::HttpTrainingJobs;
use actions_relay::{AppState, RelayConfig};
use axum::{Router, routing};
use chrono::Utc;
use handlers::{handle_dispatch, root, status, training_status};
use std::fs;
use std::sync::Arc;
use std::time::Instant;
use tracing::{self, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8787";
const DEFAULT_CONFIG_PATH: &str = "relay_config.toml";

/// Load and parse the configuration file
fn load_config(path: &str) -> Result<RelayConfig, RelayError> {
    let config_str = fs::read_to_string(path).map_err(|e| {
        RelayError::ConfigError(format!("Failed to read config file '{}': {}", path, e))
    })?;

    let config: RelayConfig = toml::from_str(&config_str).map_err(|e| {
        RelayError::ConfigError(format!("Failed to parse config file '{}': {}", path, e))
    })?;

    Ok(config)
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
    let config_path =
        std::env::var("RELAY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let config: RelayConfig = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // LOG_LEVEL takes the standard severity levels; default is info.
    let filter = EnvFilter::builder()
        .with_env_var("LOG_LEVEL")
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let http_client = reqwest::Client::new();
    let secrets = Arc::new(FileSecretStore::new(&config.secrets_file));
    let relay = RelayHandler::new(secrets, GithubDispatcher::new(http_client.clone()))
        .with_api_base(config.github.api_base.clone());
    let training = HttpTrainingJobs::new(http_client, config.training.api_base.clone());

    let state = Arc::new(AppState {
        relay,
        training,
        config,
        start_time: Instant::now(),
        started_at: Utc::now(),
    });

    let app = Router::new()
        .route("/", routing::get(root))
        .route("/dispatch", routing::post(handle_dispatch))
        .route("/training-job/status", routing::post(training_status))
        .route("/status", routing::get(status))
        .with_state(state);

    info!("Listening on {}", bind_address);
    info!("Using config at {:?}", config_path);
    let listener = tokio::net::TcpListener::bind(bind_address).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
