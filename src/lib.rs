pub mod dispatch;
pub mod error;
pub mod event;
pub mod relay;
pub mod secrets;
pub mod training;

use crate::dispatch::GITHUB_API_BASE;
use crate::relay::RelayHandler;
use crate::training::HttpTrainingJobs;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Deserialize, Clone)]
pub struct RelayConfig {
    pub secrets_file: String,
    #[serde(default)]
    pub github: GithubConfig,
    pub training: TrainingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GithubConfig {
    #[serde(default = "default_github_api_base")]
    pub api_base: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: default_github_api_base(),
        }
    }
}

fn default_github_api_base() -> String {
    GITHUB_API_BASE.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct TrainingConfig {
    pub api_base: String,
}

pub struct AppState {
    pub relay: RelayHandler,
    pub training: HttpTrainingJobs,
    pub config: RelayConfig,
    pub start_time: Instant,
    pub started_at: DateTime<Utc>,
}

pub type SharedState = Arc<AppState>;
