//! Training-status adapter
//!
//! A read/format shim over the managed training service: look up one
//! training job, relay its status, and flatten the final metric list into a
//! name-to-value map.

use crate::error::{RelayError, Result};
use crate::event::TrainingStatusSummary;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::info;

/// One entry of a training job's final metric list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricData {
    pub metric_name: String,
    pub value: f64,
}

/// A training job's status report, as the training service describes it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainingJobDescription {
    pub training_job_status: String,
    #[serde(default)]
    pub final_metric_data_list: Vec<MetricData>,
}

/// Read-only lookup of training jobs by name.
#[async_trait]
pub trait TrainingJobs: Send + Sync {
    async fn describe(&self, job_name: &str) -> Result<TrainingJobDescription>;
}

/// Training-job lookup over the training service's HTTP API.
#[derive(Clone)]
pub struct HttpTrainingJobs {
    client: reqwest::Client,
    api_base: String,
}

impl HttpTrainingJobs {
    pub fn new(client: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }
}

#[async_trait]
impl TrainingJobs for HttpTrainingJobs {
    async fn describe(&self, job_name: &str) -> Result<TrainingJobDescription> {
        let url = format!("{}/training-jobs/{}", self.api_base, job_name);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(RelayError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(RelayError::Network)
    }
}

/// Queries the job and reformats the metric list into a flat mapping.
///
/// Later duplicates of a metric name overwrite earlier ones.
pub async fn summarize(jobs: &dyn TrainingJobs, job_name: &str) -> Result<TrainingStatusSummary> {
    if job_name.is_empty() {
        return Err(RelayError::MissingField("TrainingJobName"));
    }

    let description = jobs.describe(job_name).await?;
    info!(
        "Training job: {} has status: {}",
        job_name, description.training_job_status
    );

    let metrics: BTreeMap<String, f64> = description
        .final_metric_data_list
        .into_iter()
        .map(|metric| (metric.metric_name, metric.value))
        .collect();

    Ok(TrainingStatusSummary {
        job_name: job_name.to_string(),
        status: description.training_job_status,
        metrics,
    })
}
