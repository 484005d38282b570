//! Trigger event and response structures
//!
//! These are the wire shapes exchanged with the triggering platform: the
//! incoming dispatch trigger, the training-status request, and the
//! `{statusCode, body}` envelopes sent back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Incoming trigger for the GitHub dispatch relay.
///
/// Field names are PascalCase on the wire, matching what the triggering
/// platform sends. Either `EventType` alone, or `Branch` plus `Workflow`,
/// selects the addressing mode; see [`crate::dispatch::build_dispatch_request`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TriggerEvent {
    pub secret_id: String,
    pub repo: String,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub workflow: Option<String>,
}

impl TriggerEvent {
    /// Build a repository-dispatch trigger (EventType addressing).
    pub fn repository(secret_id: impl Into<String>, repo: impl Into<String>, event_type: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            repo: repo.into(),
            event_type: Some(event_type.into()),
            branch: None,
            workflow: None,
        }
    }

    /// Build a workflow-dispatch trigger (Branch + Workflow addressing).
    pub fn workflow(
        secret_id: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
        workflow: impl Into<String>,
    ) -> Self {
        Self {
            secret_id: secret_id.into(),
            repo: repo.into(),
            event_type: None,
            branch: Some(branch.into()),
            workflow: Some(workflow.into()),
        }
    }
}

/// Outcome of one dispatch: GitHub's status code and raw response body.
///
/// Non-2xx responses are carried here as data, not surfaced as errors;
/// the caller interprets the remote status semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    pub status_code: u16,
    pub body: String,
}

/// Incoming request for the training-status adapter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrainingStatusRequest {
    #[serde(default)]
    pub training_job_name: String,
}

/// Flattened training-job summary returned by the adapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingStatusSummary {
    pub job_name: String,
    pub status: String,
    pub metrics: BTreeMap<String, f64>,
}
