//! Webhook request construction and outbound HTTP dispatch
//!
//! Two addressing modes exist, mirroring GitHub's dispatch endpoints:
//! repository dispatch (`event_type` payload) and workflow dispatch
//! (`ref` payload). See
//! <https://docs.github.com/en/actions/learn-github-actions/events-that-trigger-workflows#workflow_dispatch>

use crate::error::{RelayError, Result};
use crate::event::DispatchResult;
use reqwest::header;
use serde_json::json;
use tracing::{debug, info, warn};

/// Default base URL for the GitHub REST API.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// A fully addressed dispatch: target URL plus JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRequest {
    pub url: String,
    pub payload: serde_json::Value,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Selects the addressing mode and builds the target URL and payload.
///
/// `event_type` takes precedence: when present, the repository-dispatch
/// endpoint is used and any `branch`/`workflow` values are ignored.
/// Otherwise both `branch` and `workflow` must be present, selecting the
/// workflow-dispatch endpoint. Empty strings count as absent.
pub fn build_dispatch_request(
    api_base: &str,
    user: &str,
    repo: &str,
    event_type: Option<&str>,
    branch: Option<&str>,
    workflow: Option<&str>,
) -> Result<DispatchRequest> {
    let event_type = present(event_type);
    let branch = present(branch);
    let workflow = present(workflow);

    if let Some(event_type) = event_type {
        if branch.is_some() || workflow.is_some() {
            warn!(
                "Both EventType and Branch/Workflow supplied; using EventType '{}'",
                event_type
            );
        }
        return Ok(DispatchRequest {
            url: format!("{}/repos/{}/{}/dispatches", api_base, user, repo),
            payload: json!({ "event_type": event_type }),
        });
    }

    match (branch, workflow) {
        (Some(branch), Some(workflow)) => Ok(DispatchRequest {
            url: format!(
                "{}/repos/{}/{}/actions/workflows/{}/dispatches",
                api_base, user, repo, workflow
            ),
            payload: json!({ "ref": branch }),
        }),
        _ => Err(RelayError::InvalidDispatchRequest),
    }
}

/// Performs the authenticated POST against the GitHub API.
///
/// One best-effort attempt per call; the response status and body come back
/// verbatim, whatever the status code. Only transport-level failures
/// (connection refused, DNS, timeout) surface as errors.
#[derive(Clone)]
pub struct GithubDispatcher {
    client: reqwest::Client,
}

impl GithubDispatcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub async fn send(&self, request: &DispatchRequest, token: &str) -> Result<DispatchResult> {
        info!("POST url: {}", request.url);
        let response = self
            .client
            .post(&request.url)
            .bearer_auth(token)
            .header(header::ACCEPT, "application/vnd.github.v3+json")
            .json(&request.payload)
            .send()
            .await
            .map_err(RelayError::Network)?;

        let status_code = response.status().as_u16();
        let body = response.text().await.map_err(RelayError::Network)?;
        info!("Response: {}", status_code);
        debug!("{}", body);

        Ok(DispatchResult { status_code, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_selects_repository_dispatch() {
        let request = build_dispatch_request(
            GITHUB_API_BASE,
            "octocat",
            "my-repo",
            Some("build"),
            None,
            None,
        )
        .unwrap();
        assert_eq!(
            request.url,
            "https://api.github.com/repos/octocat/my-repo/dispatches"
        );
        assert_eq!(request.payload, json!({"event_type": "build"}));
    }

    #[test]
    fn branch_and_workflow_select_workflow_dispatch() {
        let request = build_dispatch_request(
            GITHUB_API_BASE,
            "octocat",
            "my-repo",
            None,
            Some("main"),
            Some("build.yml"),
        )
        .unwrap();
        assert_eq!(
            request.url,
            "https://api.github.com/repos/octocat/my-repo/actions/workflows/build.yml/dispatches"
        );
        assert_eq!(request.payload, json!({"ref": "main"}));
    }

    #[test]
    fn event_type_wins_over_branch_and_workflow() {
        let request = build_dispatch_request(
            GITHUB_API_BASE,
            "octocat",
            "my-repo",
            Some("build"),
            Some("main"),
            Some("build.yml"),
        )
        .unwrap();
        assert!(request.url.ends_with("/repos/octocat/my-repo/dispatches"));
        assert_eq!(request.payload, json!({"event_type": "build"}));
    }

    #[test]
    fn neither_mode_is_invalid() {
        let err =
            build_dispatch_request(GITHUB_API_BASE, "octocat", "my-repo", None, None, None)
                .unwrap_err();
        assert!(matches!(err, RelayError::InvalidDispatchRequest));
    }

    #[test]
    fn branch_without_workflow_is_invalid() {
        let err = build_dispatch_request(
            GITHUB_API_BASE,
            "octocat",
            "my-repo",
            None,
            Some("main"),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, RelayError::InvalidDispatchRequest));
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let request = build_dispatch_request(
            GITHUB_API_BASE,
            "octocat",
            "my-repo",
            Some(""),
            Some("main"),
            Some("build.yml"),
        )
        .unwrap();
        assert_eq!(request.payload, json!({"ref": "main"}));

        let err = build_dispatch_request(
            GITHUB_API_BASE,
            "octocat",
            "my-repo",
            Some(""),
            Some(""),
            Some("build.yml"),
        )
        .unwrap_err();
        assert!(matches!(err, RelayError::InvalidDispatchRequest));
    }
}
