//! The relay pipeline: trigger event in, GitHub response out
//!
//! A single linear sequence per invocation: validate the event, resolve the
//! credential bundle, build the dispatch request, send it. Any step failing
//! aborts the invocation; nothing is retried and nothing is cached.

use crate::dispatch::{GITHUB_API_BASE, GithubDispatcher, build_dispatch_request};
use crate::error::{RelayError, Result};
use crate::event::{DispatchResult, TriggerEvent};
use crate::secrets::SecretStore;
use std::sync::Arc;
use tracing::info;

pub struct RelayHandler {
    secrets: Arc<dyn SecretStore>,
    dispatcher: GithubDispatcher,
    api_base: String,
}

impl RelayHandler {
    pub fn new(secrets: Arc<dyn SecretStore>, dispatcher: GithubDispatcher) -> Self {
        Self {
            secrets,
            dispatcher,
            api_base: GITHUB_API_BASE.to_string(),
        }
    }

    /// Override the GitHub API base URL (used to target a test server).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub async fn handle(&self, event: &TriggerEvent) -> Result<DispatchResult> {
        if event.secret_id.is_empty() {
            return Err(RelayError::MissingField("SecretId"));
        }
        if event.repo.is_empty() {
            return Err(RelayError::MissingField("Repo"));
        }

        let credentials = self.secrets.resolve(&event.secret_id).await?;

        let request = build_dispatch_request(
            &self.api_base,
            &credentials.user,
            &event.repo,
            event.event_type.as_deref(),
            event.branch.as_deref(),
            event.workflow.as_deref(),
        )?;

        info!("Dispatching to repo '{}'", event.repo);
        self.dispatcher.send(&request, &credentials.token).await
    }
}
