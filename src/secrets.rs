//! Secret store lookup
//!
//! Credentials for the GitHub API live in an external key-value store,
//! addressed by an opaque secret id. The store is re-read on every
//! resolution; bundles are never cached across invocations.

use crate::error::{RelayError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// A GitHub user plus personal access token, as stored in the secret store.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialBundle {
    pub user: String,
    pub token: String,
}

// The token must not leak through Debug formatting in logs.
impl fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Read-only lookup of credential bundles by opaque identifier.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn resolve(&self, secret_id: &str) -> Result<CredentialBundle>;
}

/// Secret store backed by a JSON document on disk.
///
/// The document maps secret ids to credential values. A value may be an
/// inline `{user, token}` object or a string holding the same object as
/// serialized JSON (the shape remote stores hand back).
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SecretStore for FileSecretStore {
    async fn resolve(&self, secret_id: &str) -> Result<CredentialBundle> {
        let document = tokio::fs::read_to_string(&self.path).await?;

        let entries: serde_json::Value = serde_json::from_str(&document).map_err(|e| {
            RelayError::ConfigError(format!(
                "Secrets file '{}' is not valid JSON: {}",
                self.path.display(),
                e
            ))
        })?;

        let entry = entries
            .get(secret_id)
            .ok_or_else(|| RelayError::SecretNotFound(secret_id.to_string()))?;

        debug!("Resolved secret entry for '{}'", secret_id);
        parse_bundle(secret_id, entry)
    }
}

fn parse_bundle(secret_id: &str, entry: &serde_json::Value) -> Result<CredentialBundle> {
    // String entries carry the bundle as nested serialized JSON.
    let bundle = match entry {
        serde_json::Value::String(raw) => serde_json::from_str(raw),
        other => serde_json::from_value(other.clone()),
    };
    bundle.map_err(|_| RelayError::SecretMalformed(secret_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn store_with(contents: &str) -> (NamedTempFile, FileSecretStore) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let store = FileSecretStore::new(file.path());
        (file, store)
    }

    #[tokio::test]
    async fn resolves_inline_object_entry() {
        let (_file, store) =
            store_with(r#"{"sm-token": {"user": "octocat", "token": "abc123"}}"#);
        let bundle = store.resolve("sm-token").await.unwrap();
        assert_eq!(bundle.user, "octocat");
        assert_eq!(bundle.token, "abc123");
    }

    #[tokio::test]
    async fn resolves_nested_json_string_entry() {
        let (_file, store) =
            store_with(r#"{"sm-token": "{\"user\": \"octocat\", \"token\": \"abc123\"}"}"#);
        let bundle = store.resolve("sm-token").await.unwrap();
        assert_eq!(bundle.user, "octocat");
    }

    #[tokio::test]
    async fn unknown_id_is_secret_not_found() {
        let (_file, store) = store_with(r#"{"other": {"user": "u", "token": "t"}}"#);
        let err = store.resolve("sm-token").await.unwrap_err();
        assert!(matches!(err, RelayError::SecretNotFound(id) if id == "sm-token"));
    }

    #[tokio::test]
    async fn entry_without_token_is_malformed() {
        let (_file, store) = store_with(r#"{"sm-token": {"user": "octocat"}}"#);
        let err = store.resolve("sm-token").await.unwrap_err();
        assert!(matches!(err, RelayError::SecretMalformed(id) if id == "sm-token"));
    }

    #[tokio::test]
    async fn repeated_resolution_is_idempotent() {
        let (_file, store) =
            store_with(r#"{"sm-token": {"user": "octocat", "token": "abc123"}}"#);
        let first = store.resolve("sm-token").await.unwrap();
        let second = store.resolve("sm-token").await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn debug_redacts_token() {
        let bundle = CredentialBundle {
            user: "octocat".to_string(),
            token: "abc123".to_string(),
        };
        let rendered = format!("{:?}", bundle);
        assert!(!rendered.contains("abc123"));
        assert!(rendered.contains("octocat"));
    }
}
