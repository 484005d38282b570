use std::io;

/// Custom error type for actions_relay operations
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Secret not found: {0}")]
    SecretNotFound(String),

    #[error("Secret is not a valid credential bundle: {0}")]
    SecretMalformed(String),

    #[error("Invalid dispatch request: need EventType, or both Branch and Workflow")]
    InvalidDispatchRequest,

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Upstream service returned status {status}")]
    UpstreamStatus { status: u16 },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

/// Helper type for Results that use RelayError
pub type Result<T> = std::result::Result<T, RelayError>;
