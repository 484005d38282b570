use actions_relay::SharedState;
use actions_relay::error::RelayError;
use actions_relay::event::{TrainingStatusRequest, TriggerEvent};
use actions_relay::training;
use axum::{Json, extract::State as AxumState, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::{self, error, info};

pub async fn root() -> &'static str {
    "Hello, World!"
}

/// Returns the current server status
pub async fn status(AxumState(state): AxumState<SharedState>) -> impl IntoResponse {
    Json(json!({
        "server": {
            "name": "actions_relay",
            "version": env!("CARGO_PKG_VERSION"),
            "started_at": state.started_at,
            "uptime_seconds": state.start_time.elapsed().as_secs(),
        },
        "github": {
            "api_base": state.config.github.api_base,
        },
    }))
}

fn error_status(err: &RelayError) -> StatusCode {
    match err {
        RelayError::MissingField(_) | RelayError::InvalidDispatchRequest => {
            StatusCode::BAD_REQUEST
        }
        RelayError::SecretNotFound(_) => StatusCode::NOT_FOUND,
        RelayError::Network(_) | RelayError::UpstreamStatus { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: RelayError) -> axum::response::Response {
    error!("Request failed: {}", err);
    (error_status(&err), Json(json!({"error": err.to_string()}))).into_response()
}

/// Relays a trigger event to GitHub and returns the remote status and body.
///
/// GitHub's own status code comes back inside the JSON envelope; a non-2xx
/// from GitHub is still a successful relay.
pub async fn handle_dispatch(
    AxumState(state): AxumState<SharedState>,
    Json(event): Json<TriggerEvent>,
) -> impl IntoResponse {
    info!("Dispatch trigger for repo '{}'", event.repo);
    match state.relay.handle(&event).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => error_response(err),
    }
}

/// Looks up a training job and returns its status with flattened metrics.
pub async fn training_status(
    AxumState(state): AxumState<SharedState>,
    Json(request): Json<TrainingStatusRequest>,
) -> impl IntoResponse {
    match training::summarize(&state.training, &request.training_job_name).await {
        Ok(summary) => Json(json!({"statusCode": 200, "body": summary})).into_response(),
        Err(err) => error_response(err),
    }
}
