//! Thin HTTP surface over [`Dispatcher`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::dispatch::Dispatcher;
use crate::error::RelayError;
use crate::provider::ProviderIdentity;
use crate::request::{GenerationKind, RawGenerationRequest};

#[derive(Clone)]
pub struct RelayHttpState {
    dispatcher: Dispatcher,
}

impl RelayHttpState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider: Option<ProviderIdentity>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, code, provider) = match &self {
            RelayError::Validation { .. } => (StatusCode::BAD_REQUEST, "invalid_request", None),
            RelayError::Provider { provider, .. } => {
                (StatusCode::BAD_GATEWAY, "provider_error", Some(*provider))
            }
            RelayError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error", None),
        };
        let body = ErrorResponse {
            error: ErrorDetail {
                code,
                message: self.to_string(),
                provider,
            },
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: RelayHttpState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(handle_chat))
        .route("/generate-image", post(handle_generate_image))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn handle_chat(
    State(state): State<RelayHttpState>,
    Json(payload): Json<RawGenerationRequest>,
) -> Result<Response, RelayError> {
    let request = payload.normalize(GenerationKind::Chat)?;
    let text = state.dispatcher.chat(&request).await?;
    Ok(([(CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response())
}

async fn handle_generate_image(
    State(state): State<RelayHttpState>,
    Json(payload): Json<RawGenerationRequest>,
) -> Result<Json<Vec<String>>, RelayError> {
    let request = payload.normalize(GenerationKind::Image)?;
    let urls = state.dispatcher.images(&request).await?;
    Ok(Json(urls))
}
