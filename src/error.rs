use thiserror::Error;

use crate::provider::ProviderIdentity;

/// Failure while talking to a single upstream provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("api error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to parse json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response is missing `{path}`")]
    MissingField { path: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid request: {field} {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("error calling {provider} api: {source}")]
    Provider {
        provider: ProviderIdentity,
        #[source]
        source: ProviderError,
    },
    #[error("invalid config: {0}")]
    Config(String),
}

impl RelayError {
    pub(crate) fn missing(field: &'static str) -> Self {
        Self::Validation {
            field,
            reason: "must not be empty".to_string(),
        }
    }

    pub(crate) fn provider(provider: ProviderIdentity) -> impl FnOnce(ProviderError) -> Self {
        move |source| Self::Provider { provider, source }
    }

    /// Whether the caller sent something unusable, as opposed to an upstream failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
