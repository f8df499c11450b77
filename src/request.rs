use std::fmt;

use serde::{Deserialize, Serialize};

use crate::provider::ProviderIdentity;
use crate::{RelayError, Result};

/// Caller-supplied provider credential. Used for one call, never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GenerationKind {
    #[default]
    Chat,
    Image,
}

impl GenerationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Image => "image",
        }
    }
}

/// Request body as received from the HTTP layer, before validation.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGenerationRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl fmt::Debug for RawGenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawGenerationRequest")
            .field("prompt", &self.prompt)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("provider", &self.provider)
            .field("model", &self.model)
            .finish()
    }
}

impl RawGenerationRequest {
    pub fn new(prompt: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            api_key: Some(api_key.into()),
            provider: None,
            model: None,
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Validates required fields and fills defaults.
    ///
    /// `prompt` and `apiKey` must be present and non-empty; they are otherwise
    /// passed through untouched. The provider name resolves through
    /// [`ProviderIdentity::parse_or_default`], so an unknown name is not an
    /// error. The model is trimmed, and a blank model counts as absent.
    pub fn normalize(self, kind: GenerationKind) -> Result<GenerationRequest> {
        let prompt = self
            .prompt
            .filter(|prompt| !prompt.is_empty())
            .ok_or_else(|| RelayError::missing("prompt"))?;
        let api_key = self
            .api_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| RelayError::missing("apiKey"))?;
        let provider = ProviderIdentity::parse_or_default(self.provider.as_deref());
        let model = self
            .model
            .map(|model| model.trim().to_string())
            .filter(|model| !model.is_empty());

        Ok(GenerationRequest {
            kind,
            prompt,
            api_key: ApiKey(api_key),
            provider,
            model,
        })
    }
}

/// A validated generation request. Immutable once built.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    kind: GenerationKind,
    prompt: String,
    api_key: ApiKey,
    provider: ProviderIdentity,
    model: Option<String>,
}

impl GenerationRequest {
    pub fn kind(&self) -> GenerationKind {
        self.kind
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn provider(&self) -> ProviderIdentity {
        self.provider
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }
}

/// Normalized result of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Generation {
    Text(String),
    Images(Vec<String>),
}
