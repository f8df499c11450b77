use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{RelayError, Result};

pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_IMAGE_MODEL: &str = "dall-e-3";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 300;

/// Immutable relay configuration. Holds endpoints and default models only;
/// credentials always arrive with the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub listen: String,
    pub http: HttpConfig,
    pub openai: OpenAiConfig,
    pub gemini: GeminiConfig,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            http: HttpConfig::default(),
            openai: OpenAiConfig::default(),
            gemini: GeminiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub base_url: String,
    /// Used when a chat request does not name a model.
    pub chat_model: String,
    /// Image requests always use this model.
    pub image_model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            chat_model: DEFAULT_OPENAI_CHAT_MODEL.to_string(),
            image_model: DEFAULT_OPENAI_IMAGE_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub base_url: String,
    pub default_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            default_model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }
}

impl RelayConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|err| RelayError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|err| RelayError::Config(format!("read {}: {err}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    pub fn with_openai_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.openai.base_url = base_url.into();
        self
    }

    pub fn with_gemini_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.gemini.base_url = base_url.into();
        self
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("openai.base_url", &self.openai.base_url),
            ("openai.chat_model", &self.openai.chat_model),
            ("openai.image_model", &self.openai.image_model),
            ("gemini.base_url", &self.gemini.base_url),
            ("gemini.default_model", &self.gemini.default_model),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(RelayError::Config(format!("{name} must not be empty")));
            }
        }
        for (name, url) in [
            ("openai.base_url", &self.openai.base_url),
            ("gemini.base_url", &self.gemini.base_url),
        ] {
            reqwest::Url::parse(url)
                .map_err(|err| RelayError::Config(format!("{name} is not a valid url: {err}")))?;
        }
        Ok(())
    }
}
