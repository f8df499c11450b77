pub mod gemini;
pub mod openai;
pub mod openai_images;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::provider::ProviderIdentity;
use crate::request::ApiKey;

pub use gemini::GeminiChat;
pub use openai::OpenAiChat;
pub use openai_images::OpenAiImages;

/// Borrowed inputs for a single provider call.
#[derive(Debug, Clone, Copy)]
pub struct ProviderCall<'a> {
    pub prompt: &'a str,
    pub api_key: &'a ApiKey,
    pub model: Option<&'a str>,
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn provider(&self) -> ProviderIdentity;

    /// Model used when the call does not name one.
    fn default_model(&self) -> &str;

    async fn chat(&self, call: ProviderCall<'_>) -> Result<String, ProviderError>;
}

#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn provider(&self) -> ProviderIdentity;

    fn model_id(&self) -> &str;

    async fn generate(&self, call: ProviderCall<'_>) -> Result<Vec<String>, ProviderError>;
}

pub(crate) fn join_endpoint(base_url: &str, endpoint: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let endpoint = endpoint.trim_start_matches('/');
    if base.ends_with(&format!("/{endpoint}")) {
        base.to_string()
    } else {
        format!("{base}/{endpoint}")
    }
}
