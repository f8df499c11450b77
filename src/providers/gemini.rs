use async_trait::async_trait;
use serde_json::Value;

use super::{ChatProvider, ProviderCall};
use crate::config::GeminiConfig;
use crate::error::ProviderError;
use crate::extract::extract_chat_text;
use crate::provider::ProviderIdentity;
use crate::utils::http::send_checked_text;

/// Gemini-compatible `generateContent`, authenticated with a `key` query
/// parameter rather than a header.
#[derive(Clone)]
pub struct GeminiChat<'a> {
    http: reqwest::Client,
    config: &'a GeminiConfig,
}

impl<'a> GeminiChat<'a> {
    pub fn new(http: reqwest::Client, config: &'a GeminiConfig) -> Self {
        Self { http, config }
    }

    /// `{base}/models/{model}:generateContent?key={api_key}`
    ///
    /// The model becomes a single percent-encoded path segment, and `key` is
    /// the only query parameter.
    pub fn generate_url(&self, model: &str, api_key: &str) -> Result<reqwest::Url, ProviderError> {
        let model = model.strip_prefix("models/").unwrap_or(model);
        let mut url = reqwest::Url::parse(&self.config.base_url)
            .map_err(|err| ProviderError::InvalidEndpoint(format!("gemini base url: {err}")))?;
        url.path_segments_mut()
            .map_err(|()| {
                ProviderError::InvalidEndpoint("gemini base url cannot carry a path".to_string())
            })?
            .pop_if_empty()
            .push("models")
            .push(&format!("{model}:generateContent"));
        url.set_fragment(None);
        url.query_pairs_mut().clear().append_pair("key", api_key);
        Ok(url)
    }

    pub fn build_payload(prompt: &str) -> Value {
        serde_json::json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        })
    }
}

#[async_trait]
impl<'a> ChatProvider for GeminiChat<'a> {
    fn provider(&self) -> ProviderIdentity {
        ProviderIdentity::Gemini
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    async fn chat(&self, call: ProviderCall<'_>) -> Result<String, ProviderError> {
        let model = call.model.unwrap_or(self.default_model());
        let url = self.generate_url(model, call.api_key.expose())?;
        tracing::debug!(model, "sending gemini generateContent");

        // `.json` sets `content-type: application/json`.
        let req = self.http.post(url).json(&Self::build_payload(call.prompt));
        let body = send_checked_text(req).await?;
        extract_chat_text(&body)
    }
}
