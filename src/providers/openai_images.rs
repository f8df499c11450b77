use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ImageProvider, ProviderCall, join_endpoint};
use crate::config::OpenAiConfig;
use crate::error::ProviderError;
use crate::provider::ProviderIdentity;
use crate::utils::http::send_checked_json;

#[derive(Debug, Serialize)]
struct ImagesGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    response_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct ImagesGenerationResponse {
    #[serde(default)]
    data: Vec<ImageGenerationData>,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationData {
    #[serde(default)]
    url: Option<String>,
}

/// OpenAI-compatible image generation with a configuration-fixed model.
#[derive(Clone)]
pub struct OpenAiImages<'a> {
    http: reqwest::Client,
    config: &'a OpenAiConfig,
}

impl<'a> OpenAiImages<'a> {
    pub fn new(http: reqwest::Client, config: &'a OpenAiConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl<'a> ImageProvider for OpenAiImages<'a> {
    fn provider(&self) -> ProviderIdentity {
        ProviderIdentity::OpenAi
    }

    fn model_id(&self) -> &str {
        &self.config.image_model
    }

    async fn generate(&self, call: ProviderCall<'_>) -> Result<Vec<String>, ProviderError> {
        if let Some(requested) = call.model.filter(|model| *model != self.model_id()) {
            tracing::debug!(requested, model = self.model_id(), "ignoring request model for images");
        }
        let body = ImagesGenerationRequest {
            model: self.model_id(),
            prompt: call.prompt,
            response_format: "url",
        };

        let url = join_endpoint(&self.config.base_url, "images/generations");
        tracing::debug!(%url, model = self.model_id(), "sending openai image generation");
        let req = self
            .http
            .post(url)
            .bearer_auth(call.api_key.expose())
            .json(&body);
        let parsed: ImagesGenerationResponse = send_checked_json(req).await?;

        let mut urls = Vec::with_capacity(parsed.data.len());
        for (index, item) in parsed.data.into_iter().enumerate() {
            match item.url.filter(|url| !url.trim().is_empty()) {
                Some(url) => urls.push(url),
                None => tracing::warn!(index, "image result has no url; skipping"),
            }
        }
        Ok(urls)
    }
}
