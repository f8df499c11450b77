use std::sync::Arc;

use tracing::Instrument as _;

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::provider::ProviderIdentity;
use crate::providers::{
    ChatProvider, GeminiChat, ImageProvider, OpenAiChat, OpenAiImages, ProviderCall,
};
use crate::request::{Generation, GenerationKind, GenerationRequest};
use crate::Result;
use crate::utils::http::default_http_client;

/// Routes each request to exactly one provider client.
///
/// Holds only immutable configuration and the HTTP client; clones are cheap
/// and safe to share across concurrent requests.
#[derive(Clone)]
pub struct Dispatcher {
    config: Arc<RelayConfig>,
    http: reqwest::Client,
}

impl Dispatcher {
    pub fn new(config: RelayConfig) -> Self {
        let http = default_http_client(config.http.timeout());
        Self {
            config: Arc::new(config),
            http,
        }
    }

    // Adding a provider means adding its client and one arm in each table below.

    fn chat_provider(&self, identity: ProviderIdentity) -> Box<dyn ChatProvider + '_> {
        match identity {
            ProviderIdentity::OpenAi => {
                Box::new(OpenAiChat::new(self.http.clone(), &self.config.openai))
            }
            ProviderIdentity::Gemini => {
                Box::new(GeminiChat::new(self.http.clone(), &self.config.gemini))
            }
        }
    }

    /// Gemini has no image client here; its image requests fall back to
    /// OpenAI the same way unknown provider names do.
    fn image_provider(&self, identity: ProviderIdentity) -> Box<dyn ImageProvider + '_> {
        match identity {
            ProviderIdentity::OpenAi | ProviderIdentity::Gemini => {
                Box::new(OpenAiImages::new(self.http.clone(), &self.config.openai))
            }
        }
    }

    /// Sends the request to its provider and returns the normalized result.
    ///
    /// Provider failures come back as [`RelayError::Provider`] tagged with the
    /// provider that failed. Nothing is retried.
    pub async fn dispatch(&self, request: GenerationRequest) -> Result<Generation> {
        match request.kind() {
            GenerationKind::Chat => self.chat(&request).await.map(Generation::Text),
            GenerationKind::Image => self.images(&request).await.map(Generation::Images),
        }
    }

    pub async fn chat(&self, request: &GenerationRequest) -> Result<String> {
        let provider = request.provider();
        let client = self.chat_provider(provider);
        let model = request.model().unwrap_or(client.default_model());
        let span = tracing::info_span!(
            "relay.dispatch",
            kind = GenerationKind::Chat.as_str(),
            provider = provider.as_str(),
            model
        );

        async {
            let result = client
                .chat(ProviderCall {
                    prompt: request.prompt(),
                    api_key: request.api_key(),
                    model: Some(model),
                })
                .await;
            match &result {
                Ok(text) => tracing::info!(chars = text.chars().count(), "chat completed"),
                Err(err) => tracing::warn!(error = %err, "chat failed"),
            }
            result.map_err(RelayError::provider(provider))
        }
        .instrument(span)
        .await
    }

    pub async fn images(&self, request: &GenerationRequest) -> Result<Vec<String>> {
        let client = self.image_provider(request.provider());
        let provider = client.provider();
        if provider != request.provider() {
            tracing::debug!(
                requested = request.provider().as_str(),
                provider = provider.as_str(),
                "image generation falls back to default provider"
            );
        }
        let span = tracing::info_span!(
            "relay.dispatch",
            kind = GenerationKind::Image.as_str(),
            provider = provider.as_str(),
            model = client.model_id()
        );

        async {
            let result = client
                .generate(ProviderCall {
                    prompt: request.prompt(),
                    api_key: request.api_key(),
                    model: request.model(),
                })
                .await;
            match &result {
                Ok(urls) => tracing::info!(images = urls.len(), "image generation completed"),
                Err(err) => tracing::warn!(error = %err, "image generation failed"),
            }
            result.map_err(RelayError::provider(provider))
        }
        .instrument(span)
        .await
    }
}
