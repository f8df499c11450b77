use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ChatProvider, ProviderCall, join_endpoint};
use crate::config::OpenAiConfig;
use crate::error::ProviderError;
use crate::provider::ProviderIdentity;
use crate::utils::http::send_checked_json;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible chat completions, authenticated with a bearer header.
///
/// Built per call; borrows configuration and owns nothing request-scoped.
#[derive(Clone)]
pub struct OpenAiChat<'a> {
    http: reqwest::Client,
    config: &'a OpenAiConfig,
}

impl<'a> OpenAiChat<'a> {
    pub fn new(http: reqwest::Client, config: &'a OpenAiConfig) -> Self {
        Self { http, config }
    }

    fn chat_completions_url(&self) -> String {
        join_endpoint(&self.config.base_url, "chat/completions")
    }
}

#[async_trait]
impl<'a> ChatProvider for OpenAiChat<'a> {
    fn provider(&self) -> ProviderIdentity {
        ProviderIdentity::OpenAi
    }

    fn default_model(&self) -> &str {
        &self.config.chat_model
    }

    async fn chat(&self, call: ProviderCall<'_>) -> Result<String, ProviderError> {
        let model = call.model.unwrap_or(self.default_model());
        let body = ChatCompletionRequest {
            model,
            messages: [ChatMessage {
                role: "user",
                content: call.prompt,
            }],
        };

        let url = self.chat_completions_url();
        tracing::debug!(%url, model, "sending openai chat completion");
        let req = self
            .http
            .post(url)
            .bearer_auth(call.api_key.expose())
            .json(&body);
        let parsed: ChatCompletionResponse = send_checked_json(req).await?;

        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            ProviderError::MissingField {
                path: "choices[0]".to_string(),
            }
        })?;
        Ok(choice.message.content.unwrap_or_default())
    }
}
