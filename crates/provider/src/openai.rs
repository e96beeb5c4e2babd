//! OpenAI-compatible chat-completions client.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::{Message, Provider, ProviderError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for any endpoint speaking the OpenAI chat-completions dialect.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    api_base: String,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            api_base: api_base.into(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[async_trait::async_trait]
impl Provider for OpenAiProvider {
    async fn chat(&self, model: &str, messages: &[Message]) -> Result<Message> {
        let body = json!({
            "model": model,
            "messages": messages,
        });

        debug!("chat completion: model={} messages={}", model, messages.len());

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!("{}: {}", status, detail)));
        }

        let completion: ChatCompletion = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or(ProviderError::EmptyResponse)
    }
}
