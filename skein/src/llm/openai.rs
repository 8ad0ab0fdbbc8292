//! OpenAI Chat Completions client implementing [`Generator`].
//!
//! Uses the real Chat Completions API; requires `OPENAI_API_KEY` (or an
//! explicit config). Per the Generator contract, API failures never
//! propagate as errors: they are converted into an `Error:` marker string
//! in the returned text, so a bad call degrades only the path that made it.

use async_trait::async_trait;
use tracing::{debug, warn};

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
    Client,
};

use super::{Generator, ERROR_MARKER};

/// OpenAI-backed [`Generator`].
///
/// API key from `OPENAI_API_KEY` by default; or provide a config via
/// [`OpenAiGenerator::with_config`] (custom key or base URL).
pub struct OpenAiGenerator {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl OpenAiGenerator {
    /// Build with default config (API key from the environment).
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
            temperature: None,
        }
    }

    /// Build with a custom config (e.g. custom API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
            temperature: None,
        }
    }

    /// Set temperature (0-2). Lower values are more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    async fn try_generate(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, OpenAIError> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(2);
        if let Some(sys) = system {
            messages.push(ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage::from(sys),
            ));
        }
        messages.push(ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessage::from(prompt),
        ));

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(messages);
        if let Some(t) = self.temperature {
            args.temperature(t);
        }
        let request = args.build()?;

        debug!(model = %self.model, prompt_len = prompt.len(), "openai chat create");
        let response = self.client.chat().create(request).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        Ok(content)
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    async fn generate(&self, prompt: &str, system: Option<&str>) -> String {
        match self.try_generate(prompt, system).await {
            Ok(content) => content,
            Err(e) => {
                warn!(model = %self.model, error = %e, "generation failed; embedding marker");
                format!("{} generation failed - {}", ERROR_MARKER, e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::is_error_marker;

    #[test]
    fn builder_sets_model_and_temperature() {
        let _ = OpenAiGenerator::new("gpt-4o-mini");
        let config = OpenAIConfig::new().with_api_key("test-key");
        let _ = OpenAiGenerator::with_config(config, "gpt-4o-mini").with_temperature(0.2);
    }

    /// An unreachable base URL must yield marker text, never a panic or Err.
    #[tokio::test]
    async fn unreachable_base_returns_error_marker_text() {
        let config = OpenAIConfig::new()
            .with_api_key("test-key")
            .with_api_base("https://127.0.0.1:1");
        let gen = OpenAiGenerator::with_config(config, "gpt-4o-mini");

        let out = gen.generate("Say exactly: ok", Some("system")).await;

        assert!(is_error_marker(&out), "expected marker text, got: {}", out);
    }

    #[tokio::test]
    #[ignore = "Requires OPENAI_API_KEY; run with: cargo test -p skein real_api -- --ignored"]
    async fn real_api_returns_content() {
        std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set for this test");
        let model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let gen = OpenAiGenerator::new(model);
        let out = gen.generate("Say exactly: ok", None).await;
        assert!(!out.is_empty());
        assert!(!is_error_marker(&out), "got marker: {}", out);
    }
}
