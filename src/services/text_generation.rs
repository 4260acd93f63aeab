use std::time::Duration;

use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{config::Config, errors::AppError};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Request(String),

    #[error("generation returned no text")]
    EmptyResponse,

    #[error("generation timed out after {0}s")]
    Timeout(u64),

    #[error("generated reply could not be parsed: {0}")]
    Malformed(String),
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        AppError::ExternalService(err.to_string())
    }
}

/// Black-box text generation: a prompt in, free text out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Same as `generate`, hinting that the reply should match `schema`.
    /// Implementations without structured output support may ignore the hint.
    async fn generate_structured(
        &self,
        prompt: &str,
        schema_name: &str,
        schema: Value,
    ) -> Result<String, GenerationError> {
        let _ = (schema_name, schema);
        self.generate(prompt).await
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionReply {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    content: Option<String>,
}

/// Chat-completion backed generator for any OpenAI-compatible endpoint.
pub struct OpenAiTextGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiTextGenerator {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.llm_api_key.expose_secret())
            .with_api_base(&config.llm_api_base);

        Self {
            client: Client::with_config(openai_config),
            model: config.llm_model.clone(),
        }
    }

    async fn complete(&self, request: Value) -> Result<String, GenerationError> {
        let reply: ChatCompletionReply = self
            .client
            .chat()
            .create_byot(request)
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}

#[async_trait]
impl TextGenerator for OpenAiTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.complete(json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        }))
        .await
    }

    async fn generate_structured(
        &self,
        prompt: &str,
        schema_name: &str,
        schema: Value,
    ) -> Result<String, GenerationError> {
        self.complete(json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "response_format": {
                "type": "json_schema",
                "json_schema": { "name": schema_name, "schema": schema },
            },
        }))
        .await
    }
}

/// `generate`, bounded by `timeout`.
pub async fn generate_with_timeout(
    generator: &dyn TextGenerator,
    prompt: &str,
    timeout: Duration,
) -> Result<String, GenerationError> {
    tokio::time::timeout(timeout, generator.generate(prompt))
        .await
        .map_err(|_| GenerationError::Timeout(timeout.as_secs()))?
}

/// Decodes a JSON reply, tolerating a surrounding markdown code fence.
pub fn parse_json_reply<T: DeserializeOwned>(reply: &str) -> Result<T, GenerationError> {
    let trimmed = reply.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(body.trim()).map_err(|e| GenerationError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Card {
        front: String,
    }

    #[test]
    fn parse_json_reply_accepts_plain_json() {
        let cards: Vec<Card> = parse_json_reply(r#"[{"front": "x"}]"#).unwrap();
        assert_eq!(cards, vec![Card { front: "x".into() }]);
    }

    #[test]
    fn parse_json_reply_strips_code_fences() {
        let reply = "```json\n[{\"front\": \"slope\"}]\n```";
        let cards: Vec<Card> = parse_json_reply(reply).unwrap();
        assert_eq!(cards[0].front, "slope");

        let reply = "```\n[{\"front\": \"area\"}]\n```\n";
        let cards: Vec<Card> = parse_json_reply(reply).unwrap();
        assert_eq!(cards[0].front, "area");
    }

    #[test]
    fn parse_json_reply_reports_malformed_text() {
        let result: Result<Vec<Card>, _> = parse_json_reply("Here are your cards!");
        assert!(matches!(result, Err(GenerationError::Malformed(_))));
    }

    #[actix_rt::test]
    async fn default_structured_generation_delegates_to_generate() {
        struct Echo;

        #[async_trait]
        impl TextGenerator for Echo {
            async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
                Ok(format!("echo: {}", prompt))
            }
        }

        let reply = Echo
            .generate_structured("hi", "schema", json!({}))
            .await
            .unwrap();
        assert_eq!(reply, "echo: hi");
    }

    #[test]
    fn generation_error_maps_to_external_service() {
        let err: AppError = GenerationError::Timeout(30).into();
        assert!(matches!(err, AppError::ExternalService(_)));
    }
}
