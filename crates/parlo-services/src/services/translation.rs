//! Text-translation capability.
//!
//! Chat-completions client with a fixed faithful-translation instruction and
//! low randomness. The target language is configuration, not a literal baked
//! into the pipeline.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::CapabilityError;

/// Near-deterministic sampling for translations.
const TRANSLATION_TEMPERATURE: f32 = 0.2;

/// Text-translation capability seam.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String, CapabilityError>;
}

// Chat completions request/response
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiTranslationService {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    target_language: String,
}

impl OpenAiTranslationService {
    pub fn new(
        api_base: String,
        api_key: String,
        model: String,
        target_language: String,
        timeout: Duration,
    ) -> Result<Self, CapabilityError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CapabilityError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            model,
            target_language,
        })
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    fn instruction(&self, text: &str) -> String {
        format!(
            "Translate faithfully into {}, clear and professional register:\n\n{}",
            self.target_language, text
        )
    }
}

#[async_trait]
impl Translator for OpenAiTranslationService {
    #[tracing::instrument(skip(self, text), fields(
        input_chars = text.len(),
        model = %self.model,
        target_language = %self.target_language
    ))]
    async fn translate(&self, text: &str) -> Result<String, CapabilityError> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: format!(
                        "You are a professional translator into {}.",
                        self.target_language
                    ),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: self.instruction(text),
                },
            ],
            temperature: TRANSLATION_TEMPERATURE,
        };

        let start = std::time::Instant::now();

        let response = self
            .client
            .post(self.chat_completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CapabilityError::from_transport("Translation request", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Translation request failed"
            );
            return Err(CapabilityError::Api(format!(
                "Translation failed: {} - {}",
                status, error_text
            )));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CapabilityError::InvalidResponse(e.to_string()))?;

        let translation = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        tracing::info!(
            translation_chars = translation.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Translation completed"
        );

        Ok(translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(target: &str) -> OpenAiTranslationService {
        OpenAiTranslationService::new(
            "https://api.openai.com/v1".to_string(),
            "sk-test".to_string(),
            "gpt-4o-mini".to_string(),
            target.to_string(),
            Duration::from_secs(30),
        )
        .unwrap()
    }

    #[test]
    fn test_instruction_carries_target_language() {
        let service = service("German");
        let instruction = service.instruction("hello");
        assert!(instruction.starts_with("Translate faithfully into German"));
        assert!(instruction.ends_with("hello"));
    }

    #[test]
    fn test_request_wire_shape() {
        let body = ChatCompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "hi".to_string(),
            }],
            temperature: TRANSLATION_TEMPERATURE,
        };
        let json = serde_json::to_value(&body).unwrap();
        let temperature = json["temperature"].as_f64().unwrap();
        assert!((temperature - 0.2).abs() < 1e-6);
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_response_missing_content_is_empty() {
        let parsed: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        let translation = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        assert_eq!(translation, "");
    }
}
