//! Speech-to-text capability.
//!
//! The OpenAI-compatible implementation uploads the artifact as a multipart
//! form to the `audio/transcriptions` endpoint. Language is auto-detected by
//! the model.

use async_trait::async_trait;
use parlo_core::models::MediaArtifact;
use reqwest::multipart;
use serde::Deserialize;
use std::time::Duration;

use super::CapabilityError;

/// Speech-to-text capability seam. The pipeline depends on this trait, not
/// on a concrete vendor client.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe the artifact. An empty transcript is returned as-is; the
    /// caller decides whether that is an error.
    async fn transcribe(&self, artifact: &MediaArtifact) -> Result<String, CapabilityError>;
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Clone)]
pub struct OpenAiSpeechService {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl OpenAiSpeechService {
    pub fn new(
        api_base: String,
        api_key: String,
        model: String,
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
        })
    }

    fn transcriptions_url(&self) -> String {
        format!("{}/audio/transcriptions", self.api_base)
    }
}

#[async_trait]
impl SpeechToText for OpenAiSpeechService {
    #[tracing::instrument(skip(self, artifact), fields(
        file_name = %artifact.file_name,
        media_type = %artifact.media_type,
        size_bytes = artifact.data.len(),
        model = %self.model
    ))]
    async fn transcribe(&self, artifact: &MediaArtifact) -> Result<String, CapabilityError> {
        let part = multipart::Part::bytes(artifact.data.clone())
            .file_name(artifact.file_name.clone())
            .mime_str(&artifact.media_type)
            .map_err(|e| {
                CapabilityError::Api(format!(
                    "Invalid media type '{}': {}",
                    artifact.media_type, e
                ))
            })?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .part("file", part);

        let start = std::time::Instant::now();

        let response = self
            .client
            .post(self.transcriptions_url())
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CapabilityError::from_transport("Transcription request", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Transcription request failed"
            );
            return Err(CapabilityError::Api(format!(
                "Transcription failed: {} - {}",
                status, error_text
            )));
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| CapabilityError::InvalidResponse(e.to_string()))?;

        tracing::info!(
            transcript_chars = parsed.text.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Transcription completed"
        );

        Ok(parsed.text)
    }
}
