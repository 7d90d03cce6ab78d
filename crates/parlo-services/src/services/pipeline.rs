//! Transcription-translation pipeline.
//!
//! Single-shot transform of a stored object into text: fetch, transcribe,
//! translate, in that order. Nothing is persisted and nothing is cached;
//! repeated calls with the same key re-fetch and re-transcribe.

use parlo_core::models::{MediaArtifact, TranscriptResult};
use parlo_core::AppError;
use parlo_storage::Storage;
use std::sync::Arc;

use super::speech::SpeechToText;
use super::translation::Translator;

#[derive(Clone)]
pub struct TranscriptionPipeline {
    storage: Arc<dyn Storage>,
    speech: Arc<dyn SpeechToText>,
    translator: Arc<dyn Translator>,
}

impl TranscriptionPipeline {
    pub fn new(
        storage: Arc<dyn Storage>,
        speech: Arc<dyn SpeechToText>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            storage,
            speech,
            translator,
        }
    }

    /// Fetch the object at `key`, transcribe it, and translate the
    /// transcript.
    ///
    /// The storage backend is the one the configuration resolves to, which
    /// must be the provider the object was uploaded under. Each stage's
    /// output feeds the next; an empty transcript fails the pipeline before
    /// translation runs.
    #[tracing::instrument(skip(self), fields(provider = %self.storage.provider()))]
    pub async fn process(
        &self,
        key: &str,
        bucket_override: Option<&str>,
    ) -> Result<TranscriptResult, AppError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::Validation("Required field: key".to_string()));
        }

        let object = self.storage.fetch_object(key, bucket_override).await?;
        let artifact = MediaArtifact::from_object(key, object.content_type, object.data.to_vec());

        let transcript = self.speech.transcribe(&artifact).await?;
        if transcript.is_empty() {
            tracing::warn!(key = %key, "Transcription returned no text");
            return Err(AppError::EmptyTranscript(key.to_string()));
        }

        let translation = self.translator.translate(&transcript).await?;

        tracing::info!(
            key = %key,
            transcript_chars = transcript.len(),
            translation_chars = translation.len(),
            "Pipeline completed"
        );

        Ok(TranscriptResult {
            transcript,
            translation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CapabilityError;
    use async_trait::async_trait;
    use bytes::Bytes;
    use parlo_core::StorageProvider;
    use parlo_storage::{FetchedObject, StorageError, StorageResult, UploadGrant};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    struct MockStorage {
        object: Option<FetchedObject>,
        last_fetch: Mutex<Option<(String, Option<String>)>>,
    }

    impl MockStorage {
        fn with_object(data: &[u8], content_type: Option<&str>) -> Self {
            Self {
                object: Some(FetchedObject {
                    data: Bytes::copy_from_slice(data),
                    content_type: content_type.map(String::from),
                }),
                last_fetch: Mutex::new(None),
            }
        }

        fn empty() -> Self {
            Self {
                object: None,
                last_fetch: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl Storage for MockStorage {
        fn provider(&self) -> StorageProvider {
            StorageProvider::Primary
        }

        fn default_bucket(&self) -> &str {
            "test-bucket"
        }

        async fn issue_upload_grant(
            &self,
            _key: &str,
            _content_type: &str,
            _expires_in: Duration,
        ) -> StorageResult<UploadGrant> {
            unreachable!("pipeline never issues grants")
        }

        async fn fetch_object(
            &self,
            key: &str,
            bucket_override: Option<&str>,
        ) -> StorageResult<FetchedObject> {
            *self.last_fetch.lock().unwrap() =
                Some((key.to_string(), bucket_override.map(String::from)));
            self.object
                .clone()
                .ok_or_else(|| StorageError::NotFound(key.to_string()))
        }
    }

    struct MockSpeech {
        transcript: String,
        calls: AtomicUsize,
        last_artifact: Mutex<Option<(String, String)>>,
    }

    impl MockSpeech {
        fn returning(transcript: &str) -> Self {
            Self {
                transcript: transcript.to_string(),
                calls: AtomicUsize::new(0),
                last_artifact: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl SpeechToText for MockSpeech {
        async fn transcribe(&self, artifact: &MediaArtifact) -> Result<String, CapabilityError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_artifact.lock().unwrap() =
                Some((artifact.file_name.clone(), artifact.media_type.clone()));
            Ok(self.transcript.clone())
        }
    }

    struct MockTranslator {
        calls: AtomicUsize,
    }

    impl MockTranslator {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Translator for MockTranslator {
        async fn translate(&self, text: &str) -> Result<String, CapabilityError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("fr: {}", text))
        }
    }

    #[tokio::test]
    async fn test_happy_path_returns_both_texts() {
        let storage = Arc::new(MockStorage::with_object(b"audio", Some("video/mp4")));
        let speech = Arc::new(MockSpeech::returning("hello world"));
        let translator = Arc::new(MockTranslator::new());
        let pipeline = TranscriptionPipeline::new(storage, speech.clone(), translator.clone());

        let result = pipeline
            .process("2024/05/01/ab12cd34-clip.mp4", None)
            .await
            .unwrap();

        assert_eq!(result.transcript, "hello world");
        assert_eq!(result.translation, "fr: hello world");
        assert_eq!(speech.calls.load(Ordering::SeqCst), 1);
        assert_eq!(translator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_artifact_carries_key_segment_and_content_type() {
        let storage = Arc::new(MockStorage::with_object(b"audio", Some("video/mp4")));
        let speech = Arc::new(MockSpeech::returning("text"));
        let pipeline = TranscriptionPipeline::new(
            storage,
            speech.clone(),
            Arc::new(MockTranslator::new()),
        );

        pipeline
            .process("2024/05/01/ab12cd34-clip.mp4", None)
            .await
            .unwrap();

        let (file_name, media_type) = speech.last_artifact.lock().unwrap().clone().unwrap();
        assert_eq!(file_name, "ab12cd34-clip.mp4");
        assert_eq!(media_type, "video/mp4");
    }

    #[tokio::test]
    async fn test_missing_content_type_defaults_to_binary() {
        let storage = Arc::new(MockStorage::with_object(b"audio", None));
        let speech = Arc::new(MockSpeech::returning("text"));
        let pipeline = TranscriptionPipeline::new(
            storage,
            speech.clone(),
            Arc::new(MockTranslator::new()),
        );

        pipeline.process("clip.bin", None).await.unwrap();

        let (_, media_type) = speech.last_artifact.lock().unwrap().clone().unwrap();
        assert_eq!(media_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn test_empty_transcript_never_reaches_translator() {
        let storage = Arc::new(MockStorage::with_object(b"audio", Some("audio/mpeg")));
        let translator = Arc::new(MockTranslator::new());
        let pipeline = TranscriptionPipeline::new(
            storage,
            Arc::new(MockSpeech::returning("")),
            translator.clone(),
        );

        let err = pipeline.process("clip.mp3", None).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyTranscript(_)));
        assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_object_is_not_found_before_any_capability_call() {
        let storage = Arc::new(MockStorage::empty());
        let speech = Arc::new(MockSpeech::returning("never"));
        let translator = Arc::new(MockTranslator::new());
        let pipeline = TranscriptionPipeline::new(storage, speech.clone(), translator.clone());

        let err = pipeline.process("missing.mp4", None).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(speech.calls.load(Ordering::SeqCst), 0);
        assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_key_is_validation_error() {
        let storage = Arc::new(MockStorage::empty());
        let pipeline = TranscriptionPipeline::new(
            storage.clone(),
            Arc::new(MockSpeech::returning("never")),
            Arc::new(MockTranslator::new()),
        );

        let err = pipeline.process("  ", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(storage.last_fetch.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bucket_override_is_forwarded() {
        let storage = Arc::new(MockStorage::with_object(b"audio", Some("audio/mpeg")));
        let pipeline = TranscriptionPipeline::new(
            storage.clone(),
            Arc::new(MockSpeech::returning("text")),
            Arc::new(MockTranslator::new()),
        );

        pipeline.process("clip.mp3", Some("other-bucket")).await.unwrap();

        let (_, bucket) = storage.last_fetch.lock().unwrap().clone().unwrap();
        assert_eq!(bucket.as_deref(), Some("other-bucket"));
    }
}
