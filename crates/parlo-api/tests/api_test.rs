//! HTTP contract tests over the real router with mock storage and
//! capability clients. No network, no credentials.

use async_trait::async_trait;
use axum_test::TestServer;
use bytes::Bytes;
use parlo_api::setup::routes::setup_routes;
use parlo_api::state::AppState;
use parlo_core::{Config, StorageProvider};
use parlo_services::{
    CapabilityError, SpeechToText, TranscriptionPipeline, Translator, UploadAuthorizer,
};
use parlo_core::models::MediaArtifact;
use parlo_storage::{FetchedObject, Storage, StorageError, StorageResult, UploadGrant};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct MockStorage {
    provider: StorageProvider,
    objects: Mutex<HashMap<String, FetchedObject>>,
}

impl MockStorage {
    fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            objects: Mutex::new(HashMap::new()),
        }
    }

    fn put(&self, key: &str, data: &[u8], content_type: &str) {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            FetchedObject {
                data: Bytes::copy_from_slice(data),
                content_type: Some(content_type.to_string()),
            },
        );
    }
}

#[async_trait]
impl Storage for MockStorage {
    fn provider(&self) -> StorageProvider {
        self.provider
    }

    fn default_bucket(&self) -> &str {
        "test-bucket"
    }

    async fn issue_upload_grant(
        &self,
        key: &str,
        _content_type: &str,
        _expires_in: Duration,
    ) -> StorageResult<UploadGrant> {
        Ok(match self.provider {
            StorageProvider::Primary => UploadGrant::PresignedPut {
                url: format!("https://test-bucket.s3.amazonaws.com/{}?sig", key),
                region: "eu-west-3".to_string(),
            },
            StorageProvider::Fallback => UploadGrant::SignedToken {
                signed_url: format!(
                    "https://proj.supabase.co/storage/v1/object/upload/sign/test-bucket/{}",
                    key
                ),
                token: "tok".to_string(),
            },
        })
    }

    async fn fetch_object(
        &self,
        key: &str,
        _bucket_override: Option<&str>,
    ) -> StorageResult<FetchedObject> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }
}

struct MockSpeech {
    transcript: String,
}

#[async_trait]
impl SpeechToText for MockSpeech {
    async fn transcribe(&self, _artifact: &MediaArtifact) -> Result<String, CapabilityError> {
        Ok(self.transcript.clone())
    }
}

struct MockTranslator;

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str) -> Result<String, CapabilityError> {
        Ok(format!("fr: {}", text))
    }
}

fn test_server(storage: Arc<MockStorage>, transcript: &str) -> TestServer {
    let config = Config::default();
    let provider = storage.provider();
    let authorizer = UploadAuthorizer::new(storage.clone(), config.upload_url_expiry());
    let pipeline = TranscriptionPipeline::new(
        storage,
        Arc::new(MockSpeech {
            transcript: transcript.to_string(),
        }),
        Arc::new(MockTranslator),
    );
    let state = Arc::new(AppState {
        config: config.clone(),
        provider,
        authorizer,
        pipeline,
        is_production: false,
    });
    let router = setup_routes(&config, state).expect("router");
    TestServer::new(router).expect("test server")
}

#[tokio::test]
async fn test_authorize_returns_primary_grant() {
    let storage = Arc::new(MockStorage::new(StorageProvider::Primary));
    let server = test_server(storage, "unused");

    let response = server
        .post("/api/v0/uploads/authorize")
        .json(&json!({"fileName": "clip.mp4", "contentType": "video/mp4"}))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["provider"], "primary");
    assert_eq!(body["bucket"], "test-bucket");
    assert_eq!(body["region"], "eu-west-3");
    let key = body["key"].as_str().unwrap();
    assert!(key.ends_with("-clip.mp4"), "unexpected key {}", key);
    assert!(body["url"].as_str().unwrap().contains(key));
}

#[tokio::test]
async fn test_authorize_returns_fallback_grant() {
    let storage = Arc::new(MockStorage::new(StorageProvider::Fallback));
    let server = test_server(storage, "unused");

    let response = server
        .post("/api/v0/uploads/authorize")
        .json(&json!({"fileName": "clip.mp4", "contentType": "video/mp4"}))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["provider"], "fallback");
    assert_eq!(body["token"], "tok");
    assert!(body["signedUrl"].as_str().unwrap().contains("upload/sign"));
    assert!(body.get("url").is_none());
}

#[tokio::test]
async fn test_authorize_empty_file_name_is_400() {
    let storage = Arc::new(MockStorage::new(StorageProvider::Primary));
    let server = test_server(storage, "unused");

    let response = server
        .post("/api/v0/uploads/authorize")
        .json(&json!({"fileName": "", "contentType": "video/mp4"}))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["error"].as_str().unwrap().contains("fileName"));
}

#[tokio::test]
async fn test_authorize_missing_field_is_400() {
    let storage = Arc::new(MockStorage::new(StorageProvider::Primary));
    let server = test_server(storage, "unused");

    let response = server
        .post("/api/v0/uploads/authorize")
        .json(&json!({"fileName": "clip.mp4"}))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_process_round_trip() {
    let storage = Arc::new(MockStorage::new(StorageProvider::Primary));
    storage.put("2024/05/01/ab12cd34-clip.mp4", b"bytes", "video/mp4");
    let server = test_server(storage, "hello from the clip");

    let response = server
        .post("/api/v0/transcriptions")
        .json(&json!({"key": "2024/05/01/ab12cd34-clip.mp4"}))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["transcript"], "hello from the clip");
    assert_eq!(body["translation"], "fr: hello from the clip");
}

#[tokio::test]
async fn test_process_unknown_key_is_404() {
    let storage = Arc::new(MockStorage::new(StorageProvider::Primary));
    let server = test_server(storage, "unused");

    let response = server
        .post("/api/v0/transcriptions")
        .json(&json!({"key": "2024/05/01/missing.mp4"}))
        .await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_process_empty_key_is_400() {
    let storage = Arc::new(MockStorage::new(StorageProvider::Primary));
    let server = test_server(storage, "unused");

    let response = server
        .post("/api/v0/transcriptions")
        .json(&json!({"key": ""}))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_process_empty_transcript_is_500() {
    let storage = Arc::new(MockStorage::new(StorageProvider::Primary));
    storage.put("2024/05/01/ab12cd34-silence.mp3", b"bytes", "audio/mpeg");
    let server = test_server(storage, "");

    let response = server
        .post("/api/v0/transcriptions")
        .json(&json!({"key": "2024/05/01/ab12cd34-silence.mp3"}))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["code"], "EMPTY_TRANSCRIPT");
}

#[tokio::test]
async fn test_health_reports_provider() {
    let storage = Arc::new(MockStorage::new(StorageProvider::Fallback));
    let server = test_server(storage, "unused");

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["provider"], "fallback");
}
