//! Storage abstraction trait
//!
//! This module defines the Storage trait that both providers implement, plus
//! the error type shared by all storage operations.

use async_trait::async_trait;
use bytes::Bytes;
use parlo_core::{AppError, StorageProvider};
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(msg) => AppError::NotFound(msg),
            StorageError::SigningFailed(msg) => AppError::Provider(msg),
            StorageError::DownloadFailed(msg) => AppError::Provider(msg),
            StorageError::InvalidKey(msg) => AppError::Validation(msg),
            StorageError::BackendError(msg) => AppError::Provider(msg),
            StorageError::ConfigError(msg) => AppError::Configuration(msg),
        }
    }
}

/// A provider-issued credential for one direct upload.
///
/// `PresignedPut` grants an HTTP PUT of raw bytes; `SignedToken` grants a
/// multipart form POST carrying the token as a bearer credential.
#[derive(Debug, Clone)]
pub enum UploadGrant {
    PresignedPut { url: String, region: String },
    SignedToken { signed_url: String, token: String },
}

/// An object retrieved from storage: raw bytes plus the content type the
/// backend reported, if any.
#[derive(Debug, Clone)]
pub struct FetchedObject {
    pub data: Bytes,
    pub content_type: Option<String>,
}

/// Storage abstraction trait
///
/// Both providers (S3, Supabase Storage) implement this trait. Upload
/// authorization and the transcription pipeline work against it without
/// knowing which variant is active.
#[async_trait]
pub trait Storage: Send + Sync {
    /// The provider family this backend belongs to.
    fn provider(&self) -> StorageProvider;

    /// The bucket uploads are authorized into and fetches default to.
    fn default_bucket(&self) -> &str;

    /// Issue a time-limited upload credential bound to the exact key and
    /// content type. The content-type binding is enforced by the backend at
    /// upload time, not by this service.
    async fn issue_upload_grant(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<UploadGrant>;

    /// Fetch an object's bytes and reported content type.
    ///
    /// `bucket_override` targets a different bucket of the same provider;
    /// `None` uses the default bucket.
    async fn fetch_object(
        &self,
        key: &str,
        bucket_override: Option<&str>,
    ) -> StorageResult<FetchedObject>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_app_not_found() {
        let err: AppError = StorageError::NotFound("2024/05/01/missing.mp4".to_string()).into();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_config_error_maps_to_configuration() {
        let err: AppError = StorageError::ConfigError("no provider".to_string()).into();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_backend_errors_map_to_provider() {
        for storage_err in [
            StorageError::SigningFailed("sig".to_string()),
            StorageError::DownloadFailed("dl".to_string()),
            StorageError::BackendError("be".to_string()),
        ] {
            let err: AppError = storage_err.into();
            assert!(matches!(err, AppError::Provider(_)));
        }
    }
}
