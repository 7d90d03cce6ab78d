//! Supabase Storage implementation (fallback provider).
//!
//! Talks to the Storage REST API with a service-role credential. Supabase
//! does not support raw presigned PUT semantics; uploads are authorized with
//! a signed upload URL plus a one-time token, and the client performs a
//! multipart form POST carrying the token as a bearer credential (with
//! `x-upsert: true`).

use crate::traits::{FetchedObject, Storage, StorageError, StorageResult, UploadGrant};
use async_trait::async_trait;
use parlo_core::StorageProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone)]
pub struct SupabaseStorage {
    client: reqwest::Client,
    base_url: String,
    service_role_key: String,
    bucket: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignUploadUrlRequest {
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct SignUploadUrlResponse {
    /// Relative URL of the signed upload endpoint, carrying the token as a
    /// query parameter: `/object/upload/sign/{bucket}/{key}?token=...`
    url: String,
}

impl SupabaseStorage {
    pub fn new(
        base_url: String,
        service_role_key: String,
        bucket: String,
        timeout: Duration,
    ) -> StorageResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(SupabaseStorage {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_role_key,
            bucket,
        })
    }

    fn storage_url(&self) -> String {
        format!("{}/storage/v1", self.base_url)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.service_role_key)
    }
}

#[async_trait]
impl Storage for SupabaseStorage {
    fn provider(&self) -> StorageProvider {
        StorageProvider::Fallback
    }

    fn default_bucket(&self) -> &str {
        &self.bucket
    }

    async fn issue_upload_grant(
        &self,
        key: &str,
        _content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<UploadGrant> {
        // The content type is not part of the signature here; the client
        // declares it in the upload form and the backend records it.
        let url = format!(
            "{}/object/upload/sign/{}/{}",
            self.storage_url(),
            self.bucket,
            key
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.bearer())
            .json(&SignUploadUrlRequest {
                expires_in: expires_in.as_secs(),
            })
            .send()
            .await
            .map_err(|e| StorageError::SigningFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                bucket = %self.bucket,
                key = %key,
                "Supabase signed upload URL request failed"
            );
            return Err(StorageError::SigningFailed(format!(
                "createSignedUploadUrl failed: {} - {}",
                status, error_text
            )));
        }

        let signed: SignUploadUrlResponse = response
            .json()
            .await
            .map_err(|e| StorageError::SigningFailed(format!("Invalid signing response: {}", e)))?;

        let token = signed
            .url
            .split_once("?token=")
            .map(|(_, token)| token.to_string())
            .ok_or_else(|| {
                StorageError::SigningFailed("Signing response carried no token".to_string())
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            expires_in_secs = expires_in.as_secs(),
            "Issued signed upload URL"
        );

        Ok(UploadGrant::SignedToken {
            signed_url: format!("{}{}", self.storage_url(), signed.url),
            token,
        })
    }

    async fn fetch_object(
        &self,
        key: &str,
        bucket_override: Option<&str>,
    ) -> StorageResult<FetchedObject> {
        let bucket = bucket_override.unwrap_or(&self.bucket);
        let url = format!("{}/object/{}/{}", self.storage_url(), bucket, key);
        let start = std::time::Instant::now();

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.bearer())
            .send()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(key.to_string()));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                bucket = %bucket,
                key = %key,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Supabase download failed"
            );
            return Err(StorageError::DownloadFailed(format!(
                "download failed: {} - {}",
                status, error_text
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let data = response
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Supabase download successful"
        );

        Ok(FetchedObject { data, content_type })
    }
}
