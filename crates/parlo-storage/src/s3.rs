use crate::traits::{FetchedObject, Storage, StorageError, StorageResult, UploadGrant};
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::retry::{RetryConfig, RetryMode};
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use parlo_core::StorageProvider;
use std::time::Duration;

/// S3 storage implementation (primary provider)
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
    region: String,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    ///
    /// Credentials come from the default AWS chain: an explicit access-key
    /// pair in the environment when present, otherwise shared config or an
    /// instance profile.
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        let region_provider =
            RegionProviderChain::first_try(aws_config::Region::new(region.clone()));

        let retry_config = RetryConfig::standard()
            .with_max_attempts(1)
            .with_retry_mode(RetryMode::Standard);

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .retry_config(retry_config.clone())
            .load()
            .await;

        // Custom endpoints need path-style addressing (MinIO and friends).
        let client = if let Some(ref endpoint) = endpoint_url {
            let mut s3_config_builder = aws_sdk_s3::Config::builder()
                .endpoint_url(endpoint)
                .region(config.region().cloned())
                .retry_config(retry_config);
            if let Some(provider) = config.credentials_provider().into_iter().next() {
                s3_config_builder = s3_config_builder.credentials_provider(provider);
            }
            s3_config_builder = s3_config_builder.force_path_style(true);

            Client::from_conf(s3_config_builder.build())
        } else {
            Client::new(&config)
        };

        Ok(S3Storage {
            client,
            bucket,
            region,
        })
    }
}

#[async_trait]
impl Storage for S3Storage {
    fn provider(&self) -> StorageProvider {
        StorageProvider::Primary
    }

    fn default_bucket(&self) -> &str {
        &self.bucket
    }

    async fn issue_upload_grant(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<UploadGrant> {
        let presigning_config = PresigningConfig::builder()
            .expires_in(expires_in)
            .build()
            .map_err(|e| StorageError::SigningFailed(e.to_string()))?;

        // Content type is part of the signature: a PUT with a different
        // Content-Type header is rejected by S3, not by this service.
        let presigned_request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning_config)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    "S3 presign failed"
                );
                StorageError::SigningFailed(e.to_string())
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            expires_in_secs = expires_in.as_secs(),
            "Issued presigned PUT URL"
        );

        Ok(UploadGrant::PresignedPut {
            url: presigned_request.uri().to_string(),
            region: self.region.clone(),
        })
    }

    async fn fetch_object(
        &self,
        key: &str,
        bucket_override: Option<&str>,
    ) -> StorageResult<FetchedObject> {
        let bucket = bucket_override.unwrap_or(&self.bucket);
        let start = std::time::Instant::now();

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| match &e {
                SdkError::ServiceError(service_err) => match service_err.err() {
                    GetObjectError::NoSuchKey(_) => StorageError::NotFound(key.to_string()),
                    _ => {
                        tracing::error!(
                            error = %e,
                            bucket = %bucket,
                            key = %key,
                            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                            "S3 download failed"
                        );
                        StorageError::DownloadFailed(e.to_string())
                    }
                },
                _ => {
                    tracing::error!(
                        error = %e,
                        bucket = %bucket,
                        key = %key,
                        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                        "S3 download failed"
                    );
                    StorageError::DownloadFailed(e.to_string())
                }
            })?;

        let content_type = response.content_type().map(String::from);

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?
            .into_bytes();

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 download successful"
        );

        Ok(FetchedObject { data, content_type })
    }
}
