//! Provider selection and construction.
//!
//! Selection is a pure function of the configuration snapshot: primary (S3)
//! wins when its required configuration is present, Supabase Storage is the
//! fallback, and neither being configured is an error. Both endpoints run
//! this same policy, which is what makes the upload and retrieval sides of
//! the protocol agree on a provider.

use crate::{S3Storage, Storage, StorageError, StorageResult, SupabaseStorage};
use parlo_core::{Config, StorageProvider};
use std::sync::Arc;

/// Decide which provider a configuration snapshot resolves to.
///
/// Deterministic: two calls with an identical snapshot always agree. An
/// object uploaded under one provider is only retrievable while the
/// configuration still resolves to that provider.
pub fn select_provider(config: &Config) -> StorageResult<StorageProvider> {
    if config.has_primary_storage() {
        Ok(StorageProvider::Primary)
    } else if config.has_fallback_storage() {
        Ok(StorageProvider::Fallback)
    } else {
        Err(StorageError::ConfigError(
            "No storage provider configured: set S3_BUCKET and S3_REGION/AWS_REGION, \
             or SUPABASE_URL, SUPABASE_SERVICE_ROLE_KEY and SUPABASE_BUCKET"
                .to_string(),
        ))
    }
}

/// Create the storage backend the configuration resolves to.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match select_provider(config)? {
        StorageProvider::Primary => {
            let bucket = config
                .s3_bucket
                .clone()
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let region = config.resolved_region().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;

            let storage = S3Storage::new(bucket, region, config.s3_endpoint.clone()).await?;
            Ok(Arc::new(storage))
        }
        StorageProvider::Fallback => {
            let url = config.supabase_url.clone().ok_or_else(|| {
                StorageError::ConfigError("SUPABASE_URL not configured".to_string())
            })?;
            let service_role_key = config.supabase_service_role_key.clone().ok_or_else(|| {
                StorageError::ConfigError("SUPABASE_SERVICE_ROLE_KEY not configured".to_string())
            })?;
            let bucket = config.supabase_bucket.clone().ok_or_else(|| {
                StorageError::ConfigError("SUPABASE_BUCKET not configured".to_string())
            })?;

            let storage =
                SupabaseStorage::new(url, service_role_key, bucket, config.capability_timeout())?;
            Ok(Arc::new(storage))
        }
    }
}
