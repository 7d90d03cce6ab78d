//! Upload authorization service.
//!
//! Derives the object key, asks the active storage backend for a
//! time-limited upload grant, and returns the provider-tagged authorization.
//! Issues a credential only; no object is written here.

use chrono::Utc;
use parlo_core::models::UploadAuthorization;
use parlo_core::AppError;
use parlo_storage::{keys, Storage, UploadGrant};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct UploadAuthorizer {
    storage: Arc<dyn Storage>,
    expires_in: Duration,
}

impl UploadAuthorizer {
    pub fn new(storage: Arc<dyn Storage>, expires_in: Duration) -> Self {
        Self { storage, expires_in }
    }

    /// Authorize one direct upload of `file_name` with `content_type`.
    ///
    /// Signing failures surface as provider errors and are never retried
    /// here: issuance is idempotent and cheap, so the client simply
    /// re-requests.
    #[tracing::instrument(skip(self), fields(provider = %self.storage.provider()))]
    pub async fn authorize(
        &self,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadAuthorization, AppError> {
        let file_name = file_name.trim();
        let content_type = content_type.trim();
        if file_name.is_empty() || content_type.is_empty() {
            return Err(AppError::Validation(
                "Required fields: fileName, contentType".to_string(),
            ));
        }

        let key = keys::object_key(Utc::now(), file_name);
        let bucket = self.storage.default_bucket().to_string();

        let grant = self
            .storage
            .issue_upload_grant(&key, content_type, self.expires_in)
            .await?;

        tracing::info!(
            key = %key,
            bucket = %bucket,
            expires_in_secs = self.expires_in.as_secs(),
            "Issued upload authorization"
        );

        Ok(match grant {
            UploadGrant::PresignedPut { url, region } => UploadAuthorization::Primary {
                key,
                bucket,
                url,
                region,
            },
            UploadGrant::SignedToken { signed_url, token } => UploadAuthorization::Fallback {
                key,
                bucket,
                signed_url,
                token,
            },
        })
    }
}
