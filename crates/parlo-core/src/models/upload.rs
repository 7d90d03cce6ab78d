use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::storage_types::StorageProvider;

/// Request to authorize a direct-to-storage upload
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeUploadRequest {
    /// Original filename
    #[validate(length(
        min = 1,
        max = 255,
        message = "fileName must be between 1 and 255 characters"
    ))]
    pub file_name: String,
    /// Content type (MIME type) the client will send with the upload
    #[validate(length(
        min = 1,
        max = 255,
        message = "contentType must be between 1 and 255 characters"
    ))]
    pub content_type: String,
}

/// A time-limited authorization to write one object directly to storage.
///
/// The variant tag tells the client which upload protocol to follow: an HTTP
/// PUT of the raw bytes for `Primary`, a multipart form POST with a bearer
/// token for `Fallback`. Single use is not enforced; the signed URL/token is
/// the only access control.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum UploadAuthorization {
    #[serde(rename_all = "camelCase")]
    Primary {
        /// Object key the credential is bound to
        key: String,
        /// Bucket the credential is bound to
        bucket: String,
        /// Pre-signed PUT URL; the client must send a matching Content-Type header
        url: String,
        /// Region of the bucket
        region: String,
    },
    #[serde(rename_all = "camelCase")]
    Fallback {
        key: String,
        bucket: String,
        /// Signed upload endpoint for a multipart form POST
        signed_url: String,
        /// One-time bearer token paired with the signed URL
        token: String,
    },
}

impl UploadAuthorization {
    pub fn provider(&self) -> StorageProvider {
        match self {
            UploadAuthorization::Primary { .. } => StorageProvider::Primary,
            UploadAuthorization::Fallback { .. } => StorageProvider::Fallback,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            UploadAuthorization::Primary { key, .. } => key,
            UploadAuthorization::Fallback { key, .. } => key,
        }
    }

    pub fn bucket(&self) -> &str {
        match self {
            UploadAuthorization::Primary { bucket, .. } => bucket,
            UploadAuthorization::Fallback { bucket, .. } => bucket,
        }
    }
}
