use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Generic artifact name when the object key carries no path segment.
pub const DEFAULT_ARTIFACT_NAME: &str = "media";
/// Generic media type when storage reports none.
pub const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// Request to transcribe and translate a stored object
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    /// Object key returned by the authorize step
    #[validate(length(min = 1, max = 1024, message = "key is required"))]
    pub key: String,
    /// Optional bucket override; defaults to the provider's configured bucket
    #[serde(default)]
    pub bucket: Option<String>,
}

/// Transcript and translation for one pipeline invocation.
/// Ephemeral: returned directly to the caller, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TranscriptResult {
    pub transcript: String,
    pub translation: String,
}

/// A named file handed to the speech-to-text capability.
#[derive(Debug, Clone)]
pub struct MediaArtifact {
    pub file_name: String,
    pub media_type: String,
    pub data: Vec<u8>,
}

impl MediaArtifact {
    /// Wrap retrieved bytes as a named artifact. The name is the last path
    /// segment of the key, and the media type is whatever storage reported;
    /// both fall back to generic values.
    pub fn from_object(key: &str, content_type: Option<String>, data: Vec<u8>) -> Self {
        let file_name = key
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or(DEFAULT_ARTIFACT_NAME)
            .to_string();
        let media_type = content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string());
        MediaArtifact {
            file_name,
            media_type,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_name_is_last_key_segment() {
        let artifact =
            MediaArtifact::from_object("2024/05/01/ab12cd34-clip.mp4", None, vec![1, 2, 3]);
        assert_eq!(artifact.file_name, "ab12cd34-clip.mp4");
    }

    #[test]
    fn test_artifact_name_falls_back_without_separator() {
        let artifact = MediaArtifact::from_object("", None, vec![]);
        assert_eq!(artifact.file_name, DEFAULT_ARTIFACT_NAME);
    }

    #[test]
    fn test_media_type_defaults_to_binary() {
        let artifact = MediaArtifact::from_object("clip.mp4", None, vec![]);
        assert_eq!(artifact.media_type, DEFAULT_MEDIA_TYPE);

        let artifact = MediaArtifact::from_object("clip.mp4", Some("  ".to_string()), vec![]);
        assert_eq!(artifact.media_type, DEFAULT_MEDIA_TYPE);
    }

    #[test]
    fn test_media_type_uses_storage_report() {
        let artifact = MediaArtifact::from_object("clip.mp4", Some("video/mp4".to_string()), vec![]);
        assert_eq!(artifact.media_type, "video/mp4");
    }

    #[test]
    fn test_process_request_rejects_empty_key() {
        let request = ProcessRequest {
            key: "".to_string(),
            bucket: None,
        };
        assert!(request.validate().is_err());
    }
}
