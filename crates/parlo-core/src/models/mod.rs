//! Data models for the application
//!
//! Request/response models for the two public operations, organized by
//! domain: upload authorization and transcription.

pub mod transcript;
pub mod upload;

// Re-export all models for convenient imports
pub use transcript::{MediaArtifact, ProcessRequest, TranscriptResult};
pub use upload::{AuthorizeUploadRequest, UploadAuthorization};
