//! Parlo Services Library
//!
//! Capability clients (speech-to-text, translation) and the two request
//! services built on them: the upload authorizer and the
//! transcription-translation pipeline.

pub mod services;

pub use services::authorizer::UploadAuthorizer;
pub use services::pipeline::TranscriptionPipeline;
pub use services::speech::{OpenAiSpeechService, SpeechToText};
pub use services::translation::{OpenAiTranslationService, Translator};
pub use services::CapabilityError;
