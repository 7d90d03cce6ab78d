pub mod authorizer;
pub mod pipeline;
pub mod speech;
pub mod translation;

use parlo_core::AppError;

/// Errors from external speech/translation capability calls.
#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("Capability call timed out: {0}")]
    Timeout(String),

    #[error("Capability call failed: {0}")]
    Api(String),

    #[error("Invalid capability response: {0}")]
    InvalidResponse(String),

    #[error("Capability configuration error: {0}")]
    Config(String),
}

impl From<CapabilityError> for AppError {
    fn from(err: CapabilityError) -> Self {
        match err {
            CapabilityError::Timeout(msg) => AppError::Timeout(msg),
            CapabilityError::Api(msg) => AppError::Provider(msg),
            CapabilityError::InvalidResponse(msg) => AppError::Provider(msg),
            CapabilityError::Config(msg) => AppError::Configuration(msg),
        }
    }
}

impl CapabilityError {
    /// Classify a transport error: elapsed deadlines get their own kind so
    /// they surface as 504s rather than generic provider failures.
    pub(crate) fn from_transport(operation: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CapabilityError::Timeout(format!("{} timed out: {}", operation, err))
        } else {
            CapabilityError::Api(format!("{} failed: {}", operation, err))
        }
    }
}
