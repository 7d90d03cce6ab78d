//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use parlo_core::Config;
use parlo_storage::select_provider;

/// Validate critical configuration values
///
/// Fails fast on configuration that would otherwise surface as a 500 on the
/// first request: no usable storage provider, missing capability credential,
/// or a zero expiry/deadline.
pub fn validate_config(config: &Config) -> Result<()> {
    // Validate CORS configuration in production
    if config.is_production() && config.cors_origins.contains(&"*".to_string()) {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production - this is a security risk. \
            Please set specific allowed origins via CORS_ORIGINS environment variable."
        ));
    }

    // Exactly the provider-selection policy both endpoints run; failing here
    // means neither provider has its required configuration.
    let provider = select_provider(config)?;
    tracing::info!(provider = %provider, "Storage provider resolved");

    // The pipeline cannot run without the speech/translation credential.
    if config.openai_api_key.is_none() {
        return Err(anyhow::anyhow!(
            "OPENAI_API_KEY must be set for transcription and translation"
        ));
    }

    if config.upload_url_expiry_secs == 0 {
        return Err(anyhow::anyhow!("UPLOAD_URL_EXPIRY_SECS cannot be 0"));
    }

    if config.capability_timeout_secs == 0 {
        return Err(anyhow::anyhow!("CAPABILITY_TIMEOUT_SECS cannot be 0"));
    }

    Ok(())
}
