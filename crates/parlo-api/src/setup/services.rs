//! Service initialization

use crate::state::AppState;
use anyhow::Result;
use parlo_core::Config;
use parlo_services::{
    OpenAiSpeechService, OpenAiTranslationService, TranscriptionPipeline, UploadAuthorizer,
};
use parlo_storage::Storage;
use std::sync::Arc;

/// Build the capability clients and the two request services.
pub fn initialize_services(config: &Config, storage: Arc<dyn Storage>) -> Result<Arc<AppState>> {
    let api_key = config
        .openai_api_key
        .clone()
        .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY must be set"))?;

    let speech = OpenAiSpeechService::new(
        config.openai_api_base.clone(),
        api_key.clone(),
        config.transcription_model.clone(),
        config.capability_timeout(),
    )?;

    let translator = OpenAiTranslationService::new(
        config.openai_api_base.clone(),
        api_key,
        config.translation_model.clone(),
        config.translation_target_language.clone(),
        config.capability_timeout(),
    )?;

    tracing::info!(
        transcription_model = %config.transcription_model,
        translation_model = %config.translation_model,
        target_language = %config.translation_target_language,
        capability_timeout_secs = config.capability_timeout_secs,
        "Capability clients initialized"
    );

    let provider = storage.provider();
    let authorizer = UploadAuthorizer::new(storage.clone(), config.upload_url_expiry());
    let pipeline =
        TranscriptionPipeline::new(storage, Arc::new(speech), Arc::new(translator));

    Ok(Arc::new(AppState {
        config: config.clone(),
        provider,
        authorizer,
        pipeline,
        is_production: config.is_production(),
    }))
}
