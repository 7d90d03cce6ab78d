use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use parlo_core::models::{ProcessRequest, TranscriptResult};
use parlo_core::AppError;
use std::sync::Arc;
use validator::Validate;

/// Transcribe and translate a stored object
///
/// Retrieves the object from the active provider, transcribes it, and
/// translates the transcript into the configured target language. The
/// provider is re-derived from configuration, so the object must have been
/// uploaded under the provider the configuration currently resolves to.
#[utoipa::path(
    post,
    path = "/api/v0/transcriptions",
    tag = "transcriptions",
    request_body = ProcessRequest,
    responses(
        (status = 200, description = "Transcript and translation", body = TranscriptResult),
        (status = 400, description = "Missing key", body = ErrorResponse),
        (status = 404, description = "Object not found under the active provider", body = ErrorResponse),
        (status = 500, description = "Provider or capability failure, or empty transcript", body = ErrorResponse),
        (status = 504, description = "Capability call exceeded its deadline", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(
        provider = %state.provider,
        key = %request.key,
        operation = "process_transcription"
    )
)]
pub async fn process_transcription(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ProcessRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let result = state
        .pipeline
        .process(&request.key, request.bucket.as_deref())
        .await?;

    Ok(Json(result))
}
