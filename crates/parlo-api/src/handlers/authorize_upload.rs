use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use parlo_core::models::{AuthorizeUploadRequest, UploadAuthorization};
use parlo_core::AppError;
use std::sync::Arc;
use validator::Validate;

/// Authorize a direct-to-storage upload
///
/// Returns a time-limited credential bound to a freshly derived object key.
/// The `provider` tag tells the client which upload protocol to follow:
/// `primary` expects an HTTP PUT of the raw bytes with a matching
/// `Content-Type` header; `fallback` expects a multipart form POST to the
/// signed URL with the token as a bearer credential.
#[utoipa::path(
    post,
    path = "/api/v0/uploads/authorize",
    tag = "uploads",
    request_body = AuthorizeUploadRequest,
    responses(
        (status = 200, description = "Upload authorization issued", body = UploadAuthorization),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "No provider configured or signing failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(
        provider = %state.provider,
        content_type = %request.content_type,
        operation = "authorize_upload"
    )
)]
pub async fn authorize_upload(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<AuthorizeUploadRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let authorization = state
        .authorizer
        .authorize(&request.file_name, &request.content_type)
        .await?;

    tracing::info!(
        key = %authorization.key(),
        bucket = %authorization.bucket(),
        "Upload authorized"
    );

    Ok(Json(authorization))
}
