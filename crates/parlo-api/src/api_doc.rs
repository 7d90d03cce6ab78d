//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use parlo_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Parlo API",
        version = "0.1.0",
        description = "Direct-to-storage upload authorization and a transcription + translation \
pipeline over stored media. Uploads go straight to the storage provider with a short-lived \
credential; this service never proxies file bytes."
    ),
    paths(
        handlers::authorize_upload::authorize_upload,
        handlers::process::process_transcription,
        handlers::health::health_check,
    ),
    components(schemas(
        models::upload::AuthorizeUploadRequest,
        models::upload::UploadAuthorization,
        models::transcript::ProcessRequest,
        models::transcript::TranscriptResult,
        error::ErrorResponse,
    )),
    tags(
        (name = "uploads", description = "Upload authorization"),
        (name = "transcriptions", description = "Transcription and translation"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;

pub fn openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
