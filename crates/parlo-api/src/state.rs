//! Application state.
//!
//! One small state object shared across handlers via `Arc`. The storage
//! backend, speech client, and translation client live inside the two
//! services; nothing else is shared between requests.

use parlo_core::{Config, StorageProvider};
use parlo_services::{TranscriptionPipeline, UploadAuthorizer};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Provider the configuration snapshot resolved to at startup.
    pub provider: StorageProvider,
    pub authorizer: UploadAuthorizer,
    pub pipeline: TranscriptionPipeline,
    pub is_production: bool,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
