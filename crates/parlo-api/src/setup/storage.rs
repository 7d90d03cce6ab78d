//! Storage setup and initialization

use anyhow::Result;
use parlo_core::Config;
use parlo_storage::{create_storage, Storage};
use std::sync::Arc;

/// Build the storage backend the configuration resolves to.
///
/// Selection happens once per process; the configuration snapshot is
/// immutable, so both endpoints see the same provider for the process
/// lifetime.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(config).await?;
    tracing::info!(
        provider = %storage.provider(),
        bucket = %storage.default_bucket(),
        "Storage abstraction initialized successfully"
    );
    Ok(storage)
}
