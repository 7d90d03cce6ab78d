//! Parlo Storage Library
//!
//! Storage abstraction and provider implementations. The `Storage` trait
//! exposes the two operations the rest of the system needs: issuing a
//! time-limited upload grant for a key, and fetching an object back. The
//! factory selects the concrete provider from configuration; downstream code
//! depends only on the trait.
//!
//! # Object key format
//!
//! Keys are `YYYY/MM/DD/<suffix>-<sanitized-filename>`: a zero-padded UTC
//! date prefix, an 8-character `[a-z0-9]` suffix, and a sanitized filename
//! (`[a-zA-Z0-9._-]` only). Key generation is centralized in the `keys`
//! module so both providers and both endpoints stay consistent.

pub mod factory;
pub mod keys;
pub mod s3;
pub mod supabase;
pub mod traits;

// Re-export commonly used types
pub use factory::{create_storage, select_provider};
pub use keys::{object_key, sanitize_file_name};
pub use parlo_core::StorageProvider;
pub use s3::S3Storage;
pub use supabase::SupabaseStorage;
pub use traits::{FetchedObject, Storage, StorageError, StorageResult, UploadGrant};
