use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Storage provider families
///
/// Exactly one provider is active per request. Selection is driven by
/// configuration availability (see `parlo-storage::factory`), never by
/// client input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    /// S3-compatible object storage using access-key credentials.
    Primary,
    /// Supabase Storage using a service-role credential.
    Fallback,
}

impl FromStr for StorageProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "primary" => Ok(StorageProvider::Primary),
            "fallback" => Ok(StorageProvider::Fallback),
            _ => Err(anyhow::anyhow!("Invalid storage provider: {}", s)),
        }
    }
}

impl Display for StorageProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageProvider::Primary => write!(f, "primary"),
            StorageProvider::Fallback => write!(f, "fallback"),
        }
    }
}
