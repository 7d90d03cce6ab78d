//! Configuration module
//!
//! This module provides the application configuration: server settings,
//! storage provider credentials, and speech/translation capability settings.
//! Everything is read from the environment (with `.env` support) at startup;
//! the resulting snapshot is immutable for the process lifetime.

use std::env;
use std::time::Duration;

// Named defaults
const SERVER_PORT: u16 = 3000;
const UPLOAD_URL_EXPIRY_SECS: u64 = 300;
const CAPABILITY_TIMEOUT_SECS: u64 = 120;
const MAX_PROCESS_BODY_BYTES: usize = 64 * 1024;
const TRANSCRIPTION_MODEL: &str = "whisper-1";
const TRANSLATION_MODEL: &str = "gpt-4o-mini";
const TRANSLATION_TARGET_LANGUAGE: &str = "French";
const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub max_body_bytes: usize,
    /// Lifetime of issued upload credentials.
    pub upload_url_expiry_secs: u64,

    // Primary storage (S3-compatible)
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub aws_region: Option<String>,
    pub s3_endpoint: Option<String>,
    // The access key pair is optional: the AWS credential chain also resolves
    // credentials from instance profiles and shared config.
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,

    // Fallback storage (Supabase Storage)
    pub supabase_url: Option<String>,
    pub supabase_service_role_key: Option<String>,
    pub supabase_bucket: Option<String>,

    // Speech / translation capabilities
    pub openai_api_key: Option<String>,
    pub openai_api_base: String,
    pub transcription_model: String,
    pub translation_model: String,
    pub translation_target_language: String,
    pub capability_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse::<u16>()
                .unwrap_or(SERVER_PORT),
            environment,
            cors_origins,
            max_body_bytes: env::var("MAX_PROCESS_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(MAX_PROCESS_BODY_BYTES),
            upload_url_expiry_secs: env::var("UPLOAD_URL_EXPIRY_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(UPLOAD_URL_EXPIRY_SECS),
            s3_bucket: env_opt("S3_BUCKET").or_else(|| env_opt("AWS_S3_BUCKET")),
            s3_region: env_opt("S3_REGION"),
            aws_region: env_opt("AWS_REGION").or_else(|| env_opt("AWS_DEFAULT_REGION")),
            s3_endpoint: env_opt("S3_ENDPOINT"),
            aws_access_key_id: env_opt("AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: env_opt("AWS_SECRET_ACCESS_KEY"),
            supabase_url: env_opt("SUPABASE_URL"),
            supabase_service_role_key: env_opt("SUPABASE_SERVICE_ROLE_KEY"),
            supabase_bucket: env_opt("SUPABASE_BUCKET"),
            openai_api_key: env_opt("OPENAI_API_KEY"),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| OPENAI_API_BASE.to_string()),
            transcription_model: env::var("TRANSCRIPTION_MODEL")
                .unwrap_or_else(|_| TRANSCRIPTION_MODEL.to_string()),
            translation_model: env::var("TRANSLATION_MODEL")
                .unwrap_or_else(|_| TRANSLATION_MODEL.to_string()),
            translation_target_language: env::var("TRANSLATION_TARGET_LANGUAGE")
                .unwrap_or_else(|_| TRANSLATION_TARGET_LANGUAGE.to_string()),
            capability_timeout_secs: env::var("CAPABILITY_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(CAPABILITY_TIMEOUT_SECS),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Region used for the primary provider: `S3_REGION` wins over `AWS_REGION`.
    pub fn resolved_region(&self) -> Option<&str> {
        self.s3_region.as_deref().or(self.aws_region.as_deref())
    }

    pub fn upload_url_expiry(&self) -> Duration {
        Duration::from_secs(self.upload_url_expiry_secs)
    }

    pub fn capability_timeout(&self) -> Duration {
        Duration::from_secs(self.capability_timeout_secs)
    }

    /// True when the primary provider (S3) has its required configuration.
    pub fn has_primary_storage(&self) -> bool {
        self.s3_bucket.is_some() && self.resolved_region().is_some()
    }

    /// True when the fallback provider (Supabase Storage) has its required configuration.
    pub fn has_fallback_storage(&self) -> bool {
        self.supabase_url.is_some()
            && self.supabase_service_role_key.is_some()
            && self.supabase_bucket.is_some()
    }
}

impl Default for Config {
    /// Defaults mirror `from_env` with no environment set: no provider and no
    /// capability configured. Used by tests to build configuration snapshots.
    fn default() -> Self {
        Config {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            max_body_bytes: MAX_PROCESS_BODY_BYTES,
            upload_url_expiry_secs: UPLOAD_URL_EXPIRY_SECS,
            s3_bucket: None,
            s3_region: None,
            aws_region: None,
            s3_endpoint: None,
            aws_access_key_id: None,
            aws_secret_access_key: None,
            supabase_url: None,
            supabase_service_role_key: None,
            supabase_bucket: None,
            openai_api_key: None,
            openai_api_base: OPENAI_API_BASE.to_string(),
            transcription_model: TRANSCRIPTION_MODEL.to_string(),
            translation_model: TRANSLATION_MODEL.to_string(),
            translation_target_language: TRANSLATION_TARGET_LANGUAGE.to_string(),
            capability_timeout_secs: CAPABILITY_TIMEOUT_SECS,
        }
    }
}

/// Read an env var, treating empty values as absent.
fn env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
