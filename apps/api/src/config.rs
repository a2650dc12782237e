use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_AI_MATCH_URL: &str = "http://127.0.0.1:5000";

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a numeric one does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres document store. `None` runs the service on the in-memory store.
    pub database_url: Option<String>,
    /// Enables the AI match cache when set.
    pub redis_url: Option<String>,
    pub s3_bucket: String,
    pub s3_region: String,
    /// Custom endpoint (MinIO). AWS virtual-host addressing is used when absent.
    pub s3_endpoint: Option<String>,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub ai_match_url: String,
    pub ai_match_timeout: Duration,
    pub ai_match_max_attempts: u32,
    pub match_cache_ttl: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            redis_url: optional_env("REDIS_URL"),
            s3_bucket: require_env("AWS_S3_BUCKET_NAME")?,
            s3_region: require_env("AWS_S3_REGION")?,
            s3_endpoint: optional_env("S3_ENDPOINT"),
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            ai_match_url: optional_env("AI_MATCH_URL")
                .unwrap_or_else(|| DEFAULT_AI_MATCH_URL.to_string()),
            ai_match_timeout: Duration::from_secs(parse_env("AI_MATCH_TIMEOUT_SECS", 30)?),
            ai_match_max_attempts: parse_env("AI_MATCH_MAX_ATTEMPTS", 3)?,
            match_cache_ttl: Duration::from_secs(parse_env("MATCH_CACHE_TTL_SECS", 60)?),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
