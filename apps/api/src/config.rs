use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_BASE_URL;

const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_PATH: &str = "call_analysis.csv";

/// Settings for the outbound completion API.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

/// Application configuration loaded from environment variables.
/// Built once at startup; fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub upstream: UpstreamConfig,
    pub log_path: PathBuf,
    pub strict_sentiment: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            upstream: UpstreamConfig {
                api_key: lookup("GROQ_API_KEY")
                    .filter(|k| !k.trim().is_empty())
                    .context("Required environment variable 'GROQ_API_KEY' is not set")?,
                model: lookup("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: lookup("GROQ_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            log_path: lookup("CALL_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH)),
            strict_sentiment: match lookup("STRICT_SENTIMENT") {
                Some(v) => parse_flag(&v).context("STRICT_SENTIMENT must be true or false")?,
                None => false,
            },
            port: lookup("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("unrecognised flag value '{other}'"),
    }
}
