//! Environment configuration, read once at startup.
//!
//! `.env` files are honored (loaded in `main` via dotenvy). Lookups go
//! through a closure so defaults stay testable without mutating the process
//! environment.

use anyhow::{Context, Result};

pub const DEFAULT_MODEL: &str = "gpt-4o-2024-08-06";
pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Completion provider settings for the server side.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = get("OPENAI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .context("OPENAI_API_KEY is not set")?;
        let model = get("TASKDECK_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = get("OPENAI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_PROVIDER_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }
}

/// Client-side settings: where the taskdeck API lives.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    /// Resolve the API base URL: CLI flag, then `TASKDECK_API_URL`, then the
    /// default local server address.
    pub fn resolve(cli_override: Option<String>) -> Self {
        Self::resolve_with(cli_override, |key| std::env::var(key).ok())
    }

    fn resolve_with(
        cli_override: Option<String>,
        get: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let base_url = cli_override
            .or_else(|| get("TASKDECK_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self { base_url }
    }
}
