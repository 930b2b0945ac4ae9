use anyhow::{Context, Result};

const DEFAULT_COMPLETION_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_COMPLETION_MODEL: &str = "meta-llama/llama-4-maverick:free";
const DEFAULT_CONTENT_API_URL: &str = "http://localhost:1337";
const DEFAULT_PLACEHOLDER_LOGO_URL: &str = "https://placehold.co/64x64/0047AB/FFFFFF.png?text=G";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub completion_api_key: String,
    pub completion_base_url: String,
    pub completion_model: String,
    pub content_api_url: String,
    pub placeholder_logo_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Config {
            completion_api_key: lookup("OPENROUTER_API_KEY")
                .filter(|v| !v.trim().is_empty())
                .context("Required environment variable 'OPENROUTER_API_KEY' is not set")?,
            completion_base_url: trim_base_url(&optional(
                "OPENROUTER_BASE_URL",
                DEFAULT_COMPLETION_BASE_URL,
            )),
            completion_model: optional("COMPLETION_MODEL", DEFAULT_COMPLETION_MODEL),
            content_api_url: trim_base_url(&optional("CONTENT_API_URL", DEFAULT_CONTENT_API_URL)),
            placeholder_logo_url: optional("PLACEHOLDER_LOGO_URL", DEFAULT_PLACEHOLDER_LOGO_URL),
            port: optional("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG", "info"),
        })
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
