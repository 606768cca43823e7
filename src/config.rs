//! Environment-backed configuration.
//!
//! All values come from the process environment, with a `.env` file
//! honored when present. Gateway and provider credentials are optional;
//! the service degrades to mock/disabled paths when they are missing.

use std::env;

use crate::server::DEFAULT_PORT;

/// Runtime configuration loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Africa's Talking account username.
    pub at_username: Option<String>,
    /// Africa's Talking API key.
    pub at_api_key: Option<String>,
    /// OpenAI API key for the recommendation proxy.
    pub openai_api_key: Option<String>,
    /// Allowed CORS origins. `*` means permissive.
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Loads configuration from the environment (and `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            at_username: non_empty_var("AT_USERNAME"),
            at_api_key: non_empty_var("AT_API_KEY"),
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            allowed_origins: parse_origins(env::var("ALLOWED_ORIGINS").ok().as_deref()),
        }
    }
}

/// Reads an environment variable, treating empty/whitespace values as unset.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parses a comma-separated origin list, defaulting to permissive.
fn parse_origins(raw: Option<&str>) -> Vec<String> {
    let origins: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect();

    if origins.is_empty() {
        vec!["*".to_string()]
    } else {
        origins
    }
}
