//! OpenRouter configuration

use serde::{Deserialize, Serialize};
use std::env;
use plantdx_core::{DEFAULT_MODEL, Error, Result};

/// Default OpenRouter API base URL
pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1";

/// Configuration for the OpenRouter client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRouterConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    /// Sent as `HTTP-Referer` so the request is attributed to the app
    pub app_url: String,
    /// Sent as `X-Title`
    pub app_title: String,
}

impl OpenRouterConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Configuration(
                "OPENROUTER_API_KEY environment variable not found".to_string()
            ))?;

        let defaults = Self::new(api_key);

        Ok(Self {
            api_url: env::var("OPENROUTER_API_URL").unwrap_or(defaults.api_url),
            model: env::var("OPENROUTER_MODEL").unwrap_or(defaults.model),
            app_url: env::var("PLANTDX_APP_URL").unwrap_or(defaults.app_url),
            app_title: env::var("PLANTDX_APP_TITLE").unwrap_or(defaults.app_title),
            api_key: defaults.api_key,
        })
    }

    /// Create configuration with explicit values
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            app_url: "http://localhost".to_string(),
            app_title: "Smart Agriculture App".to_string(),
        }
    }

    /// Chat completion endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_url.trim_end_matches('/'))
    }
}
