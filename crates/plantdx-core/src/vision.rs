//! Vision provider trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{ImageInput, Result};

/// Default multimodal model used for diagnosis
pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-001";

/// Configuration for a single completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    pub model_id: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL.to_string(),
            max_tokens: 2048,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Raw reply of a completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResult {
    pub text: String,
    pub model_id: String,
    pub tokens_used: Option<u32>,
}

/// Trait for multimodal model providers (e.g., OpenRouter)
///
/// A provider only moves bytes: it returns the model's reply text untouched
/// and reports every transport problem as an error. Interpreting the reply
/// is the normalizer's job.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Send a prompt and one image, returning the reply text
    async fn complete(
        &self,
        prompt: &str,
        image: &ImageInput,
        config: &CompletionConfig,
    ) -> Result<CompletionResult>;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}
