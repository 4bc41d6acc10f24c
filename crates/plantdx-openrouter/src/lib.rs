//! OpenRouter integration for PlantDx
//!
//! This crate provides the OpenRouter implementation of the VisionProvider trait.

mod client;
mod config;

#[cfg(test)]
mod tests;

pub use client::OpenRouterClient;
pub use config::{DEFAULT_API_URL, OpenRouterConfig};

// Re-export core types for convenience
pub use plantdx_core::{
    VisionProvider, CompletionConfig, CompletionResult, Error, Result,
};
