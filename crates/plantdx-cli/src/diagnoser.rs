//! Diagnoser that sends plant images to a vision model and normalizes the reply

use std::path::Path;
use tracing::{info, warn};

use plantdx_core::{
    CompletionConfig, DIAGNOSIS_PROMPT, DiagnosisResult, ImageInput, ResponseNormalizer,
    VisionProvider,
};

/// Runs one analysis per call. Never fails: every failure mode maps to a
/// displayable record.
pub struct Diagnoser<P: VisionProvider> {
    provider: P,
    normalizer: ResponseNormalizer,
}

impl<P: VisionProvider> Diagnoser<P> {
    /// Create a new diagnoser
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            normalizer: ResponseNormalizer::default(),
        }
    }

    /// Use a custom normalizer, e.g. with an extended non-plant phrase list
    pub fn with_normalizer(mut self, normalizer: ResponseNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Diagnose an image already in memory.
    ///
    /// Transport failures yield [`DiagnosisResult::transport_fallback`];
    /// replies go through the normalizer.
    pub async fn diagnose(&self, image: &ImageInput) -> DiagnosisResult {
        let config = CompletionConfig {
            model_id: self.provider.model_id().to_string(),
            ..Default::default()
        };

        match self.provider.complete(DIAGNOSIS_PROMPT, image, &config).await {
            Ok(reply) => {
                info!(
                    image = %image.label,
                    model = %reply.model_id,
                    tokens = ?reply.tokens_used,
                    "received diagnosis reply"
                );
                self.normalizer.normalize(&reply.text)
            }
            Err(e) => {
                warn!(image = %image.label, error = %e, "diagnosis request failed, using fallback");
                DiagnosisResult::transport_fallback()
            }
        }
    }

    /// Load an image from disk and diagnose it. Images that cannot be read
    /// yield the analysis error record without contacting the provider.
    pub async fn diagnose_path(&self, path: impl AsRef<Path>) -> DiagnosisResult {
        match ImageInput::from_path(path.as_ref()) {
            Ok(image) => self.diagnose(&image).await,
            Err(e) => {
                warn!(path = %path.as_ref().display(), error = %e, "could not load image");
                DiagnosisResult::analysis_error(None)
            }
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Get the provider's model ID
    pub fn model_id(&self) -> &str {
        self.provider.model_id()
    }
}
