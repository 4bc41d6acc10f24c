//! Core traits and types for PlantDx
//!
//! This crate defines the diagnosis record, the normalizer that builds it from
//! raw model replies, the canned fallback records, image input encoding and
//! the provider-facing trait used to reach a multimodal model.

pub mod diagnosis;
pub mod error;
mod fallback;
pub mod image;
pub mod normalizer;
pub mod prompt;
pub mod vision;


pub use diagnosis::{
    DEFAULT_ANALYSIS_ERROR_MESSAGE, DEFAULT_NOT_PLANT_MESSAGE, DetailedTreatment,
    DiagnosisResult, DiagnosisStatus, Fertilizer, FertilizerKind, NutritionSuggestion,
};
pub use error::{Error, Result};
pub use image::ImageInput;
pub use normalizer::{NON_PLANT_INDICATORS, ResponseNormalizer, normalize, strip_code_fences};
pub use prompt::DIAGNOSIS_PROMPT;
pub use vision::{CompletionConfig, CompletionResult, DEFAULT_MODEL, VisionProvider};
