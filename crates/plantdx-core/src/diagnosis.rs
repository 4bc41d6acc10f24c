//! Diagnosis result model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message used whenever the subject is judged not to be a plant
pub const DEFAULT_NOT_PLANT_MESSAGE: &str = "This image does not appear to contain a plant, crop, vegetable, fruit, or seed. Please upload an image of a plant for disease diagnosis.";

/// Message used when the analysis could not be attempted at all
pub const DEFAULT_ANALYSIS_ERROR_MESSAGE: &str =
    "Failed to analyze the image. Please try again or check your internet connection.";

/// Outcome class of a single diagnosis attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisStatus {
    Healthy,
    Diseased,
    NotPlant,
    Error,
    #[default]
    Unknown,
}

impl DiagnosisStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosisStatus::Healthy => "healthy",
            DiagnosisStatus::Diseased => "diseased",
            DiagnosisStatus::NotPlant => "not_plant",
            DiagnosisStatus::Error => "error",
            DiagnosisStatus::Unknown => "unknown",
        }
    }

    /// Map the status of a plant analysis reported by the model. Only the two
    /// analysis outcomes are accepted here; anything else is `Unknown`.
    /// A `not_plant` status never reaches this point, the normalizer turns it
    /// into a not-plant record first.
    pub fn from_model(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "healthy" => DiagnosisStatus::Healthy,
            "diseased" => DiagnosisStatus::Diseased,
            _ => DiagnosisStatus::Unknown,
        }
    }
}

impl fmt::Display for DiagnosisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Organic or chemical fertilizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FertilizerKind {
    #[default]
    Organic,
    Chemical,
}

impl FertilizerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FertilizerKind::Organic => "organic",
            FertilizerKind::Chemical => "chemical",
        }
    }

    /// Models answer with free text such as "Chemical" or "synthetic NPK".
    pub fn from_model(value: &str) -> Self {
        let lower = value.to_lowercase();
        if ["chemical", "synthetic", "inorganic"]
            .iter()
            .any(|marker| lower.contains(marker))
        {
            FertilizerKind::Chemical
        } else {
            FertilizerKind::Organic
        }
    }
}

impl fmt::Display for FertilizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Treatment plan split by approach
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedTreatment {
    pub organic_solutions: Vec<String>,
    pub chemical_solutions: Vec<String>,
    pub step_by_step_cure: Vec<String>,
}

impl DetailedTreatment {
    pub fn is_empty(&self) -> bool {
        self.organic_solutions.is_empty()
            && self.chemical_solutions.is_empty()
            && self.step_by_step_cure.is_empty()
    }
}

/// A recommended fertilizer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fertilizer {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FertilizerKind,
    pub application: String,
    pub timing: String,
}

/// A nutrient the plant may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionSuggestion {
    pub nutrient: String,
    pub deficiency_sign: String,
    pub sources: Vec<String>,
}

/// Normalized, fully populated description of one diagnosis attempt.
///
/// Every field always holds a value; absent upstream data becomes an empty
/// list, an empty string or `None`. Records are built through the
/// constructors below or through [`crate::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub is_plant_image: bool,
    pub status: DiagnosisStatus,
    pub plant_type: Option<String>,
    pub confidence: u8,
    pub disease: Option<String>,
    pub severity: Option<String>,
    pub symptoms: Vec<String>,
    pub immediate_actions: Vec<String>,
    pub detailed_treatment: DetailedTreatment,
    pub fertilizers: Vec<Fertilizer>,
    pub nutrition_suggestions: Vec<NutritionSuggestion>,
    pub prevention_tips: Vec<String>,
    pub growth_tips: Vec<String>,
    pub seasonal_care: Vec<String>,
    pub companion_plants: Vec<String>,
    pub warnings_signs: Vec<String>,
    pub appreciation: String,
    pub additional_advice: String,
    pub message: Option<String>,
}

impl DiagnosisResult {
    /// Empty record with the given status. All lists empty, confidence 0.
    fn blank(is_plant_image: bool, status: DiagnosisStatus) -> Self {
        Self {
            is_plant_image,
            status,
            plant_type: None,
            confidence: 0,
            disease: None,
            severity: None,
            symptoms: Vec::new(),
            immediate_actions: Vec::new(),
            detailed_treatment: DetailedTreatment::default(),
            fertilizers: Vec::new(),
            nutrition_suggestions: Vec::new(),
            prevention_tips: Vec::new(),
            growth_tips: Vec::new(),
            seasonal_care: Vec::new(),
            companion_plants: Vec::new(),
            warnings_signs: Vec::new(),
            appreciation: String::new(),
            additional_advice: String::new(),
            message: None,
        }
    }

    /// Record for an image that does not show a plant
    pub fn not_plant(message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NOT_PLANT_MESSAGE.to_string());

        Self {
            message: Some(message),
            ..Self::blank(false, DiagnosisStatus::NotPlant)
        }
    }

    /// Record for an analysis that could not be attempted locally
    pub fn analysis_error(message: Option<String>) -> Self {
        Self {
            message: Some(message.unwrap_or_else(|| DEFAULT_ANALYSIS_ERROR_MESSAGE.to_string())),
            ..Self::blank(false, DiagnosisStatus::Error)
        }
    }

    /// Start of a plant analysis with the plant-branch defaults applied
    pub(crate) fn plant_defaults() -> Self {
        Self {
            plant_type: Some("Unknown plant".to_string()),
            confidence: 85,
            appreciation: "Thank you for taking care of your plants!".to_string(),
            ..Self::blank(true, DiagnosisStatus::Unknown)
        }
    }

    /// Whether the record describes an actual plant analysis
    pub fn is_plant_analysis(&self) -> bool {
        self.is_plant_image
            && !matches!(self.status, DiagnosisStatus::NotPlant | DiagnosisStatus::Error)
    }

    pub fn is_healthy(&self) -> bool {
        self.status == DiagnosisStatus::Healthy
    }

    pub fn is_diseased(&self) -> bool {
        self.status == DiagnosisStatus::Diseased
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_plant_uses_default_message() {
        let result = DiagnosisResult::not_plant(None);
        assert_eq!(result.status, DiagnosisStatus::NotPlant);
        assert_eq!(result.message.as_deref(), Some(DEFAULT_NOT_PLANT_MESSAGE));
        assert_eq!(result.confidence, 0);
        assert!(!result.is_plant_image);

        let blank_message = DiagnosisResult::not_plant(Some("   ".to_string()));
        assert_eq!(blank_message.message.as_deref(), Some(DEFAULT_NOT_PLANT_MESSAGE));
    }

    #[test]
    fn test_analysis_error_record() {
        let result = DiagnosisResult::analysis_error(None);
        assert_eq!(result.status, DiagnosisStatus::Error);
        assert_eq!(result.message.as_deref(), Some(DEFAULT_ANALYSIS_ERROR_MESSAGE));
        assert!(!result.is_plant_analysis());
    }

    #[test]
    fn test_status_from_model() {
        assert_eq!(DiagnosisStatus::from_model(" Healthy "), DiagnosisStatus::Healthy);
        assert_eq!(DiagnosisStatus::from_model("DISEASED"), DiagnosisStatus::Diseased);
        assert_eq!(DiagnosisStatus::from_model("not_plant"), DiagnosisStatus::Unknown);
        assert_eq!(DiagnosisStatus::from_model(""), DiagnosisStatus::Unknown);
    }

    #[test]
    fn test_fertilizer_kind_from_model() {
        assert_eq!(FertilizerKind::from_model("organic"), FertilizerKind::Organic);
        assert_eq!(FertilizerKind::from_model("Chemical"), FertilizerKind::Chemical);
        assert_eq!(FertilizerKind::from_model("synthetic NPK"), FertilizerKind::Chemical);
        assert_eq!(FertilizerKind::from_model("organic/chemical"), FertilizerKind::Chemical);
        assert_eq!(FertilizerKind::from_model("compost"), FertilizerKind::Organic);
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(DiagnosisResult::not_plant(None)).unwrap();
        assert_eq!(value["isPlantImage"], false);
        assert_eq!(value["status"], "not_plant");
        assert!(value["detailedTreatment"]["stepByStepCure"].is_array());
        assert!(value["warningsSigns"].is_array());
        assert!(value["plantType"].is_null());
    }
}
