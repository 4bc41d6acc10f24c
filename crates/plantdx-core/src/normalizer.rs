//! Response normalization
//!
//! Turns the free-text reply of a vision model into a [`DiagnosisResult`].
//! Normalization never fails: malformed or off-topic replies are mapped to
//! one of the canned records.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::diagnosis::{
    DetailedTreatment, DiagnosisResult, DiagnosisStatus, Fertilizer, FertilizerKind,
    NutritionSuggestion,
};

/// Phrases that suggest the model looked at something other than a plant.
/// Only consulted when the reply is not valid JSON. Matching is a
/// case-insensitive substring search.
pub const NON_PLANT_INDICATORS: &[&str] = &[
    "does not contain",
    "does not appear",
    "not a plant",
    "not contain",
    "no plant",
    "not agricultural",
    "not showing",
    "not visible",
    "car",
    "person",
    "building",
    "animal",
    "object",
    "landscape",
];

/// Confidence reported when the model omits it or sends something unusable
pub const DEFAULT_CONFIDENCE: u8 = 85;

static LEADING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_+-]*[ \t]*\r?\n?").unwrap());
static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n?```\s*$").unwrap());

/// Remove a Markdown code fence wrapped around the reply, with or without a
/// language tag, and trim the rest.
pub fn strip_code_fences(raw_text: &str) -> String {
    let trimmed = raw_text.trim();
    let without_leading = LEADING_FENCE.replace(trimmed, "");
    let without_trailing = TRAILING_FENCE.replace(&without_leading, "");
    without_trailing.trim().to_string()
}

/// Normalize a model reply using the default indicator list
pub fn normalize(raw_text: &str) -> DiagnosisResult {
    ResponseNormalizer::default().normalize(raw_text)
}

/// Maps raw model replies to fully populated diagnosis records
#[derive(Debug, Clone)]
pub struct ResponseNormalizer {
    indicators: Vec<String>,
}

impl Default for ResponseNormalizer {
    fn default() -> Self {
        Self::with_indicators(NON_PLANT_INDICATORS.iter().copied())
    }
}

impl ResponseNormalizer {
    /// Create a normalizer with a custom non-plant phrase list
    pub fn with_indicators<I, S>(indicators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            indicators: indicators
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn indicators(&self) -> &[String] {
        &self.indicators
    }

    /// Normalize a raw reply. Never fails.
    pub fn normalize(&self, raw_text: &str) -> DiagnosisResult {
        let cleaned = strip_code_fences(raw_text);
        debug!(chars = cleaned.len(), "normalizing model reply");

        match serde_json::from_str::<Value>(&cleaned) {
            Ok(Value::Object(object)) => {
                if flags_not_plant(&object) {
                    debug!("model flagged the image as not a plant");
                    return DiagnosisResult::not_plant(text(&object, "message"));
                }
                analysis_from_object(&object)
            }
            Ok(other) => {
                warn!(kind = json_kind(&other), "model reply is JSON but not an object");
                self.recover_unparsed(&cleaned)
            }
            Err(e) => {
                warn!(error = %e, "failed to parse model reply as JSON");
                self.recover_unparsed(&cleaned)
            }
        }
    }

    /// Whether free text mentions any of the non-plant indicators
    pub fn mentions_non_plant(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.indicators.iter().any(|indicator| lower.contains(indicator.as_str()))
    }

    fn recover_unparsed(&self, cleaned: &str) -> DiagnosisResult {
        if self.mentions_non_plant(cleaned) {
            debug!("unparsed reply mentions a non-plant subject");
            DiagnosisResult::not_plant(None)
        } else {
            DiagnosisResult::parse_fallback()
        }
    }
}

/// `isPlantImage: false` or a `not_plant` status. String booleans do not count.
fn flags_not_plant(object: &Map<String, Value>) -> bool {
    if object.get("isPlantImage") == Some(&Value::Bool(false)) {
        return true;
    }
    object
        .get("status")
        .and_then(Value::as_str)
        .is_some_and(|status| status.trim().eq_ignore_ascii_case("not_plant"))
}

fn analysis_from_object(object: &Map<String, Value>) -> DiagnosisResult {
    let mut result = DiagnosisResult::plant_defaults();

    result.status = object
        .get("status")
        .and_then(Value::as_str)
        .map(DiagnosisStatus::from_model)
        .unwrap_or_default();

    if let Some(plant_type) = text(object, "plantType") {
        result.plant_type = Some(plant_type);
    }
    result.confidence = confidence(object.get("confidence"));

    if result.status == DiagnosisStatus::Diseased {
        result.disease = text(object, "disease");
        result.severity = text(object, "severity");
    }

    result.symptoms = string_list(object.get("symptoms"));
    result.immediate_actions = string_list(object.get("immediateActions"));
    result.detailed_treatment = treatment(object.get("detailedTreatment"));
    result.fertilizers = objects(object.get("fertilizers"))
        .map(fertilizer)
        .collect();
    result.nutrition_suggestions = objects(object.get("nutritionSuggestions"))
        .map(nutrition)
        .collect();
    result.prevention_tips = string_list(object.get("preventionTips"));
    result.growth_tips = string_list(object.get("growthTips"));
    result.seasonal_care = string_list(object.get("seasonalCare"));
    result.companion_plants = string_list(object.get("companionPlants"));
    result.warnings_signs = string_list(object.get("warningsSigns"));

    if let Some(appreciation) = text(object, "appreciation") {
        result.appreciation = appreciation;
    }
    result.additional_advice = text(object, "additionalAdvice").unwrap_or_default();

    result
}

/// Non-empty trimmed string field
fn text(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn objects(value: Option<&Value>) -> impl Iterator<Item = &Map<String, Value>> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

fn confidence(value: Option<&Value>) -> u8 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(score) if score.is_finite() => score.round().clamp(0.0, 100.0) as u8,
        _ => DEFAULT_CONFIDENCE,
    }
}

fn treatment(value: Option<&Value>) -> DetailedTreatment {
    match value {
        Some(Value::Object(object)) => DetailedTreatment {
            organic_solutions: string_list(object.get("organicSolutions")),
            chemical_solutions: string_list(object.get("chemicalSolutions")),
            step_by_step_cure: string_list(object.get("stepByStepCure")),
        },
        _ => DetailedTreatment::default(),
    }
}

fn fertilizer(object: &Map<String, Value>) -> Fertilizer {
    Fertilizer {
        name: text(object, "name").unwrap_or_default(),
        kind: text(object, "type")
            .map(|kind| FertilizerKind::from_model(&kind))
            .unwrap_or_default(),
        application: text(object, "application").unwrap_or_default(),
        timing: text(object, "timing").unwrap_or_default(),
    }
}

fn nutrition(object: &Map<String, Value>) -> NutritionSuggestion {
    NutritionSuggestion {
        nutrient: text(object, "nutrient").unwrap_or_default(),
        deficiency_sign: text(object, "deficiencySign").unwrap_or_default(),
        sources: string_list(object.get("sources")),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
