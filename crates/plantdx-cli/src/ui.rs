//! UI utilities for the CLI

use colored::*;
use crossterm::terminal::size;

use plantdx_core::{DiagnosisResult, DiagnosisStatus};

use crate::history::SavedDiagnosis;
use crate::products::Product;

fn terminal_width() -> usize {
    size().map(|(w, _)| w as usize).unwrap_or(80)
}

/// Display startup banner
pub fn display_banner(model_id: &str) {
    let banner_width = std::cmp::min(60, terminal_width().saturating_sub(4)).max(40);
    let inner = banner_width - 2;

    println!();
    println!("{}", format!("┌{}┐", "─".repeat(inner)).green());
    for line in ["🌿 PlantDx - AI Plant Health Lab", "", model_id] {
        let padding = inner.saturating_sub(line.chars().count() + 2);
        println!(
            "{}",
            format!("│  {}{}│", line, " ".repeat(padding)).green()
        );
    }
    println!("{}", format!("└{}┘", "─".repeat(inner)).green());
    println!();
}

/// Short headline for a result
pub fn headline(result: &DiagnosisResult) -> String {
    match result.status {
        DiagnosisStatus::Healthy => "Healthy plant".to_string(),
        DiagnosisStatus::Diseased => match &result.disease {
            Some(disease) => format!("Disease detected: {}", disease),
            None => "Disease detected".to_string(),
        },
        DiagnosisStatus::NotPlant => "No plant detected".to_string(),
        DiagnosisStatus::Error => "Analysis failed".to_string(),
        DiagnosisStatus::Unknown => "Analysis inconclusive".to_string(),
    }
}

fn colored_headline(result: &DiagnosisResult) -> ColoredString {
    let text = headline(result);
    match result.status {
        DiagnosisStatus::Healthy => text.green().bold(),
        DiagnosisStatus::Diseased => text.red().bold(),
        DiagnosisStatus::NotPlant | DiagnosisStatus::Unknown => text.yellow().bold(),
        DiagnosisStatus::Error => text.red(),
    }
}

/// Bulleted block, or nothing when the list is empty
pub fn format_list(title: &str, items: &[String]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let mut block = format!("{}\n", title);
    for item in items {
        block.push_str(&format!("  • {}\n", item));
    }
    Some(block)
}

fn print_list(title: &str, items: &[String]) {
    if let Some(block) = format_list(&title.bold().to_string(), items) {
        println!("{}", block);
    }
}

/// Print a diagnosis result
pub fn display_diagnosis(result: &DiagnosisResult) {
    println!("{}", colored_headline(result));

    if !result.is_plant_analysis() {
        if let Some(message) = &result.message {
            println!("{}", message.dimmed());
        }
        println!();
        return;
    }

    if let Some(plant_type) = &result.plant_type {
        println!("{} {}", "Plant:".bold(), plant_type);
    }
    println!("{} {}%", "Confidence:".bold(), result.confidence);
    if let Some(severity) = &result.severity {
        println!("{} {}", "Severity:".bold(), severity.yellow());
    }
    println!();

    print_list("Symptoms", &result.symptoms);
    print_list("Immediate actions", &result.immediate_actions);

    let treatment = &result.detailed_treatment;
    print_list("Organic solutions", &treatment.organic_solutions);
    print_list("Chemical solutions", &treatment.chemical_solutions);
    print_list("Step-by-step cure", &treatment.step_by_step_cure);

    if !result.fertilizers.is_empty() {
        println!("{}", "Fertilizers".bold());
        for fertilizer in &result.fertilizers {
            println!("  • {} [{}]", fertilizer.name, fertilizer.kind.to_string().cyan());
            if !fertilizer.application.is_empty() {
                println!("      Application: {}", fertilizer.application);
            }
            if !fertilizer.timing.is_empty() {
                println!("      Timing: {}", fertilizer.timing);
            }
        }
        println!();
    }

    if !result.nutrition_suggestions.is_empty() {
        println!("{}", "Nutrition".bold());
        for suggestion in &result.nutrition_suggestions {
            println!("  • {}: {}", suggestion.nutrient, suggestion.deficiency_sign);
            if !suggestion.sources.is_empty() {
                println!("      Sources: {}", suggestion.sources.join(", "));
            }
        }
        println!();
    }

    print_list("Prevention tips", &result.prevention_tips);
    print_list("Growth tips", &result.growth_tips);
    print_list("Seasonal care", &result.seasonal_care);
    print_list("Companion plants", &result.companion_plants);
    print_list("Warning signs", &result.warnings_signs);

    if !result.appreciation.is_empty() {
        println!("{}", result.appreciation.green());
    }
    if !result.additional_advice.is_empty() {
        println!("{}", result.additional_advice.dimmed());
    }
    println!();
}

/// Print earned badges
pub fn display_badges(badges: &[String]) {
    for badge in badges {
        println!("{} {}", "🏆".yellow(), badge.yellow().bold());
    }
}

/// Print product recommendations
pub fn display_products(products: &[Product]) {
    if products.is_empty() {
        return;
    }
    println!("{}", "Recommended products".bold());
    for product in products {
        println!(
            "  {} {} ({}, ★ {:.1})",
            "•".green(),
            product.name.bold(),
            product.price,
            product.rating
        );
        println!("      {}", product.description);
        println!("      {}", product.affiliate_link.blue().underline());
    }
    println!();
}

/// Print saved diagnoses
pub fn display_history(entries: &[SavedDiagnosis]) {
    if entries.is_empty() {
        println!("{}", "No saved diagnoses yet.".dimmed());
        return;
    }
    for entry in entries {
        println!(
            "{} {}  {}  {}",
            entry.saved_at.format("%Y-%m-%d").to_string().dimmed(),
            entry.image,
            colored_headline(&entry.result),
            format!("({}%)", entry.result.confidence).dimmed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headlines() {
        assert_eq!(
            headline(&DiagnosisResult::parse_fallback()),
            "Disease detected: Possible fungal infection"
        );
        assert_eq!(headline(&DiagnosisResult::transport_fallback()), "Healthy plant");
        assert_eq!(headline(&DiagnosisResult::not_plant(None)), "No plant detected");
        assert_eq!(headline(&DiagnosisResult::analysis_error(None)), "Analysis failed");
    }

    #[test]
    fn test_format_list() {
        assert!(format_list("Empty", &[]).is_none());
        assert_eq!(
            format_list("Tips", &["Water".to_string(), "Prune".to_string()]).unwrap(),
            "Tips\n  • Water\n  • Prune\n"
        );
    }
}
