//! Printable diagnosis report
//!
//! Lays a plant diagnosis out as fixed-size text pages, each closed by a
//! footer carrying the page number.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use textwrap::Options;

use plantdx_core::{DiagnosisResult, Error, Result};

pub const DEFAULT_PAGE_WIDTH: usize = 78;
pub const DEFAULT_PAGE_HEIGHT: usize = 60;

const REPORT_TITLE: &str = "PlantDx Plant Diagnosis Report";
const FOOTER_TEXT: &str = "PlantDx - AI Plant Health Diagnosis System";
/// Rule plus footer text
const FOOTER_LINES: usize = 2;
const MIN_BODY_LINES: usize = 5;

/// `AGR-` followed by the last 8 digits of the millisecond timestamp
pub fn report_id(at: &DateTime<Local>) -> String {
    format!("AGR-{:08}", at.timestamp_millis().rem_euclid(100_000_000))
}

/// A paginated report
#[derive(Debug, Clone)]
pub struct Report {
    pub id: String,
    pub generated_at: DateTime<Local>,
    pub pages: Vec<Vec<String>>,
}

impl Report {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All pages, separated by form feeds
    pub fn render(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\u{c}\n")
    }

    pub fn file_name(&self) -> String {
        format!("plant-diagnosis-{}.txt", self.id)
    }

    /// Write the rendered report into `dir`, returning the file path
    pub async fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.file_name());
        tokio::fs::write(&path, self.render()).await?;
        Ok(path)
    }
}

/// Builds [`Report`]s with a fixed page geometry
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    page_width: usize,
    page_height: usize,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_WIDTH, DEFAULT_PAGE_HEIGHT)
    }
}

impl ReportBuilder {
    pub fn new(page_width: usize, page_height: usize) -> Self {
        Self {
            page_width: page_width.max(FOOTER_TEXT.len() + 16),
            page_height: page_height.max(MIN_BODY_LINES + FOOTER_LINES),
        }
    }

    /// Lay out a report for a plant diagnosis.
    /// Not-plant and error records cannot be exported.
    pub fn build(
        &self,
        result: &DiagnosisResult,
        image_label: Option<&str>,
        generated_at: DateTime<Local>,
    ) -> Result<Report> {
        if !result.is_plant_analysis() {
            return Err(Error::InvalidInput(format!(
                "cannot export a report for a {} result",
                result.status
            )));
        }

        let id = report_id(&generated_at);
        let body = self.body(result, image_label, &id, &generated_at);
        let pages = self.paginate(body);

        Ok(Report {
            id,
            generated_at,
            pages,
        })
    }

    fn body(
        &self,
        result: &DiagnosisResult,
        image_label: Option<&str>,
        id: &str,
        at: &DateTime<Local>,
    ) -> Vec<String> {
        let mut lines = vec![
            REPORT_TITLE.to_string(),
            format!("Report ID: {}", id),
            format!("Date: {}", at.format("%Y-%m-%d")),
            format!("Time: {}", at.format("%H:%M:%S")),
            "=".repeat(self.page_width),
            String::new(),
            "ANALYSIS SUMMARY".to_string(),
            format!("Plant Type: {}", result.plant_type.as_deref().unwrap_or("Unknown")),
            format!("Confidence: {}%", result.confidence),
            format!("Status: {}", result.status.as_str().to_uppercase()),
            String::new(),
            "PLANT DETAILS".to_string(),
        ];

        if let Some(label) = image_label {
            lines.push(format!("Image: {}", label));
        }
        if let Some(disease) = &result.disease {
            lines.push(format!("Disease: {}", disease));
        }
        if let Some(severity) = &result.severity {
            lines.push(format!("Severity: {}", severity));
        }
        lines.push(format!("Analysis Date: {}", at.format("%Y-%m-%d")));
        lines.push(String::new());

        self.section(&mut lines, "Symptoms Identified", &result.symptoms);
        self.section(&mut lines, "Immediate Actions Required", &result.immediate_actions);

        let treatment = &result.detailed_treatment;
        if !treatment.organic_solutions.is_empty() || !treatment.chemical_solutions.is_empty() {
            lines.push("RECOMMENDED TREATMENT".to_string());
            self.section(&mut lines, "Organic Solutions:", &treatment.organic_solutions);
            self.section(&mut lines, "Chemical Solutions:", &treatment.chemical_solutions);
        }

        if !result.fertilizers.is_empty() {
            lines.push("RECOMMENDED FERTILIZERS".to_string());
            for fertilizer in &result.fertilizers {
                lines.extend(self.wrap(&fertilizer.name, "  ", "  "));
                lines.push(format!("    Type: {}", fertilizer.kind));
                lines.extend(self.wrap(
                    &format!("Application: {}", fertilizer.application),
                    "    ",
                    "      ",
                ));
            }
            lines.push(String::new());
        }

        self.section(&mut lines, "Prevention Tips", &result.prevention_tips);
        self.section(&mut lines, "Growth Tips", &result.growth_tips);

        if !result.appreciation.is_empty() {
            lines.extend(self.wrap(&result.appreciation, "", ""));
        }

        lines
    }

    fn section(&self, lines: &mut Vec<String>, title: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        lines.push(title.to_string());
        for item in items {
            lines.extend(self.wrap(item, "  • ", "    "));
        }
        lines.push(String::new());
    }

    fn wrap(&self, text: &str, initial_indent: &str, subsequent_indent: &str) -> Vec<String> {
        let options = Options::new(self.page_width)
            .initial_indent(initial_indent)
            .subsequent_indent(subsequent_indent);
        textwrap::wrap(text, options)
            .into_iter()
            .map(|line| line.into_owned())
            .collect()
    }

    fn paginate(&self, mut body: Vec<String>) -> Vec<Vec<String>> {
        while body.last().is_some_and(|line| line.is_empty()) {
            body.pop();
        }

        let body_lines = self.page_height - FOOTER_LINES;
        let chunks: Vec<&[String]> = body.chunks(body_lines).collect();
        let total = chunks.len().max(1);

        (0..total)
            .map(|index| {
                let mut page: Vec<String> = chunks.get(index).map(|c| c.to_vec()).unwrap_or_default();
                page.resize(body_lines, String::new());
                page.push("-".repeat(self.page_width));
                page.push(self.footer(index + 1, total));
                page
            })
            .collect()
    }

    fn footer(&self, page: usize, total: usize) -> String {
        let counter = format!("Page {} of {}", page, total);
        let gap = self
            .page_width
            .saturating_sub(FOOTER_TEXT.len() + counter.len())
            .max(1);
        format!("{}{}{}", FOOTER_TEXT, " ".repeat(gap), counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 18, 14, 3, 5).unwrap()
    }

    #[test]
    fn test_report_id_format() {
        let at = fixed_time();
        let id = report_id(&at);
        assert!(id.starts_with("AGR-"));
        assert_eq!(id.len(), 12);
        assert!(id[4..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_refuses_non_plant_results() {
        let builder = ReportBuilder::default();
        assert!(builder.build(&DiagnosisResult::not_plant(None), None, fixed_time()).is_err());
        assert!(builder.build(&DiagnosisResult::analysis_error(None), None, fixed_time()).is_err());
    }

    #[test]
    fn test_summary_and_sections() {
        let report = ReportBuilder::default()
            .build(&DiagnosisResult::parse_fallback(), Some("leaf.jpg"), fixed_time())
            .unwrap();
        let text = report.render();

        assert!(text.starts_with(REPORT_TITLE));
        assert!(text.contains("Plant Type: Unknown plant"));
        assert!(text.contains("Confidence: 80%"));
        assert!(text.contains("Status: DISEASED"));
        assert!(text.contains("Image: leaf.jpg"));
        assert!(text.contains("Disease: Possible fungal infection"));
        assert!(text.contains("Date: 2026-10-18"));
        assert!(text.contains("  • Remove affected leaves"));
        assert!(text.contains("    Type: chemical"));
        assert_eq!(report.file_name(), format!("plant-diagnosis-{}.txt", report.id));

        let symptoms = text.find("Symptoms Identified").unwrap();
        let actions = text.find("Immediate Actions Required").unwrap();
        let treatment = text.find("RECOMMENDED TREATMENT").unwrap();
        let growth = text.find("Growth Tips").unwrap();
        assert!(symptoms < actions && actions < treatment && treatment < growth);
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let report = ReportBuilder::default()
            .build(&DiagnosisResult::transport_fallback(), None, fixed_time())
            .unwrap();
        let text = report.render();

        assert!(!text.contains("Symptoms Identified"));
        assert!(!text.contains("RECOMMENDED TREATMENT"));
        assert!(!text.contains("Disease:"));
        assert!(text.contains("RECOMMENDED FERTILIZERS"));
        assert!(text.contains("Status: HEALTHY"));
    }

    #[test]
    fn test_pagination_and_footers() {
        let builder = ReportBuilder::new(78, 12);
        let report = builder
            .build(&DiagnosisResult::parse_fallback(), None, fixed_time())
            .unwrap();

        let total = report.page_count();
        assert!(total > 1);

        for (index, page) in report.pages.iter().enumerate() {
            assert_eq!(page.len(), 12);
            let footer = page.last().unwrap();
            assert!(footer.starts_with(FOOTER_TEXT));
            assert!(footer.ends_with(&format!("Page {} of {}", index + 1, total)));
            assert_eq!(footer.chars().count(), 78);
        }

        assert_eq!(report.render().matches('\u{c}').count(), total - 1);
    }

    #[test]
    fn test_long_items_wrap_to_page_width() {
        let mut result = DiagnosisResult::parse_fallback();
        result.symptoms = vec!["spots ".repeat(40)];

        let report = ReportBuilder::new(60, 60)
            .build(&result, None, fixed_time())
            .unwrap();

        for line in report.pages.iter().flatten() {
            assert!(line.chars().count() <= 60, "line too long: {:?}", line);
        }
    }

    #[tokio::test]
    async fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let report = ReportBuilder::default()
            .build(&DiagnosisResult::parse_fallback(), None, fixed_time())
            .unwrap();

        let path = report.write_to_dir(dir.path()).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, report.render());
    }
}
