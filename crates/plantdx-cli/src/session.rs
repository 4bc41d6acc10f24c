//! Diagnosis session state

use tracing::debug;

use plantdx_core::{DiagnosisResult, Error, Result};

use crate::history::{DiagnosisHistory, SavedDiagnosis};

/// Badge awarded the first time a healthy plant is diagnosed
pub const HEALTHY_BADGE: &str = "Healthy Plant Master";

/// Identifies one analysis submission. Later submissions get larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// State of one user session: the latest result, earned badges and the
/// saved diagnosis history.
pub struct DiagnosisSession {
    history: DiagnosisHistory,
    current: Option<DiagnosisResult>,
    current_image: Option<String>,
    pending_image: Option<String>,
    badges: Vec<String>,
    latest_token: u64,
    analyzing: bool,
}

impl DiagnosisSession {
    pub fn new(history: DiagnosisHistory) -> Self {
        Self {
            history,
            current: None,
            current_image: None,
            pending_image: None,
            badges: Vec::new(),
            latest_token: 0,
            analyzing: false,
        }
    }

    /// Register a new submission. Any result still in flight for an older
    /// token will be discarded when it arrives.
    pub fn begin_analysis(&mut self, image_label: impl Into<String>) -> RequestToken {
        self.latest_token += 1;
        self.analyzing = true;
        self.pending_image = Some(image_label.into());
        RequestToken(self.latest_token)
    }

    /// Apply a finished analysis. Returns false when the token is stale.
    pub fn complete_analysis(&mut self, token: RequestToken, result: DiagnosisResult) -> bool {
        if token.0 != self.latest_token {
            debug!(token = token.0, latest = self.latest_token, "discarding stale analysis result");
            return false;
        }

        if result.is_plant_analysis() && result.is_healthy() {
            self.award_badge(HEALTHY_BADGE);
        }

        self.analyzing = false;
        self.current = Some(result);
        self.current_image = self.pending_image.take();
        true
    }

    fn award_badge(&mut self, badge: &str) {
        if !self.badges.iter().any(|b| b == badge) {
            self.badges.push(badge.to_string());
        }
    }

    /// Save the current result to history. Only plant diagnoses are saved.
    pub async fn save_current(&mut self) -> Result<&SavedDiagnosis> {
        let result = self
            .current
            .as_ref()
            .ok_or_else(|| Error::InvalidInput("no diagnosis to save".to_string()))?;
        let image = self.current_image.as_deref().unwrap_or("unknown image");

        self.history.add(image, result).await
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn current(&self) -> Option<&DiagnosisResult> {
        self.current.as_ref()
    }

    pub fn current_image(&self) -> Option<&str> {
        self.current_image.as_deref()
    }

    pub fn badges(&self) -> &[String] {
        &self.badges
    }

    pub fn history(&self) -> &DiagnosisHistory {
        &self.history
    }
}
