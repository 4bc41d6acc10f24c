//! Saved diagnoses, persisted as a JSON file

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;
use uuid::Uuid;

use plantdx_core::{DiagnosisResult, Error, Result};

/// Default history file name
pub const DEFAULT_HISTORY_FILE: &str = "saved_diagnoses.json";

/// One saved diagnosis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDiagnosis {
    pub id: Uuid,
    pub image: String,
    pub result: DiagnosisResult,
    pub saved_at: DateTime<Utc>,
}

/// Diagnosis history backed by a JSON file
pub struct DiagnosisHistory {
    entries: Vec<SavedDiagnosis>,
    file_path: PathBuf,
    load_failed: bool,
}

impl DiagnosisHistory {
    /// Open the history at `file_path`, loading existing entries if present.
    ///
    /// An existing file that cannot be loaded is left untouched: the history
    /// starts empty and every write is refused.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        let mut history = Self {
            entries: Vec::new(),
            file_path: file_path.as_ref().to_path_buf(),
            load_failed: false,
        };

        if history.file_path.exists() {
            if let Err(e) = history.load_sync() {
                warn!(path = %history.file_path.display(), error = %e, "failed to load saved diagnoses, history is read-only");
                history.entries.clear();
                history.load_failed = true;
            }
        }

        history
    }

    /// Load entries synchronously (for initialization)
    fn load_sync(&mut self) -> Result<()> {
        let content = std::fs::read_to_string(&self.file_path)?;
        self.entries = serde_json::from_str(&content)?;
        Ok(())
    }

    /// Write entries to the file
    pub async fn save(&self) -> Result<()> {
        if self.load_failed {
            return Err(Error::InvalidInput(format!(
                "{} could not be loaded, refusing to overwrite it",
                self.file_path.display()
            )));
        }

        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.file_path, json).await?;
        Ok(())
    }

    /// Append a plant diagnosis and persist the history.
    /// Non-plant and error records are refused.
    pub async fn add(&mut self, image: &str, result: &DiagnosisResult) -> Result<&SavedDiagnosis> {
        if !result.is_plant_analysis() {
            return Err(Error::InvalidInput(
                "only plant diagnoses can be saved".to_string(),
            ));
        }

        self.entries.push(SavedDiagnosis {
            id: Uuid::new_v4(),
            image: image.to_string(),
            result: result.clone(),
            saved_at: Utc::now(),
        });
        if let Err(e) = self.save().await {
            self.entries.pop();
            return Err(e);
        }

        // just pushed, never empty
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn entries(&self) -> &[SavedDiagnosis] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Whether an existing history file could not be loaded
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_add_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut history = DiagnosisHistory::new(&path);
        assert!(history.is_empty());

        let saved = history
            .add("leaf.jpg", &DiagnosisResult::parse_fallback())
            .await
            .unwrap();
        assert_eq!(saved.image, "leaf.jpg");

        let reloaded = DiagnosisHistory::new(&path);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.entries()[0].result, DiagnosisResult::parse_fallback());
    }

    #[tokio::test]
    async fn test_refuses_non_plant() {
        let dir = tempdir().unwrap();
        let mut history = DiagnosisHistory::new(dir.path().join("history.json"));

        assert!(history.add("car.jpg", &DiagnosisResult::not_plant(None)).await.is_err());
        assert!(history.add("x.jpg", &DiagnosisResult::analysis_error(None)).await.is_err());
        assert!(history.is_empty());
        assert!(!history.path().exists());
    }

    #[tokio::test]
    async fn test_unreadable_file_is_never_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        let hand_edited = r#"[{"id": "hand-edited, trailing comma"},]"#;
        std::fs::write(&path, hand_edited).unwrap();

        let mut history = DiagnosisHistory::new(&path);
        assert!(history.is_empty());
        assert!(history.load_failed());

        let err = history
            .add("leaf.jpg", &DiagnosisResult::transport_fallback())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(history.save().await.is_err());

        assert!(history.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), hand_edited);
    }

    #[tokio::test]
    async fn test_failed_write_drops_new_entry() {
        let dir = tempdir().unwrap();
        let mut history = DiagnosisHistory::new(dir.path().join("missing").join("history.json"));
        assert!(!history.load_failed());

        let result = history
            .add("leaf.jpg", &DiagnosisResult::transport_fallback())
            .await;
        assert!(matches!(result, Err(Error::Io(_))));
        assert!(history.is_empty());
    }
}
