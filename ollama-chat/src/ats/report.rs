use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::Result;

const RULE: &str =
    "================================================================================";

/// A finished analysis together with the metadata printed in its header.
#[derive(Debug, Clone)]
pub struct AtsReport {
    pub model: String,
    pub generated_at: NaiveDateTime,
    pub analysis: String,
}

impl AtsReport {
    /// Creates a report stamped with the current local time.
    pub fn new(model: impl Into<String>, analysis: impl Into<String>) -> Self {
        Self::generated_at(model, analysis, Local::now().naive_local())
    }

    pub fn generated_at(
        model: impl Into<String>,
        analysis: impl Into<String>,
        generated_at: NaiveDateTime,
    ) -> Self {
        Self {
            model: model.into(),
            generated_at,
            analysis: analysis.into(),
        }
    }

    /// `ats_analysis_<YYYYmmdd_HHMMSS>.txt`
    pub fn default_file_name(&self) -> String {
        format!(
            "ats_analysis_{}.txt",
            self.generated_at.format("%Y%m%d_%H%M%S")
        )
    }

    /// The header block followed by the analysis text.
    pub fn render(&self) -> String {
        format!(
            "\n{RULE}\nATS RESUME ANALYSIS REPORT\nGenerated on: {}\nModel Used: {}\n{RULE}\n\n{}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S"),
            self.model,
            self.analysis
        )
    }

    /// Writes the report to `output`, or to [`default_file_name`](Self::default_file_name)
    /// in the working directory, creating parent directories as needed.
    pub fn save(&self, output: Option<&Path>) -> Result<PathBuf> {
        let path = match output {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(self.default_file_name()),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.render())?;

        Ok(path)
    }
}
