//! Resume analysis against an applicant tracking system checklist.
//!
//! The pipeline is a straight line: extract the resume text, optionally
//! extract a job description, ask the model for an analysis, write the
//! report. Every file is read before the request is sent, so a missing file
//! or an unsupported extension never costs a network call.

use std::path::{Path, PathBuf};

#[cfg(feature = "tracing")]
use tracing::{info, instrument};

use crate::document;
use crate::types::chat::{ChatMessage, SimpleChatRequest};
use crate::{Error, OllamaClient, Result};

pub mod prompts;
mod report;

pub use report::AtsReport;

/// Returned by [`AtsChecker::analyze`] when the model answers with no text.
pub const EMPTY_ANALYSIS: &str = "No analysis received";

/// Progress of [`AtsChecker::check_resume_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage<'a> {
    ExtractingResume(&'a Path),
    ExtractingJobDescription(&'a Path),
    Analyzing,
    Saving,
    Saved(&'a Path),
}

pub struct AtsChecker {
    client: OllamaClient,
    model: String,
}

impl AtsChecker {
    pub fn new(client: OllamaClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends the analysis prompt as a single user message.
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(model = %self.model)))]
    pub async fn analyze(&self, resume_text: &str, job_description: Option<&str>) -> Result<String> {
        let prompt = prompts::analysis_prompt(resume_text, job_description);
        let request = SimpleChatRequest::new(self.model.clone()).add_message(ChatMessage::user(prompt));

        let analysis = self.client.chat_text(request).await?;
        if analysis.is_empty() {
            return Ok(EMPTY_ANALYSIS.to_string());
        }
        Ok(analysis)
    }

    /// Writes `analysis` to `output` (or a timestamped file) and returns the path.
    pub fn save_report(&self, analysis: &str, output: Option<&Path>) -> Result<PathBuf> {
        AtsReport::new(self.model.clone(), analysis).save(output)
    }

    pub async fn check_resume(
        &self,
        resume: &Path,
        job_description: Option<&Path>,
        output: Option<&Path>,
    ) -> Result<PathBuf> {
        self.check_resume_with(resume, job_description, output, |_| {})
            .await
    }

    /// Runs the whole pipeline, reporting each step to `on_stage`.
    pub async fn check_resume_with<F>(
        &self,
        resume: &Path,
        job_description: Option<&Path>,
        output: Option<&Path>,
        mut on_stage: F,
    ) -> Result<PathBuf>
    where
        F: FnMut(Stage<'_>),
    {
        on_stage(Stage::ExtractingResume(resume));
        let resume_text = extract(resume).await?;

        let job_description_text = match job_description {
            Some(path) => {
                on_stage(Stage::ExtractingJobDescription(path));
                Some(extract(path).await?)
            }
            None => None,
        };

        on_stage(Stage::Analyzing);
        let analysis = self
            .analyze(&resume_text, job_description_text.as_deref())
            .await?;

        on_stage(Stage::Saving);
        let saved = self.save_report(&analysis, output)?;
        #[cfg(feature = "tracing")]
        info!(path = %saved.display(), "analysis saved");

        on_stage(Stage::Saved(&saved));
        Ok(saved)
    }
}

async fn extract(path: &Path) -> Result<String> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || document::extract_text(&path))
        .await
        .map_err(|e| Error::Client(format!("extraction task failed: {}", e)))?
}
