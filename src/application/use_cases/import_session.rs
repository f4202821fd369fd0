// ============================================================
// IMPORT SESSION
// ============================================================
// Single-user session state for the import screen: date selection,
// processing, review, save

use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use super::quiz_import::{ImportReport, QuizImportUseCase};
use super::quiz_upload::{QuizUploadUseCase, UploadReceipt};
use crate::domain::error::{AppError, Result};

/// Lifecycle of one import session. `Processing` and `Saving` are the
/// in-flight phases during which new work is refused cooperatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Processing,
    Processed,
    ProcessingFailed,
    Saving,
    Saved,
    SaveFailed,
}

/// Owns the transient state between "file selected" and "saved". One
/// pipeline run at a time; selecting a new file resets the previous
/// result, and a successful save discards the buckets.
pub struct ImportSession {
    import: QuizImportUseCase,
    start_date: Option<NaiveDate>,
    state: SessionState,
    report: Option<ImportReport>,
}

impl ImportSession {
    pub fn new() -> Self {
        Self {
            import: QuizImportUseCase::new(),
            start_date: None,
            state: SessionState::Idle,
            report: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn report(&self) -> Option<&ImportReport> {
        self.report.as_ref()
    }

    /// Pick the first publish date. Required before any processing.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.start_date = Some(date);
    }

    /// Process a newly selected file's content, replacing any previous
    /// result.
    pub fn process_content(&mut self, content: &str) -> Result<&ImportReport> {
        let start_date = self.require_date()?;
        self.begin_processing()?;

        let outcome = self.import.process_content(content, start_date);
        self.finish_processing(outcome)
    }

    /// Process a newly selected file from disk.
    pub fn process_file(&mut self, path: &Path) -> Result<&ImportReport> {
        let start_date = self.require_date()?;
        self.begin_processing()?;

        let outcome = self.import.process_file(path, start_date);
        self.finish_processing(outcome)
    }

    /// Upload the reviewed buckets. One in-flight save at a time; the
    /// buckets are discarded once the backend accepts them.
    pub async fn save(&mut self, uploader: &QuizUploadUseCase) -> Result<UploadReceipt> {
        if self.state == SessionState::Saving {
            return Err(AppError::ValidationError(
                "A save is already in progress.".to_string(),
            ));
        }
        let buckets = match self.report.as_ref() {
            Some(report) if !report.date_buckets.is_empty() => report.date_buckets.clone(),
            _ => {
                return Err(AppError::ValidationError(
                    "No data to save. Please process a CSV file first.".to_string(),
                ))
            }
        };

        self.state = SessionState::Saving;
        match uploader.upload(&buckets).await {
            Ok(receipt) => {
                self.state = SessionState::Saved;
                self.report = None;
                info!(uploaded = receipt.uploaded, "Import session saved");
                Ok(receipt)
            }
            Err(err) => {
                self.state = SessionState::SaveFailed;
                Err(err)
            }
        }
    }

    fn require_date(&self) -> Result<NaiveDate> {
        self.start_date.ok_or_else(|| {
            AppError::ValidationError(
                "Please select a date from the calendar first.".to_string(),
            )
        })
    }

    fn begin_processing(&mut self) -> Result<()> {
        if self.state == SessionState::Saving {
            return Err(AppError::ValidationError(
                "A save is in progress; wait for it to finish.".to_string(),
            ));
        }
        self.state = SessionState::Processing;
        self.report = None;
        Ok(())
    }

    fn finish_processing(
        &mut self,
        outcome: Result<ImportReport>,
    ) -> Result<&ImportReport> {
        match outcome {
            Ok(report) => {
                self.state = SessionState::Processed;
                Ok(self.report.insert(report))
            }
            Err(err) => {
                self.state = SessionState::ProcessingFailed;
                Err(err)
            }
        }
    }
}

impl Default for ImportSession {
    fn default() -> Self {
        Self::new()
    }
}
