// ============================================================
// UPLOAD ORCHESTRATOR
// ============================================================
// Flatten date buckets into the bulk-upload payload and post it
// to the backend in a single attempt

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::error::{AppError, Result};
use crate::domain::quiz::{transform_row, BulkUploadRequest, DateBucket, Difficulty, QuizPayload};
use crate::infrastructure::http::QuizUploadApi;

/// Outcome of a successful save.
#[derive(Debug, Clone, Serialize)]
pub struct UploadReceipt {
    /// Number of quizzes included in the payload
    pub uploaded: usize,

    /// Backend response body, passed through as-is
    pub response: serde_json::Value,
}

pub struct QuizUploadUseCase {
    api: Arc<dyn QuizUploadApi>,
}

impl QuizUploadUseCase {
    pub fn new(api: Arc<dyn QuizUploadApi>) -> Self {
        Self { api }
    }

    /// Transform every filled difficulty slot of every day into an upload
    /// record. Slots whose transformation yields zero questions are
    /// excluded silently; the only trace is a lower final quiz count.
    pub fn build_payload(date_buckets: &[DateBucket]) -> Vec<QuizPayload> {
        let mut quizzes = Vec::new();

        for bucket in date_buckets {
            let slots = [
                (bucket.easy.as_ref(), Difficulty::Easy),
                (bucket.medium.as_ref(), Difficulty::Medium),
                (bucket.difficult.as_ref(), Difficulty::Difficult),
            ];
            for (row, difficulty) in slots {
                if let Some(row) = row {
                    let quiz = transform_row(row, bucket.date, difficulty);
                    if !quiz.questions.is_empty() {
                        quizzes.push(quiz);
                    }
                }
            }
        }

        quizzes
    }

    /// Upload everything in one POST. Fails fast without touching the
    /// network when nothing survives transformation; never retries.
    pub async fn upload(&self, date_buckets: &[DateBucket]) -> Result<UploadReceipt> {
        let quizzes = Self::build_payload(date_buckets);
        if quizzes.is_empty() {
            return Err(AppError::ValidationError(
                "No valid quizzes found to upload. Please check your data.".to_string(),
            ));
        }

        let uploaded = quizzes.len();
        let response = self.api.bulk_upload(&BulkUploadRequest { quizzes }).await?;

        info!(uploaded, "Quizzes uploaded to backend");

        Ok(UploadReceipt { uploaded, response })
    }
}
