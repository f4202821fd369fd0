use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use super::QuizUploadApi;
use crate::domain::error::{AppError, Result};
use crate::domain::quiz::BulkUploadRequest;
use crate::infrastructure::config::UploadConfig;

pub const BULK_UPLOAD_PATH: &str = "/api/daily-quiz/bulk-upload";

pub struct BulkUploadClient {
    client: reqwest::Client,
    base_url: String,
}

impl BulkUploadClient {
    pub fn new(config: &UploadConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, BULK_UPLOAD_PATH)
    }
}

#[async_trait]
impl QuizUploadApi for BulkUploadClient {
    async fn bulk_upload(&self, request: &BulkUploadRequest) -> Result<Value> {
        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::UploadError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(AppError::UploadError(error_message(status, &body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UploadError(format!("Failed to parse JSON: {}", e)))
    }
}

/// Prefer the backend's own message (`error.message`, then `message`),
/// falling back to a generic HTTP-status line.
fn error_message(status: StatusCode, body: &Value) -> String {
    body["error"]["message"]
        .as_str()
        .or_else(|| body["message"].as_str())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()))
}
