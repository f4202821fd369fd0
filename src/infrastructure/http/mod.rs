pub mod bulk_upload;

use crate::domain::error::Result;
use crate::domain::quiz::BulkUploadRequest;
use async_trait::async_trait;

pub use bulk_upload::BulkUploadClient;

/// Seam to the quiz backend's bulk-upload endpoint. The orchestrator
/// only ever makes one call per save attempt through this trait.
#[async_trait]
pub trait QuizUploadApi: Send + Sync {
    async fn bulk_upload(&self, request: &BulkUploadRequest) -> Result<serde_json::Value>;
}
