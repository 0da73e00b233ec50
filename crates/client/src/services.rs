//! Non-record backend services the session depends on.

use async_trait::async_trait;
use sparkreceipt_core::functions::{ExtractedReceipt, ReportPayload, ReportRequest};

use crate::error::Result;

/// File storage and hosted functions.
///
/// Implemented by [`crate::client::SparkReceiptClient`]; the session only
/// sees this trait so tests can substitute canned responses.
#[async_trait]
pub trait BackendServices: Send + Sync {
    /// Uploads a receipt image and returns its public URL.
    async fn upload_receipt(&self, file_name: &str, bytes: Vec<u8>) -> Result<String>;

    /// Reads receipt fields off an image.
    async fn extract_receipt(&self, image: &[u8]) -> Result<ExtractedReceipt>;

    /// Generates a report document server-side.
    async fn generate_report(&self, request: &ReportRequest<'_>) -> Result<ReportPayload>;
}
