//! File storage operations.

use std::path::Path;

use url::Url;

use super::SparkReceiptClient;
use crate::error::{ClientError, Result};

/// Object path for an uploaded receipt: `{unix_millis}-{file_name}`.
pub fn receipt_object_path(file_name: &str, unix_millis: i64) -> String {
    format!("{unix_millis}-{file_name}")
}

/// Content type guessed from the file extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

impl SparkReceiptClient {
    /// Storage endpoint URL; each segment of the object path is percent-encoded.
    fn object_url(&self, prefix: &[&str], object_path: &str) -> Result<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::Config(format!("{} cannot be a base URL", self.config.base_url))
            })?
            .pop_if_empty()
            .extend(["storage", "v1", "object"])
            .extend(prefix)
            .extend(object_path.split('/'));
        Ok(url)
    }

    /// Public URL of an object in a public bucket.
    pub fn public_url(&self, bucket: &str, object_path: &str) -> Result<String> {
        Ok(self.object_url(&["public", bucket], object_path)?.into())
    }

    /// Upload an object and return its public URL.
    pub async fn upload_object(
        &self,
        bucket: &str,
        object_path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        let response = self
            .client
            .post(self.object_url(&[bucket], object_path)?)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        self.handle_empty_response(response, object_path).await?;

        tracing::debug!(%bucket, %object_path, "Uploaded object");
        self.public_url(bucket, object_path)
    }

    /// Upload a receipt image to the receipts bucket under a timestamped name.
    pub async fn upload_receipt(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        let object_path = receipt_object_path(file_name, chrono::Utc::now().timestamp_millis());
        self.upload_object(
            &self.config.receipts_bucket,
            &object_path,
            bytes,
            content_type_for(file_name),
        )
        .await
    }
}
