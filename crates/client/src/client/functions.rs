//! Hosted function calls: receipt extraction and report generation.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sparkreceipt_core::functions::{
    ExtractedReceipt, ExtractionRequest, ExtractionResponse, ReportFormat, ReportPayload,
    ReportRequest,
};

use super::SparkReceiptClient;
use crate::error::{ClientError, Result};
use crate::services::BackendServices;

impl SparkReceiptClient {
    /// Send a receipt image to the extraction function.
    pub async fn extract_receipt(&self, image: &[u8]) -> Result<ExtractedReceipt> {
        let request = ExtractionRequest {
            image_base64: STANDARD.encode(image),
        };
        let response = self
            .client
            .post(self.url("/functions/v1/extract-receipt"))
            .json(&request)
            .send()
            .await?;
        let envelope: ExtractionResponse = self.handle_response(response, "extract-receipt").await?;
        envelope.into_result().map_err(ClientError::Extraction)
    }

    /// Ask the report function for a CSV or JSON document.
    pub async fn generate_report(&self, request: &ReportRequest<'_>) -> Result<ReportPayload> {
        let response = self
            .client
            .post(self.url("/functions/v1/generate-report"))
            .json(request)
            .send()
            .await?;

        match request.format {
            ReportFormat::Csv => {
                let response = self.check_status(response, "generate-report").await?;
                Ok(ReportPayload::Csv(response.text().await?))
            }
            ReportFormat::Json => {
                let document = self.handle_response(response, "generate-report").await?;
                Ok(ReportPayload::Json(document))
            }
        }
    }
}

#[async_trait]
impl BackendServices for SparkReceiptClient {
    async fn upload_receipt(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        SparkReceiptClient::upload_receipt(self, file_name, bytes).await
    }

    async fn extract_receipt(&self, image: &[u8]) -> Result<ExtractedReceipt> {
        SparkReceiptClient::extract_receipt(self, image).await
    }

    async fn generate_report(&self, request: &ReportRequest<'_>) -> Result<ReportPayload> {
        SparkReceiptClient::generate_report(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::client_for;
    use chrono::NaiveDate;
    use serde_json::json;
    use sparkreceipt_core::storage::DateRange;
    use wiremock::matchers::{body_json, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_extract_receipt_sends_base64_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/functions/v1/extract-receipt"))
            .and(body_json(json!({ "imageBase64": "aGVsbG8=" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": { "merchant_name": "Blue Bottle", "total_amount": 6.5 }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let extracted = client.extract_receipt(b"hello").await.unwrap();
        assert_eq!(extracted.merchant_name.as_deref(), Some("Blue Bottle"));
        assert_eq!(extracted.total_amount, Some(6.5));
    }

    #[tokio::test]
    async fn test_extract_receipt_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/functions/v1/extract-receipt"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": false, "error": "No text found" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.extract_receipt(b"blank").await.unwrap_err();
        assert!(matches!(err, ClientError::Extraction(ref m) if m == "No text found"));
    }

    #[tokio::test]
    async fn test_generate_csv_report() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/functions/v1/generate-report"))
            .and(body_partial_json(json!({
                "format": "csv",
                "startDate": "2025-01-01",
                "endDate": "2025-01-31"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("Date,Amount\n"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = ReportRequest::new(ReportFormat::Csv, range(), Vec::new(), Vec::new());
        let payload = client.generate_report(&request).await.unwrap();
        assert_eq!(payload, ReportPayload::Csv("Date,Amount\n".to_string()));
    }

    #[tokio::test]
    async fn test_generate_json_report() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/functions/v1/generate-report"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "net": 12.5 })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = ReportRequest::new(ReportFormat::Json, range(), Vec::new(), Vec::new());
        let payload = client.generate_report(&request).await.unwrap();
        assert_eq!(payload, ReportPayload::Json(json!({ "net": 12.5 })));
    }
}
