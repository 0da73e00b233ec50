use chrono::NaiveDate;
use sparkreceipt_core::functions::expense_from_extraction;
use sparkreceipt_core::records::{validate_expense, NewExpense};
use sparkreceipt_core::storage::RecordStore;

use super::Session;
use crate::error::Result;
use crate::services::BackendServices;

impl<S: RecordStore> Session<S> {
    /// Uploads a receipt image, reads it, and returns the expense for review.
    ///
    /// Nothing is saved; pass the (possibly edited) result to
    /// [`Session::add_expense`].
    pub async fn scan_receipt<B: BackendServices>(
        &self,
        services: &B,
        file_name: &str,
        image: Vec<u8>,
        today: NaiveDate,
    ) -> Result<NewExpense> {
        let receipt_url = services
            .upload_receipt(file_name, image.clone())
            .await
            .inspect_err(|e| {
                tracing::error!(%file_name, error = %e, "Failed to upload receipt")
            })?;

        let extracted = services
            .extract_receipt(&image)
            .await
            .inspect_err(|e| {
                tracing::error!(%file_name, error = %e, "Failed to extract receipt")
            })?;

        let draft = expense_from_extraction(extracted, Some(receipt_url), self.categories(), today);
        validate_expense(&draft)?;

        tracing::info!(
            %file_name,
            merchant = draft.merchant_name.as_deref().unwrap_or("-"),
            total = draft.total_amount,
            "Receipt scanned"
        );
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::services::BackendServices;
    use crate::session::test_support::empty_session;
    use async_trait::async_trait;
    use sparkreceipt_core::functions::{ExtractedReceipt, ReportPayload, ReportRequest};
    use sparkreceipt_core::records::{NewExpenseCategory, ReviewStatus};
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScanStub {
        extracted: Option<ExtractedReceipt>,
        uploads: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl BackendServices for ScanStub {
        async fn upload_receipt(&self, file_name: &str, _bytes: Vec<u8>) -> Result<String> {
            self.uploads.lock().unwrap().push(file_name.to_string());
            Ok(format!("https://files.example.com/receipts/1-{file_name}"))
        }

        async fn extract_receipt(&self, _image: &[u8]) -> Result<ExtractedReceipt> {
            self.extracted
                .clone()
                .ok_or_else(|| ClientError::Extraction("Failed to extract receipt data".into()))
        }

        async fn generate_report(&self, _request: &ReportRequest<'_>) -> Result<ReportPayload> {
            unreachable!("scanning never generates reports")
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 4).unwrap()
    }

    #[tokio::test]
    async fn test_scan_builds_reviewable_expense() {
        let mut session = empty_session().await;
        let meals = session
            .add_category(NewExpenseCategory::expense("Meals").with_irs_category("Meals"))
            .await
            .unwrap();

        let stub = ScanStub {
            extracted: Some(ExtractedReceipt {
                merchant_name: Some("Taqueria".to_string()),
                total_amount: Some(23.75),
                category_suggestion: Some("meals".to_string()),
                confidence: Some(0.88),
                ..ExtractedReceipt::default()
            }),
            ..ScanStub::default()
        };

        let draft = session
            .scan_receipt(&stub, "taco.jpg", vec![1, 2, 3], today())
            .await
            .unwrap();

        assert_eq!(stub.uploads.lock().unwrap().as_slice(), ["taco.jpg"]);
        assert_eq!(
            draft.receipt_url.as_deref(),
            Some("https://files.example.com/receipts/1-taco.jpg")
        );
        assert_eq!(draft.category_id, Some(meals.id));
        assert_eq!(draft.transaction_date, Some(today()));
        assert_eq!(draft.review_status, ReviewStatus::Approved);
        assert!(session.expenses().is_empty());

        let saved = session.add_expense(draft).await.unwrap();
        assert!(saved.has_receipt());
        assert_eq!(session.expenses().len(), 1);
    }

    #[tokio::test]
    async fn test_scan_surfaces_extraction_failure() {
        let session = empty_session().await;
        let err = session
            .scan_receipt(&ScanStub::default(), "blur.jpg", vec![0], today())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_scan_rejects_out_of_range_confidence() {
        let session = empty_session().await;
        let stub = ScanStub {
            extracted: Some(ExtractedReceipt {
                total_amount: Some(5.0),
                confidence: Some(1.7),
                ..ExtractedReceipt::default()
            }),
            ..ScanStub::default()
        };
        let err = session
            .scan_receipt(&stub, "odd.jpg", vec![0], today())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }
}
