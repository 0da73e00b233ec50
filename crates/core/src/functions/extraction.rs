use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::records::{
    find_category_by_name, ExpenseCategory, LineItem, NewExpense, ReceiptType, ReviewStatus,
    DEFAULT_CURRENCY,
};
use crate::serde::{
    deserialize_null_default, deserialize_optional_date, deserialize_optional_string,
};

/// Country recorded when extraction does not report one.
pub const DEFAULT_COUNTRY: &str = "US";

/// Payment method recorded when extraction does not report one.
pub const DEFAULT_PAYMENT_METHOD: &str = "other";

/// Body sent to the receipt extraction function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRequest {
    /// Base64-encoded image bytes, without a data-URL prefix.
    pub image_base64: String,
}

/// Envelope returned by the receipt extraction function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<ExtractedReceipt>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub error: Option<String>,
}

impl ExtractionResponse {
    /// The extracted fields, or the reported failure message.
    pub fn into_result(self) -> Result<ExtractedReceipt, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self
                .error
                .unwrap_or_else(|| "Failed to extract receipt data".to_string())),
        }
    }
}

/// Fields read off a receipt image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedReceipt {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub merchant_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub transaction_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub tax_amount: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub payment_method: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category_suggestion: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub irs_category: Option<String>,
    #[serde(default)]
    pub is_tax_deductible: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub receipt_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub line_items: Vec<LineItem>,
    /// Model confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub raw_response: Option<serde_json::Value>,
}

/// Builds the expense to save from an extraction result.
///
/// Missing fields fall back to: today's date, payment method "other",
/// USD/US, not tax deductible. The suggested category is resolved to a known
/// category id when one matches by name. Scanned expenses are saved approved.
pub fn expense_from_extraction(
    extracted: ExtractedReceipt,
    receipt_url: Option<String>,
    categories: &[ExpenseCategory],
    today: NaiveDate,
) -> NewExpense {
    let category = extracted
        .category_suggestion
        .as_deref()
        .and_then(|name| find_category_by_name(categories, name));

    let irs_category = extracted
        .irs_category
        .or_else(|| category.and_then(|c| c.irs_category.clone()));

    NewExpense {
        merchant_name: extracted.merchant_name,
        transaction_date: Some(extracted.transaction_date.unwrap_or(today)),
        category_id: category.map(|c| c.id),
        category_name: category
            .map(|c| c.name.clone())
            .or(extracted.category_suggestion),
        total_amount: extracted.total_amount.unwrap_or(0.0),
        tax_amount: Some(extracted.tax_amount.unwrap_or(0.0)),
        currency: extracted
            .currency
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        country: Some(
            extracted
                .country
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
        ),
        payment_method: Some(
            extracted
                .payment_method
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
        ),
        client_id: None,
        notes: None,
        is_tax_deductible: extracted.is_tax_deductible.unwrap_or(false),
        is_business: true,
        irs_category,
        receipt_type: extracted
            .receipt_type
            .as_deref()
            .map(ReceiptType::from_label)
            .unwrap_or_default(),
        review_status: ReviewStatus::Approved,
        line_items: extracted.line_items,
        receipt_url,
        ai_confidence: extracted.confidence,
        ai_raw_response: extracted.raw_response,
        tags: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::CategoryKind;
    use uuid::Uuid;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_request_body_uses_camel_case() {
        let body = serde_json::to_value(ExtractionRequest {
            image_base64: "aGVsbG8=".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "imageBase64": "aGVsbG8=" }));
    }

    #[test]
    fn test_response_failure_message() {
        let response: ExtractionResponse =
            serde_json::from_str(r#"{"success": false, "error": "Image too blurry"}"#).unwrap();
        assert_eq!(response.into_result(), Err("Image too blurry".to_string()));

        let response: ExtractionResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(
            response.into_result(),
            Err("Failed to extract receipt data".to_string())
        );
    }

    #[test]
    fn test_expense_from_full_extraction() {
        let category = ExpenseCategory {
            id: Uuid::new_v4(),
            name: "Office Supplies".to_string(),
            kind: CategoryKind::Expense,
            color: None,
            icon: None,
            irs_category: Some("Supplies".to_string()),
            is_default: true,
        };
        let response: ExtractionResponse = serde_json::from_value(serde_json::json!({
            "success": true,
            "data": {
                "merchant_name": "Staples",
                "transaction_date": "2025-02-14",
                "total_amount": 54.2,
                "tax_amount": 4.2,
                "currency": "CAD",
                "country": "CA",
                "payment_method": "credit",
                "category_suggestion": "office supplies",
                "is_tax_deductible": true,
                "receipt_type": "invoice",
                "line_items": [{ "name": "Paper", "quantity": 2, "rate": 25, "amount": 50 }],
                "confidence": 0.93,
                "raw_response": { "model": "vision" }
            }
        }))
        .unwrap();

        let extracted = response.into_result().unwrap();
        let expense = expense_from_extraction(
            extracted,
            Some("https://cdn.example.com/receipts/1.jpg".to_string()),
            &[category.clone()],
            make_date(2025, 3, 1),
        );

        assert_eq!(expense.merchant_name.as_deref(), Some("Staples"));
        assert_eq!(expense.transaction_date, Some(make_date(2025, 2, 14)));
        assert_eq!(expense.category_id, Some(category.id));
        assert_eq!(expense.category_name.as_deref(), Some("Office Supplies"));
        assert_eq!(expense.irs_category.as_deref(), Some("Supplies"));
        assert_eq!(expense.currency, "CAD");
        assert_eq!(expense.receipt_type, ReceiptType::Invoice);
        assert_eq!(expense.review_status, ReviewStatus::Approved);
        assert_eq!(expense.line_items.len(), 1);
        assert_eq!(expense.ai_confidence, Some(0.93));
        assert!(expense.receipt_url.is_some());
        assert!(expense.is_tax_deductible);
    }

    #[test]
    fn test_expense_from_sparse_extraction_uses_defaults() {
        let today = make_date(2025, 3, 1);
        let expense = expense_from_extraction(
            ExtractedReceipt {
                total_amount: Some(9.99),
                category_suggestion: Some("Snacks".to_string()),
                ..ExtractedReceipt::default()
            },
            None,
            &[],
            today,
        );

        assert_eq!(expense.transaction_date, Some(today));
        assert_eq!(expense.payment_method.as_deref(), Some("other"));
        assert_eq!(expense.currency, "USD");
        assert_eq!(expense.country.as_deref(), Some("US"));
        assert_eq!(expense.tax_amount, Some(0.0));
        assert_eq!(expense.category_id, None);
        assert_eq!(expense.category_name.as_deref(), Some("Snacks"));
        assert_eq!(expense.receipt_type, ReceiptType::Receipt);
        assert!(!expense.is_tax_deductible);
        assert!(expense.is_business);
    }
}
