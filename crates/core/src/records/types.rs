use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::serde::{
    deserialize_null_default, deserialize_optional_date, deserialize_optional_string,
    deserialize_optional_time,
};

/// Default accent color for calendar events.
pub const DEFAULT_EVENT_COLOR: &str = "#8B5CF6";

/// Currency used when none is recorded.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Label used for expenses with no category.
pub const UNCATEGORIZED: &str = "Uncategorized";

fn default_event_color() -> String {
    DEFAULT_EVENT_COLOR.to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_true() -> bool {
    true
}

fn default_quantity() -> f64 {
    1.0
}

/// Kind of billable document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceType {
    #[default]
    Invoice,
    Quote,
    Receipt,
}

impl InvoiceType {
    /// Suffix used in generated document numbers.
    pub fn number_suffix(&self) -> &'static str {
        match self {
            InvoiceType::Invoice => "INV",
            InvoiceType::Quote => "Q",
            InvoiceType::Receipt => "R",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InvoiceType::Invoice => "invoice",
            InvoiceType::Quote => "quote",
            InvoiceType::Receipt => "receipt",
        }
    }
}

/// Payment status of an invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Partial,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    /// Pending and partially paid invoices count as outstanding.
    pub fn is_outstanding(&self) -> bool {
        matches!(self, InvoiceStatus::Pending | InvoiceStatus::Partial)
    }

    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Partial => "partial",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }
}

/// Payment status tracked on a client's contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Partial,
    Paid,
}

impl PaymentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Paid => "paid",
        }
    }
}

/// Review state of a scanned or entered expense.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

/// Kind of source document behind an expense.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptType {
    #[default]
    Receipt,
    Invoice,
    Bill,
    Other,
}

impl ReceiptType {
    /// Maps a free-form label (as returned by extraction) to a receipt type.
    /// Unknown labels fall back to `Receipt`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "invoice" => ReceiptType::Invoice,
            "bill" => ReceiptType::Bill,
            "other" => ReceiptType::Other,
            _ => ReceiptType::Receipt,
        }
    }
}

/// Lifecycle state of a calendar event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

/// Whether a category classifies expenses or income.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    #[default]
    Expense,
    Income,
}

/// A billable line on an invoice, a booked client service, or an itemized
/// receipt line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub amount: f64,
}

/// Services booked by a client share the line item shape.
pub type ServiceItem = LineItem;

/// The single business profile of the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub id: Uuid,
    #[serde(default)]
    pub business_name: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub zip: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A customer, usually booked for a dated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub zip: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub event_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub venue: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub ceremony_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub services_booked: Vec<ServiceItem>,
    #[serde(default)]
    pub contract_amount: f64,
    #[serde(default)]
    pub amount_paid: f64,
    #[serde(default)]
    pub balance_due: f64,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// An invoice, quote or payment receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub invoice_number: String,
    #[serde(default)]
    pub invoice_type: InvoiceType,
    #[serde(default)]
    pub client_id: Option<Uuid>,
    pub issue_date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax_rate: f64,
    #[serde(default)]
    pub tax_amount: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub amount_paid: f64,
    #[serde(default)]
    pub balance_due: f64,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub terms: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub payment_methods: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A recorded purchase, optionally backed by a scanned receipt image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub merchant_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub transaction_date: Option<NaiveDate>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category_name: Option<String>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub tax_amount: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub client_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_tax_deductible: bool,
    #[serde(default = "default_true")]
    pub is_business: bool,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub irs_category: Option<String>,
    #[serde(default)]
    pub receipt_type: ReceiptType,
    #[serde(default)]
    pub review_status: ReviewStatus,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub line_items: Vec<LineItem>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub receipt_url: Option<String>,
    /// Extraction confidence in `[0, 1]`.
    #[serde(default)]
    pub ai_confidence: Option<f64>,
    #[serde(default)]
    pub ai_raw_response: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Expense {
    /// Category label used for grouping.
    pub fn category_label(&self) -> &str {
        self.category_name.as_deref().unwrap_or(UNCATEGORIZED)
    }

    /// Tax portion, zero when not recorded.
    pub fn tax(&self) -> f64 {
        self.tax_amount.unwrap_or(0.0)
    }

    /// True when a receipt image is attached.
    pub fn has_receipt(&self) -> bool {
        self.receipt_url.is_some()
    }
}

/// Money received, optionally linked to a client and invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub id: Uuid,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub source_name: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub income_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
    #[serde(default)]
    pub client_id: Option<Uuid>,
    #[serde(default)]
    pub invoice_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub payment_method: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A dated calendar event (booking, meeting, reminder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    pub event_date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_optional_time")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "deserialize_optional_time")]
    pub end_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub client_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub location: Option<String>,
    #[serde(default = "default_event_color")]
    pub color: String,
    #[serde(default)]
    pub is_payment_due: bool,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A classification for expenses (or income) with an optional IRS mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: CategoryKind,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub irs_category: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// A payment received against an invoice or client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    #[serde(default)]
    pub invoice_id: Option<Uuid>,
    #[serde(default)]
    pub client_id: Option<Uuid>,
    pub amount: f64,
    pub payment_date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub payment_method: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub reference: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
