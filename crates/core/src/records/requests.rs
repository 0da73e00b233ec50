//! Insert and patch payloads for every record type.
//!
//! `New*` types are what gets inserted (the store assigns `id` and
//! timestamps). `*Patch` types carry only the fields being changed; absent
//! fields are not serialized, so the store leaves them untouched.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{
    BusinessProfile, CalendarEvent, CategoryKind, Client, EventStatus, Expense, ExpenseCategory,
    IncomeEntry, Invoice, InvoiceStatus, InvoiceType, LineItem, Payment, PaymentStatus,
    ReceiptType, ReviewStatus, ServiceItem, DEFAULT_CURRENCY, DEFAULT_EVENT_COLOR,
};
use crate::storage::{Collection, Record};

// ---------------------------------------------------------------------------
// Business profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewBusinessProfile {
    pub business_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl BusinessProfilePatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn apply_to(self, profile: &mut BusinessProfile) {
        if let Some(business_name) = self.business_name {
            profile.business_name = business_name;
        }
        set_some(&mut profile.address, self.address);
        set_some(&mut profile.city, self.city);
        set_some(&mut profile.state, self.state);
        set_some(&mut profile.zip, self.zip);
        set_some(&mut profile.phone, self.phone);
        set_some(&mut profile.email, self.email);
        set_some(&mut profile.website, self.website);
        set_some(&mut profile.logo_url, self.logo_url);
    }
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceremony_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub services_booked: Vec<ServiceItem>,
    #[serde(default)]
    pub contract_amount: f64,
    #[serde(default)]
    pub balance_due: f64,
    #[serde(default)]
    pub payment_status: PaymentStatus,
}

impl NewClient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_event(mut self, event_date: NaiveDate, event_type: impl Into<String>) -> Self {
        self.event_date = Some(event_date);
        self.event_type = Some(event_type.into());
        self
    }

    /// Books services; the contract amount and opening balance follow their sum.
    pub fn with_services(mut self, services: Vec<ServiceItem>) -> Self {
        let total: f64 = services.iter().map(|s| s.amount).sum();
        self.services_booked = services;
        self.contract_amount = total;
        self.balance_due = total;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceremony_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services_booked: Option<Vec<ServiceItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_due: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

impl ClientPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Changes the contract; the balance becomes what is left after the
    /// client's payments so far.
    pub fn with_contract_amount(mut self, contract_amount: f64, client: &Client) -> Self {
        self.contract_amount = Some(contract_amount);
        self.balance_due = Some(contract_amount - client.amount_paid);
        self
    }

    pub fn apply_to(self, client: &mut Client) {
        if let Some(name) = self.name {
            client.name = name;
        }
        set_some(&mut client.email, self.email);
        set_some(&mut client.phone, self.phone);
        set_some(&mut client.address, self.address);
        set_some(&mut client.city, self.city);
        set_some(&mut client.state, self.state);
        set_some(&mut client.zip, self.zip);
        set_some(&mut client.event_date, self.event_date);
        set_some(&mut client.event_type, self.event_type);
        set_some(&mut client.venue, self.venue);
        set_some(&mut client.ceremony_time, self.ceremony_time);
        set_some(&mut client.notes, self.notes);
        if let Some(services) = self.services_booked {
            client.services_booked = services;
        }
        if let Some(contract_amount) = self.contract_amount {
            client.contract_amount = contract_amount;
        }
        if let Some(amount_paid) = self.amount_paid {
            client.amount_paid = amount_paid;
        }
        if let Some(balance_due) = self.balance_due {
            client.balance_due = balance_due;
        }
        if let Some(payment_status) = self.payment_status {
            client.payment_status = payment_status;
        }
    }
}

// ---------------------------------------------------------------------------
// Invoices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvoice {
    pub invoice_number: String,
    pub invoice_type: InvoiceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    pub issue_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub line_items: Vec<LineItem>,
    pub subtotal: f64,
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub total: f64,
    pub amount_paid: f64,
    pub balance_due: f64,
    pub status: InvoiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    pub payment_methods: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoicePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_type: Option<InvoiceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<LineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_due: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_methods: Option<Vec<String>>,
}

impl InvoicePatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn apply_to(self, invoice: &mut Invoice) {
        if let Some(invoice_number) = self.invoice_number {
            invoice.invoice_number = invoice_number;
        }
        if let Some(invoice_type) = self.invoice_type {
            invoice.invoice_type = invoice_type;
        }
        set_some(&mut invoice.client_id, self.client_id);
        if let Some(issue_date) = self.issue_date {
            invoice.issue_date = issue_date;
        }
        set_some(&mut invoice.due_date, self.due_date);
        if let Some(line_items) = self.line_items {
            invoice.line_items = line_items;
        }
        if let Some(subtotal) = self.subtotal {
            invoice.subtotal = subtotal;
        }
        if let Some(tax_rate) = self.tax_rate {
            invoice.tax_rate = tax_rate;
        }
        if let Some(tax_amount) = self.tax_amount {
            invoice.tax_amount = tax_amount;
        }
        if let Some(total) = self.total {
            invoice.total = total;
        }
        if let Some(amount_paid) = self.amount_paid {
            invoice.amount_paid = amount_paid;
        }
        if let Some(balance_due) = self.balance_due {
            invoice.balance_due = balance_due;
        }
        if let Some(status) = self.status {
            invoice.status = status;
        }
        set_some(&mut invoice.notes, self.notes);
        set_some(&mut invoice.terms, self.terms);
        if let Some(payment_methods) = self.payment_methods {
            invoice.payment_methods = payment_methods;
        }
    }
}

// ---------------------------------------------------------------------------
// Expenses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<f64>,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_tax_deductible: bool,
    pub is_business: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irs_category: Option<String>,
    pub receipt_type: ReceiptType,
    pub review_status: ReviewStatus,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_raw_response: Option<serde_json::Value>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewExpense {
    /// A manually entered business expense (approved, tax deductible, USD/US).
    pub fn manual(total_amount: f64, transaction_date: NaiveDate) -> Self {
        Self {
            merchant_name: None,
            transaction_date: Some(transaction_date),
            category_id: None,
            category_name: None,
            total_amount,
            tax_amount: Some(0.0),
            currency: DEFAULT_CURRENCY.to_string(),
            country: Some("US".to_string()),
            payment_method: Some("credit".to_string()),
            client_id: None,
            notes: None,
            is_tax_deductible: true,
            is_business: true,
            irs_category: None,
            receipt_type: ReceiptType::Receipt,
            review_status: ReviewStatus::Approved,
            line_items: Vec::new(),
            receipt_url: None,
            ai_confidence: None,
            ai_raw_response: None,
            tags: Vec::new(),
        }
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant_name = Some(merchant.into());
        self
    }

    pub fn with_category(mut self, category: &ExpenseCategory) -> Self {
        self.category_id = Some(category.id);
        self.category_name = Some(category.name.clone());
        if self.irs_category.is_none() {
            self.irs_category = category.irs_category.clone();
        }
        self
    }

    pub fn with_category_name(mut self, name: impl Into<String>) -> Self {
        self.category_name = Some(name.into());
        self
    }

    pub fn with_tax(mut self, tax_amount: f64) -> Self {
        self.tax_amount = Some(tax_amount);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpensePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_tax_deductible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irs_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_status: Option<ReviewStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Patch that only changes the review status.
    pub fn review(status: ReviewStatus) -> Self {
        Self {
            review_status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply_to(self, expense: &mut Expense) {
        set_some(&mut expense.merchant_name, self.merchant_name);
        set_some(&mut expense.transaction_date, self.transaction_date);
        set_some(&mut expense.category_id, self.category_id);
        set_some(&mut expense.category_name, self.category_name);
        if let Some(total_amount) = self.total_amount {
            expense.total_amount = total_amount;
        }
        set_some(&mut expense.tax_amount, self.tax_amount);
        set_some(&mut expense.payment_method, self.payment_method);
        set_some(&mut expense.client_id, self.client_id);
        set_some(&mut expense.notes, self.notes);
        if let Some(deductible) = self.is_tax_deductible {
            expense.is_tax_deductible = deductible;
        }
        set_some(&mut expense.irs_category, self.irs_category);
        if let Some(review_status) = self.review_status {
            expense.review_status = review_status;
        }
        if let Some(tags) = self.tags {
            expense.tags = tags;
        }
    }
}

// ---------------------------------------------------------------------------
// Income
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewIncomeEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
}

impl NewIncomeEntry {
    pub fn new(amount: f64, income_date: NaiveDate) -> Self {
        Self {
            amount,
            income_date: Some(income_date),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_client(mut self, client_id: Uuid) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn with_invoice(mut self, invoice_id: Uuid) -> Self {
        self.invoice_id = Some(invoice_id);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeEntryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
}

impl IncomeEntryPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn apply_to(self, entry: &mut IncomeEntry) {
        set_some(&mut entry.description, self.description);
        set_some(&mut entry.source_name, self.source_name);
        if let Some(amount) = self.amount {
            entry.amount = amount;
        }
        set_some(&mut entry.income_date, self.income_date);
        set_some(&mut entry.category, self.category);
        set_some(&mut entry.client_id, self.client_id);
        set_some(&mut entry.invoice_id, self.invoice_id);
        set_some(&mut entry.payment_method, self.payment_method);
        set_some(&mut entry.notes, self.notes);
        if let Some(is_recurring) = self.is_recurring {
            entry.is_recurring = is_recurring;
        }
    }
}

// ---------------------------------------------------------------------------
// Calendar events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCalendarEvent {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub event_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub color: String,
    pub is_payment_due: bool,
    pub status: EventStatus,
}

impl NewCalendarEvent {
    pub fn new(title: impl Into<String>, event_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: None,
            event_date,
            start_time: None,
            end_time: None,
            event_type: Some("Event".to_string()),
            client_id: None,
            location: None,
            color: DEFAULT_EVENT_COLOR.to_string(),
            is_payment_due: false,
            status: EventStatus::Scheduled,
        }
    }

    pub fn with_times(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_client(mut self, client_id: Uuid) -> Self {
        self.client_id = Some(client_id);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarEventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_payment_due: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
}

impl CalendarEventPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn apply_to(self, event: &mut CalendarEvent) {
        if let Some(title) = self.title {
            event.title = title;
        }
        set_some(&mut event.description, self.description);
        if let Some(event_date) = self.event_date {
            event.event_date = event_date;
        }
        set_some(&mut event.start_time, self.start_time);
        set_some(&mut event.end_time, self.end_time);
        set_some(&mut event.event_type, self.event_type);
        set_some(&mut event.client_id, self.client_id);
        set_some(&mut event.location, self.location);
        if let Some(color) = self.color {
            event.color = color;
        }
        if let Some(is_payment_due) = self.is_payment_due {
            event.is_payment_due = is_payment_due;
        }
        if let Some(status) = self.status {
            event.status = status;
        }
    }
}

// ---------------------------------------------------------------------------
// Expense categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpenseCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irs_category: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

impl NewExpenseCategory {
    pub fn expense(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: CategoryKind::Expense,
            color: None,
            icon: None,
            irs_category: None,
            is_default: false,
        }
    }

    pub fn with_irs_category(mut self, irs_category: impl Into<String>) -> Self {
        self.irs_category = Some(irs_category.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCategoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irs_category: Option<String>,
}

impl ExpenseCategoryPatch {
    pub fn apply_to(self, category: &mut ExpenseCategory) {
        if let Some(name) = self.name {
            category.name = name;
        }
        set_some(&mut category.color, self.color);
        set_some(&mut category.icon, self.icon);
        set_some(&mut category.irs_category, self.irs_category);
    }
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    pub amount: f64,
    pub payment_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewPayment {
    /// A payment against an invoice, carrying the invoice's client.
    pub fn for_invoice(invoice: &Invoice, amount: f64, payment_date: NaiveDate) -> Self {
        Self {
            invoice_id: Some(invoice.id),
            client_id: invoice.client_id,
            amount,
            payment_date,
            payment_method: None,
            reference: None,
            notes: None,
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PaymentPatch {
    pub fn apply_to(self, payment: &mut Payment) {
        if let Some(amount) = self.amount {
            payment.amount = amount;
        }
        if let Some(payment_date) = self.payment_date {
            payment.payment_date = payment_date;
        }
        set_some(&mut payment.payment_method, self.payment_method);
        set_some(&mut payment.reference, self.reference);
        set_some(&mut payment.notes, self.notes);
    }
}

fn set_some<T>(slot: &mut Option<T>, value: Option<T>) {
    if let Some(value) = value {
        *slot = Some(value);
    }
}

// ---------------------------------------------------------------------------
// Record bindings
// ---------------------------------------------------------------------------

impl Record for BusinessProfile {
    type New = NewBusinessProfile;
    type Patch = BusinessProfilePatch;
    const COLLECTION: Collection = Collection::BusinessProfile;

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        patch.apply_to(self);
    }
}

impl Record for Client {
    type New = NewClient;
    type Patch = ClientPatch;
    const COLLECTION: Collection = Collection::Clients;

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        patch.apply_to(self);
    }
}

impl Record for Invoice {
    type New = NewInvoice;
    type Patch = InvoicePatch;
    const COLLECTION: Collection = Collection::Invoices;

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        patch.apply_to(self);
    }
}

impl Record for Expense {
    type New = NewExpense;
    type Patch = ExpensePatch;
    const COLLECTION: Collection = Collection::Expenses;

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        patch.apply_to(self);
    }
}

impl Record for IncomeEntry {
    type New = NewIncomeEntry;
    type Patch = IncomeEntryPatch;
    const COLLECTION: Collection = Collection::IncomeEntries;

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        patch.apply_to(self);
    }
}

impl Record for CalendarEvent {
    type New = NewCalendarEvent;
    type Patch = CalendarEventPatch;
    const COLLECTION: Collection = Collection::Events;

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        patch.apply_to(self);
    }
}

impl Record for ExpenseCategory {
    type New = NewExpenseCategory;
    type Patch = ExpenseCategoryPatch;
    const COLLECTION: Collection = Collection::ExpenseCategories;

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        patch.apply_to(self);
    }
}

impl Record for Payment {
    type New = NewPayment;
    type Patch = PaymentPatch;
    const COLLECTION: Collection = Collection::Payments;

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        patch.apply_to(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn service(name: &str, quantity: f64, rate: f64) -> ServiceItem {
        LineItem {
            name: name.to_string(),
            description: None,
            quantity,
            rate,
            amount: quantity * rate,
        }
    }

    #[test]
    fn test_new_client_services_set_contract() {
        let client = NewClient::new("Ana Ruiz")
            .with_email("ana@example.com")
            .with_services(vec![service("DJ", 1.0, 1200.0), service("Uplights", 10.0, 25.0)]);

        assert_eq!(client.contract_amount, 1450.0);
        assert_eq!(client.balance_due, 1450.0);
        assert_eq!(client.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = ExpensePatch::review(ReviewStatus::Rejected);
        let value = serde_json::to_value(&patch).unwrap();

        assert_eq!(value, serde_json::json!({ "review_status": "rejected" }));
        assert!(!patch.is_empty());
        assert!(ExpensePatch::default().is_empty());
    }

    #[test]
    fn test_client_patch_leaves_absent_fields() {
        let mut client: Client = serde_json::from_value(serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "name": "Ana",
            "email": "ana@example.com",
            "phone": "555-0100"
        }))
        .unwrap();

        ClientPatch {
            phone: Some("555-0199".to_string()),
            ..ClientPatch::default()
        }
        .apply_to(&mut client);

        assert_eq!(client.name, "Ana");
        assert_eq!(client.email.as_deref(), Some("ana@example.com"));
        assert_eq!(client.phone.as_deref(), Some("555-0199"));
    }

    #[test]
    fn test_contract_change_moves_balance_due() {
        let mut client: Client = serde_json::from_value(serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000002",
            "name": "Ben",
            "contract_amount": 1000.0,
            "amount_paid": 250.0,
            "balance_due": 750.0
        }))
        .unwrap();

        let patch = ClientPatch::default().with_contract_amount(1400.0, &client);
        assert_eq!(patch.balance_due, Some(1150.0));

        patch.apply_to(&mut client);
        assert_eq!(client.contract_amount, 1400.0);
        assert_eq!(client.amount_paid, 250.0);
        assert_eq!(client.balance_due, 1150.0);
    }

    #[test]
    fn test_invoice_patch_apply() {
        let mut invoice: Invoice = serde_json::from_value(serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000010",
            "invoice_number": "01-02-2025-INV-ABCD",
            "issue_date": "2025-01-02",
            "total": 500.0,
            "balance_due": 500.0
        }))
        .unwrap();

        invoice.apply_patch(InvoicePatch {
            amount_paid: Some(200.0),
            balance_due: Some(300.0),
            status: Some(InvoiceStatus::Partial),
            ..InvoicePatch::default()
        });

        assert_eq!(invoice.amount_paid, 200.0);
        assert_eq!(invoice.balance_due, 300.0);
        assert_eq!(invoice.status, InvoiceStatus::Partial);
        assert_eq!(invoice.total, 500.0);
    }

    #[test]
    fn test_new_expense_with_category_copies_irs_label() {
        let category = ExpenseCategory {
            id: Uuid::new_v4(),
            name: "Meals".to_string(),
            kind: CategoryKind::Expense,
            color: None,
            icon: None,
            irs_category: Some("Meals".to_string()),
            is_default: true,
        };
        let expense = NewExpense::manual(18.5, make_date(2025, 2, 3))
            .with_merchant("Cafe Luna")
            .with_category(&category);

        assert_eq!(expense.category_id, Some(category.id));
        assert_eq!(expense.category_name.as_deref(), Some("Meals"));
        assert_eq!(expense.irs_category.as_deref(), Some("Meals"));
        assert_eq!(expense.review_status, ReviewStatus::Approved);
    }

    #[test]
    fn test_new_event_defaults() {
        let event = NewCalendarEvent::new("Consultation", make_date(2025, 4, 1));
        assert_eq!(event.color, DEFAULT_EVENT_COLOR);
        assert_eq!(event.event_type.as_deref(), Some("Event"));
        assert!(!event.is_payment_due);
    }

    #[test]
    fn test_collection_bindings() {
        assert_eq!(Invoice::COLLECTION, Collection::Invoices);
        assert_eq!(IncomeEntry::COLLECTION, Collection::IncomeEntries);
        assert_eq!(BusinessProfile::COLLECTION, Collection::BusinessProfile);
    }
}
