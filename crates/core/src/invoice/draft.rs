use chrono::NaiveDate;
use uuid::Uuid;

use super::error::InvoiceError;
use super::line_items::{
    add_line_item, line_items_from_services, remove_line_item, update_line_item, LineItemField,
};
use super::numbering::generate_invoice_number;
use super::totals::InvoiceTotals;
use crate::records::{
    Client, Invoice, InvoicePatch, InvoiceStatus, InvoiceType, LineItem, NewInvoice,
};

/// Terms printed on new invoices.
pub const DEFAULT_TERMS: &str = "A non-refundable retainer of $250 is required to secure your date.\n\
Remaining balance due 14 days before event.\n\
Please be advised that personal and business checks are not accepted under any circumstances.\n\
Payment Methods: Cash | Zelle | Venmo | Cash App | PayPal.";

/// Payment methods accepted on new invoices.
pub const DEFAULT_PAYMENT_METHODS: [&str; 5] = ["Cash", "Zelle", "Venmo", "Cash App", "PayPal"];

/// An invoice being composed or edited.
///
/// Totals are derived from the line items and tax rate when the draft is
/// turned into an insert or patch payload.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    pub invoice_number: Option<String>,
    pub invoice_type: InvoiceType,
    pub client_id: Option<Uuid>,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub line_items: Vec<LineItem>,
    pub tax_rate: f64,
    pub notes: Option<String>,
    pub terms: Option<String>,
    amount_paid: f64,
    status: InvoiceStatus,
}

impl InvoiceDraft {
    pub fn new(invoice_type: InvoiceType, issue_date: NaiveDate) -> Self {
        Self {
            invoice_number: None,
            invoice_type,
            client_id: None,
            issue_date,
            due_date: None,
            line_items: Vec::new(),
            tax_rate: 0.0,
            notes: None,
            terms: Some(DEFAULT_TERMS.to_string()),
            amount_paid: 0.0,
            status: InvoiceStatus::Pending,
        }
    }

    /// Starts an edit of an existing invoice; payments made so far are kept.
    pub fn from_invoice(invoice: &Invoice) -> Self {
        Self {
            invoice_number: Some(invoice.invoice_number.clone()),
            invoice_type: invoice.invoice_type,
            client_id: invoice.client_id,
            issue_date: invoice.issue_date,
            due_date: invoice.due_date,
            line_items: invoice.line_items.clone(),
            tax_rate: invoice.tax_rate,
            notes: invoice.notes.clone(),
            terms: invoice.terms.clone(),
            amount_paid: invoice.amount_paid,
            status: invoice.status,
        }
    }

    /// Links the client; their booked services, if any, replace the line items.
    pub fn with_client(mut self, client: &Client) -> Self {
        self.client_id = Some(client.id);
        if !client.services_booked.is_empty() {
            self.line_items = line_items_from_services(&client.services_booked);
        }
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_tax_rate(mut self, tax_rate: f64) -> Result<Self, InvoiceError> {
        if tax_rate < 0.0 {
            return Err(InvoiceError::NegativeTaxRate(tax_rate));
        }
        self.tax_rate = tax_rate;
        Ok(self)
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_terms(mut self, terms: impl Into<String>) -> Self {
        self.terms = Some(terms.into());
        self
    }

    /// Adds a fully specified line.
    pub fn with_line(mut self, name: impl Into<String>, quantity: f64, rate: f64) -> Self {
        let index = add_line_item(&mut self.line_items);
        if let Some(item) = self.line_items.get_mut(index) {
            item.name = name.into();
            item.quantity = quantity;
            item.rate = rate;
            item.amount = quantity * rate;
        }
        self
    }

    pub fn add_line_item(&mut self) -> usize {
        add_line_item(&mut self.line_items)
    }

    pub fn update_line_item(
        &mut self,
        index: usize,
        field: LineItemField,
    ) -> Result<(), InvoiceError> {
        update_line_item(&mut self.line_items, index, field)
    }

    pub fn remove_line_item(&mut self, index: usize) -> Result<LineItem, InvoiceError> {
        remove_line_item(&mut self.line_items, index)
    }

    pub fn totals(&self) -> InvoiceTotals {
        InvoiceTotals::compute(&self.line_items, self.tax_rate, self.amount_paid)
    }

    /// Insert payload; a number is generated from the issue date when none is set.
    pub fn into_new(self) -> NewInvoice {
        let totals = self.totals();
        let invoice_number = self
            .invoice_number
            .unwrap_or_else(|| generate_invoice_number(self.invoice_type, self.issue_date));
        NewInvoice {
            invoice_number,
            invoice_type: self.invoice_type,
            client_id: self.client_id,
            issue_date: self.issue_date,
            due_date: self.due_date,
            line_items: self.line_items,
            subtotal: totals.subtotal,
            tax_rate: self.tax_rate,
            tax_amount: totals.tax_amount,
            total: totals.total,
            amount_paid: self.amount_paid,
            balance_due: totals.balance_due,
            status: self.status,
            notes: self.notes,
            terms: self.terms,
            payment_methods: DEFAULT_PAYMENT_METHODS.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Patch payload for saving an edited invoice. The stored status is kept.
    pub fn into_patch(self) -> InvoicePatch {
        let totals = self.totals();
        InvoicePatch {
            invoice_number: self.invoice_number,
            invoice_type: Some(self.invoice_type),
            client_id: self.client_id,
            issue_date: Some(self.issue_date),
            due_date: self.due_date,
            line_items: Some(self.line_items),
            subtotal: Some(totals.subtotal),
            tax_rate: Some(self.tax_rate),
            tax_amount: Some(totals.tax_amount),
            total: Some(totals.total),
            amount_paid: Some(self.amount_paid),
            balance_due: Some(totals.balance_due),
            status: Some(self.status),
            notes: self.notes,
            terms: self.terms,
            payment_methods: None,
        }
    }
}
