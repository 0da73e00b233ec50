use serde::{Deserialize, Serialize};

use super::line_items::subtotal;
use crate::records::{Invoice, InvoiceStatus, LineItem};

/// Derived money fields of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
    pub balance_due: f64,
}

impl InvoiceTotals {
    /// Computes totals from line items, a percentage tax rate and the amount
    /// already paid.
    pub fn compute(items: &[LineItem], tax_rate: f64, amount_paid: f64) -> Self {
        let subtotal = subtotal(items);
        let tax_amount = subtotal * tax_rate / 100.0;
        let total = subtotal + tax_amount;
        Self {
            subtotal,
            tax_amount,
            total,
            balance_due: total - amount_paid,
        }
    }

    pub fn of(invoice: &Invoice) -> Self {
        Self::compute(&invoice.line_items, invoice.tax_rate, invoice.amount_paid)
    }
}

/// Status implied by the amounts on an invoice.
pub fn status_for(total: f64, amount_paid: f64) -> InvoiceStatus {
    if total - amount_paid <= 0.0 {
        InvoiceStatus::Paid
    } else if amount_paid > 0.0 {
        InvoiceStatus::Partial
    } else {
        InvoiceStatus::Pending
    }
}
