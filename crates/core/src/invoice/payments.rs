use chrono::NaiveDate;

use super::error::InvoiceError;
use super::totals::status_for;
use crate::records::{Invoice, InvoicePatch, InvoiceStatus};

/// Computes the invoice update for a payment of `amount`.
///
/// `amount_paid` grows by `amount`, `balance_due` becomes `total - amount_paid`
/// and the status follows: paid once nothing is left, partial while something
/// has been paid, pending otherwise.
pub fn apply_payment(invoice: &Invoice, amount: f64) -> Result<InvoicePatch, InvoiceError> {
    if amount <= 0.0 || amount.is_nan() {
        return Err(InvoiceError::NonPositivePayment(amount));
    }

    let amount_paid = invoice.amount_paid + amount;
    let balance_due = invoice.total - amount_paid;

    Ok(InvoicePatch {
        amount_paid: Some(amount_paid),
        balance_due: Some(balance_due),
        status: Some(status_for(invoice.total, amount_paid)),
        ..InvoicePatch::default()
    })
}

/// An unpaid invoice whose due date has passed.
pub fn is_overdue(invoice: &Invoice, today: NaiveDate) -> bool {
    invoice.status != InvoiceStatus::Paid && invoice.due_date.is_some_and(|due| due < today)
}

/// Status to display: stored status, or overdue when the due date has passed.
pub fn effective_status(invoice: &Invoice, today: NaiveDate) -> InvoiceStatus {
    if is_overdue(invoice, today) {
        InvoiceStatus::Overdue
    } else {
        invoice.status
    }
}

pub fn overdue_invoices(invoices: &[Invoice], today: NaiveDate) -> Vec<&Invoice> {
    invoices.iter().filter(|i| is_overdue(i, today)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Record;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn invoice(total: f64, amount_paid: f64, due_date: Option<NaiveDate>) -> Invoice {
        serde_json::from_value(serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000042",
            "invoice_number": "03-01-2025-INV-Q7ZK",
            "issue_date": "2025-03-01",
            "due_date": due_date,
            "total": total,
            "amount_paid": amount_paid,
            "balance_due": total - amount_paid,
            "status": status_for(total, amount_paid),
        }))
        .unwrap()
    }

    #[test]
    fn test_partial_payment() {
        let mut inv = invoice(1000.0, 0.0, None);
        let patch = apply_payment(&inv, 250.0).unwrap();
        inv.apply_patch(patch);

        assert_eq!(inv.amount_paid, 250.0);
        assert_eq!(inv.balance_due, 750.0);
        assert_eq!(inv.balance_due, inv.total - inv.amount_paid);
        assert_eq!(inv.status, InvoiceStatus::Partial);
    }

    #[test]
    fn test_final_payment_marks_paid() {
        let mut inv = invoice(1000.0, 600.0, None);
        inv.apply_patch(apply_payment(&inv, 400.0).unwrap());

        assert_eq!(inv.balance_due, 0.0);
        assert_eq!(inv.status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_overpayment_is_paid_with_negative_balance() {
        let inv = invoice(100.0, 0.0, None);
        let patch = apply_payment(&inv, 150.0).unwrap();

        assert_eq!(patch.balance_due, Some(-50.0));
        assert_eq!(patch.status, Some(InvoiceStatus::Paid));
    }

    #[test]
    fn test_rejects_non_positive_amounts() {
        let inv = invoice(100.0, 0.0, None);
        assert_eq!(
            apply_payment(&inv, 0.0),
            Err(InvoiceError::NonPositivePayment(0.0))
        );
        assert!(apply_payment(&inv, -20.0).is_err());
    }

    #[test]
    fn test_overdue_detection() {
        let today = make_date(2025, 3, 15);
        let late = invoice(100.0, 0.0, Some(make_date(2025, 3, 1)));
        let due_today = invoice(100.0, 0.0, Some(today));
        let paid_late = invoice(100.0, 100.0, Some(make_date(2025, 3, 1)));
        let no_due_date = invoice(100.0, 0.0, None);

        assert!(is_overdue(&late, today));
        assert!(!is_overdue(&due_today, today));
        assert!(!is_overdue(&paid_late, today));
        assert!(!is_overdue(&no_due_date, today));

        assert_eq!(effective_status(&late, today), InvoiceStatus::Overdue);
        assert_eq!(effective_status(&paid_late, today), InvoiceStatus::Paid);

        let all = vec![late, due_today, paid_late, no_due_date];
        assert_eq!(overdue_invoices(&all, today).len(), 1);
    }
}
