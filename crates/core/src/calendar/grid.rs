use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};

use super::error::CalendarError;
use super::types::{CalendarMonth, DayItem, GridDay, MonthGrid, GRID_CELLS};
use crate::records::{CalendarEvent, Invoice, InvoiceStatus};

/// Color of a payment-due item for a partially paid invoice.
pub const PARTIAL_PAYMENT_COLOR: &str = "#F59E0B";
/// Color of a payment-due item for a paid invoice.
pub const PAID_PAYMENT_COLOR: &str = "#10B981";
/// Color of a payment-due item for anything still unpaid.
pub const UNPAID_PAYMENT_COLOR: &str = "#EF4444";

/// Options for [`build_month_grid`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridOptions {
    /// Show payment-due items for invoices that are already paid.
    pub include_paid: bool,
}

impl GridOptions {
    pub fn including_paid() -> Self {
        Self { include_paid: true }
    }
}

pub fn payment_due_color(status: InvoiceStatus) -> &'static str {
    match status {
        InvoiceStatus::Partial => PARTIAL_PAYMENT_COLOR,
        InvoiceStatus::Paid => PAID_PAYMENT_COLOR,
        InvoiceStatus::Pending | InvoiceStatus::Overdue => UNPAID_PAYMENT_COLOR,
    }
}

/// The display item for an invoice's due date.
pub fn payment_due_item(invoice: &Invoice) -> DayItem {
    DayItem::PaymentDue {
        invoice_id: invoice.id,
        invoice_number: invoice.invoice_number.clone(),
        title: format!("Payment Due: {}", invoice.invoice_number),
        color: payment_due_color(invoice.status).to_string(),
        status: invoice.status,
    }
}

/// Builds the 42-cell grid for `month`, Sunday first.
///
/// Leading cells come from the previous month and trailing cells from the
/// next; both stay empty. Each in-month day gets the events dated that day
/// (ordered by start time, all-day first) followed by payment-due items for
/// invoices due that day.
pub fn build_month_grid(
    month: CalendarMonth,
    events: &[CalendarEvent],
    invoices: &[Invoice],
    options: GridOptions,
) -> Result<MonthGrid, CalendarError> {
    let first = month.first_day()?;
    let num_days = month.num_days()?;
    let leading = first.weekday().num_days_from_sunday() as i64;

    let mut events_by_date: HashMap<NaiveDate, Vec<&CalendarEvent>> = HashMap::new();
    for event in events.iter().filter(|e| month.contains(e.event_date)) {
        events_by_date.entry(event.event_date).or_default().push(event);
    }

    let mut due_by_date: HashMap<NaiveDate, Vec<&Invoice>> = HashMap::new();
    for invoice in invoices {
        if !options.include_paid && invoice.status == InvoiceStatus::Paid {
            continue;
        }
        if let Some(due) = invoice.due_date.filter(|d| month.contains(*d)) {
            due_by_date.entry(due).or_default().push(invoice);
        }
    }

    let mut days = Vec::with_capacity(GRID_CELLS);

    for offset in (1..=leading).rev() {
        days.push(GridDay::padding(first - Duration::days(offset)));
    }

    for day_offset in 0..num_days as i64 {
        let date = first + Duration::days(day_offset);

        let mut day_events = events_by_date.remove(&date).unwrap_or_default();
        day_events.sort_by_key(|e| e.start_time);

        let mut items: Vec<DayItem> = day_events
            .into_iter()
            .map(|e| DayItem::Event(e.clone()))
            .collect();
        if let Some(due) = due_by_date.get(&date) {
            items.extend(due.iter().copied().map(payment_due_item));
        }

        days.push(GridDay {
            date,
            is_current_month: true,
            items,
        });
    }

    let after_last = first + Duration::days(num_days as i64);
    let trailing = GRID_CELLS - days.len();
    for offset in 0..trailing as i64 {
        days.push(GridDay::padding(after_last + Duration::days(offset)));
    }

    Ok(MonthGrid { month, days })
}
