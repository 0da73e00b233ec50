//! Pretty output formatting.

use chrono::{Datelike, NaiveDate};
use sparkreceipt_core::calendar::{DayItem, MonthGrid};
use sparkreceipt_core::invoice::effective_status;
use sparkreceipt_core::records::{
    client_name_for, BusinessProfile, CalendarEvent, Client, Expense, ExpenseCategory,
    IncomeEntry, Invoice, NewExpense, Payment,
};
use sparkreceipt_core::stats::{DashboardStats, MonthlySummary, ReportData};

/// Dollar amount with two decimals; negatives keep the sign in front.
pub fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${:.2}", amount)
    }
}

fn header(title: &str, count: usize) -> String {
    let mut output = format!("{} ({})\n", title, count);
    output.push_str(&"-".repeat(40));
    output
}

fn push_opt(output: &mut String, label: &str, value: Option<impl std::fmt::Display>) {
    if let Some(value) = value {
        output.push_str(&format!("\n  {}: {}", label, value));
    }
}

/// Format dashboard numbers, this month's totals and the next events.
pub fn format_dashboard(
    stats: &DashboardStats,
    month: &MonthlySummary,
    upcoming: &[&CalendarEvent],
) -> String {
    let mut output = String::from("DASHBOARD\n");
    output.push_str(&"-".repeat(40));
    output.push_str(&format!(
        "\n  Income: {}\n  Expenses: {}\n  Net profit: {}",
        money(stats.total_income),
        money(stats.total_expenses),
        money(stats.net_profit)
    ));
    output.push_str(&format!(
        "\n  Pending invoices: {} ({})",
        stats.pending_invoices,
        money(stats.pending_amount)
    ));
    output.push_str(&format!(
        "\n  Receipts this month: {}\n  Upcoming events: {}",
        stats.receipts_this_month, stats.upcoming_events
    ));
    output.push_str(&format!(
        "\n\nTHIS MONTH ({:04}-{:02})\n  Income: {} ({})\n  Expenses: {} ({})\n  Net: {}",
        month.year,
        month.month,
        money(month.income),
        month.income_count,
        money(month.expenses),
        month.expense_count,
        money(month.net)
    ));
    if !upcoming.is_empty() {
        output.push_str("\n\nNEXT UP");
        for event in upcoming {
            output.push_str(&format!("\n  {}  {}", event.event_date, event.title));
        }
    }
    output
}

/// Format the business profile.
pub fn format_profile(profile: &BusinessProfile) -> String {
    let mut output = format!("{}\n  ID: {}", profile.business_name, profile.id);
    let locality = [&profile.city, &profile.state, &profile.zip]
        .iter()
        .filter_map(|part| part.as_deref())
        .collect::<Vec<_>>()
        .join(", ");
    push_opt(&mut output, "Address", profile.address.as_deref());
    if !locality.is_empty() {
        output.push_str(&format!("\n  {}", locality));
    }
    push_opt(&mut output, "Phone", profile.phone.as_deref());
    push_opt(&mut output, "Email", profile.email.as_deref());
    push_opt(&mut output, "Website", profile.website.as_deref());
    output
}

/// Format a client for display.
pub fn format_client(client: &Client) -> String {
    let mut output = format!(
        "{} [{}]\n  ID: {}",
        client.name,
        client.payment_status.label(),
        client.id
    );
    push_opt(&mut output, "Email", client.email.as_deref());
    push_opt(&mut output, "Phone", client.phone.as_deref());
    if let Some(date) = client.event_date {
        let kind = client.event_type.as_deref().unwrap_or("event");
        output.push_str(&format!("\n  Event: {} on {}", kind, date));
    }
    push_opt(&mut output, "Venue", client.venue.as_deref());
    if client.contract_amount > 0.0 {
        output.push_str(&format!(
            "\n  Contract: {} (paid {}, due {})",
            money(client.contract_amount),
            money(client.amount_paid),
            money(client.balance_due)
        ));
    }
    for service in &client.services_booked {
        output.push_str(&format!(
            "\n  - {} x{} @ {}",
            service.name,
            service.quantity,
            money(service.rate)
        ));
    }
    output
}

/// Format clients for display.
pub fn format_clients(clients: &[&Client]) -> String {
    if clients.is_empty() {
        return "No clients found.".to_string();
    }
    let mut output = header("CLIENTS", clients.len());
    for client in clients {
        output.push_str(&format!("\n{}", format_client(client)));
        output.push('\n');
    }
    output
}

/// Format a client with the invoices and expenses linked to them.
pub fn format_client_detail(
    client: &Client,
    invoices: &[&Invoice],
    expenses: &[&Expense],
    today: NaiveDate,
) -> String {
    let mut output = format_client(client);
    output.push_str(&format!("\n\nINVOICES ({})", invoices.len()));
    for invoice in invoices {
        output.push_str(&format!(
            "\n  {}  {}  {}",
            invoice.invoice_number,
            money(invoice.total),
            effective_status(invoice, today).label()
        ));
    }
    output.push_str(&format!("\n\nEXPENSES ({})", expenses.len()));
    for expense in expenses {
        output.push_str(&format!("\n  {}", expense_line(expense)));
    }
    output
}

/// Format an invoice for display. Past-due invoices show as overdue.
pub fn format_invoice(invoice: &Invoice, client_name: Option<&str>, today: NaiveDate) -> String {
    let mut output = format!(
        "{} [{} / {}]\n  ID: {}\n  Issued: {}",
        invoice.invoice_number,
        invoice.invoice_type.label(),
        effective_status(invoice, today).label(),
        invoice.id,
        invoice.issue_date
    );
    push_opt(&mut output, "Client", client_name);
    push_opt(&mut output, "Due", invoice.due_date);
    for item in &invoice.line_items {
        output.push_str(&format!(
            "\n  - {} x{} @ {} = {}",
            item.name,
            item.quantity,
            money(item.rate),
            money(item.amount)
        ));
    }
    output.push_str(&format!("\n  Subtotal: {}", money(invoice.subtotal)));
    if invoice.tax_rate > 0.0 {
        output.push_str(&format!(
            "\n  Tax ({}%): {}",
            invoice.tax_rate,
            money(invoice.tax_amount)
        ));
    }
    output.push_str(&format!(
        "\n  Total: {}\n  Paid: {}\n  Balance: {}",
        money(invoice.total),
        money(invoice.amount_paid),
        money(invoice.balance_due)
    ));
    output
}

/// Format invoices for display.
pub fn format_invoices(invoices: &[&Invoice], clients: &[Client], today: NaiveDate) -> String {
    if invoices.is_empty() {
        return "No invoices found.".to_string();
    }
    let mut output = header("INVOICES", invoices.len());
    for invoice in invoices {
        let client_name = client_name_for(clients, invoice);
        output.push_str(&format!("\n{}", format_invoice(invoice, client_name, today)));
        output.push('\n');
    }
    output
}

fn expense_line(expense: &Expense) -> String {
    let date = expense
        .transaction_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "----------".to_string());
    format!(
        "{}  {:>10}  {}  ({})",
        date,
        money(expense.total_amount),
        expense.merchant_name.as_deref().unwrap_or("Unknown merchant"),
        expense.category_label()
    )
}

/// Format an expense for display.
pub fn format_expense(expense: &Expense) -> String {
    let mut output = format!(
        "{} [{}]\n  ID: {}",
        expense_line(expense),
        expense.review_status.label(),
        expense.id
    );
    if let Some(tax) = expense.tax_amount.filter(|t| *t > 0.0) {
        output.push_str(&format!("\n  Tax: {}", money(tax)));
    }
    push_opt(&mut output, "IRS category", expense.irs_category.as_deref());
    push_opt(&mut output, "Payment", expense.payment_method.as_deref());
    push_opt(&mut output, "Receipt", expense.receipt_url.as_deref());
    push_opt(&mut output, "Notes", expense.notes.as_deref());
    if !expense.is_tax_deductible {
        output.push_str("\n  Not tax deductible");
    }
    output
}

/// Format expenses for display.
pub fn format_expenses(expenses: &[&Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }
    let total: f64 = expenses.iter().map(|e| e.total_amount).sum();
    let mut output = header("EXPENSES", expenses.len());
    for expense in expenses {
        output.push_str(&format!("\n{}", format_expense(expense)));
        output.push('\n');
    }
    output.push_str(&format!("Total: {}", money(total)));
    output
}

/// Format a scanned expense that has not been saved yet.
pub fn format_expense_draft(draft: &NewExpense) -> String {
    let mut output = format!(
        "{}\n  Amount: {}",
        draft.merchant_name.as_deref().unwrap_or("Unknown merchant"),
        money(draft.total_amount)
    );
    push_opt(&mut output, "Date", draft.transaction_date);
    push_opt(&mut output, "Category", draft.category_name.as_deref());
    push_opt(&mut output, "IRS category", draft.irs_category.as_deref());
    if let Some(confidence) = draft.ai_confidence {
        output.push_str(&format!("\n  Confidence: {:.0}%", confidence * 100.0));
    }
    for item in &draft.line_items {
        output.push_str(&format!("\n  - {} {}", item.name, money(item.amount)));
    }
    push_opt(&mut output, "Receipt", draft.receipt_url.as_deref());
    output
}

/// Format an income entry for display.
pub fn format_income_entry(entry: &IncomeEntry) -> String {
    let label = entry
        .description
        .as_deref()
        .or(entry.source_name.as_deref())
        .unwrap_or("Income");
    let mut output = format!("{} {}\n  ID: {}", label, money(entry.amount), entry.id);
    push_opt(&mut output, "Date", entry.income_date);
    push_opt(&mut output, "Source", entry.source_name.as_deref());
    push_opt(&mut output, "Category", entry.category.as_deref());
    if entry.is_recurring {
        output.push_str("\n  Recurring");
    }
    output
}

/// Format income entries for display.
pub fn format_income(entries: &[&IncomeEntry]) -> String {
    if entries.is_empty() {
        return "No income found.".to_string();
    }
    let mut output = header("INCOME", entries.len());
    for entry in entries {
        output.push_str(&format!("\n{}", format_income_entry(entry)));
        output.push('\n');
    }
    output
}

/// Format an event for display.
pub fn format_event(event: &CalendarEvent) -> String {
    let mut output = format!(
        "{} ({})\n  ID: {}\n  Date: {}",
        event.title, event.color, event.id, event.event_date
    );
    match (event.start_time, event.end_time) {
        (Some(start), Some(end)) => output.push_str(&format!(
            "\n  Time: {} - {}",
            start.format("%H:%M"),
            end.format("%H:%M")
        )),
        (Some(start), None) => output.push_str(&format!("\n  Time: {}", start.format("%H:%M"))),
        _ => {}
    }
    push_opt(&mut output, "Type", event.event_type.as_deref());
    push_opt(&mut output, "Location", event.location.as_deref());
    push_opt(&mut output, "Description", event.description.as_deref());
    if event.is_payment_due {
        output.push_str("\n  Payment due");
    }
    output
}

/// Format events for display.
pub fn format_events(events: &[&CalendarEvent]) -> String {
    if events.is_empty() {
        return "No events found.".to_string();
    }
    let mut output = header("EVENTS", events.len());
    for event in events {
        output.push_str(&format!("\n{}", format_event(event)));
        output.push('\n');
    }
    output
}

/// Format categories for display.
pub fn format_categories(categories: &[ExpenseCategory]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }
    let mut output = header("CATEGORIES", categories.len());
    for category in categories {
        output.push_str(&format!("\n{}", category.name));
        if let Some(irs) = &category.irs_category {
            output.push_str(&format!(" -> {}", irs));
        }
    }
    output
}

/// Format payments for display.
pub fn format_payments(payments: &[&Payment]) -> String {
    if payments.is_empty() {
        return "No payments found.".to_string();
    }
    let mut output = header("PAYMENTS", payments.len());
    for payment in payments {
        output.push_str(&format!(
            "\n{}  {}  {}",
            payment.payment_date,
            money(payment.amount),
            payment.payment_method.as_deref().unwrap_or("-")
        ));
        if let Some(invoice_id) = payment.invoice_id {
            output.push_str(&format!("  invoice {}", invoice_id));
        }
    }
    output
}

fn day_item_line(item: &DayItem) -> String {
    let time = item
        .start_time()
        .map(|t| t.format("%H:%M ").to_string())
        .unwrap_or_default();
    let marker = if item.is_payment_due() { "$ " } else { "" };
    format!("{}{}{}", marker, time, item.title())
}

/// Format the items of one day.
pub fn format_day(date: NaiveDate, items: &[DayItem]) -> String {
    let mut output = date.format("%A, %B %-d, %Y").to_string();
    if items.is_empty() {
        output.push_str("\n  Nothing scheduled.");
    }
    for item in items {
        output.push_str(&format!("\n  {}", day_item_line(item)));
    }
    output
}

/// Format a month grid: a Sunday-first table of day numbers, then the
/// items of every day that has any. Days with items are marked with `*`.
pub fn format_month_grid(grid: &MonthGrid) -> String {
    let mut output = format!("{}\n", grid.month);
    output.push_str(" Su  Mo  Tu  We  Th  Fr  Sa");
    for week in grid.weeks() {
        output.push('\n');
        let cells: Vec<String> = week
            .iter()
            .map(|day| {
                if !day.is_current_month {
                    "   ".to_string()
                } else if day.is_empty() {
                    format!("{:>3}", day.date.day())
                } else {
                    format!("{:>2}*", day.date.day())
                }
            })
            .collect();
        output.push_str(&cells.join(" "));
    }

    let busy: Vec<_> = grid
        .days
        .iter()
        .filter(|d| d.is_current_month && !d.is_empty())
        .collect();
    if !busy.is_empty() {
        output.push('\n');
    }
    for day in busy {
        output.push('\n');
        output.push_str(&format_day(day.date, &day.items));
    }
    output
}

/// Format a report summary with its breakdowns.
pub fn format_report(report: &ReportData) -> String {
    let mut output = format!("REPORT {} to {}\n", report.range.start, report.range.end);
    output.push_str(&"-".repeat(40));
    output.push_str(&format!(
        "\n  Income: {} ({} entries)\n  Expenses: {} ({} entries)\n  Net profit: {}",
        money(report.total_income),
        report.income_count,
        money(report.total_expenses),
        report.expense_count,
        money(report.net_profit)
    ));
    output.push_str(&format!(
        "\n  Tax paid: {}\n  Tax deductible: {}",
        money(report.total_tax),
        money(report.tax_deductible)
    ));

    if !report.category_breakdown.is_empty() {
        output.push_str("\n\nBY CATEGORY");
        for row in &report.category_breakdown {
            output.push_str(&format!(
                "\n  {:<24} {:>12} {:>5.1}%  ({})",
                row.category,
                money(row.total),
                row.percentage,
                row.count
            ));
        }
    }
    if !report.monthly_breakdown.is_empty() {
        output.push_str("\n\nBY MONTH");
        for row in &report.monthly_breakdown {
            output.push_str(&format!(
                "\n  {:<8} income {:>12}  expenses {:>12}",
                row.month,
                money(row.income),
                money(row.expenses)
            ));
        }
    }
    if !report.irs_breakdown.is_empty() {
        output.push_str("\n\nBY IRS CATEGORY");
        for row in &report.irs_breakdown {
            output.push_str(&format!("\n  {:<32} {:>12}", row.irs_category, money(row.total)));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sparkreceipt_core::calendar::{build_month_grid, CalendarMonth, GridOptions};
    use uuid::Uuid;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn event(title: &str, date: &str) -> CalendarEvent {
        serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "title": title,
            "event_date": date,
            "start_time": "14:30:00",
        }))
        .unwrap()
    }

    #[test]
    fn test_money() {
        assert_eq!(money(1234.5), "$1234.50");
        assert_eq!(money(-12.0), "-$12.00");
        assert_eq!(money(0.0), "$0.00");
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(format_clients(&[]), "No clients found.");
        assert_eq!(format_expenses(&[]), "No expenses found.");
        assert_eq!(format_categories(&[]), "No categories found.");
    }

    #[test]
    fn test_format_invoice_shows_overdue() {
        let invoice: Invoice = serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "invoice_number": "INV-0001",
            "invoice_type": "invoice",
            "issue_date": "2025-01-01",
            "due_date": "2025-01-15",
            "line_items": [{ "name": "Photo", "quantity": 1, "rate": 500, "amount": 500 }],
            "subtotal": 500,
            "total": 500,
            "balance_due": 500,
            "status": "pending"
        }))
        .unwrap();

        let text = format_invoice(&invoice, Some("Ana"), make_date(2025, 2, 1));
        assert!(text.starts_with("INV-0001 [invoice / overdue]"));
        assert!(text.contains("Client: Ana"));
        assert!(text.contains("- Photo x1 @ $500.00 = $500.00"));
        assert!(text.contains("Balance: $500.00"));
    }

    #[test]
    fn test_format_month_grid_marks_busy_days() {
        let events = vec![event("Shoot", "2025-03-08")];
        let grid = build_month_grid(
            CalendarMonth::new(2025, 3).unwrap(),
            &events,
            &[],
            GridOptions::default(),
        )
        .unwrap();

        let text = format_month_grid(&grid);
        assert!(text.starts_with("March 2025\n"));
        assert!(text.contains(" 8*"));
        assert!(text.contains("Saturday, March 8, 2025\n  14:30 Shoot"));
    }
}
