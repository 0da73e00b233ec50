use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::records::{CalendarEvent, Expense, IncomeEntry, Invoice};

/// Headline numbers shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    /// Invoices still pending or partially paid.
    pub pending_invoices: usize,
    /// Sum of `balance_due` over the pending invoices.
    pub pending_amount: f64,
    /// Events dated today or later.
    pub upcoming_events: usize,
    /// Expenses dated in the same month as today.
    pub receipts_this_month: usize,
}

/// Computes dashboard stats over everything loaded in the session.
pub fn compute_dashboard_stats(
    expenses: &[Expense],
    income: &[IncomeEntry],
    invoices: &[Invoice],
    events: &[CalendarEvent],
    today: NaiveDate,
) -> DashboardStats {
    let total_income: f64 = income.iter().map(|i| i.amount).sum();
    let total_expenses: f64 = expenses.iter().map(|e| e.total_amount).sum();

    let outstanding = invoices.iter().filter(|i| i.status.is_outstanding());
    let (pending_invoices, pending_amount) =
        outstanding.fold((0, 0.0), |(count, sum), i| (count + 1, sum + i.balance_due));

    DashboardStats {
        total_income,
        total_expenses,
        net_profit: total_income - total_expenses,
        pending_invoices,
        pending_amount,
        upcoming_events: events.iter().filter(|e| e.event_date >= today).count(),
        receipts_this_month: expenses
            .iter()
            .filter(|e| e.transaction_date.is_some_and(|d| same_month(d, today)))
            .count(),
    }
}

/// Income and expense totals for a single calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
    pub income_count: usize,
    pub expense_count: usize,
}

pub fn monthly_summary(
    expenses: &[Expense],
    income: &[IncomeEntry],
    year: i32,
    month: u32,
) -> MonthlySummary {
    let in_month = |date: Option<NaiveDate>| {
        date.is_some_and(|d| d.year() == year && d.month() == month)
    };

    let month_expenses: Vec<&Expense> = expenses
        .iter()
        .filter(|e| in_month(e.transaction_date))
        .collect();
    let month_income: Vec<&IncomeEntry> =
        income.iter().filter(|i| in_month(i.income_date)).collect();

    let expense_total: f64 = month_expenses.iter().map(|e| e.total_amount).sum();
    let income_total: f64 = month_income.iter().map(|i| i.amount).sum();

    MonthlySummary {
        year,
        month,
        income: income_total,
        expenses: expense_total,
        net: income_total - expense_total,
        income_count: month_income.len(),
        expense_count: month_expenses.len(),
    }
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::InvoiceStatus;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn expense(amount: f64, date: Option<NaiveDate>) -> Expense {
        serde_json::from_value(serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "total_amount": amount,
            "transaction_date": date,
        }))
        .unwrap()
    }

    fn income(amount: f64, date: NaiveDate) -> IncomeEntry {
        serde_json::from_value(serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "amount": amount,
            "income_date": date,
        }))
        .unwrap()
    }

    fn invoice(balance_due: f64, status: InvoiceStatus) -> Invoice {
        serde_json::from_value(serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "invoice_number": "X",
            "issue_date": "2025-01-01",
            "balance_due": balance_due,
            "status": status,
        }))
        .unwrap()
    }

    fn event(date: NaiveDate) -> CalendarEvent {
        serde_json::from_value(serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "title": "Booking",
            "event_date": date,
        }))
        .unwrap()
    }

    #[test]
    fn test_dashboard_stats() {
        let today = make_date(2025, 6, 15);
        let expenses = vec![
            expense(100.0, Some(make_date(2025, 6, 2))),
            expense(50.0, Some(make_date(2025, 5, 30))),
            expense(25.0, None),
        ];
        let income = vec![
            income(400.0, make_date(2025, 6, 1)),
            income(100.0, make_date(2025, 4, 1)),
        ];
        let invoices = vec![
            invoice(300.0, InvoiceStatus::Pending),
            invoice(120.0, InvoiceStatus::Partial),
            invoice(0.0, InvoiceStatus::Paid),
            invoice(80.0, InvoiceStatus::Overdue),
        ];
        let events = vec![
            event(make_date(2025, 6, 14)),
            event(today),
            event(make_date(2025, 7, 1)),
        ];

        let stats = compute_dashboard_stats(&expenses, &income, &invoices, &events, today);

        assert_eq!(stats.total_income, 500.0);
        assert_eq!(stats.total_expenses, 175.0);
        assert_eq!(stats.net_profit, stats.total_income - stats.total_expenses);
        assert_eq!(stats.pending_invoices, 2);
        assert_eq!(stats.pending_amount, 420.0);
        assert_eq!(stats.upcoming_events, 2);
        assert_eq!(stats.receipts_this_month, 1);
    }

    #[test]
    fn test_dashboard_stats_empty() {
        let stats = compute_dashboard_stats(&[], &[], &[], &[], make_date(2025, 1, 1));
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn test_monthly_summary() {
        let expenses = vec![
            expense(30.0, Some(make_date(2025, 3, 3))),
            expense(70.0, Some(make_date(2025, 3, 31))),
            expense(999.0, Some(make_date(2024, 3, 15))),
        ];
        let income = vec![income(250.0, make_date(2025, 3, 10))];

        let summary = monthly_summary(&expenses, &income, 2025, 3);
        assert_eq!(summary.expenses, 100.0);
        assert_eq!(summary.income, 250.0);
        assert_eq!(summary.net, 150.0);
        assert_eq!(summary.expense_count, 2);
        assert_eq!(summary.income_count, 1);
    }
}
