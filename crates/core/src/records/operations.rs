use std::cmp::Ordering;

use chrono::NaiveDate;
use uuid::Uuid;

use super::error::ValidationError;
use super::requests::{
    NewBusinessProfile, NewCalendarEvent, NewClient, NewExpense, NewExpenseCategory,
    NewIncomeEntry, NewInvoice, NewPayment,
};
use super::types::{
    Client, Expense, ExpenseCategory, Invoice, InvoiceStatus, InvoiceType, PaymentStatus,
    ReviewStatus,
};

/// Field an expense list is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExpenseSortKey {
    #[default]
    Date,
    Amount,
}

/// Filters applied to the expense (and receipt) lists.
///
/// Every criterion is optional; an empty filter matches everything.
/// Undated expenses are never excluded by the date bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    /// Case-insensitive match against merchant, category name and notes.
    pub search: Option<String>,
    pub category_name: Option<String>,
    pub review_status: Option<ReviewStatus>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub sort_by: ExpenseSortKey,
    pub ascending: bool,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_category(mut self, category_name: impl Into<String>) -> Self {
        self.category_name = Some(category_name.into());
        self
    }

    pub fn with_review_status(mut self, status: ReviewStatus) -> Self {
        self.review_status = Some(status);
        self
    }

    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn with_amounts(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    pub fn sorted_by(mut self, key: ExpenseSortKey, ascending: bool) -> Self {
        self.sort_by = key;
        self.ascending = ascending;
        self
    }

    fn matches(&self, expense: &Expense) -> bool {
        let matches_search = self.search.as_deref().is_none_or(|query| {
            let query = query.to_lowercase();
            [
                expense.merchant_name.as_deref(),
                expense.category_name.as_deref(),
                expense.notes.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|text| text.to_lowercase().contains(&query))
                || query.is_empty()
        });
        let matches_date = expense.transaction_date.is_none_or(|date| {
            self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
        });

        matches_search
            && matches_date
            && self
                .category_name
                .as_deref()
                .is_none_or(|name| expense.category_name.as_deref() == Some(name))
            && self
                .review_status
                .is_none_or(|status| expense.review_status == status)
            && self.min_amount.is_none_or(|min| expense.total_amount >= min)
            && self.max_amount.is_none_or(|max| expense.total_amount <= max)
    }

    fn compare(&self, a: &Expense, b: &Expense) -> Ordering {
        let ordering = match self.sort_by {
            ExpenseSortKey::Date => a.transaction_date.cmp(&b.transaction_date),
            ExpenseSortKey::Amount => a.total_amount.total_cmp(&b.total_amount),
        };
        if self.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    }
}

/// Filters and sorts expenses.
pub fn filter_expenses<'a>(expenses: &'a [Expense], filter: &ExpenseFilter) -> Vec<&'a Expense> {
    let mut matched: Vec<&Expense> = expenses.iter().filter(|e| filter.matches(e)).collect();
    matched.sort_by(|a, b| filter.compare(a, b));
    matched
}

/// Filters and sorts expenses that have a receipt image attached.
pub fn filter_receipts<'a>(expenses: &'a [Expense], filter: &ExpenseFilter) -> Vec<&'a Expense> {
    filter_expenses(expenses, filter)
        .into_iter()
        .filter(|e| e.has_receipt())
        .collect()
}

/// Filters for the invoice list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceFilter {
    /// Case-insensitive match against invoice number and client name.
    pub search: Option<String>,
    pub invoice_type: Option<InvoiceType>,
    pub status: Option<InvoiceStatus>,
}

/// Filters invoices, resolving client names from `clients` for the search.
pub fn filter_invoices<'a>(
    invoices: &'a [Invoice],
    clients: &[Client],
    filter: &InvoiceFilter,
) -> Vec<&'a Invoice> {
    invoices
        .iter()
        .filter(|invoice| {
            let matches_search = filter.search.as_deref().is_none_or(|query| {
                let query = query.to_lowercase();
                let client_name = invoice
                    .client_id
                    .and_then(|id| find_client(clients, id))
                    .map(|c| c.name.to_lowercase());
                invoice.invoice_number.to_lowercase().contains(&query)
                    || client_name.is_some_and(|name| name.contains(&query))
            });
            matches_search
                && filter.invoice_type.is_none_or(|t| invoice.invoice_type == t)
                && filter.status.is_none_or(|s| invoice.status == s)
        })
        .collect()
}

/// Filters for the client list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    /// Case-insensitive match against name and email; phone matches verbatim.
    pub search: Option<String>,
    pub payment_status: Option<PaymentStatus>,
}

pub fn filter_clients<'a>(clients: &'a [Client], filter: &ClientFilter) -> Vec<&'a Client> {
    clients
        .iter()
        .filter(|client| {
            let matches_search = filter.search.as_deref().is_none_or(|query| {
                let lowered = query.to_lowercase();
                client.name.to_lowercase().contains(&lowered)
                    || client
                        .email
                        .as_deref()
                        .is_some_and(|email| email.to_lowercase().contains(&lowered))
                    || client.phone.as_deref().is_some_and(|phone| phone.contains(query))
            });
            matches_search
                && filter
                    .payment_status
                    .is_none_or(|status| client.payment_status == status)
        })
        .collect()
}

pub fn find_client(clients: &[Client], id: Uuid) -> Option<&Client> {
    clients.iter().find(|c| c.id == id)
}

/// Display name of an invoice's client, if it is linked and known.
pub fn client_name_for<'a>(clients: &'a [Client], invoice: &Invoice) -> Option<&'a str> {
    invoice
        .client_id
        .and_then(|id| find_client(clients, id))
        .map(|c| c.name.as_str())
}

pub fn invoices_for_client(invoices: &[Invoice], client_id: Uuid) -> Vec<&Invoice> {
    invoices
        .iter()
        .filter(|i| i.client_id == Some(client_id))
        .collect()
}

pub fn expenses_for_client(expenses: &[Expense], client_id: Uuid) -> Vec<&Expense> {
    expenses
        .iter()
        .filter(|e| e.client_id == Some(client_id))
        .collect()
}

/// Finds a category by name, ignoring case and surrounding whitespace.
pub fn find_category_by_name<'a>(
    categories: &'a [ExpenseCategory],
    name: &str,
) -> Option<&'a ExpenseCategory> {
    let name = name.trim();
    categories
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}

pub fn validate_business_profile(profile: &NewBusinessProfile) -> Result<(), ValidationError> {
    if profile.business_name.trim().is_empty() {
        return Err(ValidationError::EmptyBusinessName);
    }
    Ok(())
}

pub fn validate_client(client: &NewClient) -> Result<(), ValidationError> {
    if client.name.trim().is_empty() {
        return Err(ValidationError::EmptyClientName);
    }
    non_negative("contract_amount", client.contract_amount)?;
    for service in &client.services_booked {
        non_negative("rate", service.rate)?;
    }
    Ok(())
}

pub fn validate_event(event: &NewCalendarEvent) -> Result<(), ValidationError> {
    if event.title.trim().is_empty() {
        return Err(ValidationError::EmptyEventTitle);
    }
    if !is_valid_color(&event.color) {
        return Err(ValidationError::InvalidColor(event.color.clone()));
    }
    if let (Some(start), Some(end)) = (event.start_time, event.end_time) {
        if end <= start {
            return Err(ValidationError::InvalidTimeRange);
        }
    }
    Ok(())
}

pub fn validate_expense(expense: &NewExpense) -> Result<(), ValidationError> {
    non_negative("total_amount", expense.total_amount)?;
    if let Some(tax) = expense.tax_amount {
        non_negative("tax_amount", tax)?;
    }
    if let Some(confidence) = expense.ai_confidence {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ValidationError::ConfidenceOutOfRange(confidence));
        }
    }
    Ok(())
}

pub fn validate_income(entry: &NewIncomeEntry) -> Result<(), ValidationError> {
    non_negative("amount", entry.amount)
}

pub fn validate_invoice(invoice: &NewInvoice) -> Result<(), ValidationError> {
    if invoice.invoice_number.trim().is_empty() {
        return Err(ValidationError::EmptyInvoiceNumber);
    }
    non_negative("tax_rate", invoice.tax_rate)?;
    for item in &invoice.line_items {
        non_negative("quantity", item.quantity)?;
        non_negative("rate", item.rate)?;
    }
    Ok(())
}

pub fn validate_payment(payment: &NewPayment) -> Result<(), ValidationError> {
    if payment.amount <= 0.0 || payment.amount.is_nan() {
        return Err(ValidationError::NonPositivePayment(payment.amount));
    }
    Ok(())
}

pub fn validate_category(category: &NewExpenseCategory) -> Result<(), ValidationError> {
    if category.name.trim().is_empty() {
        return Err(ValidationError::EmptyCategoryName);
    }
    if let Some(color) = &category.color {
        if !is_valid_color(color) {
            return Err(ValidationError::InvalidColor(color.clone()));
        }
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value < 0.0 {
        return Err(ValidationError::NegativeAmount { field, value });
    }
    Ok(())
}

/// Hex colors only (#RGB, #RRGGBB, #RRGGBBAA).
fn is_valid_color(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|hex| [3, 6, 8].contains(&hex.len()) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::types::CategoryKind;
    use chrono::NaiveTime;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn expense(merchant: &str, category: Option<&str>, amount: f64, date: Option<NaiveDate>) -> Expense {
        serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "merchant_name": merchant,
            "category_name": category,
            "total_amount": amount,
            "transaction_date": date,
        }))
        .unwrap()
    }

    fn client(name: &str, email: Option<&str>, phone: Option<&str>) -> Client {
        serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "name": name,
            "email": email,
            "phone": phone,
        }))
        .unwrap()
    }

    fn invoice(number: &str, client_id: Option<Uuid>, status: InvoiceStatus) -> Invoice {
        serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "invoice_number": number,
            "client_id": client_id,
            "issue_date": "2025-01-05",
            "status": status,
        }))
        .unwrap()
    }

    #[test]
    fn test_filter_expenses_search_is_case_insensitive() {
        let expenses = vec![
            expense("Home Depot", Some("Supplies"), 120.0, Some(make_date(2025, 1, 3))),
            expense("Shell", Some("Fuel"), 45.0, Some(make_date(2025, 1, 4))),
        ];

        let found = filter_expenses(&expenses, &ExpenseFilter::new().with_search("depot"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].merchant_name.as_deref(), Some("Home Depot"));

        let by_category = filter_expenses(&expenses, &ExpenseFilter::new().with_search("FUEL"));
        assert_eq!(by_category.len(), 1);
    }

    #[test]
    fn test_filter_expenses_empty_search_matches_all() {
        let expenses = vec![
            expense("A", None, 1.0, None),
            expense("B", None, 2.0, None),
        ];
        assert_eq!(
            filter_expenses(&expenses, &ExpenseFilter::new().with_search("")).len(),
            2
        );
    }

    #[test]
    fn test_filter_expenses_date_bounds_keep_undated() {
        let expenses = vec![
            expense("Early", None, 10.0, Some(make_date(2024, 12, 31))),
            expense("Inside", None, 20.0, Some(make_date(2025, 1, 15))),
            expense("Undated", None, 30.0, None),
        ];
        let filter = ExpenseFilter::new()
            .with_dates(Some(make_date(2025, 1, 1)), Some(make_date(2025, 1, 31)));

        let found = filter_expenses(&expenses, &filter);
        let names: Vec<_> = found.iter().filter_map(|e| e.merchant_name.as_deref()).collect();
        assert_eq!(names, vec!["Inside", "Undated"]);
    }

    #[test]
    fn test_filter_expenses_sorting() {
        let expenses = vec![
            expense("Mid", None, 50.0, Some(make_date(2025, 1, 2))),
            expense("Big", None, 90.0, Some(make_date(2025, 1, 1))),
            expense("Small", None, 5.0, Some(make_date(2025, 1, 3))),
        ];

        let newest_first = filter_expenses(&expenses, &ExpenseFilter::new());
        assert_eq!(newest_first[0].merchant_name.as_deref(), Some("Small"));

        let cheapest_first = filter_expenses(
            &expenses,
            &ExpenseFilter::new().sorted_by(ExpenseSortKey::Amount, true),
        );
        let amounts: Vec<f64> = cheapest_first.iter().map(|e| e.total_amount).collect();
        assert_eq!(amounts, vec![5.0, 50.0, 90.0]);
    }

    #[test]
    fn test_filter_expenses_amount_and_status() {
        let mut approved = expense("Approved", None, 40.0, None);
        approved.review_status = ReviewStatus::Approved;
        let expenses = vec![approved, expense("Pending", None, 400.0, None)];

        let found = filter_expenses(
            &expenses,
            &ExpenseFilter::new()
                .with_review_status(ReviewStatus::Approved)
                .with_amounts(Some(10.0), Some(100.0)),
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].merchant_name.as_deref(), Some("Approved"));
    }

    #[test]
    fn test_filter_receipts_requires_image() {
        let mut with_image = expense("Scanned", None, 12.0, None);
        with_image.receipt_url = Some("https://cdn.example.com/r.jpg".to_string());
        let expenses = vec![with_image, expense("Manual", None, 8.0, None)];

        let receipts = filter_receipts(&expenses, &ExpenseFilter::new());
        assert_eq!(receipts.len(), 1);
        assert!(receipts[0].has_receipt());
    }

    #[test]
    fn test_filter_invoices_by_client_name() {
        let ana = client("Ana Ruiz", None, None);
        let invoices = vec![
            invoice("01-01-2025-INV-AAAA", Some(ana.id), InvoiceStatus::Pending),
            invoice("01-02-2025-INV-BBBB", None, InvoiceStatus::Paid),
        ];
        let clients = vec![ana];

        let filter = InvoiceFilter {
            search: Some("ruiz".to_string()),
            ..InvoiceFilter::default()
        };
        assert_eq!(filter_invoices(&invoices, &clients, &filter).len(), 1);

        let paid = InvoiceFilter {
            status: Some(InvoiceStatus::Paid),
            ..InvoiceFilter::default()
        };
        let found = filter_invoices(&invoices, &clients, &paid);
        assert_eq!(found[0].invoice_number, "01-02-2025-INV-BBBB");
    }

    #[test]
    fn test_filter_clients() {
        let clients = vec![
            client("Ana Ruiz", Some("ana@example.com"), Some("555-0100")),
            client("Ben Ode", None, Some("555-0199")),
        ];

        let by_email = ClientFilter {
            search: Some("EXAMPLE".to_string()),
            ..ClientFilter::default()
        };
        assert_eq!(filter_clients(&clients, &by_email).len(), 1);

        let by_phone = ClientFilter {
            search: Some("0199".to_string()),
            ..ClientFilter::default()
        };
        assert_eq!(filter_clients(&clients, &by_phone)[0].name, "Ben Ode");
    }

    #[test]
    fn test_per_client_lookups() {
        let ana = client("Ana", None, None);
        let invoices = vec![
            invoice("A", Some(ana.id), InvoiceStatus::Pending),
            invoice("B", None, InvoiceStatus::Pending),
        ];
        let mut linked = expense("Florist", None, 80.0, None);
        linked.client_id = Some(ana.id);
        let expenses = vec![linked, expense("Other", None, 1.0, None)];

        assert_eq!(invoices_for_client(&invoices, ana.id).len(), 1);
        assert_eq!(expenses_for_client(&expenses, ana.id).len(), 1);

        let clients = vec![ana];
        assert_eq!(client_name_for(&clients, &invoices[0]), Some("Ana"));
        assert_eq!(client_name_for(&clients, &invoices[1]), None);
    }

    #[test]
    fn test_find_category_by_name() {
        let categories = vec![ExpenseCategory {
            id: Uuid::new_v4(),
            name: "Office Supplies".to_string(),
            kind: CategoryKind::Expense,
            color: None,
            icon: None,
            irs_category: Some("Supplies".to_string()),
            is_default: true,
        }];
        assert!(find_category_by_name(&categories, " office supplies ").is_some());
        assert!(find_category_by_name(&categories, "Travel").is_none());
    }

    #[test]
    fn test_validate_client_and_event() {
        assert_eq!(
            validate_client(&NewClient::new("  ")),
            Err(ValidationError::EmptyClientName)
        );
        assert!(validate_client(&NewClient::new("Ana")).is_ok());

        let event = NewCalendarEvent::new("", make_date(2025, 1, 1));
        assert_eq!(validate_event(&event), Err(ValidationError::EmptyEventTitle));

        let bad_color = NewCalendarEvent::new("Tasting", make_date(2025, 1, 1)).with_color("purple");
        assert!(matches!(
            validate_event(&bad_color),
            Err(ValidationError::InvalidColor(_))
        ));

        let backwards = NewCalendarEvent::new("Tasting", make_date(2025, 1, 1)).with_times(
            NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        );
        assert_eq!(validate_event(&backwards), Err(ValidationError::InvalidTimeRange));
    }

    #[test]
    fn test_validate_expense_amounts_and_confidence() {
        let negative = NewExpense::manual(-1.0, make_date(2025, 1, 1));
        assert!(matches!(
            validate_expense(&negative),
            Err(ValidationError::NegativeAmount { field: "total_amount", .. })
        ));

        let mut scanned = NewExpense::manual(10.0, make_date(2025, 1, 1));
        scanned.ai_confidence = Some(1.4);
        assert_eq!(
            validate_expense(&scanned),
            Err(ValidationError::ConfidenceOutOfRange(1.4))
        );
    }

    #[test]
    fn test_validate_payment_rejects_zero() {
        let inv = invoice("A", None, InvoiceStatus::Pending);
        let payment = NewPayment::for_invoice(&inv, 0.0, make_date(2025, 1, 1));
        assert_eq!(
            validate_payment(&payment),
            Err(ValidationError::NonPositivePayment(0.0))
        );
    }
}
