mod error;
mod operations;
mod requests;
mod types;

pub use error::ValidationError;
pub use operations::{
    client_name_for, expenses_for_client, filter_clients, filter_expenses, filter_invoices,
    filter_receipts, find_category_by_name, find_client, invoices_for_client,
    validate_business_profile, validate_category, validate_client, validate_event,
    validate_expense, validate_income, validate_invoice, validate_payment, ClientFilter,
    ExpenseFilter, ExpenseSortKey, InvoiceFilter,
};
pub use requests::{
    BusinessProfilePatch, CalendarEventPatch, ClientPatch, ExpenseCategoryPatch, ExpensePatch,
    IncomeEntryPatch, InvoicePatch, NewBusinessProfile, NewCalendarEvent, NewClient, NewExpense,
    NewExpenseCategory, NewIncomeEntry, NewInvoice, NewPayment, PaymentPatch,
};
pub use types::{
    BusinessProfile, CalendarEvent, CategoryKind, Client, EventStatus, Expense, ExpenseCategory,
    IncomeEntry, Invoice, InvoiceStatus, InvoiceType, LineItem, Payment, PaymentStatus,
    ReceiptType, ReviewStatus, ServiceItem, DEFAULT_CURRENCY, DEFAULT_EVENT_COLOR, UNCATEGORIZED,
};
