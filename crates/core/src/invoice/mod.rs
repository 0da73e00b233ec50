mod draft;
mod error;
mod line_items;
mod numbering;
mod payments;
mod totals;

pub use draft::{InvoiceDraft, DEFAULT_PAYMENT_METHODS, DEFAULT_TERMS};
pub use error::InvoiceError;
pub use line_items::{
    add_line_item, blank_line_item, line_items_from_services, remove_line_item, subtotal,
    update_line_item, LineItemField,
};
pub use numbering::generate_invoice_number;
pub use payments::{apply_payment, effective_status, is_overdue, overdue_invoices};
pub use totals::{status_for, InvoiceTotals};
