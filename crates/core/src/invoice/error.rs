use thiserror::Error;

/// Errors raised by invoice editing and payment rules.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvoiceError {
    #[error("Line item {index} does not exist (invoice has {len} items)")]
    LineItemOutOfRange { index: usize, len: usize },
    #[error("Payment amount must be greater than zero (got {0})")]
    NonPositivePayment(f64),
    #[error("Tax rate cannot be negative (got {0})")]
    NegativeTaxRate(f64),
}
