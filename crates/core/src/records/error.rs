use thiserror::Error;

/// Errors raised when validating records before they are sent to the store.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Client name cannot be empty")]
    EmptyClientName,
    #[error("Business name cannot be empty")]
    EmptyBusinessName,
    #[error("Event title cannot be empty")]
    EmptyEventTitle,
    #[error("Category name cannot be empty")]
    EmptyCategoryName,
    #[error("Invoice number cannot be empty")]
    EmptyInvoiceNumber,
    #[error("Invalid color format: {0}")]
    InvalidColor(String),
    #[error("{field} cannot be negative (got {value})")]
    NegativeAmount { field: &'static str, value: f64 },
    #[error("Payment amount must be greater than zero (got {0})")]
    NonPositivePayment(f64),
    #[error("End time must be after start time")]
    InvalidTimeRange,
    #[error("AI confidence must be between 0 and 1 (got {0})")]
    ConfidenceOutOfRange(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::EmptyClientName.to_string(),
            "Client name cannot be empty"
        );
        assert_eq!(
            ValidationError::NegativeAmount {
                field: "total_amount",
                value: -3.5
            }
            .to_string(),
            "total_amount cannot be negative (got -3.5)"
        );
        assert_eq!(
            ValidationError::InvalidColor("blue-ish".to_string()).to_string(),
            "Invalid color format: blue-ish"
        );
    }
}
