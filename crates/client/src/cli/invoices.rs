//! Invoice CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use sparkreceipt_core::records::{
    InvoiceStatus as CoreInvoiceStatus, InvoiceType as CoreInvoiceType, LineItem,
};
use uuid::Uuid;

/// Invoice management commands.
#[derive(Debug, Parser)]
pub struct InvoicesCommand {
    #[command(subcommand)]
    pub action: InvoicesAction,
}

/// CLI invoice type (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum InvoiceType {
    Invoice,
    Quote,
    Receipt,
}

impl From<InvoiceType> for CoreInvoiceType {
    fn from(t: InvoiceType) -> Self {
        match t {
            InvoiceType::Invoice => CoreInvoiceType::Invoice,
            InvoiceType::Quote => CoreInvoiceType::Quote,
            InvoiceType::Receipt => CoreInvoiceType::Receipt,
        }
    }
}

/// CLI invoice status (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum InvoiceStatus {
    Pending,
    Partial,
    Paid,
    Overdue,
}

impl From<InvoiceStatus> for CoreInvoiceStatus {
    fn from(s: InvoiceStatus) -> Self {
        match s {
            InvoiceStatus::Pending => CoreInvoiceStatus::Pending,
            InvoiceStatus::Partial => CoreInvoiceStatus::Partial,
            InvoiceStatus::Paid => CoreInvoiceStatus::Paid,
            InvoiceStatus::Overdue => CoreInvoiceStatus::Overdue,
        }
    }
}

/// Parses a line item given as `NAME:QTY:RATE` or `NAME:RATE`.
pub fn parse_line_item(raw: &str) -> Result<LineItem, String> {
    let parts: Vec<&str> = raw.rsplitn(3, ':').collect();
    let number = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid number '{s}' in line item '{raw}'"))
    };

    let (name, quantity, rate) = match parts.as_slice() {
        [rate, quantity, name] if quantity.trim().parse::<f64>().is_ok() => {
            (*name, number(quantity)?, number(rate)?)
        }
        [rate, rest @ ..] if !rest.is_empty() => {
            let name = raw[..raw.len() - rate.len() - 1].trim_end();
            (name, 1.0, number(rate)?)
        }
        _ => return Err(format!("expected NAME:QTY:RATE or NAME:RATE, got '{raw}'")),
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("line item '{raw}' has no name"));
    }
    Ok(LineItem {
        name: name.to_string(),
        description: None,
        quantity,
        rate,
        amount: quantity * rate,
    })
}

/// Available invoice actions.
#[derive(Debug, Subcommand)]
pub enum InvoicesAction {
    /// List invoices, quotes and receipts.
    List {
        /// Match invoice number or client name.
        #[arg(long)]
        search: Option<String>,
        /// Filter by document type.
        #[arg(long = "type", value_enum)]
        invoice_type: Option<InvoiceType>,
        /// Filter by status.
        #[arg(long, value_enum)]
        status: Option<InvoiceStatus>,
    },
    /// Create an invoice.
    Create {
        /// Document type.
        #[arg(long = "type", value_enum, default_value = "invoice")]
        invoice_type: InvoiceType,
        /// Bill to this client. Their booked services become the lines
        /// unless --line is given.
        #[arg(long)]
        client_id: Option<Uuid>,
        /// Issue date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        issue_date: Option<NaiveDate>,
        /// Due date (YYYY-MM-DD).
        #[arg(long)]
        due_date: Option<NaiveDate>,
        /// Line as NAME:QTY:RATE or NAME:RATE. Repeatable.
        #[arg(long = "line", value_parser = parse_line_item)]
        lines: Vec<LineItem>,
        /// Tax rate in percent.
        #[arg(long, default_value = "0")]
        tax_rate: f64,
        /// Explicit invoice number.
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        terms: Option<String>,
    },
    /// Get invoice by ID.
    Get {
        /// Invoice ID.
        id: Uuid,
    },
    /// Update an invoice; totals are recomputed.
    Update {
        /// Invoice ID.
        id: Uuid,
        /// Replace all lines. Repeatable.
        #[arg(long = "line", value_parser = parse_line_item)]
        lines: Vec<LineItem>,
        #[arg(long)]
        due_date: Option<NaiveDate>,
        #[arg(long)]
        tax_rate: Option<f64>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete invoice by ID.
    Delete {
        /// Invoice ID.
        id: Uuid,
    },
    /// Invoices past their due date with a balance left.
    Overdue,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};

    #[test]
    fn test_parse_line_item_with_quantity() {
        let item = parse_line_item("Second shooter:2:350").unwrap();
        assert_eq!(item.name, "Second shooter");
        assert_eq!(item.quantity, 2.0);
        assert_eq!(item.rate, 350.0);
        assert_eq!(item.amount, 700.0);
    }

    #[test]
    fn test_parse_line_item_rate_only() {
        let item = parse_line_item("Travel:75.5").unwrap();
        assert_eq!(item.name, "Travel");
        assert_eq!(item.quantity, 1.0);
        assert_eq!(item.amount, 75.5);
    }

    #[test]
    fn test_parse_line_item_keeps_colons_in_name() {
        let item = parse_line_item("Ceremony: 2pm:400").unwrap();
        assert_eq!(item.name, "Ceremony: 2pm");
        assert_eq!(item.rate, 400.0);
    }

    #[test]
    fn test_parse_line_item_rejects_bad_input() {
        assert!(parse_line_item("Travel").is_err());
        assert!(parse_line_item("Travel:abc").is_err());
        assert!(parse_line_item(":10").is_err());
    }

    #[test]
    fn test_create_parses_type_and_lines() {
        let cli = Cli::try_parse_from([
            "sparkreceipt",
            "invoices",
            "create",
            "--type",
            "quote",
            "--line",
            "Photo:1:900",
            "--tax-rate",
            "8.25",
        ])
        .unwrap();

        let Commands::Invoices(InvoicesCommand {
            action:
                InvoicesAction::Create {
                    invoice_type,
                    lines,
                    tax_rate,
                    ..
                },
        }) = cli.command
        else {
            panic!("expected invoices create");
        };
        assert_eq!(CoreInvoiceType::from(invoice_type), CoreInvoiceType::Quote);
        assert_eq!(lines.len(), 1);
        assert_eq!(tax_rate, 8.25);
    }
}
