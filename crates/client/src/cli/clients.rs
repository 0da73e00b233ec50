//! Client CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use sparkreceipt_core::records::{LineItem, PaymentStatus as CorePaymentStatus};
use uuid::Uuid;

use super::invoices::parse_line_item;

/// Client management commands.
#[derive(Debug, Parser)]
pub struct ClientsCommand {
    #[command(subcommand)]
    pub action: ClientsAction,
}

/// CLI payment status (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
}

impl From<PaymentStatus> for CorePaymentStatus {
    fn from(s: PaymentStatus) -> Self {
        match s {
            PaymentStatus::Pending => CorePaymentStatus::Pending,
            PaymentStatus::Partial => CorePaymentStatus::Partial,
            PaymentStatus::Paid => CorePaymentStatus::Paid,
        }
    }
}

/// Available client actions.
#[derive(Debug, Subcommand)]
pub enum ClientsAction {
    /// List clients.
    List {
        /// Match name, email or phone.
        #[arg(long)]
        search: Option<String>,
        /// Filter by payment status.
        #[arg(long, value_enum)]
        status: Option<PaymentStatus>,
    },
    /// Add a client.
    Add {
        /// Client name.
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        zip: Option<String>,
        /// Event date (YYYY-MM-DD).
        #[arg(long)]
        event_date: Option<NaiveDate>,
        /// Event type, e.g. wedding.
        #[arg(long)]
        event_type: Option<String>,
        #[arg(long)]
        venue: Option<String>,
        /// Booked service as NAME:QTY:RATE or NAME:RATE. Repeatable.
        #[arg(long = "service", value_parser = parse_line_item)]
        services: Vec<LineItem>,
        /// Agreed contract amount.
        #[arg(long)]
        contract_amount: Option<f64>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Show a client with their invoices and expenses.
    Get {
        /// Client ID.
        id: Uuid,
    },
    /// Update a client.
    Update {
        /// Client ID.
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        event_date: Option<NaiveDate>,
        #[arg(long)]
        event_type: Option<String>,
        #[arg(long)]
        venue: Option<String>,
        #[arg(long)]
        contract_amount: Option<f64>,
        #[arg(long, value_enum)]
        status: Option<PaymentStatus>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a client.
    Delete {
        /// Client ID.
        id: Uuid,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};

    #[test]
    fn test_add_collects_services() {
        let cli = Cli::try_parse_from([
            "sparkreceipt",
            "clients",
            "add",
            "--name",
            "Ana",
            "--service",
            "Photography:1:1500",
            "--service",
            "Album:200",
        ])
        .unwrap();

        let Commands::Clients(ClientsCommand {
            action: ClientsAction::Add { name, services, .. },
        }) = cli.command
        else {
            panic!("expected clients add");
        };
        assert_eq!(name, "Ana");
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].amount, 1500.0);
        assert_eq!(services[1].quantity, 1.0);
    }
}
