//! Payment CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Payment commands.
#[derive(Debug, Parser)]
pub struct PaymentsCommand {
    #[command(subcommand)]
    pub action: PaymentsAction,
}

/// Available payment actions.
#[derive(Debug, Subcommand)]
pub enum PaymentsAction {
    /// List payments, newest first.
    List {
        /// Only payments against this invoice.
        #[arg(long)]
        invoice_id: Option<Uuid>,
    },
    /// Record a payment against an invoice and update its balance.
    Add {
        /// Invoice ID.
        invoice_id: Uuid,
        /// Amount received.
        #[arg(long)]
        amount: f64,
        /// Payment date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// e.g. Zelle, Cash.
        #[arg(long)]
        method: Option<String>,
        #[arg(long)]
        reference: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
}
