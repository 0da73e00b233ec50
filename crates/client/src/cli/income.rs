//! Income CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Income management commands.
#[derive(Debug, Parser)]
pub struct IncomeCommand {
    #[command(subcommand)]
    pub action: IncomeAction,
}

/// Available income actions.
#[derive(Debug, Subcommand)]
pub enum IncomeAction {
    /// List income entries, newest first.
    List {
        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<NaiveDate>,
        /// End date (YYYY-MM-DD).
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Record income.
    Add {
        #[arg(long)]
        amount: f64,
        /// Income date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        description: Option<String>,
        /// Who paid.
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        client_id: Option<Uuid>,
        #[arg(long)]
        invoice_id: Option<Uuid>,
        #[arg(long)]
        payment_method: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        recurring: bool,
    },
    /// Update an income entry.
    Update {
        /// Income entry ID.
        id: Uuid,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete income entry by ID.
    Delete {
        /// Income entry ID.
        id: Uuid,
    },
}
