//! CLI command definitions.

pub mod calendar;
pub mod categories;
pub mod clients;
pub mod events;
pub mod expenses;
pub mod income;
pub mod invoices;
pub mod payments;
pub mod profile;
pub mod reports;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::ClientConfig;
use crate::error::Result;

/// Command-line front end for SparkReceipt.
#[derive(Debug, Parser)]
#[command(name = "sparkreceipt")]
#[command(about = "Receipts, invoices and reports for small businesses", long_about = None)]
pub struct Cli {
    /// Backend base URL.
    #[arg(long, env = "SPARKRECEIPT_URL")]
    pub url: Option<String>,

    /// Project API key.
    #[arg(long, env = "SPARKRECEIPT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Signed-in user's access token.
    #[arg(long, env = "SPARKRECEIPT_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    /// Date treated as today (YYYY-MM-DD).
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Client configuration; flags win over the environment.
    pub fn client_config(&self) -> Result<ClientConfig> {
        self.client_config_with(|key| std::env::var(key).ok())
    }

    fn client_config_with<F>(&self, env: F) -> Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        ClientConfig::from_lookup(|key| {
            let flag = match key {
                "SPARKRECEIPT_URL" => self.url.clone(),
                "SPARKRECEIPT_API_KEY" => self.api_key.clone(),
                "SPARKRECEIPT_ACCESS_TOKEN" => self.access_token.clone(),
                _ => None,
            };
            flag.or_else(|| env(key))
        })
    }

    /// The `--today` override, or the local date.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Totals, outstanding invoices and upcoming events.
    Dashboard,
    /// Month calendar with events and payment due dates.
    Calendar(calendar::CalendarCommand),
    /// Client management.
    Clients(clients::ClientsCommand),
    /// Invoices, quotes and receipts.
    Invoices(invoices::InvoicesCommand),
    /// Expense and receipt management.
    Expenses(expenses::ExpensesCommand),
    /// Income entries.
    Income(income::IncomeCommand),
    /// Calendar events.
    Events(events::EventsCommand),
    /// Expense categories.
    Categories(categories::CategoriesCommand),
    /// Payments against invoices.
    Payments(payments::PaymentsCommand),
    /// Business profile.
    Profile(profile::ProfileCommand),
    /// Scan a receipt image into an expense.
    Scan {
        /// Image file to upload.
        file: PathBuf,
        /// Save the scanned expense instead of only printing it.
        #[arg(long)]
        save: bool,
        /// Link the expense to a client.
        #[arg(long)]
        client_id: Option<uuid::Uuid>,
        /// Notes to attach.
        #[arg(long)]
        notes: Option<String>,
    },
    /// Financial reports.
    Reports(reports::ReportsCommand),
}
