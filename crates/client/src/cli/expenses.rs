//! Expense CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use sparkreceipt_core::records::{ExpenseSortKey, ReviewStatus as CoreReviewStatus};
use uuid::Uuid;

/// Expense management commands.
#[derive(Debug, Parser)]
pub struct ExpensesCommand {
    #[command(subcommand)]
    pub action: ExpensesAction,
}

/// CLI review status (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl From<ReviewStatus> for CoreReviewStatus {
    fn from(s: ReviewStatus) -> Self {
        match s {
            ReviewStatus::Pending => CoreReviewStatus::Pending,
            ReviewStatus::Approved => CoreReviewStatus::Approved,
            ReviewStatus::Rejected => CoreReviewStatus::Rejected,
        }
    }
}

/// Field to sort the list by.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum SortBy {
    #[default]
    Date,
    Amount,
}

impl From<SortBy> for ExpenseSortKey {
    fn from(s: SortBy) -> Self {
        match s {
            SortBy::Date => ExpenseSortKey::Date,
            SortBy::Amount => ExpenseSortKey::Amount,
        }
    }
}

/// Available expense actions.
#[derive(Debug, Subcommand)]
pub enum ExpensesAction {
    /// List expenses with filters.
    List {
        /// Match merchant, category or notes.
        #[arg(long)]
        search: Option<String>,
        /// Filter by category name.
        #[arg(long)]
        category: Option<String>,
        /// Filter by review status.
        #[arg(long, value_enum)]
        review_status: Option<ReviewStatus>,
        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<NaiveDate>,
        /// End date (YYYY-MM-DD).
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long)]
        min_amount: Option<f64>,
        #[arg(long)]
        max_amount: Option<f64>,
        #[arg(long, value_enum, default_value = "date")]
        sort_by: SortBy,
        /// Oldest or smallest first.
        #[arg(long)]
        ascending: bool,
        /// Only expenses with a receipt image.
        #[arg(long)]
        receipts: bool,
    },
    /// Record an expense by hand.
    Add {
        /// Total amount.
        #[arg(long)]
        amount: f64,
        /// Transaction date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        merchant: Option<String>,
        /// Category name; must exist.
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        tax: Option<f64>,
        #[arg(long)]
        payment_method: Option<String>,
        #[arg(long)]
        client_id: Option<Uuid>,
        #[arg(long)]
        notes: Option<String>,
        /// Mark as not tax deductible.
        #[arg(long)]
        not_deductible: bool,
    },
    /// Set the review status of an expense.
    Review {
        /// Expense ID.
        id: Uuid,
        #[arg(value_enum)]
        status: ReviewStatus,
    },
    /// Update an expense.
    Update {
        /// Expense ID.
        id: Uuid,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        merchant: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete expense by ID.
    Delete {
        /// Expense ID.
        id: Uuid,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};

    #[test]
    fn test_list_parses_filters() {
        let cli = Cli::try_parse_from([
            "sparkreceipt",
            "expenses",
            "list",
            "--category",
            "Meals",
            "--sort-by",
            "amount",
            "--receipts",
        ])
        .unwrap();

        let Commands::Expenses(ExpensesCommand {
            action:
                ExpensesAction::List {
                    category,
                    sort_by,
                    receipts,
                    ..
                },
        }) = cli.command
        else {
            panic!("expected expenses list");
        };
        assert_eq!(category.as_deref(), Some("Meals"));
        assert_eq!(ExpenseSortKey::from(sort_by), ExpenseSortKey::Amount);
        assert!(receipts);
    }

    #[test]
    fn test_review_takes_positional_status() {
        let id = Uuid::new_v4().to_string();
        let cli =
            Cli::try_parse_from(["sparkreceipt", "expenses", "review", &id, "rejected"]).unwrap();
        let Commands::Expenses(ExpensesCommand {
            action: ExpensesAction::Review { status, .. },
        }) = cli.command
        else {
            panic!("expected expenses review");
        };
        assert_eq!(CoreReviewStatus::from(status), CoreReviewStatus::Rejected);
    }
}
