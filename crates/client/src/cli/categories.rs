//! Expense category CLI commands.

use clap::{Parser, Subcommand};

/// Category commands.
#[derive(Debug, Parser)]
pub struct CategoriesCommand {
    #[command(subcommand)]
    pub action: CategoriesAction,
}

/// Available category actions.
#[derive(Debug, Subcommand)]
pub enum CategoriesAction {
    /// List categories by name.
    List,
    /// Add an expense category.
    Add {
        /// Category name.
        name: String,
        /// Hex color, e.g. #10B981.
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        /// IRS Schedule C line this category maps to.
        #[arg(long)]
        irs_category: Option<String>,
    },
}
