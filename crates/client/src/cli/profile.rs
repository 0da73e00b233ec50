//! Business profile CLI commands.

use clap::{Args, Parser, Subcommand};

/// Profile commands.
#[derive(Debug, Parser)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile fields shared by create and update.
#[derive(Debug, Clone, Default, Args)]
pub struct ProfileFields {
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub zip: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub website: Option<String>,
}

/// Available profile actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// Show the business profile.
    Show,
    /// Create the business profile.
    Create {
        /// Business name.
        #[arg(long)]
        name: String,
        #[command(flatten)]
        fields: ProfileFields,
    },
    /// Update the business profile.
    Update {
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: ProfileFields,
        #[arg(long)]
        logo_url: Option<String>,
    },
}
