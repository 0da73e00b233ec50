//! Month calendar CLI command.

use chrono::NaiveDate;
use clap::Parser;

/// Show a month grid of events and payment due dates.
#[derive(Debug, Parser)]
pub struct CalendarCommand {
    /// Year. Defaults to the current year.
    #[arg(long)]
    pub year: Option<i32>,
    /// Month 1-12. Defaults to the current month.
    #[arg(long)]
    pub month: Option<u32>,
    /// Show the month before the selected one.
    #[arg(long, conflicts_with = "next")]
    pub previous: bool,
    /// Show the month after the selected one.
    #[arg(long)]
    pub next: bool,
    /// Include due dates of invoices already paid.
    #[arg(long)]
    pub include_paid: bool,
    /// List the items of this day instead of the whole month.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};

    #[test]
    fn test_previous_and_next_conflict() {
        let parsed = Cli::try_parse_from(["sparkreceipt", "calendar", "--previous", "--next"]);
        assert!(parsed.is_err());

        let cli =
            Cli::try_parse_from(["sparkreceipt", "calendar", "--year", "2025", "--month", "2"])
                .unwrap();
        let Commands::Calendar(cmd) = cli.command else {
            panic!("expected calendar");
        };
        assert_eq!((cmd.year, cmd.month), (Some(2025), Some(2)));
        assert!(!cmd.include_paid);
    }
}
