//! Report CLI commands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use sparkreceipt_core::functions::ReportFormat as CoreReportFormat;
use sparkreceipt_core::stats::ReportPeriod;

/// Report commands.
#[derive(Debug, Parser)]
pub struct ReportsCommand {
    #[command(subcommand)]
    pub action: ReportsAction,
}

/// CLI report period (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Period {
    Week,
    Month,
    Quarter,
    Year,
    Custom,
}

impl From<Period> for ReportPeriod {
    fn from(p: Period) -> Self {
        match p {
            Period::Week => ReportPeriod::Week,
            Period::Month => ReportPeriod::Month,
            Period::Quarter => ReportPeriod::Quarter,
            Period::Year => ReportPeriod::Year,
            Period::Custom => ReportPeriod::Custom,
        }
    }
}

/// CLI report file format (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Csv,
    Json,
}

impl From<ReportFormat> for CoreReportFormat {
    fn from(f: ReportFormat) -> Self {
        match f {
            ReportFormat::Csv => CoreReportFormat::Csv,
            ReportFormat::Json => CoreReportFormat::Json,
        }
    }
}

/// Range and category selection shared by report actions.
#[derive(Debug, Clone, clap::Args)]
pub struct ReportRange {
    /// Preset period ending today.
    #[arg(long, value_enum, default_value = "year")]
    pub period: Period,
    /// Start date (YYYY-MM-DD); makes the range custom.
    #[arg(long)]
    pub start: Option<NaiveDate>,
    /// End date (YYYY-MM-DD); makes the range custom.
    #[arg(long)]
    pub end: Option<NaiveDate>,
    /// Only these expense categories. Repeatable.
    #[arg(long = "category")]
    pub categories: Vec<String>,
}

/// Available report actions.
#[derive(Debug, Subcommand)]
pub enum ReportsAction {
    /// Totals and breakdowns for a range.
    Show {
        #[command(flatten)]
        range: ReportRange,
    },
    /// Generate a CSV or JSON report file.
    Export {
        #[command(flatten)]
        range: ReportRange,
        #[arg(long, value_enum, default_value = "csv")]
        report_format: ReportFormat,
        /// Output path. Defaults to a dated file name in the current directory.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};

    #[test]
    fn test_export_parses_range_and_format() {
        let cli = Cli::try_parse_from([
            "sparkreceipt",
            "reports",
            "export",
            "--start",
            "2025-01-01",
            "--end",
            "2025-03-31",
            "--category",
            "Meals",
            "--report-format",
            "json",
        ])
        .unwrap();

        let Commands::Reports(ReportsCommand {
            action:
                ReportsAction::Export {
                    range,
                    report_format,
                    output,
                },
        }) = cli.command
        else {
            panic!("expected reports export");
        };
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(range.categories, vec!["Meals".to_string()]);
        assert_eq!(CoreReportFormat::from(report_format), CoreReportFormat::Json);
        assert!(output.is_none());
    }

    #[test]
    fn test_show_defaults_to_year() {
        let cli = Cli::try_parse_from(["sparkreceipt", "reports", "show"]).unwrap();
        let Commands::Reports(ReportsCommand {
            action: ReportsAction::Show { range },
        }) = cli.command
        else {
            panic!("expected reports show");
        };
        assert_eq!(ReportPeriod::from(range.period), ReportPeriod::Year);
    }
}
