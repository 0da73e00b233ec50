use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::records::{Expense, IncomeEntry};
use crate::storage::DateRange;

/// Output format of a generated report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

/// Body sent to the report generation function.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest<'a> {
    pub format: ReportFormat,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub expenses: Vec<&'a Expense>,
    pub income: Vec<&'a IncomeEntry>,
}

impl<'a> ReportRequest<'a> {
    pub fn new(
        format: ReportFormat,
        range: DateRange,
        expenses: Vec<&'a Expense>,
        income: Vec<&'a IncomeEntry>,
    ) -> Self {
        Self {
            format,
            start_date: range.start,
            end_date: range.end,
            expenses,
            income,
        }
    }
}

/// A generated report document.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportPayload {
    Csv(String),
    Json(serde_json::Value),
}

impl ReportPayload {
    pub fn format(&self) -> ReportFormat {
        match self {
            ReportPayload::Csv(_) => ReportFormat::Csv,
            ReportPayload::Json(_) => ReportFormat::Json,
        }
    }

    /// Document body as text.
    pub fn to_text(&self) -> String {
        match self {
            ReportPayload::Csv(text) => text.clone(),
            ReportPayload::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

/// Download name: `sparkreceipt-report-{start}-to-{end}.{ext}`.
pub fn report_file_name(range: DateRange, format: ReportFormat) -> String {
    format!(
        "sparkreceipt-report-{}-to-{}.{}",
        range.start,
        range.end,
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_request_shape() {
        let range = DateRange::new(make_date(2025, 1, 1), make_date(2025, 3, 31)).unwrap();
        let request = ReportRequest::new(ReportFormat::Json, range, Vec::new(), Vec::new());
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["format"], "json");
        assert_eq!(body["startDate"], "2025-01-01");
        assert_eq!(body["endDate"], "2025-03-31");
        assert!(body["expenses"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_file_name() {
        let range = DateRange::new(make_date(2025, 1, 1), make_date(2025, 3, 31)).unwrap();
        assert_eq!(
            report_file_name(range, ReportFormat::Csv),
            "sparkreceipt-report-2025-01-01-to-2025-03-31.csv"
        );
    }

    #[test]
    fn test_payload_text() {
        let csv = ReportPayload::Csv("a,b\n".to_string());
        assert_eq!(csv.to_text(), "a,b\n");
        assert_eq!(csv.format(), ReportFormat::Csv);

        let json = ReportPayload::Json(serde_json::json!({ "total": 1 }));
        assert!(json.to_text().contains("\"total\": 1"));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("CSV".parse::<ReportFormat>(), Ok(ReportFormat::Csv));
        assert!("pdf".parse::<ReportFormat>().is_err());
    }
}
