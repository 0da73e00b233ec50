use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::breakdown::{
    category_breakdown, irs_breakdown, monthly_breakdown, CategoryTotal, IrsCategoryTotal,
    MonthTotal,
};
use crate::records::{Expense, IncomeEntry};
use crate::storage::{DateRange, DateRangeError};

/// Preset reporting windows, all ending today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    /// The seven days before today, through today.
    Week,
    Month,
    Quarter,
    #[default]
    Year,
    Custom,
}

impl ReportPeriod {
    /// Date range for a preset period. `Custom` yields `None`; the caller
    /// supplies the range.
    pub fn range(&self, today: NaiveDate) -> Option<DateRange> {
        let start = match self {
            ReportPeriod::Week => return Some(DateRange::trailing_week(today)),
            ReportPeriod::Month => today.with_day(1)?,
            ReportPeriod::Quarter => {
                let first_month = (today.month0() / 3) * 3 + 1;
                NaiveDate::from_ymd_opt(today.year(), first_month, 1)?
            }
            ReportPeriod::Year => return Some(DateRange::year_to_date(today)),
            ReportPeriod::Custom => return None,
        };
        Some(DateRange { start, end: today })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::Week => "week",
            ReportPeriod::Month => "month",
            ReportPeriod::Quarter => "quarter",
            ReportPeriod::Year => "year",
            ReportPeriod::Custom => "custom",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "week" => Ok(ReportPeriod::Week),
            "month" => Ok(ReportPeriod::Month),
            "quarter" => Ok(ReportPeriod::Quarter),
            "year" => Ok(ReportPeriod::Year),
            "custom" => Ok(ReportPeriod::Custom),
            other => Err(format!("unknown report period: {other}")),
        }
    }
}

/// Resolves the report range from a period and optional explicit bounds.
///
/// Explicit bounds turn the period into a custom one; a custom period needs
/// both. Missing custom bounds fall back to year-to-date.
pub fn resolve_report_range(
    period: ReportPeriod,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<DateRange, DateRangeError> {
    match (start, end) {
        (Some(start), Some(end)) => DateRange::new(start, end),
        (Some(start), None) => DateRange::new(start, today),
        (None, Some(end)) => DateRange::new(DateRange::year_to_date(end).start, end),
        (None, None) => Ok(period
            .range(today)
            .unwrap_or_else(|| DateRange::year_to_date(today))),
    }
}

/// Which records a report covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFilter {
    pub range: DateRange,
    /// Category names to include. Empty means all categories.
    pub categories: Vec<String>,
}

impl ReportFilter {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            categories: Vec::new(),
        }
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Dated expenses in range whose category is selected.
    pub fn expenses<'a>(&self, expenses: &'a [Expense]) -> Vec<&'a Expense> {
        expenses
            .iter()
            .filter(|e| e.transaction_date.is_some_and(|d| self.range.contains(d)))
            .filter(|e| {
                self.categories.is_empty()
                    || self
                        .categories
                        .iter()
                        .any(|c| Some(c.as_str()) == e.category_name.as_deref())
            })
            .collect()
    }

    /// Dated income in range. Category selection does not apply to income.
    pub fn income<'a>(&self, income: &'a [IncomeEntry]) -> Vec<&'a IncomeEntry> {
        income
            .iter()
            .filter(|i| i.income_date.is_some_and(|d| self.range.contains(d)))
            .collect()
    }
}

/// Everything the reports view shows for one range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    pub range: DateRange,
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub total_tax: f64,
    pub tax_deductible: f64,
    pub expense_count: usize,
    pub income_count: usize,
    pub category_breakdown: Vec<CategoryTotal>,
    pub monthly_breakdown: Vec<MonthTotal>,
    pub irs_breakdown: Vec<IrsCategoryTotal>,
}

/// Aggregates pre-filtered expenses and income over `range`.
pub fn build_report(
    range: DateRange,
    expenses: &[&Expense],
    income: &[&IncomeEntry],
) -> ReportData {
    let total_expenses: f64 = expenses.iter().map(|e| e.total_amount).sum();
    let total_income: f64 = income.iter().map(|i| i.amount).sum();

    ReportData {
        range,
        total_income,
        total_expenses,
        net_profit: total_income - total_expenses,
        total_tax: expenses.iter().map(|e| e.tax()).sum(),
        tax_deductible: expenses
            .iter()
            .filter(|e| e.is_tax_deductible)
            .map(|e| e.total_amount)
            .sum(),
        expense_count: expenses.len(),
        income_count: income.len(),
        category_breakdown: category_breakdown(expenses.iter().copied()),
        monthly_breakdown: monthly_breakdown(expenses.iter().copied(), income.iter().copied()),
        irs_breakdown: irs_breakdown(expenses.iter().copied()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn expense(
        category: &str,
        amount: f64,
        tax: f64,
        deductible: bool,
        date: Option<NaiveDate>,
    ) -> Expense {
        serde_json::from_value(serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "category_name": category,
            "total_amount": amount,
            "tax_amount": tax,
            "is_tax_deductible": deductible,
            "irs_category": "Supplies",
            "transaction_date": date,
        }))
        .unwrap()
    }

    fn income(amount: f64, date: Option<NaiveDate>) -> IncomeEntry {
        serde_json::from_value(serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "amount": amount,
            "income_date": date,
        }))
        .unwrap()
    }

    #[test]
    fn test_period_ranges() {
        let today = make_date(2025, 8, 20);

        assert_eq!(ReportPeriod::Week.range(today).unwrap().start, make_date(2025, 8, 13));
        assert_eq!(ReportPeriod::Month.range(today).unwrap().start, make_date(2025, 8, 1));
        assert_eq!(ReportPeriod::Quarter.range(today).unwrap().start, make_date(2025, 7, 1));
        assert_eq!(ReportPeriod::Year.range(today).unwrap().start, make_date(2025, 1, 1));
        assert_eq!(ReportPeriod::Year.range(today).unwrap().end, today);
        assert!(ReportPeriod::Custom.range(today).is_none());
    }

    #[test]
    fn test_quarter_boundaries() {
        assert_eq!(
            ReportPeriod::Quarter.range(make_date(2025, 3, 31)).unwrap().start,
            make_date(2025, 1, 1)
        );
        assert_eq!(
            ReportPeriod::Quarter.range(make_date(2025, 12, 1)).unwrap().start,
            make_date(2025, 10, 1)
        );
    }

    #[test]
    fn test_period_parse() {
        assert_eq!("Quarter".parse::<ReportPeriod>(), Ok(ReportPeriod::Quarter));
        assert!("fortnight".parse::<ReportPeriod>().is_err());
    }

    #[test]
    fn test_resolve_report_range() {
        let today = make_date(2025, 5, 5);
        let custom = resolve_report_range(
            ReportPeriod::Custom,
            Some(make_date(2025, 2, 1)),
            Some(make_date(2025, 2, 28)),
            today,
        )
        .unwrap();
        assert_eq!(custom.num_days(), 28);

        assert_eq!(
            resolve_report_range(
                ReportPeriod::Custom,
                Some(make_date(2025, 3, 1)),
                Some(make_date(2025, 2, 1)),
                today
            ),
            Err(DateRangeError::InvalidRange)
        );

        let preset = resolve_report_range(ReportPeriod::Month, None, None, today).unwrap();
        assert_eq!(preset.start, make_date(2025, 5, 1));
    }

    #[test]
    fn test_filter_excludes_undated_and_unselected() {
        let range = DateRange::new(make_date(2025, 1, 1), make_date(2025, 1, 31)).unwrap();
        let expenses = vec![
            expense("Fuel", 40.0, 0.0, true, Some(make_date(2025, 1, 5))),
            expense("Meals", 20.0, 0.0, true, Some(make_date(2025, 1, 6))),
            expense("Fuel", 99.0, 0.0, true, None),
            expense("Fuel", 10.0, 0.0, true, Some(make_date(2025, 2, 1))),
        ];

        let all = ReportFilter::new(range);
        assert_eq!(all.expenses(&expenses).len(), 2);

        let fuel_only = ReportFilter::new(range).with_categories(vec!["Fuel".to_string()]);
        let selected = fuel_only.expenses(&expenses);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].total_amount, 40.0);
    }

    #[test]
    fn test_build_report() {
        let range = DateRange::new(make_date(2025, 1, 1), make_date(2025, 3, 31)).unwrap();
        let expenses = vec![
            expense("Fuel", 40.0, 3.0, true, Some(make_date(2025, 1, 5))),
            expense("Meals", 60.0, 5.0, false, Some(make_date(2025, 2, 6))),
        ];
        let income = vec![
            income(500.0, Some(make_date(2025, 2, 1))),
            income(1000.0, None),
        ];

        let filter = ReportFilter::new(range);
        let report = build_report(range, &filter.expenses(&expenses), &filter.income(&income));

        assert_eq!(report.total_income, 500.0);
        assert_eq!(report.total_expenses, 100.0);
        assert_eq!(report.net_profit, report.total_income - report.total_expenses);
        assert_eq!(report.total_tax, 8.0);
        assert_eq!(report.tax_deductible, 40.0);
        assert_eq!(report.expense_count, 2);
        assert_eq!(report.income_count, 1);
        assert_eq!(report.category_breakdown[0].category, "Meals");
        assert_eq!(report.monthly_breakdown.len(), 2);
        assert_eq!(report.irs_breakdown[0].total, 40.0);
    }
}
