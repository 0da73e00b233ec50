use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::records::{Expense, IncomeEntry};

/// Label for records without a date in the per-month breakdown.
pub const UNKNOWN_MONTH: &str = "Unknown";

/// Spend within one expense category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: usize,
    pub tax_deductible: f64,
    /// Share of the overall expense total, 0..=100.
    pub percentage: f64,
}

/// Expenses and income for one `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTotal {
    pub month: String,
    pub expenses: f64,
    pub income: f64,
}

/// Deductible spend under one IRS category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrsCategoryTotal {
    pub irs_category: String,
    pub total: f64,
}

/// Groups expenses by category name, largest total first.
pub fn category_breakdown<'a, I>(expenses: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut groups: BTreeMap<&str, CategoryTotal> = BTreeMap::new();
    let mut overall = 0.0;

    for expense in expenses {
        let label = expense.category_label();
        let entry = groups.entry(label).or_insert_with(|| CategoryTotal {
            category: label.to_string(),
            total: 0.0,
            count: 0,
            tax_deductible: 0.0,
            percentage: 0.0,
        });
        entry.total += expense.total_amount;
        entry.count += 1;
        if expense.is_tax_deductible {
            entry.tax_deductible += expense.total_amount;
        }
        overall += expense.total_amount;
    }

    let mut totals: Vec<CategoryTotal> = groups
        .into_values()
        .map(|mut group| {
            group.percentage = if overall > 0.0 {
                group.total / overall * 100.0
            } else {
                0.0
            };
            group
        })
        .collect();
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals
}

/// Expenses and income keyed by `YYYY-MM`, oldest month first.
pub fn monthly_breakdown<'a, E, N>(expenses: E, income: N) -> Vec<MonthTotal>
where
    E: IntoIterator<Item = &'a Expense>,
    N: IntoIterator<Item = &'a IncomeEntry>,
{
    let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();

    for expense in expenses {
        let key = month_key(expense.transaction_date);
        months.entry(key).or_default().0 += expense.total_amount;
    }
    for entry in income {
        let key = month_key(entry.income_date);
        months.entry(key).or_default().1 += entry.amount;
    }

    months
        .into_iter()
        .map(|(month, (expenses, income))| MonthTotal {
            month,
            expenses,
            income,
        })
        .collect()
}

/// Sums tax-deductible expenses per IRS category, largest first.
/// Expenses without an IRS category are skipped.
pub fn irs_breakdown<'a, I>(expenses: I) -> Vec<IrsCategoryTotal>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
    for expense in expenses {
        if !expense.is_tax_deductible {
            continue;
        }
        if let Some(irs) = expense.irs_category.as_deref() {
            *groups.entry(irs).or_default() += expense.total_amount;
        }
    }

    let mut totals: Vec<IrsCategoryTotal> = groups
        .into_iter()
        .map(|(irs_category, total)| IrsCategoryTotal {
            irs_category: irs_category.to_string(),
            total,
        })
        .collect();
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals
}

fn month_key(date: Option<chrono::NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%Y-%m").to_string(),
        None => UNKNOWN_MONTH.to_string(),
    }
}
