use std::fmt::Write;

use super::report::ReportData;
use crate::records::Expense;

/// Renders a report as CSV locally, used when the remote report function is
/// unavailable.
///
/// Sections: title and period, SUMMARY, EXPENSES BY CATEGORY, EXPENSE DETAILS.
/// Commas inside merchant names are replaced with spaces.
pub fn render_report_csv(report: &ReportData, expenses: &[&Expense]) -> String {
    let mut csv = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(csv, "SparkReceipt Financial Report");
    let _ = writeln!(
        csv,
        "Report Period: {} to {}",
        report.range.start, report.range.end
    );
    csv.push('\n');

    csv.push_str("SUMMARY\n");
    let _ = writeln!(csv, "Total Income,{:.2}", report.total_income);
    let _ = writeln!(csv, "Total Expenses,{:.2}", report.total_expenses);
    let _ = writeln!(csv, "Net Profit,{:.2}", report.net_profit);
    let _ = writeln!(csv, "Tax Deductible,{:.2}", report.tax_deductible);
    csv.push('\n');

    csv.push_str("EXPENSES BY CATEGORY\n");
    csv.push_str("Category,Amount,Count,Tax Deductible\n");
    for category in &report.category_breakdown {
        let _ = writeln!(
            csv,
            "{},{:.2},{},{:.2}",
            csv_field(&category.category),
            category.total,
            category.count,
            category.tax_deductible
        );
    }
    csv.push('\n');

    csv.push_str("EXPENSE DETAILS\n");
    csv.push_str("Date,Merchant,Category,Amount,Tax,Deductible\n");
    for expense in expenses {
        let date = expense
            .transaction_date
            .map(|d| d.to_string())
            .unwrap_or_default();
        let _ = writeln!(
            csv,
            "{},{},{},{},{},{}",
            date,
            csv_field(expense.merchant_name.as_deref().unwrap_or_default()),
            csv_field(expense.category_name.as_deref().unwrap_or_default()),
            expense.total_amount,
            expense.tax(),
            if expense.is_tax_deductible { "Yes" } else { "No" }
        );
    }

    csv
}

fn csv_field(value: &str) -> String {
    value.replace(',', " ")
}
