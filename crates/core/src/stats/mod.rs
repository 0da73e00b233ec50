mod breakdown;
mod csv;
mod dashboard;
mod report;

pub use breakdown::{
    category_breakdown, irs_breakdown, monthly_breakdown, CategoryTotal, IrsCategoryTotal,
    MonthTotal, UNKNOWN_MONTH,
};
pub use csv::render_report_csv;
pub use dashboard::{compute_dashboard_stats, monthly_summary, DashboardStats, MonthlySummary};
pub use report::{build_report, resolve_report_range, ReportData, ReportFilter, ReportPeriod};
