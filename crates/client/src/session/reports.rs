use sparkreceipt_core::functions::{ReportFormat, ReportPayload, ReportRequest};
use sparkreceipt_core::stats::{build_report, render_report_csv, ReportData, ReportFilter};
use sparkreceipt_core::storage::RecordStore;

use super::Session;
use crate::error::Result;
use crate::services::BackendServices;

impl<S: RecordStore> Session<S> {
    /// Aggregates the cached records selected by `filter`.
    pub fn report_data(&self, filter: &ReportFilter) -> ReportData {
        let expenses = filter.expenses(self.expenses());
        let income = filter.income(self.income());
        build_report(filter.range, &expenses, &income)
    }

    /// Generates a report document through the backend, falling back to a
    /// locally built one when the call fails.
    pub async fn generate_report<B: BackendServices>(
        &self,
        services: &B,
        format: ReportFormat,
        filter: &ReportFilter,
    ) -> Result<ReportPayload> {
        let expenses = filter.expenses(self.expenses());
        let income = filter.income(self.income());
        let request = ReportRequest::new(format, filter.range, expenses.clone(), income.clone());

        match services.generate_report(&request).await {
            Ok(payload) => Ok(payload),
            Err(e) => {
                tracing::warn!(%format, error = %e, "Report generation failed, building locally");
                let report = build_report(filter.range, &expenses, &income);
                let payload = match format {
                    ReportFormat::Csv => ReportPayload::Csv(render_report_csv(&report, &expenses)),
                    ReportFormat::Json => ReportPayload::Json(serde_json::to_value(&report)?),
                };
                Ok(payload)
            }
        }
    }
}
