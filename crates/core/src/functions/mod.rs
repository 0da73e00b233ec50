//! Request and response shapes of the hosted functions (receipt extraction,
//! report generation) and the pure logic around them.

mod extraction;
mod report;

pub use extraction::{
    expense_from_extraction, ExtractedReceipt, ExtractionRequest, ExtractionResponse,
    DEFAULT_COUNTRY, DEFAULT_PAYMENT_METHOD,
};
pub use report::{report_file_name, ReportFormat, ReportPayload, ReportRequest};
