//! Functional core for SparkReceipt.
//!
//! Pure record types and the logic that runs over them: filtering, derived
//! statistics, the month calendar grid, invoice rules and the shapes of the
//! hosted function calls. Nothing in this crate performs I/O; the
//! [`storage::RecordStore`] trait is the seam the client crate implements.

pub mod calendar;
pub mod functions;
pub mod invoice;
pub mod records;
pub mod serde;
pub mod stats;
pub mod storage;
