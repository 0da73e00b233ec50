mod error;
mod traits;
mod types;

pub use error::{DateRangeError, Result, StoreError};
pub use traits::{Record, RecordStore};
pub use types::{Collection, DateRange, Filter, FilterOp, Order, SelectQuery};
