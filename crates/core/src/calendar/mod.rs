mod error;
mod grid;
mod operations;
mod types;

pub use error::CalendarError;
pub use grid::{
    build_month_grid, payment_due_color, payment_due_item, GridOptions, PAID_PAYMENT_COLOR,
    PARTIAL_PAYMENT_COLOR, UNPAID_PAYMENT_COLOR,
};
pub use operations::{events_on, insert_sorted, upcoming_events};
pub use types::{CalendarMonth, DayItem, GridDay, MonthGrid, EVENT_COLOR_OPTIONS, GRID_CELLS};
