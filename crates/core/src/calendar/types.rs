use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::CalendarError;
use crate::records::{CalendarEvent, InvoiceStatus};

/// Number of cells in a month grid: six weeks of seven days.
pub const GRID_CELLS: usize = 42;

/// Colors offered when creating an event.
pub const EVENT_COLOR_OPTIONS: [&str; 8] = [
    "#8B5CF6", "#EC4899", "#EF4444", "#F59E0B", "#10B981", "#3B82F6", "#6366F1", "#14B8A6",
];

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(CalendarError::InvalidMonth { year, month });
        }
        Ok(Self { year, month })
    }

    /// The month that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn first_day(&self) -> Result<NaiveDate, CalendarError> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or(CalendarError::InvalidMonth {
            year: self.year,
            month: self.month,
        })
    }

    pub fn last_day(&self) -> Result<NaiveDate, CalendarError> {
        let next = self.next().first_day()?;
        next.pred_opt().ok_or(CalendarError::InvalidMonth {
            year: self.year,
            month: self.month,
        })
    }

    pub fn num_days(&self) -> Result<u32, CalendarError> {
        Ok(self.last_day()?.day())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first_day() {
            Ok(first) => write!(f, "{}", first.format("%B %Y")),
            Err(_) => write!(f, "{:04}-{:02}", self.year, self.month),
        }
    }
}

/// Something shown on a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayItem {
    /// A stored calendar event.
    Event(CalendarEvent),
    /// An invoice due that day. Synthesized for display only; it has no
    /// record of its own and cannot be edited or deleted.
    PaymentDue {
        invoice_id: Uuid,
        invoice_number: String,
        title: String,
        color: String,
        status: InvoiceStatus,
    },
}

impl DayItem {
    pub fn title(&self) -> &str {
        match self {
            DayItem::Event(event) => &event.title,
            DayItem::PaymentDue { title, .. } => title,
        }
    }

    pub fn color(&self) -> &str {
        match self {
            DayItem::Event(event) => &event.color,
            DayItem::PaymentDue { color, .. } => color,
        }
    }

    pub fn start_time(&self) -> Option<NaiveTime> {
        match self {
            DayItem::Event(event) => event.start_time,
            DayItem::PaymentDue { .. } => None,
        }
    }

    pub fn is_payment_due(&self) -> bool {
        match self {
            DayItem::Event(event) => event.is_payment_due,
            DayItem::PaymentDue { .. } => true,
        }
    }

    /// Only stored events can be edited or deleted.
    pub fn is_editable(&self) -> bool {
        matches!(self, DayItem::Event(_))
    }
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridDay {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub items: Vec<DayItem>,
}

impl GridDay {
    /// A padding cell from an adjacent month. Padding cells never carry items.
    pub fn padding(date: NaiveDate) -> Self {
        Self {
            date,
            is_current_month: false,
            items: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// A 6x7 month grid, Sunday first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub month: CalendarMonth,
    pub days: Vec<GridDay>,
}

impl MonthGrid {
    /// Rows of seven days, Sunday to Saturday.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridDay]> {
        self.days.chunks(7)
    }

    /// The in-month cell for `date`, if it belongs to this month.
    pub fn day(&self, date: NaiveDate) -> Option<&GridDay> {
        self.days
            .iter()
            .find(|d| d.is_current_month && d.date == date)
    }

    /// Items shown for `date`; empty for dates outside the month.
    pub fn items_for(&self, date: NaiveDate) -> &[DayItem] {
        self.day(date).map(|d| d.items.as_slice()).unwrap_or(&[])
    }
}
