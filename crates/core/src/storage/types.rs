use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::DateRangeError;

/// A named collection in the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    BusinessProfile,
    Clients,
    Invoices,
    Expenses,
    IncomeEntries,
    Events,
    ExpenseCategories,
    Payments,
}

impl Collection {
    /// Every collection the session mirrors.
    pub const ALL: [Collection; 8] = [
        Collection::BusinessProfile,
        Collection::Clients,
        Collection::Invoices,
        Collection::Expenses,
        Collection::IncomeEntries,
        Collection::Events,
        Collection::ExpenseCategories,
        Collection::Payments,
    ];

    /// The remote table name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::BusinessProfile => "business_profile",
            Collection::Clients => "clients",
            Collection::Invoices => "invoices",
            Collection::Expenses => "expenses",
            Collection::IncomeEntries => "income_entries",
            Collection::Events => "events",
            Collection::ExpenseCategories => "expense_categories",
            Collection::Payments => "payments",
        }
    }

    /// Ordering used when the whole collection is loaded into the session.
    pub fn default_order(&self) -> Option<Order> {
        match self {
            Collection::BusinessProfile => None,
            Collection::Clients | Collection::Invoices => Some(Order::desc("created_at")),
            Collection::Expenses => Some(Order::desc("transaction_date")),
            Collection::IncomeEntries => Some(Order::desc("income_date")),
            Collection::Events => Some(Order::asc("event_date")),
            Collection::ExpenseCategories => Some(Order::asc("name")),
            Collection::Payments => Some(Order::desc("payment_date")),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort order on a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }
}

/// Comparison operator of a column filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOp {
    Eq(String),
    Gte(String),
    Lte(String),
    In(Vec<String>),
    /// Case-insensitive substring match.
    Contains(String),
}

/// A filter on a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
}

/// Query against a collection: filters, ordering and an optional limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectQuery {
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query for the full collection in its default order.
    pub fn all(collection: Collection) -> Self {
        Self {
            order: collection.default_order(),
            ..Self::default()
        }
    }

    pub fn eq(self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filter(column, FilterOp::Eq(value.to_string()))
    }

    pub fn gte(self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filter(column, FilterOp::Gte(value.to_string()))
    }

    pub fn lte(self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filter(column, FilterOp::Lte(value.to_string()))
    }

    pub fn one_of<I, V>(self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        let values = values.into_iter().map(|v| v.to_string()).collect();
        self.filter(column, FilterOp::In(values))
    }

    pub fn contains(self, column: impl Into<String>, needle: impl Into<String>) -> Self {
        self.filter(column, FilterOp::Contains(needle.into()))
    }

    pub fn order_by(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn filter(mut self, column: impl Into<String>, op: FilterOp) -> Self {
        self.filters.push(Filter {
            column: column.into(),
            op,
        });
        self
    }

    /// Renders the query as PostgREST query-string pairs.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), "*".to_string())];
        for filter in &self.filters {
            let value = match &filter.op {
                FilterOp::Eq(v) => format!("eq.{v}"),
                FilterOp::Gte(v) => format!("gte.{v}"),
                FilterOp::Lte(v) => format!("lte.{v}"),
                FilterOp::In(values) => format!("in.({})", values.join(",")),
                FilterOp::Contains(v) => format!("ilike.*{v}*"),
            };
            pairs.push((filter.column.clone(), value));
        }
        if let Some(order) = &self.order {
            let direction = if order.ascending { "asc" } else { "desc" };
            pairs.push(("order".to_string(), format!("{}.{direction}", order.column)));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

/// A date range with inclusive start and end dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Creates a date range for an entire month. Returns None for an invalid month.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self {
            start,
            end: next.pred_opt()?,
        })
    }

    /// Returns true if `date` falls within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, both ends included.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The range spanning the seven days ending on `date`.
    pub fn trailing_week(date: NaiveDate) -> Self {
        Self {
            start: date - Duration::days(7),
            end: date,
        }
    }

    /// From the first day of `date`'s year to `date`.
    pub fn year_to_date(date: NaiveDate) -> Self {
        Self {
            start: date.with_ordinal(1).unwrap_or(date),
            end: date,
        }
    }
}
