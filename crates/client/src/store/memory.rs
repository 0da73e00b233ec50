//! In-memory record store.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use sparkreceipt_core::storage::{
    Collection, FilterOp, Record, RecordStore, Result, SelectQuery, StoreError,
};

/// In-memory storage backend for testing and offline runs.
///
/// Rows are kept as JSON objects per collection, the way the remote store
/// returns them. Inserts assign `id` and `created_at`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    rows: Arc<RwLock<HashMap<Collection, Vec<Map<String, Value>>>>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a collection with existing records, keeping their ids.
    pub async fn seed<T: Record>(&self, records: &[T]) -> Result<()> {
        let mut rows = self.rows.write().await;
        let table = rows.entry(T::COLLECTION).or_default();
        for record in records {
            let row = to_object(record)?;
            let duplicate = row_id(&row).filter(|id| table.iter().any(|r| row_id(r) == Some(*id)));
            if let Some(id) = duplicate {
                return Err(StoreError::AlreadyExists {
                    collection: T::COLLECTION.as_str(),
                    id: id.to_string(),
                });
            }
            table.push(row);
        }
        Ok(())
    }

    /// Number of rows in a collection.
    pub async fn len(&self, collection: Collection) -> usize {
        let rows = self.rows.read().await;
        rows.get(&collection).map_or(0, Vec::len)
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn select<T: Record>(&self, query: &SelectQuery) -> Result<Vec<T>> {
        let rows = self.rows.read().await;
        let Some(table) = rows.get(&T::COLLECTION) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<&Map<String, Value>> =
            table.iter().filter(|row| matches_query(row, query)).collect();

        if let Some(order) = &query.order {
            matched.sort_by(|a, b| {
                let ordering = compare_values(a.get(&order.column), b.get(&order.column));
                if order.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }
        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }

        matched
            .into_iter()
            .map(|row| {
                serde_json::from_value(Value::Object(row.clone())).map_err(StoreError::from)
            })
            .collect()
    }

    async fn insert<T: Record>(&self, new: &T::New) -> Result<T> {
        let mut row = to_object(new)?;
        row.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        row.entry("created_at")
            .or_insert_with(|| Value::String(chrono::Utc::now().to_rfc3339()));

        let record: T = serde_json::from_value(Value::Object(row.clone()))?;

        let mut rows = self.rows.write().await;
        rows.entry(T::COLLECTION).or_default().push(to_object(&record)?);
        Ok(record)
    }

    async fn update<T: Record>(&self, id: Uuid, patch: &T::Patch) -> Result<T> {
        let mut rows = self.rows.write().await;
        let not_found = || StoreError::NotFound {
            collection: T::COLLECTION.as_str(),
            id: id.to_string(),
        };

        let table = rows.get_mut(&T::COLLECTION).ok_or_else(not_found)?;
        let row = table
            .iter_mut()
            .find(|row| row_id(row) == Some(id))
            .ok_or_else(not_found)?;

        let mut record: T = serde_json::from_value(Value::Object(row.clone()))?;
        record.apply_patch(patch.clone());
        *row = to_object(&record)?;
        Ok(record)
    }

    /// Deleting an id that matches no row succeeds, as a zero-row delete
    /// does remotely.
    async fn delete<T: Record>(&self, id: Uuid) -> Result<()> {
        let mut rows = self.rows.write().await;
        if let Some(table) = rows.get_mut(&T::COLLECTION) {
            table.retain(|row| row_id(row) != Some(id));
        }
        Ok(())
    }
}

fn to_object<S: serde::Serialize>(value: &S) -> Result<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidData(format!("expected a JSON object, got {other}"))),
    }
}

fn row_id(row: &Map<String, Value>) -> Option<Uuid> {
    row.get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
}

/// Plain text form of a scalar column, as it would appear in a query string.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn compare_text(left: &str, right: &str) -> Ordering {
    match (left.parse::<f64>(), right.parse::<f64>()) {
        (Ok(l), Ok(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
        _ => left.cmp(right),
    }
}

/// Nulls sort last, like the remote store's default.
fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left.and_then(scalar_text), right.and_then(scalar_text)) {
        (Some(l), Some(r)) => compare_text(&l, &r),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn matches_query(row: &Map<String, Value>, query: &SelectQuery) -> bool {
    query.filters.iter().all(|filter| {
        let Some(actual) = row.get(&filter.column).and_then(scalar_text) else {
            return false;
        };
        match &filter.op {
            FilterOp::Eq(expected) => compare_text(&actual, expected) == Ordering::Equal,
            FilterOp::Gte(bound) => compare_text(&actual, bound) != Ordering::Less,
            FilterOp::Lte(bound) => compare_text(&actual, bound) != Ordering::Greater,
            FilterOp::In(values) => values.iter().any(|v| v == &actual),
            FilterOp::Contains(needle) => actual.to_lowercase().contains(&needle.to_lowercase()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sparkreceipt_core::records::{
        Client, ClientPatch, Expense, NewClient, NewExpense, PaymentStatus,
    };
    use sparkreceipt_core::storage::Order;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamp() {
        let store = InMemoryStore::new();
        let client: Client = store.insert(&NewClient::new("Ana")).await.unwrap();

        assert_eq!(client.name, "Ana");
        assert!(client.created_at.is_some());
        assert_eq!(store.len(Collection::Clients).await, 1);
    }

    #[tokio::test]
    async fn test_select_filters_orders_and_limits() {
        let store = InMemoryStore::new();
        for (amount, day) in [(10.0, 3), (25.0, 1), (40.0, 2)] {
            let _: Expense = store
                .insert(&NewExpense::manual(amount, make_date(2025, 4, day)))
                .await
                .unwrap();
        }

        let query = SelectQuery::new()
            .gte("total_amount", 20)
            .order_by(Order::asc("transaction_date"));
        let expenses: Vec<Expense> = store.select(&query).await.unwrap();
        let amounts: Vec<f64> = expenses.iter().map(|e| e.total_amount).collect();
        assert_eq!(amounts, vec![25.0, 40.0]);

        let query = SelectQuery::all(Collection::Expenses).limit(1);
        let latest: Vec<Expense> = store.select(&query).await.unwrap();
        assert_eq!(latest[0].transaction_date, Some(make_date(2025, 4, 3)));
    }

    #[tokio::test]
    async fn test_select_contains_and_one_of() {
        let store = InMemoryStore::new();
        let _: Client = store.insert(&NewClient::new("Ana Torres")).await.unwrap();
        let _: Client = store.insert(&NewClient::new("Ben Ortiz")).await.unwrap();

        let query = SelectQuery::new().contains("name", "TOR");
        let found: Vec<Client> = store.select(&query).await.unwrap();
        assert_eq!(found.len(), 1);

        let query = SelectQuery::new().one_of("name", ["Ben Ortiz", "Cy"]);
        let found: Vec<Client> = store.select(&query).await.unwrap();
        assert_eq!(found[0].name, "Ben Ortiz");
    }

    #[tokio::test]
    async fn test_update_applies_patch() {
        let store = InMemoryStore::new();
        let client: Client = store.insert(&NewClient::new("Ana")).await.unwrap();

        let patch = ClientPatch {
            payment_status: Some(PaymentStatus::Paid),
            ..ClientPatch::default()
        };
        let updated: Client = store.update(client.id, &patch).await.unwrap();
        assert_eq!(updated.payment_status, PaymentStatus::Paid);
        assert_eq!(updated.name, "Ana");

        let stored: Vec<Client> = store
            .select(&SelectQuery::new().eq("id", client.id))
            .await
            .unwrap();
        assert_eq!(stored[0].payment_status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn test_missing_rows_are_not_found() {
        let store = InMemoryStore::new();
        let id = Uuid::new_v4();

        let err = store
            .update::<Client>(id, &ClientPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { collection: "clients", .. }));
    }

    #[tokio::test]
    async fn test_delete_of_missing_row_succeeds() {
        let store = InMemoryStore::new();
        let client: Client = store.insert(&NewClient::new("Ana")).await.unwrap();

        store.delete::<Client>(Uuid::new_v4()).await.unwrap();
        store.delete::<Expense>(Uuid::new_v4()).await.unwrap();
        assert_eq!(store.len(Collection::Clients).await, 1);

        store.delete::<Client>(client.id).await.unwrap();
        store.delete::<Client>(client.id).await.unwrap();
        assert_eq!(store.len(Collection::Clients).await, 0);
    }

    #[tokio::test]
    async fn test_seed_keeps_ids_and_rejects_duplicates() {
        let source = InMemoryStore::new();
        let client: Client = source.insert(&NewClient::new("Ana")).await.unwrap();

        let store = InMemoryStore::new();
        store.seed(std::slice::from_ref(&client)).await.unwrap();
        let stored: Vec<Client> = store
            .select(&SelectQuery::new().eq("id", client.id))
            .await
            .unwrap();
        assert_eq!(stored, vec![client.clone()]);

        let err = store.seed(&[client.clone()]).await.unwrap_err();
        assert_eq!(
            err,
            StoreError::AlreadyExists {
                collection: "clients",
                id: client.id.to_string(),
            }
        );
        assert_eq!(store.len(Collection::Clients).await, 1);
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let store = InMemoryStore::new();
        let client: Client = store.insert(&NewClient::new("Ana")).await.unwrap();
        store.delete::<Client>(client.id).await.unwrap();
        assert_eq!(store.len(Collection::Clients).await, 0);
    }
}
