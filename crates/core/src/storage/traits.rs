use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use super::{Collection, Result, SelectQuery};

/// A record type mirrored from a remote collection.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Payload for inserting a new record (no id or server timestamps).
    type New: Serialize + Clone + Send + Sync;
    /// Partial update; absent fields are left untouched.
    type Patch: Serialize + Clone + Send + Sync;

    /// The collection this record lives in.
    const COLLECTION: Collection;

    /// The record's identifier.
    fn id(&self) -> Uuid;

    /// Applies a partial update in place.
    fn apply_patch(&mut self, patch: Self::Patch);
}

/// Request/response boundary to the hosted record store.
///
/// Implementations either talk to the remote backend or keep rows in memory.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Selects rows matching the query.
    async fn select<T: Record>(&self, query: &SelectQuery) -> Result<Vec<T>>;

    /// Inserts a row and returns the stored record.
    async fn insert<T: Record>(&self, new: &T::New) -> Result<T>;

    /// Updates a row by id and returns the stored record.
    async fn update<T: Record>(&self, id: Uuid, patch: &T::Patch) -> Result<T>;

    /// Deletes a row by id.
    async fn delete<T: Record>(&self, id: Uuid) -> Result<()>;
}
