//! Record API operations.

use async_trait::async_trait;
use sparkreceipt_core::storage::{self, Record, RecordStore, SelectQuery, StoreError};
use uuid::Uuid;

use super::SparkReceiptClient;
use crate::error::{ClientError, Result};

impl SparkReceiptClient {
    fn collection_url<T: Record>(&self) -> String {
        self.url(&format!("/rest/v1/{}", T::COLLECTION))
    }

    /// Select rows of `T` matching the query.
    pub async fn select_records<T: Record>(&self, query: &SelectQuery) -> Result<Vec<T>> {
        let response = self
            .client
            .get(self.collection_url::<T>())
            .query(&query.to_query_pairs())
            .send()
            .await?;
        self.handle_response(response, T::COLLECTION.as_str()).await
    }

    /// Insert a row and return the stored record.
    pub async fn insert_record<T: Record>(&self, new: &T::New) -> Result<T> {
        let response = self
            .client
            .post(self.collection_url::<T>())
            .header("Prefer", "return=representation")
            .json(new)
            .send()
            .await?;
        let rows: Vec<T> = self
            .handle_response(response, T::COLLECTION.as_str())
            .await?;
        rows.into_iter().next().ok_or_else(|| {
            ClientError::InvalidResponse(format!("insert into {} returned no row", T::COLLECTION))
        })
    }

    /// Update a row by id and return the stored record.
    pub async fn update_record<T: Record>(&self, id: Uuid, patch: &T::Patch) -> Result<T> {
        let response = self
            .client
            .patch(self.collection_url::<T>())
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await?;
        let rows: Vec<T> = self
            .handle_response(response, T::COLLECTION.as_str())
            .await?;
        rows.into_iter().next().ok_or_else(|| {
            ClientError::Store(StoreError::NotFound {
                collection: T::COLLECTION.as_str(),
                id: id.to_string(),
            })
        })
    }

    /// Delete a row by id.
    pub async fn delete_record<T: Record>(&self, id: Uuid) -> Result<()> {
        let response = self
            .client
            .delete(self.collection_url::<T>())
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        self.handle_empty_response(response, T::COLLECTION.as_str())
            .await
    }
}

#[async_trait]
impl RecordStore for SparkReceiptClient {
    async fn select<T: Record>(&self, query: &SelectQuery) -> storage::Result<Vec<T>> {
        Ok(self.select_records(query).await?)
    }

    async fn insert<T: Record>(&self, new: &T::New) -> storage::Result<T> {
        Ok(self.insert_record(new).await?)
    }

    async fn update<T: Record>(&self, id: Uuid, patch: &T::Patch) -> storage::Result<T> {
        Ok(self.update_record(id, patch).await?)
    }

    async fn delete<T: Record>(&self, id: Uuid) -> storage::Result<()> {
        Ok(self.delete_record::<T>(id).await?)
    }
}
