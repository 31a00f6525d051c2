//! Base repository trait for database operations.

use crate::db::errors::Result;

/// Read-only repository over a catalog table.
///
/// Catalog rows are owned by the import pipeline that builds the database, so repositories here
/// only ever list. Each implementation picks the filter it accepts and the record it returns.
#[async_trait::async_trait]
pub trait Repository {
    /// The record type returned by operations
    type Response;

    /// The filter type for list operations
    type Filter: Send + Sync;

    /// List entities matching the filter
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>>;
}
