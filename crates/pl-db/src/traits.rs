//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;
use pl_core::TableData;
use std::path::Path;

/// Execution engine used to stage, persist and audit warehouse tables
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute query returning row count
    async fn query_count(&self, sql: &str) -> DbResult<usize>;

    /// First column of the first row, or `None` for no rows or a NULL value
    async fn query_one(&self, sql: &str) -> DbResult<Option<String>>;

    /// Drop a table if it exists
    async fn drop_if_exists(&self, name: &str) -> DbResult<()>;

    /// Create (or replace) the table described by `data.spec` and bulk-load its rows.
    /// Returns the number of rows loaded.
    async fn load_table(&self, data: &TableData) -> DbResult<usize>;

    /// Write a loaded table as Parquet under `path`, replacing whatever is there.
    ///
    /// With `partition_by` empty the table lands in `path/part-00000.parquet`;
    /// otherwise in a hive-style `col=value/` tree below `path`.
    async fn copy_to_parquet(&self, table: &str, path: &Path, partition_by: &[&str])
        -> DbResult<()>;
}
