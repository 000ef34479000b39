//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use duckdb::types::{TimeUnit, Value};
use duckdb::{appender_params_from_iter, Connection};
use pl_core::sql_utils::{ident_list, quote_ident, quote_literal};
use pl_core::{Cell, TableData, TableSpec};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// File name used for unpartitioned (and empty) table artifacts
pub const SINGLE_FILE_NAME: &str = "part-00000.parquet";

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Execute batch SQL synchronously
    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql).map_err(DbError::from)
    }

    /// Query count synchronously
    fn query_count_sync(&self, sql: &str) -> DbResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM ({})", sql), [], |row| {
            row.get(0)
        })?;
        Ok(count as usize)
    }

    fn query_one_sync(&self, sql: &str) -> DbResult<Option<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT CAST(v AS VARCHAR) FROM ({}) AS q(v) LIMIT 1",
            sql
        ))?;
        let mut rows = stmt.query([])?;
        match rows.next()? {
            Some(row) => Ok(row.get::<_, Option<String>>(0)?),
            None => Ok(None),
        }
    }

    fn load_table_sync(&self, data: &TableData) -> DbResult<usize> {
        let spec = data.spec;
        let conn = self.lock()?;
        conn.execute_batch(&create_table_sql(spec))?;

        let mut appender = conn.appender(spec.name)?;
        for (i, row) in data.rows.iter().enumerate() {
            if row.len() != spec.columns.len() {
                return Err(DbError::RowShape {
                    table: spec.name.to_string(),
                    row: i,
                    found: row.len(),
                    expected: spec.columns.len(),
                });
            }
            appender.append_row(appender_params_from_iter(row.iter().map(to_value)))?;
        }
        appender.flush()?;

        log::debug!("Loaded {} rows into {}", data.rows.len(), spec.name);
        Ok(data.rows.len())
    }

    fn copy_to_parquet_sync(
        &self,
        table: &str,
        path: &Path,
        partition_by: &[&str],
    ) -> DbResult<()> {
        remove_artifact(path)?;

        let row_count = self.query_count_sync(&format!("SELECT * FROM {}", quote_ident(table)))?;

        // A partitioned COPY of zero rows writes no files; keep the schema
        // readable by emitting a single empty file instead.
        let sql = if partition_by.is_empty() || row_count == 0 {
            std::fs::create_dir_all(path).map_err(|e| write_error(path, e))?;
            format!(
                "COPY {} TO {} (FORMAT PARQUET)",
                quote_ident(table),
                quote_literal(&path.join(SINGLE_FILE_NAME).to_string_lossy())
            )
        } else {
            format!(
                "COPY {} TO {} (FORMAT PARQUET, PARTITION_BY ({}), OVERWRITE_OR_IGNORE)",
                quote_ident(table),
                quote_literal(&path.to_string_lossy()),
                ident_list(partition_by)
            )
        };

        self.execute_batch_sync(&sql).map_err(|e| DbError::WriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        log::debug!("Wrote {} ({} rows) to {}", table, row_count, path.display());
        Ok(())
    }
}

/// `CREATE OR REPLACE TABLE` statement for a table layout
pub fn create_table_sql(spec: &TableSpec) -> String {
    let columns = spec
        .columns
        .iter()
        .map(|c| format!("{} {}", quote_ident(c.name), c.ty.sql_name()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("CREATE OR REPLACE TABLE {} ({})", quote_ident(spec.name), columns)
}

/// Table expression reading back every Parquet file of an artifact
pub fn parquet_scan(path: &Path) -> String {
    let glob = path.join("**").join("*.parquet");
    format!(
        "read_parquet({}, hive_partitioning = true)",
        quote_literal(&glob.to_string_lossy())
    )
}

fn to_value(cell: &Cell) -> Value {
    match cell {
        Cell::Null => Value::Null,
        Cell::Varchar(s) => Value::Text(s.clone()),
        Cell::Integer(i) => Value::Int(*i),
        Cell::BigInt(i) => Value::BigInt(*i),
        Cell::Double(f) => Value::Double(*f),
        Cell::Timestamp(t) => Value::Timestamp(TimeUnit::Microsecond, t.timestamp_micros()),
    }
}

/// Full-overwrite semantics: whatever sits at `path` goes first
fn remove_artifact(path: &Path) -> DbResult<()> {
    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else if path.exists() {
        std::fs::remove_file(path)
    } else {
        Ok(())
    };
    result.map_err(|e| write_error(path, e))
}

fn write_error(path: &Path, err: std::io::Error) -> DbError {
    DbError::WriteError {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn query_count(&self, sql: &str) -> DbResult<usize> {
        self.query_count_sync(sql)
    }

    async fn query_one(&self, sql: &str) -> DbResult<Option<String>> {
        self.query_one_sync(sql)
    }

    async fn drop_if_exists(&self, name: &str) -> DbResult<()> {
        self.execute_batch_sync(&format!("DROP TABLE IF EXISTS {}", quote_ident(name)))
    }

    async fn load_table(&self, data: &TableData) -> DbResult<usize> {
        self.load_table_sync(data)
    }

    async fn copy_to_parquet(
        &self,
        table: &str,
        path: &Path,
        partition_by: &[&str],
    ) -> DbResult<()> {
        self.copy_to_parquet_sync(table, path, partition_by)
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
