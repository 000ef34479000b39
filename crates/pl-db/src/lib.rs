//! pl-db - Database abstraction layer for Playlake
//!
//! This crate provides the `Database` trait and its DuckDB implementation,
//! which stages warehouse tables in memory and writes them out as Parquet.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use crate::duckdb::{parquet_scan, DuckDbBackend};
pub use error::{DbError, DbResult};
pub use traits::Database;
