//! Primary-key audit over written artifacts
//!
//! Each check is a `SELECT` returning violating rows; a check passes when it
//! returns none.

use pl_core::sql_utils::quote_ident;
use pl_core::{ColumnType, TableSpec};
use pl_db::{parquet_scan, Database};
use std::fmt;
use std::path::Path;

/// Kind of key check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Unique,
    NotNull,
    /// Text keys must not be the empty string
    NotEmpty,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::Unique => write!(f, "unique"),
            CheckKind::NotNull => write!(f, "not_null"),
            CheckKind::NotEmpty => write!(f, "not_empty"),
        }
    }
}

/// A generated audit query
#[derive(Debug, Clone)]
pub struct AuditCheck {
    pub table: &'static str,
    pub column: &'static str,
    pub kind: CheckKind,
    pub sql: String,
}

impl AuditCheck {
    pub fn name(&self) -> String {
        format!("{}_{}_{}", self.kind, self.table, self.column)
    }
}

/// Result of one executed check
#[derive(Debug, Clone)]
pub struct AuditResult {
    pub check: AuditCheck,
    pub failure_count: usize,
    pub error: Option<String>,
}

impl AuditResult {
    pub fn passed(&self) -> bool {
        self.failure_count == 0 && self.error.is_none()
    }
}

/// Rows with a duplicated key
pub fn generate_unique_check(source: &str, column: &str) -> String {
    let qc = quote_ident(column);
    format!("SELECT {qc}, COUNT(*) as cnt\nFROM {source}\nGROUP BY {qc}\nHAVING COUNT(*) > 1")
}

/// Rows with a NULL key
pub fn generate_not_null_check(source: &str, column: &str) -> String {
    format!("SELECT * FROM {} WHERE {} IS NULL", source, quote_ident(column))
}

/// Rows with an empty text key
pub fn generate_not_empty_check(source: &str, column: &str) -> String {
    format!("SELECT * FROM {} WHERE {} = ''", source, quote_ident(column))
}

/// Key checks for one table whose artifact lives at `path`
pub fn checks_for(spec: &'static TableSpec, path: &Path) -> Vec<AuditCheck> {
    let source = parquet_scan(path);
    let key = spec.primary_key;
    let text_key = spec
        .columns
        .iter()
        .any(|c| c.name == key && c.ty == ColumnType::Varchar);

    let mut checks = vec![
        AuditCheck {
            table: spec.name,
            column: key,
            kind: CheckKind::Unique,
            sql: generate_unique_check(&source, key),
        },
        AuditCheck {
            table: spec.name,
            column: key,
            kind: CheckKind::NotNull,
            sql: generate_not_null_check(&source, key),
        },
    ];
    if text_key {
        checks.push(AuditCheck {
            table: spec.name,
            column: key,
            kind: CheckKind::NotEmpty,
            sql: generate_not_empty_check(&source, key),
        });
    }
    checks
}

/// Run every check, collecting failures rather than stopping at the first
pub async fn run_checks(db: &dyn Database, checks: Vec<AuditCheck>) -> Vec<AuditResult> {
    let mut results = Vec::with_capacity(checks.len());
    for check in checks {
        let result = match db.query_count(&check.sql).await {
            Ok(failure_count) => AuditResult {
                check,
                failure_count,
                error: None,
            },
            Err(e) => AuditResult {
                check,
                failure_count: 0,
                error: Some(e.to_string()),
            },
        };
        log::debug!(
            "audit {}: {} violating rows",
            result.check.name(),
            result.failure_count
        );
        results.push(result);
    }
    results
}

#[cfg(test)]
#[path = "audit_test.rs"]
mod tests;
