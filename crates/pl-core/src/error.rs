//! Error types for pl-core

use thiserror::Error;

/// Core error type for Playlake
#[derive(Error, Debug)]
pub enum CoreError {
    /// P001: Configuration file not found
    #[error("[P001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// P002: Failed to parse configuration file
    #[error("[P002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// P003: Invalid configuration value
    #[error("[P003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// P004: A source file could not be read or decoded
    #[error("[P004] Failed to read records from '{path}': {message}")]
    SourceRead { path: String, message: String },

    /// P005: A source glob pattern is malformed
    #[error("[P005] Invalid source pattern '{pattern}': {message}")]
    SourcePattern { pattern: String, message: String },

    /// P006: Two rows share a dimension key with different payloads
    #[error("[P006] Conflicting rows for key '{key}' in {table} (conflict policy is 'reject')")]
    KeyConflict { table: String, key: String },

    /// P007: IO error with file path context
    #[error("[P007] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
