//! Record source: discovers raw JSON files under the input base and decodes them
//!
//! A file may contain a single JSON object, several concatenated objects,
//! newline-delimited objects, or top-level arrays of objects. Files are decoded in parallel but returned in
//! sorted path order, so record order is stable between runs.

use crate::config::InputLayout;
use crate::error::{CoreError, CoreResult};
use crate::record::{CatalogRecord, EventRecord};
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Find files matching `pattern` relative to `base`, sorted by path
pub fn discover_files(base: &Path, pattern: &str) -> CoreResult<Vec<PathBuf>> {
    let escaped_base = glob::Pattern::escape(&base.to_string_lossy());
    let full_pattern = Path::new(&escaped_base).join(pattern);
    let full_pattern = full_pattern.to_string_lossy();

    let entries = glob::glob(&full_pattern).map_err(|e| CoreError::SourcePattern {
        pattern: full_pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| CoreError::SourceRead {
            path: e.path().display().to_string(),
            message: e.error().to_string(),
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Decode every JSON value in one file
pub fn read_file<T: DeserializeOwned>(path: &Path) -> CoreResult<Vec<T>> {
    let file = File::open(path).map_err(|e| CoreError::SourceRead {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let read_error = |e: serde_json::Error| CoreError::SourceRead {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let values = serde_json::Deserializer::from_reader(BufReader::new(file)).into_iter::<Value>();
    let mut records = Vec::new();
    for value in values {
        match value.map_err(read_error)? {
            Value::Array(items) => {
                for item in items {
                    records.push(serde_json::from_value(item).map_err(read_error)?);
                }
            }
            other => records.push(serde_json::from_value(other).map_err(read_error)?),
        }
    }
    Ok(records)
}

/// Decode all files, preserving file order
pub fn read_files<T>(paths: &[PathBuf]) -> CoreResult<Vec<T>>
where
    T: DeserializeOwned + Send,
{
    let per_file: Vec<Vec<T>> = paths
        .par_iter()
        .map(|path| read_file(path))
        .collect::<CoreResult<_>>()?;
    Ok(per_file.into_iter().flatten().collect())
}

fn read_matching<T>(base: &Path, pattern: &str, kind: &str) -> CoreResult<Vec<T>>
where
    T: DeserializeOwned + Send,
{
    let files = discover_files(base, pattern)?;
    if files.is_empty() {
        log::warn!(
            "No {kind} files match '{pattern}' under {}",
            base.display()
        );
        return Ok(Vec::new());
    }
    let records = read_files(&files)?;
    log::debug!(
        "Read {} {kind} records from {} files",
        records.len(),
        files.len()
    );
    Ok(records)
}

/// Read the song catalog
pub fn read_catalog(base: &Path, layout: &InputLayout) -> CoreResult<Vec<CatalogRecord>> {
    read_matching(base, &layout.song_pattern, "catalog")
}

/// Read the listening-event log
pub fn read_events(base: &Path, layout: &InputLayout) -> CoreResult<Vec<EventRecord>> {
    read_matching(base, &layout.log_pattern, "event")
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
