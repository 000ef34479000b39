//! Key-level deduplication with an explicit conflict policy

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

/// Which row survives when two rows share a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Keep the first row seen for a key
    #[default]
    First,
    /// Keep the last row seen for a key
    Last,
    /// Fail when rows for the same key disagree
    Reject,
}

/// Rows left after deduplication, in order of first appearance of each key
#[derive(Debug, Clone, PartialEq)]
pub struct Deduplicated<R> {
    pub rows: Vec<R>,
    /// Input rows that were folded into an earlier row with the same key
    pub collapsed: usize,
}

/// Deduplicate `(key, row)` pairs so each key appears once.
///
/// Exact duplicates collapse under every policy; `Reject` only fails when a
/// later row for a key differs from the one already kept.
pub fn dedup_by_key<K, R>(
    table: &str,
    rows: impl IntoIterator<Item = (K, R)>,
    policy: ConflictPolicy,
) -> CoreResult<Deduplicated<R>>
where
    K: Eq + Hash + Display,
    R: PartialEq,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut kept: Vec<R> = Vec::new();
    let mut collapsed = 0;

    for (key, row) in rows {
        match positions.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(kept.len());
                kept.push(row);
            }
            Entry::Occupied(slot) => {
                collapsed += 1;
                let existing = &mut kept[*slot.get()];
                if *existing == row {
                    continue;
                }
                match policy {
                    ConflictPolicy::First => {}
                    ConflictPolicy::Last => *existing = row,
                    ConflictPolicy::Reject => {
                        return Err(CoreError::KeyConflict {
                            table: table.to_string(),
                            key: slot.key().to_string(),
                        });
                    }
                }
            }
        }
    }

    Ok(Deduplicated {
        rows: kept,
        collapsed,
    })
}

#[cfg(test)]
#[path = "dedup_test.rs"]
mod tests;
