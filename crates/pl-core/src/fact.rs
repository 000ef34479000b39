//! Songplays fact builder
//!
//! Song plays are joined to the catalog on `(artist, song) = (artist_name, title)`.
//! When several catalog entries share that pair the first one read wins, so
//! each play yields at most one fact row. `songplay_id` is a 1-based counter
//! over the explicit sort key `(session_id, start_time, user_id, input order)`.

use crate::dimension::{BuildStats, Built};
use crate::record::{normalize_key, CatalogRecord, EventRecord, UserId};
use crate::table::{Cell, Row, TableSpec, SONGPLAYS};
use crate::time::TimeParts;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongplayFact {
    pub songplay_id: i64,
    pub start_time: DateTime<Utc>,
    pub user_id: Option<i64>,
    pub level: Option<String>,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: Option<i64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
    /// Partition column derived from `start_time`
    pub year: i32,
    /// Partition column derived from `start_time`
    pub month: i32,
}

/// Catalog entries addressable by `(artist_name, title)`, first entry wins
pub struct CatalogIndex<'a> {
    by_artist: HashMap<&'a str, HashMap<&'a str, &'a CatalogRecord>>,
    pairs: usize,
}

impl<'a> CatalogIndex<'a> {
    pub fn new(catalog: &'a [CatalogRecord]) -> Self {
        let mut by_artist: HashMap<&'a str, HashMap<&'a str, &'a CatalogRecord>> =
            HashMap::new();
        let mut pairs = 0;
        for record in catalog {
            if let (Some(artist), Some(title)) = (&record.artist_name, &record.title) {
                let titles = by_artist.entry(artist.as_str()).or_default();
                if !titles.contains_key(title.as_str()) {
                    titles.insert(title.as_str(), record);
                    pairs += 1;
                }
            }
        }
        Self { by_artist, pairs }
    }

    pub fn lookup(&self, artist: &str, song: &str) -> Option<&'a CatalogRecord> {
        self.by_artist
            .get(artist)
            .and_then(|titles| titles.get(song))
            .copied()
    }

    /// Number of distinct `(artist_name, title)` pairs
    pub fn pair_count(&self) -> usize {
        self.pairs
    }
}

/// Build the Songplays fact table
pub fn build_songplays(catalog: &[CatalogRecord], events: &[EventRecord]) -> Built<SongplayFact> {
    let index = CatalogIndex::new(catalog);
    let mut stats = BuildStats::default();

    let mut matched = Vec::new();
    for (position, event) in events.iter().enumerate() {
        if !event.is_play() {
            continue;
        }
        stats.input_rows += 1;

        let (Some(start_time), Some(artist), Some(song)) =
            (event.start_time(), event.artist.as_deref(), event.song.as_deref())
        else {
            stats.dropped_null_key += 1;
            continue;
        };
        let Some(entry) = index.lookup(artist, song) else {
            stats.unmatched += 1;
            continue;
        };

        let user_id = event.user_id();
        if user_id == UserId::Invalid {
            stats.invalid_user_ids += 1;
        }
        let parts = TimeParts::of(start_time);
        matched.push((
            position,
            SongplayFact {
                songplay_id: 0,
                start_time,
                user_id: user_id.valid(),
                level: event.level.clone(),
                song_id: normalize_key(entry.song_id.as_deref()).map(str::to_string),
                artist_id: normalize_key(entry.artist_id.as_deref()).map(str::to_string),
                session_id: event.session_id,
                location: event.location.clone(),
                user_agent: event.user_agent.clone(),
                year: parts.year,
                month: parts.month,
            },
        ));
    }

    matched.sort_by_key(|(position, fact)| {
        (fact.session_id, fact.start_time, fact.user_id, *position)
    });

    let rows: Vec<SongplayFact> = matched
        .into_iter()
        .zip(1..)
        .map(|((_, fact), songplay_id)| SongplayFact {
            songplay_id,
            ..fact
        })
        .collect();

    stats.output_rows = rows.len();
    log::debug!(
        "{}: {:?} ({} distinct catalog pairs)",
        SONGPLAYS.name,
        stats,
        index.pair_count()
    );
    Built { rows, stats }
}

impl Row for SongplayFact {
    fn spec() -> &'static TableSpec {
        &SONGPLAYS
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::BigInt(self.songplay_id),
            Cell::Timestamp(self.start_time),
            self.user_id.into(),
            self.level.as_deref().into(),
            self.song_id.as_deref().into(),
            self.artist_id.as_deref().into(),
            self.session_id.into(),
            self.location.as_deref().into(),
            self.user_agent.as_deref().into(),
            Cell::Integer(self.year),
            Cell::Integer(self.month),
        ]
    }
}

#[cfg(test)]
#[path = "fact_test.rs"]
mod tests;
