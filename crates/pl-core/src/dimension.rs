//! Dimension builders: Songs and Artists from the catalog, Users and Time
//! from the event log.
//!
//! Every builder follows the same shape: project the dimension's columns,
//! normalize the key (empty string becomes null), drop null keys, then
//! deduplicate by key under the configured [`ConflictPolicy`].

use crate::dedup::{dedup_by_key, ConflictPolicy};
use crate::error::CoreResult;
use crate::record::{normalize_key, CatalogRecord, EventRecord, UserId};
use crate::table::{Cell, Row, TableSpec, ARTISTS, SONGS, TIME, USERS};
use crate::time::TimeParts;
use chrono::{DateTime, Utc};
use std::fmt::Display;
use std::hash::Hash;

/// Row counts collected while building one table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Source rows considered for this table
    pub input_rows: usize,
    /// Rows dropped because the key (or a join key) was null or empty
    pub dropped_null_key: usize,
    /// Rows whose user identifier was present but not an integer
    pub invalid_user_ids: usize,
    /// Rows folded into another row with the same key
    pub collapsed_duplicates: usize,
    /// Events with no matching catalog entry (fact table only)
    pub unmatched: usize,
    pub output_rows: usize,
}

/// A built table together with its statistics
#[derive(Debug, Clone, PartialEq)]
pub struct Built<R> {
    pub rows: Vec<R>,
    pub stats: BuildStats,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SongDim {
    pub song_id: String,
    pub title: Option<String>,
    pub artist_id: Option<String>,
    pub year: Option<i32>,
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtistDim {
    pub artist_id: String,
    pub artist_name: Option<String>,
    pub artist_location: Option<String>,
    pub artist_latitude: Option<f64>,
    pub artist_longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDim {
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeDim {
    pub start_time: DateTime<Utc>,
    pub hour: i32,
    pub day: i32,
    pub week: i32,
    pub month: i32,
    pub year: i32,
    pub weekday: i32,
}

impl TimeDim {
    pub fn from_start_time(start_time: DateTime<Utc>) -> Self {
        let parts = TimeParts::of(start_time);
        Self {
            start_time,
            hour: parts.hour,
            day: parts.day,
            week: parts.week,
            month: parts.month,
            year: parts.year,
            weekday: parts.weekday,
        }
    }
}

/// Build the Songs dimension from catalog records
pub fn build_songs(
    catalog: &[CatalogRecord],
    policy: ConflictPolicy,
) -> CoreResult<Built<SongDim>> {
    let mut stats = BuildStats {
        input_rows: catalog.len(),
        ..Default::default()
    };

    let mut keyed = Vec::with_capacity(catalog.len());
    for record in catalog {
        let Some(song_id) = normalize_key(record.song_id.as_deref()) else {
            stats.dropped_null_key += 1;
            continue;
        };
        let row = SongDim {
            song_id: song_id.to_string(),
            title: record.title.clone(),
            artist_id: record.artist_id.clone(),
            year: record.year,
            duration: record.duration,
        };
        keyed.push((row.song_id.clone(), row));
    }

    finish(&SONGS, stats, keyed, policy)
}

/// Build the Artists dimension from catalog records
pub fn build_artists(
    catalog: &[CatalogRecord],
    policy: ConflictPolicy,
) -> CoreResult<Built<ArtistDim>> {
    let mut stats = BuildStats {
        input_rows: catalog.len(),
        ..Default::default()
    };

    let mut keyed = Vec::with_capacity(catalog.len());
    for record in catalog {
        let Some(artist_id) = normalize_key(record.artist_id.as_deref()) else {
            stats.dropped_null_key += 1;
            continue;
        };
        let row = ArtistDim {
            artist_id: artist_id.to_string(),
            artist_name: record.artist_name.clone(),
            artist_location: record.artist_location.clone(),
            artist_latitude: record.artist_latitude,
            artist_longitude: record.artist_longitude,
        };
        keyed.push((row.artist_id.clone(), row));
    }

    finish(&ARTISTS, stats, keyed, policy)
}

/// Build the Users dimension from song-play events.
///
/// Plays are visited in ascending `ts` order (stable for ties), so under
/// [`ConflictPolicy::Last`] the surviving row is the user's latest play.
/// Identifiers that do not coerce to an integer drop the row.
pub fn build_users(events: &[EventRecord], policy: ConflictPolicy) -> CoreResult<Built<UserDim>> {
    let mut plays: Vec<&EventRecord> = events.iter().filter(|e| e.is_play()).collect();
    plays.sort_by_key(|e| e.ts);

    let mut stats = BuildStats {
        input_rows: plays.len(),
        ..Default::default()
    };

    let mut keyed = Vec::with_capacity(plays.len());
    for event in plays {
        let user_id = match event.user_id() {
            UserId::Valid(id) => id,
            UserId::Absent => {
                stats.dropped_null_key += 1;
                continue;
            }
            UserId::Invalid => {
                stats.invalid_user_ids += 1;
                continue;
            }
        };
        keyed.push((
            user_id,
            UserDim {
                user_id,
                first_name: event.first_name.clone(),
                last_name: event.last_name.clone(),
                gender: event.gender.clone(),
                level: event.level.clone(),
            },
        ));
    }

    if stats.invalid_user_ids > 0 {
        log::warn!(
            "{}: dropped {} plays with a non-integer user id",
            USERS.name,
            stats.invalid_user_ids
        );
    }

    finish(&USERS, stats, keyed, policy)
}

/// Build the Time dimension: one row per distinct play `start_time`
pub fn build_time(events: &[EventRecord], policy: ConflictPolicy) -> CoreResult<Built<TimeDim>> {
    let plays: Vec<&EventRecord> = events.iter().filter(|e| e.is_play()).collect();
    let mut stats = BuildStats {
        input_rows: plays.len(),
        ..Default::default()
    };

    let mut keyed = Vec::with_capacity(plays.len());
    for event in plays {
        let Some(start_time) = event.start_time() else {
            stats.dropped_null_key += 1;
            continue;
        };
        keyed.push((start_time, TimeDim::from_start_time(start_time)));
    }

    finish(&TIME, stats, keyed, policy)
}

fn finish<K, R>(
    spec: &TableSpec,
    mut stats: BuildStats,
    keyed: Vec<(K, R)>,
    policy: ConflictPolicy,
) -> CoreResult<Built<R>>
where
    K: Eq + Hash + Display,
    R: PartialEq,
{
    let deduped = dedup_by_key(spec.name, keyed, policy)?;
    stats.collapsed_duplicates = deduped.collapsed;
    stats.output_rows = deduped.rows.len();
    log::debug!("{}: {:?}", spec.name, stats);
    Ok(Built {
        rows: deduped.rows,
        stats,
    })
}

impl Row for SongDim {
    fn spec() -> &'static TableSpec {
        &SONGS
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Varchar(self.song_id.clone()),
            self.title.as_deref().into(),
            self.artist_id.as_deref().into(),
            self.year.into(),
            self.duration.into(),
        ]
    }
}

impl Row for ArtistDim {
    fn spec() -> &'static TableSpec {
        &ARTISTS
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Varchar(self.artist_id.clone()),
            self.artist_name.as_deref().into(),
            self.artist_location.as_deref().into(),
            self.artist_latitude.into(),
            self.artist_longitude.into(),
        ]
    }
}

impl Row for UserDim {
    fn spec() -> &'static TableSpec {
        &USERS
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::BigInt(self.user_id),
            self.first_name.as_deref().into(),
            self.last_name.as_deref().into(),
            self.gender.as_deref().into(),
            self.level.as_deref().into(),
        ]
    }
}

impl Row for TimeDim {
    fn spec() -> &'static TableSpec {
        &TIME
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Timestamp(self.start_time),
            Cell::Integer(self.hour),
            Cell::Integer(self.day),
            Cell::Integer(self.week),
            Cell::Integer(self.month),
            Cell::Integer(self.year),
            Cell::Integer(self.weekday),
        ]
    }
}

#[cfg(test)]
#[path = "dimension_test.rs"]
mod tests;
