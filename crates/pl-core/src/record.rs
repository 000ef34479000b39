//! Raw record types read from the song catalog and the event logs
//!
//! Every field is optional: a missing key and an explicit JSON `null` both
//! deserialize to `None`, and keys outside the declared set are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Page value marking an event as an actual song play
pub const NEXT_SONG_PAGE: &str = "NextSong";

/// One song metadata record from the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub song_id: Option<String>,
    pub title: Option<String>,
    pub artist_id: Option<String>,
    pub artist_name: Option<String>,
    pub artist_location: Option<String>,
    pub artist_latitude: Option<f64>,
    pub artist_longitude: Option<f64>,
    pub year: Option<i32>,
    pub duration: Option<f64>,
}

/// One line of the listening-session log
///
/// The log files use camelCase for multi-word keys; the snake_case spelling
/// is accepted as an alias.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "userId", alias = "user_id")]
    pub user_id: Option<RawUserId>,

    #[serde(rename = "firstName", alias = "first_name")]
    pub first_name: Option<String>,

    #[serde(rename = "lastName", alias = "last_name")]
    pub last_name: Option<String>,

    pub gender: Option<String>,
    pub level: Option<String>,
    pub page: Option<String>,

    #[serde(rename = "sessionId", alias = "session_id")]
    pub session_id: Option<i64>,

    #[serde(rename = "userAgent", alias = "user_agent")]
    pub user_agent: Option<String>,

    pub location: Option<String>,
    pub song: Option<String>,
    pub artist: Option<String>,

    /// Event time in milliseconds since the Unix epoch
    pub ts: Option<i64>,
}

/// A user identifier as it appears in the log: either a JSON string or integer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawUserId {
    Int(i64),
    Text(String),
}

/// Result of coercing a raw user identifier to an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserId {
    /// No identifier, or an empty string
    Absent,
    /// A usable integer identifier
    Valid(i64),
    /// Present but not an integer
    Invalid,
}

impl UserId {
    /// Coerce a raw identifier. Strings are trimmed before parsing.
    pub fn coerce(raw: Option<&RawUserId>) -> Self {
        match raw {
            None => UserId::Absent,
            Some(RawUserId::Int(id)) => UserId::Valid(*id),
            Some(RawUserId::Text(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    UserId::Absent
                } else {
                    text.parse().map(UserId::Valid).unwrap_or(UserId::Invalid)
                }
            }
        }
    }

    /// The integer identifier, if coercion succeeded
    pub fn valid(self) -> Option<i64> {
        match self {
            UserId::Valid(id) => Some(id),
            UserId::Absent | UserId::Invalid => None,
        }
    }
}

impl EventRecord {
    /// Whether this event is a song play
    pub fn is_play(&self) -> bool {
        self.page.as_deref() == Some(NEXT_SONG_PAGE)
    }

    /// The coerced user identifier
    pub fn user_id(&self) -> UserId {
        UserId::coerce(self.user_id.as_ref())
    }

    /// `ts` as a UTC timestamp, or `None` when absent or out of range
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.ts.and_then(DateTime::from_timestamp_millis)
    }
}

/// Treat an empty-string key as absent
pub fn normalize_key(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
