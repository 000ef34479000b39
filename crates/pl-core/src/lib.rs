//! pl-core - Core library for Playlake
//!
//! This crate provides the raw record types, the record source, and the pure
//! builders that turn song catalog and listening-event records into the
//! star-schema tables (Songs, Artists, Users, Time and Songplays).

pub mod config;
pub mod dedup;
pub mod dimension;
pub mod error;
pub mod fact;
pub mod record;
pub mod source;
pub mod sql_utils;
pub mod table;
pub mod time;

pub use config::{Config, DimensionPolicies, InputLayout};
pub use dedup::{dedup_by_key, ConflictPolicy, Deduplicated};
pub use dimension::{
    build_artists, build_songs, build_time, build_users, ArtistDim, BuildStats, Built, SongDim,
    TimeDim, UserDim,
};
pub use error::{CoreError, CoreResult};
pub use fact::{build_songplays, CatalogIndex, SongplayFact};
pub use record::{CatalogRecord, EventRecord, RawUserId, UserId};
pub use source::{read_catalog, read_events};
pub use table::{Cell, ColumnDef, ColumnType, Row, TableData, TableSpec};
pub use time::TimeParts;
