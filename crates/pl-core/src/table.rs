//! Warehouse table layouts and the row-to-cell mapping used by the sink

use chrono::{DateTime, Utc};

use self::ColumnType::{BigInt, Double, Integer, Timestamp, Varchar};

/// Column storage types understood by the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Varchar,
    Integer,
    BigInt,
    Double,
    Timestamp,
}

impl ColumnType {
    /// SQL type name used in DDL
    pub fn sql_name(self) -> &'static str {
        match self {
            ColumnType::Varchar => "VARCHAR",
            ColumnType::Integer => "INTEGER",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Double => "DOUBLE",
            ColumnType::Timestamp => "TIMESTAMP",
        }
    }
}

/// A named, typed column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
}

const fn col(name: &'static str, ty: ColumnType) -> ColumnDef {
    ColumnDef { name, ty }
}

/// Layout of one warehouse table
#[derive(Debug, PartialEq, Eq)]
pub struct TableSpec {
    /// Table name, also the artifact directory name under the output base
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
    pub primary_key: &'static str,
    /// Hive-style partition columns, outermost first
    pub partition_by: &'static [&'static str],
}

impl TableSpec {
    pub fn is_partitioned(&self) -> bool {
        !self.partition_by.is_empty()
    }
}

pub static SONGS: TableSpec = TableSpec {
    name: "songs_table",
    columns: &[
        col("song_id", Varchar),
        col("title", Varchar),
        col("artist_id", Varchar),
        col("year", Integer),
        col("duration", Double),
    ],
    primary_key: "song_id",
    partition_by: &[],
};

pub static ARTISTS: TableSpec = TableSpec {
    name: "artists_table",
    columns: &[
        col("artist_id", Varchar),
        col("artist_name", Varchar),
        col("artist_location", Varchar),
        col("artist_latitude", Double),
        col("artist_longitude", Double),
    ],
    primary_key: "artist_id",
    partition_by: &[],
};

pub static USERS: TableSpec = TableSpec {
    name: "users_table",
    columns: &[
        col("user_id", BigInt),
        col("first_name", Varchar),
        col("last_name", Varchar),
        col("gender", Varchar),
        col("level", Varchar),
    ],
    primary_key: "user_id",
    partition_by: &[],
};

pub static TIME: TableSpec = TableSpec {
    name: "time_table",
    columns: &[
        col("start_time", Timestamp),
        col("hour", Integer),
        col("day", Integer),
        col("week", Integer),
        col("month", Integer),
        col("year", Integer),
        col("weekday", Integer),
    ],
    primary_key: "start_time",
    partition_by: &["year", "month"],
};

pub static SONGPLAYS: TableSpec = TableSpec {
    name: "songplays_table",
    columns: &[
        col("songplay_id", BigInt),
        col("start_time", Timestamp),
        col("user_id", BigInt),
        col("level", Varchar),
        col("song_id", Varchar),
        col("artist_id", Varchar),
        col("session_id", BigInt),
        col("location", Varchar),
        col("user_agent", Varchar),
        col("year", Integer),
        col("month", Integer),
    ],
    primary_key: "songplay_id",
    partition_by: &["year", "month"],
};

/// All warehouse tables in persistence order
pub static ALL_TABLES: [&TableSpec; 5] = [&SONGS, &ARTISTS, &USERS, &TIME, &SONGPLAYS];

/// A single value bound for the sink
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Varchar(String),
    Integer(i32),
    BigInt(i64),
    Double(f64),
    Timestamp(DateTime<Utc>),
}

impl From<Option<&str>> for Cell {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Cell::Null, |v| Cell::Varchar(v.to_string()))
    }
}

impl From<Option<i32>> for Cell {
    fn from(value: Option<i32>) -> Self {
        value.map_or(Cell::Null, Cell::Integer)
    }
}

impl From<Option<i64>> for Cell {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Cell::Null, Cell::BigInt)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Null, Cell::Double)
    }
}

/// A typed warehouse row that knows its table layout
pub trait Row {
    fn spec() -> &'static TableSpec;

    /// One cell per column of `spec().columns`, in the same order
    fn cells(&self) -> Vec<Cell>;
}

/// Rows of one table flattened to cells, ready for the sink
#[derive(Debug, Clone)]
pub struct TableData {
    pub spec: &'static TableSpec,
    pub rows: Vec<Vec<Cell>>,
}

impl TableData {
    pub fn from_rows<R: Row>(rows: &[R]) -> Self {
        Self {
            spec: R::spec(),
            rows: rows.iter().map(R::cells).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
