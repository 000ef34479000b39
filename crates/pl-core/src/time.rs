//! Calendar decomposition of play timestamps
//!
//! All fields are computed in UTC. `weekday` numbers days from Sunday:
//! 1 = Sunday, 2 = Monday, ... 7 = Saturday.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Calendar fields derived from a single `start_time`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeParts {
    pub hour: i32,
    /// Day of month, 1-31
    pub day: i32,
    /// ISO-8601 week of year, 1-53
    pub week: i32,
    pub month: i32,
    pub year: i32,
    /// 1 = Sunday ... 7 = Saturday
    pub weekday: i32,
}

impl TimeParts {
    pub fn of(start_time: DateTime<Utc>) -> Self {
        Self {
            hour: start_time.hour() as i32,
            day: start_time.day() as i32,
            week: start_time.iso_week().week() as i32,
            month: start_time.month() as i32,
            year: start_time.year(),
            weekday: start_time.weekday().number_from_sunday() as i32,
        }
    }
}

#[cfg(test)]
#[path = "time_test.rs"]
mod tests;
