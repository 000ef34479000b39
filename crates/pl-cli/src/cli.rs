//! CLI argument definitions using clap derive API

use clap::Parser;

/// Playlake - build a star-schema warehouse from song and listening-event logs
///
/// Reads `song_data/` and `log_data/` under INPUT and writes the songs, artists,
/// users, time and songplays tables as Parquet under OUTPUT, replacing any
/// previous run.
#[derive(Parser, Debug)]
#[command(name = "playlake")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base location of the raw song and event data
    #[arg(env = "PLAYLAKE_INPUT")]
    pub input: String,

    /// Base location the warehouse tables are written to
    #[arg(env = "PLAYLAKE_OUTPUT")]
    pub output: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Optional playlake.yml with layout patterns and conflict policies
    #[arg(short, long)]
    pub config: Option<String>,

    /// DuckDB database used to stage tables (default: in memory)
    #[arg(long, default_value = ":memory:")]
    pub database: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
