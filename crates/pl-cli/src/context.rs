//! Runtime context for a pipeline run

use anyhow::{Context, Result};
use pl_core::Config;
use pl_db::{Database, DuckDbBackend};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::Cli;

/// Runtime context containing resolved locations, config and the database
pub struct RuntimeContext {
    /// Base location of raw records
    pub input: PathBuf,

    /// Base location of warehouse artifacts
    pub output: PathBuf,

    pub config: Config,

    /// Database connection
    pub db: Arc<dyn Database>,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Create a new runtime context from command-line arguments
    pub fn new(args: &Cli) -> Result<Self> {
        let config = match &args.config {
            Some(path) => {
                Config::load(Path::new(path)).context("Failed to load configuration file")?
            }
            None => Config::default(),
        };

        let db: Arc<dyn Database> = Arc::new(
            DuckDbBackend::new(&args.database).context("Failed to connect to database")?,
        );

        Ok(Self {
            input: PathBuf::from(&args.input),
            output: PathBuf::from(&args.output),
            config,
            db,
            verbose: args.verbose,
        })
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }
}
