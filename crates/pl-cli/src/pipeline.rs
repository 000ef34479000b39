//! End-to-end pipeline: read, build, persist
//!
//! Catalog-derived dimensions are built and written first, then the
//! event-derived dimensions and the fact table.

use anyhow::{Context, Result};
use pl_core::{
    build_artists, build_songplays, build_songs, build_time, build_users, read_catalog,
    read_events, BuildStats, Built, Row, TableData, TableSpec,
};
use std::path::PathBuf;

use crate::context::RuntimeContext;

/// Outcome of building and writing one table
#[derive(Debug, Clone)]
pub struct TableSummary {
    pub spec: &'static TableSpec,
    pub path: PathBuf,
    pub stats: BuildStats,
}

/// Run the full pipeline and return one summary per written table
pub async fn run(ctx: &RuntimeContext) -> Result<Vec<TableSummary>> {
    let policies = ctx.config.policies;
    let mut summaries = Vec::with_capacity(5);

    println!("Reading song data from {} ...", ctx.input.display());
    let catalog = read_catalog(&ctx.input, &ctx.config.layout).context("Failed to read song data")?;
    ctx.verbose(&format!("Read {} catalog records", catalog.len()));

    let songs = build_songs(&catalog, policies.songs).context("Failed to build songs table")?;
    summaries.push(persist(ctx, &songs).await?);
    let artists =
        build_artists(&catalog, policies.artists).context("Failed to build artists table")?;
    summaries.push(persist(ctx, &artists).await?);

    println!("Reading log data from {} ...", ctx.input.display());
    let events = read_events(&ctx.input, &ctx.config.layout).context("Failed to read log data")?;
    ctx.verbose(&format!("Read {} event records", events.len()));

    let (users, (time, songplays)) = rayon::join(
        || build_users(&events, policies.users),
        || {
            rayon::join(
                || build_time(&events, policies.time),
                || build_songplays(&catalog, &events),
            )
        },
    );
    let users = users.context("Failed to build users table")?;
    let time = time.context("Failed to build time table")?;

    summaries.push(persist(ctx, &users).await?);
    summaries.push(persist(ctx, &time).await?);
    summaries.push(persist(ctx, &songplays).await?);

    Ok(summaries)
}

/// Stage a built table in the database, write it out, then drop the staging copy
async fn persist<R: Row>(ctx: &RuntimeContext, built: &Built<R>) -> Result<TableSummary> {
    let data = TableData::from_rows(&built.rows);
    let spec = data.spec;
    let path = ctx.output.join(spec.name);

    ctx.verbose(&format!("Writing {} rows to {}", data.len(), path.display()));
    ctx.db
        .load_table(&data)
        .await
        .with_context(|| format!("Failed to stage {}", spec.name))?;
    ctx.db
        .copy_to_parquet(spec.name, &path, spec.partition_by)
        .await
        .with_context(|| format!("Failed to write {}", spec.name))?;
    ctx.db
        .drop_if_exists(spec.name)
        .await
        .with_context(|| format!("Failed to drop staged {}", spec.name))?;

    println!("  ✓ {} ({} rows)", spec.name, data.len());
    Ok(TableSummary {
        spec,
        path,
        stats: built.stats.clone(),
    })
}
