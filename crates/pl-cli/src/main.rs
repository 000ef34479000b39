//! Playlake CLI - builds a star-schema warehouse from song and listening-event logs

use anyhow::Result;
use clap::Parser;
use std::time::Instant;

mod audit;
mod cli;
mod context;
mod pipeline;

use cli::Cli;
use context::RuntimeContext;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let start = Instant::now();
    let ctx = RuntimeContext::new(&cli)?;

    let summaries = pipeline::run(&ctx).await?;

    let mut results = Vec::new();
    for summary in &summaries {
        let checks = audit::checks_for(summary.spec, &summary.path);
        results.extend(audit::run_checks(ctx.db.as_ref(), checks).await);
    }
    let failed: Vec<&audit::AuditResult> = results.iter().filter(|r| !r.passed()).collect();
    for result in &failed {
        match &result.error {
            Some(e) => println!("  ✗ {} - error: {}", result.check.name(), e),
            None => println!(
                "  ✗ {} ({} violating rows)",
                result.check.name(),
                result.failure_count
            ),
        }
    }
    if !failed.is_empty() {
        anyhow::bail!(
            "AuditFailed: {} of {} key checks failed",
            failed.len(),
            results.len()
        );
    }

    println!();
    for summary in &summaries {
        let stats = &summary.stats;
        ctx.verbose(&format!(
            "{}: {} input, {} dropped without key, {} invalid user ids, {} duplicates collapsed, {} unmatched",
            summary.spec.name,
            stats.input_rows,
            stats.dropped_null_key,
            stats.invalid_user_ids,
            stats.collapsed_duplicates,
            stats.unmatched
        ));
    }
    let written: usize = summaries.iter().map(|s| s.stats.output_rows).sum();
    println!(
        "Wrote {} tables ({} rows) to {} in {}ms",
        summaries.len(),
        written,
        ctx.output.display(),
        start.elapsed().as_millis()
    );
    Ok(())
}
