//! Batch entry point.
//!
//! Wires configuration into the shared resources (DNS client, suffix list,
//! statistics, output sink), runs the worker pool and reports the totals.

mod batch;

use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::app::{print_error_statistics, read_domains};
use crate::assess::DomainAssessor;
use crate::config::Config;
use crate::error_handling::ProcessingStats;
use crate::initialization::{init_extractor, init_resolver};
use crate::output::ResultSink;

pub use batch::{run_batch, BatchOutcome};

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct AssessmentReport {
    /// Domains read from the input
    pub total: usize,
    /// Domains that received a verdict
    pub succeeded: usize,
    /// Domains that produced an error result
    pub failed: usize,
    /// Domains not assessed because the run was interrupted
    pub skipped: usize,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Runs an assessment with the provided configuration.
///
/// Results are written to stdout as they complete (`stdout` output) or as one
/// JSON array at the end (`json` output). Ctrl-C stops dispatching new domains
/// and lets in-flight assessments finish.
///
/// # Errors
///
/// This function will return an error if:
/// - The input file cannot be opened
/// - The DNS resolver cannot be configured
/// - Results cannot be written
///
/// # Example
///
/// ```no_run
/// use spoofcheck::{run_assessment, Config, DomainSource};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     source: DomainSource::Single("example.com".to_string()),
///     ..Default::default()
/// };
/// let report = run_assessment(config).await?;
/// println!("Assessed {} domains", report.total);
/// # Ok(())
/// # }
/// ```
pub async fn run_assessment(config: Config) -> Result<AssessmentReport> {
    let start_time = std::time::Instant::now();

    let domains = read_domains(&config.source)
        .await
        .context("Failed to read domains")?;
    let total = domains.len();

    let resolver =
        init_resolver(config.dns_timeout_secs).context("Failed to initialize DNS resolver")?;
    let stats = Arc::new(ProcessingStats::new());
    let assessor = Arc::new(DomainAssessor::new(
        resolver.as_ref().clone(),
        init_extractor(),
        config.nameserver_discovery,
        Arc::clone(&stats),
    ));
    let sink = Arc::new(ResultSink::new(config.output, std::io::stdout()));

    info!(
        "Assessing {} domain{} with {} worker{}",
        total,
        if total == 1 { "" } else { "s" },
        config.workers,
        if config.workers == 1 { "" } else { "s" }
    );

    let cancel = CancellationToken::new();
    let interrupt_task = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                result = tokio::signal::ctrl_c() => match result {
                    Ok(()) => {
                        warn!("Interrupted; finishing assessments already in progress");
                        cancel.cancel();
                    }
                    Err(e) => warn!("Failed to listen for Ctrl-C: {e}"),
                },
                _ = cancel.cancelled() => {}
            }
        })
    };

    let outcome = run_batch(
        assessor,
        domains,
        config.workers,
        Arc::clone(&sink),
        cancel.child_token(),
    )
    .await;

    cancel.cancel();
    let _ = interrupt_task.await;

    let outcome = outcome?;
    sink.finish().await?;
    print_error_statistics(&stats);

    Ok(AssessmentReport {
        total,
        succeeded: outcome.completed,
        failed: outcome.failed,
        skipped: outcome.skipped,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    })
}
