//! Bounded worker pool over a list of domains.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::warn;
use tokio_util::sync::CancellationToken;

use crate::app::{log_progress, shutdown_gracefully};
use crate::assess::{AssessmentResult, DomainAssessor};
use crate::config::LOGGING_INTERVAL;
use crate::dns::DnsClient;
use crate::error_handling::{AssessmentError, ErrorType};
use crate::initialization::init_semaphore;
use crate::output::ResultSink;

/// Counts from one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Domains that received a verdict
    pub completed: usize,
    /// Domains that produced an error result
    pub failed: usize,
    /// Domains never dispatched because the batch was cancelled
    pub skipped: usize,
}

/// Assesses `domains` with at most `workers` assessments in flight.
///
/// Every dispatched domain yields exactly one result on `sink`, including domains
/// whose task panicked. Once `cancel` fires no new domains are dispatched; those
/// already running are drained. Result order is completion order.
///
/// # Errors
///
/// Returns an error only if writing a result to the sink fails.
pub async fn run_batch<C, W>(
    assessor: Arc<DomainAssessor<C>>,
    domains: Vec<String>,
    workers: usize,
    sink: Arc<ResultSink<W>>,
    cancel: CancellationToken,
) -> anyhow::Result<BatchOutcome>
where
    C: DnsClient + Clone + 'static,
    W: Write + Send + 'static,
{
    let start_time = Instant::now();
    let semaphore = init_semaphore(workers.max(1));
    let completed = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(AtomicUsize::new(0));
    let total = domains.len();
    let mut dispatched = 0usize;
    let mut tasks = FuturesUnordered::new();

    let cancel_logging = CancellationToken::new();
    let logging_task = {
        let cancel_logging = cancel_logging.clone();
        let completed = Arc::clone(&completed);
        let failed = Arc::clone(&failed);
        tokio::task::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(LOGGING_INTERVAL));
            // the first tick completes immediately
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = interval.tick() => log_progress(start_time, &completed, &failed),
                    _ = cancel_logging.cancelled() => break,
                }
            }
        })
    };

    for domain in domains {
        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                Ok(permit) => permit,
                Err(_) => {
                    warn!("Semaphore closed, skipping domain: {domain}");
                    continue;
                }
            },
        };
        dispatched += 1;

        let assessor = Arc::clone(&assessor);
        let sink_for_task = Arc::clone(&sink);
        let completed = Arc::clone(&completed);
        let failed = Arc::clone(&failed);
        let domain_for_task = domain.clone();
        let handle = tokio::spawn(async move {
            let _permit = permit;
            let result = assessor.assess(&domain_for_task).await;
            if result.is_error() {
                failed.fetch_add(1, Ordering::SeqCst);
            } else {
                completed.fetch_add(1, Ordering::SeqCst);
            }
            sink_for_task.emit(result).await
        });
        tasks.push(async move { (domain, handle.await) });
    }

    let skipped = total - dispatched;
    if skipped > 0 {
        warn!("Cancelled: {skipped} domains were not assessed");
    }

    let mut first_error = None;
    while let Some((domain, task_result)) = tasks.next().await {
        match task_result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!("Failed to write result for {domain}: {e:#}");
                first_error.get_or_insert(e);
            }
            Err(join_error) => {
                warn!("Assessment task for {domain} panicked: {join_error:?}");
                failed.fetch_add(1, Ordering::SeqCst);
                assessor.stats().increment_error(ErrorType::AssessmentAborted);
                let error = AssessmentError::Aborted(domain.clone(), join_error.to_string());
                if let Err(e) = sink.emit(AssessmentResult::failed(&domain, &error)).await {
                    first_error.get_or_insert(e);
                }
            }
        }
    }

    shutdown_gracefully(cancel_logging, Some(logging_task)).await;
    log_progress(start_time, &completed, &failed);

    if let Some(e) = first_error {
        return Err(e);
    }
    Ok(BatchOutcome {
        completed: completed.load(Ordering::SeqCst),
        failed: failed.load(Ordering::SeqCst),
        skipped,
    })
}
