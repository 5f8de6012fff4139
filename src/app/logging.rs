//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Logs how many domains have been assessed so far.
///
/// # Arguments
///
/// * `start_time` - The start time of the batch
/// * `completed` - Atomic counter of domains with a verdict
/// * `failed` - Atomic counter of domains that produced an error result
pub fn log_progress(
    start_time: std::time::Instant,
    completed: &Arc<AtomicUsize>,
    failed: &Arc<AtomicUsize>,
) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let completed = completed.load(Ordering::SeqCst);
    let failed = failed.load(Ordering::SeqCst);
    let done = completed + failed;
    let rate = if elapsed_secs > 0.0 {
        done as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Assessed {} domains ({} failed) in {:.2} seconds (~{:.2} domains/sec)",
        done, failed, elapsed_secs, rate
    );
}
