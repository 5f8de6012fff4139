//! Graceful shutdown handling.

use tokio_util::sync::CancellationToken;

/// Stops the background tasks of a batch.
///
/// Cancels the progress logger and the Ctrl-C watcher, then waits for the logger
/// to exit so its last line is not cut off.
pub async fn shutdown_gracefully(
    cancel: CancellationToken,
    logging_task: Option<tokio::task::JoinHandle<()>>,
) {
    cancel.cancel();
    if let Some(logging_task) = logging_task {
        let _ = logging_task.await;
    }
}
