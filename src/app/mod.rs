//! Main application modules.
//!
//! This module provides input reading, progress logging, shutdown handling, and
//! statistics printing used by the batch runner.

pub mod input;
pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use input::{domain_line, read_domains};
pub use logging::log_progress;
pub use shutdown::shutdown_gracefully;
pub use statistics::{print_error_statistics, print_simple_summary};
