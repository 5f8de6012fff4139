//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - DNS client
//! - Public Suffix List extractor
//! - Worker semaphore
//!
//! All initialization functions return proper error types for error handling.

mod logger;
mod resolver;

use std::sync::Arc;

use tldextract::{TldExtractor, TldOption};
use tokio::sync::Semaphore;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Initializes a semaphore for controlling concurrency.
///
/// Creates a new semaphore with the specified permit count. This semaphore is used
/// to limit the number of concurrent domain assessments.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}

/// Initializes the Public Suffix List extractor.
///
/// The extractor splits a host into subdomain, registrable label and public suffix,
/// which is what decides whether a domain is a subdomain and what its
/// organizational domain is.
pub fn init_extractor() -> Arc<TldExtractor> {
    Arc::new(TldExtractor::new(TldOption::default()))
}
