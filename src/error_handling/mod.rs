//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for initialization, DNS, classification and assessment
//! - Processing statistics tracking (errors, warnings, info metrics)
//!
//! Statistic types are categorized into:
//! - **Errors**: Domains that did not get a normal verdict
//! - **Warnings**: Weak or missing email-authentication configuration
//! - **Info**: Informational metrics (nameserver used, DMARC fallback, etc.)

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{
    AssessmentError, ClassificationError, DnsError, ErrorType, InfoType, InitializationError,
    WarningType,
};
