//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (lookup budget, timeouts, public resolvers)
//! - CLI option types and parsing
//! - The library-facing [`Config`] built from them

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, DomainSource, LogFormat, LogLevel, Opt, OutputFormat};
