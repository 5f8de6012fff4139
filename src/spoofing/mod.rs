//! Spoofability classification.
//!
//! Maps a resolved SPF record and DMARC record to one of nine verdicts.

mod classify;
pub mod syntax;
mod verdict;

// Re-export public API
pub use classify::{classify, decide, syntax_fallback};
pub use verdict::{Verdict, VerdictCode};
