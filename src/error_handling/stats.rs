//! Processing statistics tracking.
//!
//! This module provides thread-safe statistics tracking for errors, warnings,
//! and informational metrics during a batch run.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType, WarningType};

/// One atomic counter per variant of `T`, all created up front.
struct Counters<T> {
    counts: HashMap<T, AtomicUsize>,
}

impl<T> Counters<T>
where
    T: IntoEnumIterator + Hash + Eq + Copy + Debug,
{
    fn new() -> Self {
        Self {
            counts: T::iter().map(|kind| (kind, AtomicUsize::new(0))).collect(),
        }
    }

    fn increment(&self, kind: T) {
        match self.counts.get(&kind) {
            Some(counter) => {
                counter.fetch_add(1, Ordering::Relaxed);
            }
            // unreachable while new() seeds every variant; log rather than panic
            None => log::error!("No counter registered for {:?}", kind),
        }
    }

    fn get(&self, kind: T) -> usize {
        self.counts
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    fn total(&self) -> usize {
        T::iter().map(|kind| self.get(kind)).sum()
    }
}

/// Thread-safe processing statistics tracker.
///
/// Tracks errors, warnings, and informational metrics using atomic counters,
/// allowing concurrent access from multiple tasks. All types are initialized
/// to zero on creation.
///
/// # Thread Safety
///
/// This struct is thread-safe and can be shared across multiple tasks using `Arc`.
pub struct ProcessingStats {
    errors: Counters<ErrorType>,
    warnings: Counters<WarningType>,
    info: Counters<InfoType>,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    pub fn new() -> Self {
        ProcessingStats {
            errors: Counters::new(),
            warnings: Counters::new(),
            info: Counters::new(),
        }
    }

    pub fn increment_error(&self, error: ErrorType) {
        self.errors.increment(error);
    }

    pub fn increment_warning(&self, warning: WarningType) {
        self.warnings.increment(warning);
    }

    pub fn increment_info(&self, info_type: InfoType) {
        self.info.increment(info_type);
    }

    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors.get(error)
    }

    pub fn get_warning_count(&self, warning: WarningType) -> usize {
        self.warnings.get(warning)
    }

    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        self.info.get(info_type)
    }

    /// Get total error count across all error types.
    pub fn total_errors(&self) -> usize {
        self.errors.total()
    }

    /// Get total warning count across all warning types.
    pub fn total_warnings(&self) -> usize {
        self.warnings.total()
    }

    /// Get total info count across all info types.
    pub fn total_info(&self) -> usize {
        self.info.total()
    }
}
