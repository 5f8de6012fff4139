//! End-of-run statistics.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats, WarningType};

/// Prints a one-line summary of the run.
///
/// Works with both plain and JSON log formats (log::info! handles formatting).
pub fn print_simple_summary(total: usize, succeeded: usize, failed: usize, elapsed_seconds: f64) {
    info!(
        "✅ Assessed {} domain{} ({} succeeded, {} failed) in {:.1}s",
        total,
        if total == 1 { "" } else { "s" },
        succeeded,
        failed,
        elapsed_seconds
    );
}

/// Prints error, warning, and info statistics to the log.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();
    let total_warnings = error_stats.total_warnings();
    let total_info = error_stats.total_info();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = error_stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_warnings > 0 {
        info!("Warning Counts ({} total):", total_warnings);
        for warning_type in WarningType::iter() {
            let count = error_stats.get_warning_count(warning_type);
            if count > 0 {
                info!("   {}: {}", warning_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = error_stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_error_statistics_no_errors() {
        let stats = ProcessingStats::new();
        // Should not panic when there are no errors
        print_error_statistics(&stats);
    }

    #[test]
    fn test_print_error_statistics_all_types() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::InvalidDomain);
        stats.increment_warning(WarningType::MissingDmarcRecord);
        stats.increment_warning(WarningType::MissingDmarcRecord);
        stats.increment_info(InfoType::PublicResolver);
        print_error_statistics(&stats);
    }

    #[test]
    fn test_print_simple_summary() {
        print_simple_summary(1, 1, 0, 0.2);
        print_simple_summary(10, 7, 3, 12.5);
    }
}
