//! Logger setup for assessment runs.
//!
//! Log lines go to stderr so that `stdout` stays reserved for results, which
//! matters when `-o json` output is piped into another tool.

use std::io::{self, Write};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};

fn colored_level(level: Level) -> ColoredString {
    let name = format!("{level:<5}");
    match level {
        Level::Error => name.red().bold(),
        Level::Warn => name.yellow(),
        Level::Info => name.green(),
        Level::Debug => name.blue(),
        Level::Trace => name.purple(),
    }
}

/// `HH:MM:SS LEVEL target: message`
fn format_plain(buf: &mut Formatter, record: &Record<'_>) -> io::Result<()> {
    writeln!(
        buf,
        "{} {} {}: {}",
        chrono::Local::now().format("%H:%M:%S").to_string().dimmed(),
        colored_level(record.level()),
        record.target().cyan(),
        record.args()
    )
}

/// One JSON object per line with `ts` in epoch milliseconds.
fn format_json(buf: &mut Formatter, record: &Record<'_>) -> io::Result<()> {
    let line = serde_json::json!({
        "ts": chrono::Utc::now().timestamp_millis(),
        "level": record.level().to_string(),
        "target": record.target(),
        "msg": record.args().to_string(),
    });
    writeln!(buf, "{line}")
}

/// Installs the global logger.
///
/// `RUST_LOG` is read first so per-module filters keep working; `level` then
/// overrides the global and `spoofcheck` levels.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=spoofcheck::spf=trace spoofcheck -d example.com --log-level debug
/// spoofcheck -i domains.txt -o json --log-format json 2> run.log
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    // truncated UDP answers are retried over TCP by the resolver and only noise here
    builder.filter_module("trust_dns_proto", LevelFilter::Error);
    builder.filter_module("trust_dns_resolver", LevelFilter::Error);
    builder.filter_module("spoofcheck", level);

    match format {
        LogFormat::Json => builder.format(format_json),
        LogFormat::Plain => builder.format(format_plain),
    };

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_initialization_is_an_error_not_a_panic() {
        // Whichever call installs the logger first, the other must fail cleanly.
        let _ = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let result = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(matches!(result, Err(InitializationError::LoggerError(_))));
    }

    #[test]
    fn test_level_names_are_padded() {
        assert!(colored_level(Level::Info).to_string().contains("INFO "));
        assert!(colored_level(Level::Error).to_string().contains("ERROR"));
    }
}
