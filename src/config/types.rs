//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use structopt::StructOpt;
use strum::VariantNames;
use strum_macros::{Display, EnumString, VariantNames};

use crate::config::constants::{DEFAULT_WORKERS, DNS_TIMEOUT_SECS};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How assessment results are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// One colored block per domain, printed as soon as the domain completes
    Stdout,
    /// A single JSON array printed once every domain has completed
    Json,
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Single domain
/// spoofcheck -d example.com
///
/// # A list of domains, eight at a time, as JSON
/// spoofcheck -i domains.txt --threads 8 --output json
/// ```
#[derive(Debug, StructOpt)]
#[structopt(
    name = "spoofcheck",
    about = "Checks SPF and DMARC records and reports whether a domain can be spoofed."
)]
pub struct Opt {
    /// Single domain to process
    #[structopt(
        short = "d",
        long = "domain",
        conflicts_with = "input-list",
        required_unless = "input-list"
    )]
    pub domain: Option<String>,

    /// File containing a list of domains to process (`-` reads stdin)
    #[structopt(short = "i", long = "input-list", parse(from_os_str))]
    pub input_list: Option<PathBuf>,

    /// Output format: stdout|json
    #[structopt(
        short = "o",
        long,
        default_value = "stdout",
        possible_values = OutputFormat::VARIANTS,
        case_insensitive = true
    )]
    pub output: OutputFormat,

    /// Number of domains assessed concurrently
    #[structopt(short = "t", long, default_value = "4")]
    pub threads: usize,

    /// Log level: error|warn|info|debug|trace
    #[structopt(
        long,
        default_value = "info",
        possible_values = LogLevel::VARIANTS,
        case_insensitive = true
    )]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[structopt(
        long,
        default_value = "plain",
        possible_values = LogFormat::VARIANTS,
        case_insensitive = true
    )]
    pub log_format: LogFormat,

    /// DNS query timeout in seconds
    #[structopt(long, default_value = "3")]
    pub dns_timeout_secs: u64,

    /// Skip authoritative/public nameserver discovery and use the default resolver only
    #[structopt(long)]
    pub no_discovery: bool,
}

/// Where the domains to assess come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainSource {
    /// A single domain given on the command line
    Single(String),
    /// A newline-delimited file; `-` means stdin
    List(PathBuf),
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use spoofcheck::{Config, DomainSource};
///
/// let config = Config {
///     source: DomainSource::Single("example.com".to_string()),
///     workers: 8,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Domains to assess
    pub source: DomainSource,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Result rendering
    pub output: OutputFormat,

    /// Maximum concurrent assessments
    pub workers: usize,

    /// Per-query DNS timeout in seconds
    pub dns_timeout_secs: u64,

    /// Whether to look for the authoritative nameserver before falling back to public resolvers
    pub nameserver_discovery: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DomainSource::List(PathBuf::from("domains.txt")),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            output: OutputFormat::Stdout,
            workers: DEFAULT_WORKERS,
            dns_timeout_secs: DNS_TIMEOUT_SECS,
            nameserver_discovery: true,
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        let source = match (opt.domain, opt.input_list) {
            (Some(domain), _) => DomainSource::Single(domain),
            (None, Some(path)) => DomainSource::List(path),
            // structopt enforces one of the two; fall back to the default list file
            (None, None) => Config::default().source,
        };

        Self {
            source,
            log_level: opt.log_level,
            log_format: opt.log_format,
            output: opt.output,
            // a pool of zero workers would never make progress
            workers: opt.threads.max(1),
            dns_timeout_secs: opt.dns_timeout_secs,
            nameserver_discovery: !opt.no_discovery,
        }
    }
}
