//! Tests for command-line parsing and its conversion into the library `Config`.

use std::path::PathBuf;

use spoofcheck::{Config, DomainSource, LogFormat, LogLevel, Opt, OutputFormat};
use structopt::StructOpt;

fn parse(args: &[&str]) -> Result<Opt, structopt::clap::Error> {
    Opt::from_iter_safe(std::iter::once("spoofcheck").chain(args.iter().copied()))
}

#[test]
fn test_defaults() {
    let config: Config = parse(&["-d", "example.com"]).unwrap().into();
    assert_eq!(
        config.source,
        DomainSource::Single("example.com".to_string())
    );
    assert_eq!(config.output, OutputFormat::Stdout);
    assert_eq!(config.workers, 4);
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.log_format, LogFormat::Plain);
    assert_eq!(config.dns_timeout_secs, 3);
    assert!(config.nameserver_discovery);
}

#[test]
fn test_long_options() {
    let config: Config = parse(&[
        "--input-list",
        "domains.txt",
        "--output",
        "JSON",
        "--threads",
        "16",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--dns-timeout-secs",
        "5",
        "--no-discovery",
    ])
    .unwrap()
    .into();

    assert_eq!(config.source, DomainSource::List(PathBuf::from("domains.txt")));
    assert_eq!(config.output, OutputFormat::Json);
    assert_eq!(config.workers, 16);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.dns_timeout_secs, 5);
    assert!(!config.nameserver_discovery);
}

#[test]
fn test_stdin_list() {
    let config: Config = parse(&["-i", "-"]).unwrap().into();
    assert_eq!(config.source, DomainSource::List(PathBuf::from("-")));
}

#[test]
fn test_unknown_output_format_rejected() {
    assert!(parse(&["-d", "example.com", "-o", "xls"]).is_err());
}

#[test]
fn test_source_is_required_and_exclusive() {
    assert!(parse(&[]).is_err());
    assert!(parse(&["-d", "example.com", "-i", "domains.txt"]).is_err());
}

#[test]
fn test_non_numeric_threads_rejected() {
    assert!(parse(&["-d", "example.com", "-t", "many"]).is_err());
}
