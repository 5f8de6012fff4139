//! Domain input reading.

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::config::DomainSource;

/// Returns the trimmed line, or `None` for blank lines and `#` comments.
pub fn domain_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        None
    } else {
        Some(trimmed)
    }
}

async fn read_lines<R: AsyncBufRead + Unpin>(reader: R) -> Vec<String> {
    let mut domains = Vec::new();
    let mut lines = reader.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let Some(domain) = domain_line(&line) {
                    domains.push(domain.to_string());
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read line from input: {e}");
                break;
            }
        }
    }
    domains
}

/// Collects the domains to assess, in input order.
///
/// A list path of `-` reads stdin. Domains are returned as written; normalization
/// happens per assessment so that malformed lines still get an error result.
///
/// # Errors
///
/// Returns an error if the input file cannot be opened.
pub async fn read_domains(source: &DomainSource) -> Result<Vec<String>> {
    let domains = match source {
        DomainSource::Single(domain) => domain_line(domain)
            .map(|d| vec![d.to_string()])
            .unwrap_or_default(),
        DomainSource::List(path) if path.as_os_str() == "-" => {
            info!("Reading domains from stdin");
            read_lines(BufReader::new(tokio::io::stdin())).await
        }
        DomainSource::List(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open input file {}", path.display()))?;
            read_lines(BufReader::new(file)).await
        }
    };
    info!("Total domains in input: {}", domains.len());
    Ok(domains)
}
