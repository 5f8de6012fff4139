//! `trust-dns-resolver` backed implementation of [`DnsClient`].

use std::net::IpAddr;
use std::time::Duration;

use trust_dns_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::proto::rr::{RData, RecordType};
use trust_dns_resolver::TokioAsyncResolver;

use super::client::{DnsClient, RecordKind};
use crate::config::DNS_ATTEMPTS;
use crate::error_handling::DnsError;

/// DNS client over a tokio `trust-dns` resolver.
///
/// Either uses the system/default upstream configuration or is pinned to one
/// nameserver (see [`TrustDnsClient::for_nameserver`]).
#[derive(Clone)]
pub struct TrustDnsClient {
    resolver: TokioAsyncResolver,
    timeout: Duration,
    nameserver: Option<IpAddr>,
}

impl TrustDnsClient {
    /// Client using the default resolver configuration.
    pub fn system(timeout: Duration) -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), Self::options(timeout)),
            timeout,
            nameserver: None,
        }
    }

    /// Client that sends every query to `server` on port 53.
    pub fn for_nameserver(server: IpAddr, timeout: Duration) -> Self {
        let group = NameServerConfigGroup::from_ips_clear(&[server], 53, true);
        let config = ResolverConfig::from_parts(None, vec![], group);
        Self {
            resolver: TokioAsyncResolver::tokio(config, Self::options(timeout)),
            timeout,
            nameserver: Some(server),
        }
    }

    fn options(timeout: Duration) -> ResolverOpts {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = DNS_ATTEMPTS;
        // No search-domain appending: every name we query is already absolute.
        opts.ndots = 0;
        opts
    }

    /// Per-query timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn record_type(kind: RecordKind) -> RecordType {
    match kind {
        RecordKind::Txt => RecordType::TXT,
        RecordKind::Soa => RecordType::SOA,
        RecordKind::A => RecordType::A,
        RecordKind::Mx => RecordType::MX,
    }
}

/// Renders one answer as the string form the resolvers consume.
fn render(rdata: &RData) -> Option<String> {
    match rdata {
        // TXT records can contain multiple strings - join them
        RData::TXT(txt) => Some(
            txt.iter()
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .collect::<Vec<String>>()
                .join(""),
        ),
        RData::SOA(soa) => Some(soa.mname().to_utf8().trim_end_matches('.').to_string()),
        RData::A(a) => Some(a.to_string()),
        RData::MX(mx) => Some(format!(
            "{} {}",
            mx.preference(),
            mx.exchange().to_utf8().trim_end_matches('.')
        )),
        _ => None,
    }
}

fn classify_error(e: &ResolveError) -> DnsError {
    match e.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => DnsError::NoRecords,
        ResolveErrorKind::Timeout => DnsError::Timeout,
        _ => DnsError::Other(e.to_string()),
    }
}

impl DnsClient for TrustDnsClient {
    async fn lookup(&self, name: &str, kind: RecordKind) -> Result<Vec<String>, DnsError> {
        let answer = self
            .resolver
            .lookup(name, record_type(kind))
            .await
            .map_err(|e| {
                let err = classify_error(&e);
                log::debug!("{kind} lookup for {name} failed: {err}");
                err
            })?;

        let values: Vec<String> = answer.iter().filter_map(render).collect();
        if values.is_empty() {
            return Err(DnsError::NoRecords);
        }
        Ok(values)
    }

    fn with_nameserver(&self, server: IpAddr) -> Self {
        Self::for_nameserver(server, self.timeout)
    }

    fn nameserver(&self) -> Option<IpAddr> {
        self.nameserver
    }
}
