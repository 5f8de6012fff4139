//! Nameserver discovery.
//!
//! Picks the server one assessment is resolved against: the domain's own primary
//! nameserver (from its SOA) first, then the public resolvers in order. The first
//! server that serves both an SPF and a DMARC record wins; otherwise the most
//! complete partial answer is kept.

use std::fmt;
use std::net::IpAddr;

use super::client::{DnsClient, RecordKind};
use crate::config::PUBLIC_RESOLVERS;
use crate::dmarc::fetch_dmarc_record;
use crate::spf::fetch_spf_record;

/// Where the records of an assessment were fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameserverSource {
    /// The primary nameserver named in the domain's SOA record
    Authoritative(IpAddr),
    /// One of the fixed public resolvers
    Public(IpAddr),
    /// The system resolver configuration
    Default,
}

impl NameserverSource {
    pub fn address(&self) -> Option<IpAddr> {
        match self {
            NameserverSource::Authoritative(ip) | NameserverSource::Public(ip) => Some(*ip),
            NameserverSource::Default => None,
        }
    }
}

impl fmt::Display for NameserverSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameserverSource::Authoritative(ip) => write!(f, "{ip} (authoritative)"),
            NameserverSource::Public(ip) => write!(f, "{ip} (public)"),
            NameserverSource::Default => f.write_str("system resolver"),
        }
    }
}

/// A client pinned to the chosen server, with how it was chosen.
pub struct Discovery<C> {
    pub client: C,
    pub source: NameserverSource,
}

/// Resolves the primary nameserver of `domain` to an address using `base`.
async fn authoritative_address<C: DnsClient>(base: &C, domain: &str) -> Option<IpAddr> {
    let mname = base
        .lookup(domain, RecordKind::Soa)
        .await
        .ok()?
        .into_iter()
        .next()?;
    let addresses = base.lookup(&mname, RecordKind::A).await.ok()?;
    addresses.iter().find_map(|a| a.parse::<IpAddr>().ok())
}

/// How many of the two anchor records (SPF, DMARC) `client` returns for `domain`.
async fn anchor_records_found<C: DnsClient>(client: &C, domain: &str) -> usize {
    let spf = fetch_spf_record(client, domain).await.is_some();
    let dmarc = fetch_dmarc_record(client, domain).await.is_some();
    usize::from(spf) + usize::from(dmarc)
}

/// Chooses the nameserver for assessing `domain`.
///
/// Never fails: when no candidate returns anything, `base` itself is used.
pub async fn discover_nameserver<C>(base: &C, domain: &str) -> Discovery<C>
where
    C: DnsClient + Clone,
{
    let mut candidates = Vec::with_capacity(PUBLIC_RESOLVERS.len() + 1);
    if let Some(ip) = authoritative_address(base, domain).await {
        candidates.push(NameserverSource::Authoritative(ip));
    }
    candidates.extend(PUBLIC_RESOLVERS.iter().copied().map(NameserverSource::Public));

    let mut best: Option<(usize, Discovery<C>)> = None;
    for source in candidates {
        let Some(server) = source.address() else {
            continue;
        };
        let client = base.with_nameserver(server);
        let found = anchor_records_found(&client, domain).await;
        log::debug!("{domain}: {source} returned {found} of 2 anchor records");
        if found == 2 {
            return Discovery { client, source };
        }
        // strictly greater keeps the earliest candidate on ties
        if found > 0 && best.as_ref().map_or(true, |(n, _)| found > *n) {
            best = Some((found, Discovery { client, source }));
        }
    }

    match best {
        Some((_, discovery)) => discovery,
        None => Discovery {
            client: base.clone(),
            source: NameserverSource::Default,
        },
    }
}
