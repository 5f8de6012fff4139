//! Configuration constants.
//!
//! This module defines the operational constants used throughout the application,
//! including the SPF lookup budget, worker defaults and DNS timeouts.

use std::net::{IpAddr, Ipv4Addr};

/// Default number of concurrent domain assessments.
pub const DEFAULT_WORKERS: usize = 4;

/// Interval in seconds between progress log lines during a batch run.
pub const LOGGING_INTERVAL: u64 = 5;

// Network operation timeouts
/// DNS query timeout in seconds
/// Most TXT/SOA lookups complete in well under a second; 3s fails fast on dead servers
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// Number of attempts the resolver makes per query before giving up
pub const DNS_ATTEMPTS: usize = 2;

/// Maximum number of DNS-consuming SPF terms allowed by RFC 7208 section 4.6.4.
///
/// A chain whose cost is strictly greater than this value is flagged as exceeding
/// the budget; exactly this many lookups is still compliant.
pub const SPF_LOOKUP_BUDGET: u32 = 10;

/// Public resolvers tried, in order, when the authoritative server does not
/// return both an SPF and a DMARC record.
pub const PUBLIC_RESOLVERS: [IpAddr; 3] = [
    IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)),
    IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
    IpAddr::V4(Ipv4Addr::new(9, 9, 9, 9)),
];

/// Maximum length of a domain name (RFC 1035 presentation format, without trailing dot).
pub const MAX_DOMAIN_LENGTH: usize = 253;

/// Label prefix under which DMARC records are published.
pub const DMARC_LABEL: &str = "_dmarc";

/// Selector and label under which BIMI records are published.
pub const BIMI_LABEL: &str = "default._bimi";
