//! DNS resolution and nameserver selection.
//!
//! This module provides async DNS operations behind the [`DnsClient`] trait:
//! - TXT queries (SPF, DMARC, BIMI records)
//! - SOA queries (primary nameserver of a zone)
//! - A queries (address of that nameserver)
//!
//! [`TrustDnsClient`] talks to real servers through `trust-dns-resolver`;
//! [`MockDnsClient`] answers from an in-memory table.

mod client;
mod discovery;
mod mock;
mod resolver;

// Re-export public API
pub use client::{DnsClient, RecordKind};
pub use discovery::{discover_nameserver, Discovery, NameserverSource};
pub use mock::MockDnsClient;
pub use resolver::TrustDnsClient;
