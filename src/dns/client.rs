//! The DNS client abstraction the resolvers are written against.

use std::fmt;
use std::future::Future;
use std::net::IpAddr;

use crate::error_handling::DnsError;

/// Record types the assessment needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Text records (SPF, DMARC, BIMI); multi-string records are joined
    Txt,
    /// Start of authority; yields the primary nameserver name
    Soa,
    /// IPv4 address; yields dotted-quad strings
    A,
    /// Mail exchanger; yields `"<preference> <host>"`
    Mx,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Txt => "TXT",
            RecordKind::Soa => "SOA",
            RecordKind::A => "A",
            RecordKind::Mx => "MX",
        };
        f.write_str(name)
    }
}

/// Resolves `(name, kind)` to a list of strings.
///
/// An empty answer is reported as [`DnsError::NoRecords`], so `Ok` always carries at
/// least one value. Implementations are shared read-only between concurrent
/// assessments.
pub trait DnsClient: Send + Sync {
    /// Queries `name` for records of `kind`.
    fn lookup(
        &self,
        name: &str,
        kind: RecordKind,
    ) -> impl Future<Output = Result<Vec<String>, DnsError>> + Send;

    /// Returns a client of the same kind that sends every query to `server`.
    fn with_nameserver(&self, server: IpAddr) -> Self
    where
        Self: Sized;

    /// The server this client is pinned to, if any.
    fn nameserver(&self) -> Option<IpAddr>;
}
