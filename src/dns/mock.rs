//! In-memory [`DnsClient`] for tests and offline use.

use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::client::{DnsClient, RecordKind};
use crate::error_handling::DnsError;

type Key = (Option<IpAddr>, String, RecordKind);

/// Answers queries from a table populated up front.
///
/// Records added with [`MockDnsClient::add`] are served by every nameserver;
/// records added with [`MockDnsClient::add_at`] only when the client is pinned to
/// that server. A server marked with [`MockDnsClient::isolate`] answers only its
/// own records, the way an authoritative server ignores names outside its zone.
/// Clones share the table and the query counter.
#[derive(Clone, Default)]
pub struct MockDnsClient {
    records: Arc<Mutex<HashMap<Key, Vec<String>>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    isolated: Arc<Mutex<HashSet<IpAddr>>>,
    queries: Arc<AtomicUsize>,
    nameserver: Option<IpAddr>,
}

impl MockDnsClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `values` for `(name, kind)` from any nameserver.
    pub fn add(&self, name: &str, kind: RecordKind, values: &[&str]) {
        self.insert(None, name, kind, values);
    }

    /// Serves `values` for `(name, kind)` only from `server`.
    pub fn add_at(&self, server: IpAddr, name: &str, kind: RecordKind, values: &[&str]) {
        self.insert(Some(server), name, kind, values);
    }

    /// Shorthand for a single TXT record.
    pub fn add_txt(&self, name: &str, value: &str) {
        self.add(name, RecordKind::Txt, &[value]);
    }

    /// Every query for `name` fails with a server error.
    pub fn fail(&self, name: &str) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_lowercase());
    }

    /// `server` no longer falls back to the records every nameserver serves.
    pub fn isolate(&self, server: IpAddr) {
        self.isolated
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(server);
    }

    /// Number of lookups issued through this client and its clones.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn insert(&self, server: Option<IpAddr>, name: &str, kind: RecordKind, values: &[&str]) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                (server, name.to_lowercase(), kind),
                values.iter().map(|v| v.to_string()).collect(),
            );
    }
}

impl DnsClient for MockDnsClient {
    async fn lookup(&self, name: &str, kind: RecordKind) -> Result<Vec<String>, DnsError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let name = name.trim_end_matches('.').to_lowercase();

        if self
            .failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&name)
        {
            return Err(DnsError::Other(format!("SERVFAIL for {name}")));
        }

        let isolated = self.nameserver.is_some_and(|server| {
            self.isolated
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .contains(&server)
        });
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let pinned = self
            .nameserver
            .and_then(|server| records.get(&(Some(server), name.clone(), kind)));
        let shared = || {
            if isolated {
                None
            } else {
                records.get(&(None, name, kind))
            }
        };
        match pinned.or_else(shared) {
            Some(values) if !values.is_empty() => Ok(values.clone()),
            _ => Err(DnsError::NoRecords),
        }
    }

    fn with_nameserver(&self, server: IpAddr) -> Self {
        Self {
            nameserver: Some(server),
            ..self.clone()
        }
    }

    fn nameserver(&self) -> Option<IpAddr> {
        self.nameserver
    }
}
