//! SPF record retrieval and include/redirect chain traversal.

use std::collections::{HashSet, VecDeque};

use super::parse::{lookup_terms, parse_all_qualifier, redirect_target, select_spf_record};
use super::record::{AllQualifier, MechanismKind, SpfRecord};
use crate::config::SPF_LOOKUP_BUDGET;
use crate::dns::{DnsClient, RecordKind};

/// Fetches the SPF record text published at `domain`.
///
/// Any DNS failure is treated as "no record".
pub async fn fetch_spf_record<C: DnsClient>(client: &C, domain: &str) -> Option<String> {
    match client.lookup(domain, RecordKind::Txt).await {
        Ok(txt_records) => select_spf_record(&txt_records),
        Err(e) => {
            log::debug!("No SPF record for {domain}: {e}");
            None
        }
    }
}

/// Resolves SPF for one assessment.
///
/// Holds only borrowed clients; every traversal owns its own visited set. The
/// record of the assessed domain comes from `client`, `include:` and `redirect=`
/// targets from `chain_client`.
pub struct SpfResolver<'a, C> {
    client: &'a C,
    chain_client: &'a C,
}

impl<'a, C: DnsClient> SpfResolver<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            chain_client: client,
        }
    }

    /// Follows `include:` and `redirect=` targets through `chain_client`.
    ///
    /// Needed when `client` is pinned to an authoritative server, which only
    /// answers for its own zone.
    pub fn with_chain_client(mut self, chain_client: &'a C) -> Self {
        self.chain_client = chain_client;
        self
    }

    /// See [`fetch_spf_record`].
    pub async fn fetch(&self, domain: &str) -> Option<String> {
        fetch_spf_record(self.client, domain).await
    }

    async fn fetch_target(&self, target: &str) -> Option<String> {
        fetch_spf_record(self.chain_client, target).await
    }

    /// Fetches and evaluates the SPF record of `domain`.
    pub async fn resolve(&self, domain: &str) -> SpfRecord {
        let Some(raw) = self.fetch(domain).await else {
            return SpfRecord::absent();
        };
        let all_qualifier = self.all_qualifier(&raw).await;
        let (count, _) = self.chain_cost(&raw).await;
        SpfRecord::new(raw, all_qualifier, count)
    }

    /// DNS-lookup cost of the SPF chain rooted at `domain`, and whether it is
    /// above the budget. A domain without SPF costs nothing.
    pub async fn compute_lookup_cost(&self, domain: &str) -> (u32, bool) {
        match self.fetch(domain).await {
            Some(raw) => self.chain_cost(&raw).await,
            None => (0, false),
        }
    }

    /// Qualifier of the `all` mechanism of `raw`.
    ///
    /// When `raw` has no `all`, its `redirect=` target is followed (and that
    /// record's target, and so on) until a record has one, the chain breaks, or a
    /// target repeats.
    pub async fn all_qualifier(&self, raw: &str) -> Option<AllQualifier> {
        let mut visited = HashSet::new();
        let mut record = raw.to_string();
        loop {
            if let Some(qualifier) = parse_all_qualifier(&record) {
                return Some(qualifier);
            }
            let target = redirect_target(&record)?;
            if !visited.insert(target.clone()) {
                log::debug!("SPF redirect loop at {target}");
                return None;
            }
            record = self.fetch_target(&target).await?;
        }
    }

    /// Walks the include/redirect graph breadth first.
    ///
    /// Every DNS-consuming term costs one unit. An `include:`/`redirect=` target is
    /// expanded the first time its `(kind, target)` pair is seen; later
    /// occurrences still cost a unit but are not expanded again. Stops as soon as
    /// the total passes the budget.
    async fn chain_cost(&self, root: &str) -> (u32, bool) {
        let mut pending = VecDeque::from([root.to_string()]);
        let mut visited: HashSet<(MechanismKind, String)> = HashSet::new();
        let mut count: u32 = 0;

        'records: while let Some(record) = pending.pop_front() {
            for term in lookup_terms(&record) {
                count += 1;
                if count > SPF_LOOKUP_BUDGET {
                    break 'records;
                }
                let Some(target) = term.expandable_target() else {
                    continue;
                };
                if !visited.insert((term.kind, target.to_string())) {
                    continue;
                }
                // unreachable targets add nothing but do not stop the walk
                if let Some(nested) = self.fetch_target(target).await {
                    pending.push_back(nested);
                }
            }
        }

        (count, count > SPF_LOOKUP_BUDGET)
    }
}
