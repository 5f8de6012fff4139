//! DMARC record retrieval with organizational-domain fallback.

use super::record::{parse_fields, DmarcRecord};
use crate::config::DMARC_LABEL;
use crate::dns::{DnsClient, RecordKind};
use crate::domain::DomainContext;

/// Picks the DMARC record out of the TXT records at `_dmarc.<domain>`.
pub fn select_dmarc_record(txt_records: &[String]) -> Option<String> {
    txt_records
        .iter()
        .find(|txt| txt.contains("DMARC1"))
        .map(|txt| txt.replace('"', "").trim().to_string())
}

/// Fetches the DMARC record text published for `domain` (no fallback).
pub async fn fetch_dmarc_record<C: DnsClient>(client: &C, domain: &str) -> Option<String> {
    let name = format!("{DMARC_LABEL}.{domain}");
    match client.lookup(&name, RecordKind::Txt).await {
        Ok(txt_records) => select_dmarc_record(&txt_records),
        Err(e) => {
            log::debug!("No DMARC record at {name}: {e}");
            None
        }
    }
}

pub struct DmarcResolver<'a, C> {
    client: &'a C,
}

impl<'a, C: DnsClient> DmarcResolver<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Resolves the DMARC record that applies to `ctx.domain`.
    ///
    /// A subdomain without its own record falls back to the record of its
    /// organizational domain (RFC 7489 section 6.6.3), with exactly one extra
    /// lookup.
    pub async fn resolve(&self, ctx: &DomainContext) -> DmarcRecord {
        if let Some(raw) = fetch_dmarc_record(self.client, &ctx.domain).await {
            return parse_fields(&raw);
        }
        if !ctx.is_subdomain {
            return DmarcRecord::absent();
        }

        match fetch_dmarc_record(self.client, &ctx.organizational_domain).await {
            Some(raw) => {
                log::debug!(
                    "{}: using DMARC record of organizational domain {}",
                    ctx.domain,
                    ctx.organizational_domain
                );
                DmarcRecord {
                    from_organizational_domain: true,
                    ..parse_fields(&raw)
                }
            }
            None => DmarcRecord::absent(),
        }
    }
}
