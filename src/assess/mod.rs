//! Per-domain orchestration.
//!
//! `DomainAssessor::assess` is the unit of work handed to the worker pool: it
//! normalizes the input, picks a nameserver, resolves SPF, DMARC, BIMI and MX through
//! it, and classifies the result. Nested SPF targets always go through a
//! recursive resolver.

mod result;

use std::sync::Arc;

use tldextract::TldExtractor;

use crate::bimi::resolve_bimi;
use crate::dmarc::DmarcResolver;
use crate::dns::{discover_nameserver, DnsClient, Discovery, NameserverSource};
use crate::domain::{normalize_domain, DomainContext};
use crate::error_handling::{
    AssessmentError, ErrorType, InfoType, ProcessingStats, WarningType,
};
use crate::mx::resolve_mx;
use crate::spf::{AllQualifier, SpfResolver};
use crate::spoofing::classify;

pub use result::AssessmentResult;

/// Shared, read-only resources for assessing domains.
///
/// Cloning the DNS client is cheap; each assessment works on its own clone when
/// discovery pins it to a nameserver.
pub struct DomainAssessor<C> {
    client: C,
    extractor: Arc<TldExtractor>,
    nameserver_discovery: bool,
    stats: Arc<ProcessingStats>,
}

impl<C: DnsClient + Clone> DomainAssessor<C> {
    pub fn new(
        client: C,
        extractor: Arc<TldExtractor>,
        nameserver_discovery: bool,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        Self {
            client,
            extractor,
            nameserver_discovery,
            stats,
        }
    }

    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    /// Assesses one input line.
    ///
    /// Never fails: an unusable domain yields a result with `error` set.
    pub async fn assess(&self, input: &str) -> AssessmentResult {
        let ctx = match self.context(input) {
            Ok(ctx) => ctx,
            Err(e) => {
                log::warn!("Skipping {input}: {e}");
                self.stats.increment_error(ErrorType::InvalidDomain);
                return AssessmentResult::failed(input.trim(), &e);
            }
        };
        log::debug!("Assessing {} ({})", ctx.domain, ctx.domain_type());

        let Discovery { client, source } = if self.nameserver_discovery {
            discover_nameserver(&self.client, &ctx.domain).await
        } else {
            Discovery {
                client: self.client.clone(),
                source: NameserverSource::Default,
            }
        };
        match source {
            NameserverSource::Authoritative(_) => {
                self.stats.increment_info(InfoType::AuthoritativeNameserver)
            }
            NameserverSource::Public(_) => self.stats.increment_info(InfoType::PublicResolver),
            NameserverSource::Default => {}
        }
        log::debug!("{}: using {}", ctx.domain, source);

        // an authoritative server only answers for its own zone
        let recursive = match source {
            NameserverSource::Authoritative(_) => &self.client,
            NameserverSource::Public(_) | NameserverSource::Default => &client,
        };
        let spf = SpfResolver::new(&client)
            .with_chain_client(recursive)
            .resolve(&ctx.domain)
            .await;
        let dmarc = DmarcResolver::new(&client).resolve(&ctx).await;
        let bimi = resolve_bimi(&client, &ctx.domain).await;
        let mx = resolve_mx(&client, &ctx.domain).await;

        if !spf.is_present() {
            self.stats.increment_warning(WarningType::MissingSpfRecord);
        }
        if spf.lookup_budget_exceeded {
            self.stats.increment_warning(WarningType::SpfLookupBudgetExceeded);
        }
        if spf.all_qualifier == Some(AllQualifier::Multiple) {
            self.stats.increment_warning(WarningType::MultipleAllMechanisms);
        }
        if !dmarc.is_present() {
            self.stats.increment_warning(WarningType::MissingDmarcRecord);
        }
        if dmarc.from_organizational_domain {
            self.stats.increment_info(InfoType::OrganizationalDmarcFallback);
        }
        if bimi.raw.is_some() {
            self.stats.increment_info(InfoType::BimiRecord);
        }

        let verdict = classify(&ctx, &spf, &dmarc);
        if verdict.fallback {
            self.stats.increment_error(ErrorType::ClassificationFallback);
        }
        log::debug!("{}: verdict {}", ctx.domain, verdict.code.code());

        AssessmentResult::from_parts(&ctx, source.to_string(), &spf, &dmarc, &bimi, &mx, &verdict)
    }

    fn context(&self, input: &str) -> Result<DomainContext, AssessmentError> {
        let domain = normalize_domain(input)?;
        DomainContext::new(&self.extractor, &domain)
    }
}

#[cfg(test)]
mod tests;
