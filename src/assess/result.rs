//! The flat per-domain result record.

use serde::Serialize;

use crate::bimi::BimiRecord;
use crate::dmarc::DmarcRecord;
use crate::domain::DomainContext;
use crate::error_handling::AssessmentError;
use crate::mx::MxRecords;
use crate::spf::SpfRecord;
use crate::spoofing::Verdict;

/// Everything learned about one domain, flattened for rendering.
///
/// Every input domain yields exactly one of these, including domains that could
/// not be assessed (`error` is then set and the verdict fields are empty).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssessmentResult {
    pub domain: String,
    /// `"domain"` or `"subdomain"`
    pub domain_type: Option<String>,
    pub dns_server: Option<String>,

    pub spf_record: Option<String>,
    pub spf_all: Option<String>,
    pub spf_dns_queries: Option<u32>,
    pub spf_too_many_dns_queries: Option<bool>,

    pub dmarc_record: Option<String>,
    pub dmarc_p: Option<String>,
    pub dmarc_pct: Option<u32>,
    pub dmarc_aspf: Option<String>,
    pub dmarc_sp: Option<String>,
    pub dmarc_forensic_report: Option<String>,
    pub dmarc_aggregate_report: Option<String>,
    pub dmarc_from_organizational_domain: Option<bool>,

    pub bimi_record: Option<String>,
    pub bimi_version: Option<String>,
    pub bimi_location: Option<String>,
    pub bimi_authority: Option<String>,

    /// `"<preference> <host>"`, most preferred first
    pub mx_records: Option<Vec<String>>,
    pub mail_provider: Option<String>,

    pub spoofing_code: Option<u8>,
    /// `true`, `false`, or `null` when it depends on the receiving mailbox
    pub spoofing_possible: Option<bool>,
    pub spoofing_type: Option<String>,
    pub classification_fallback: bool,

    pub error: Option<String>,
}

impl AssessmentResult {
    pub(crate) fn from_parts(
        ctx: &DomainContext,
        dns_server: String,
        spf: &SpfRecord,
        dmarc: &DmarcRecord,
        bimi: &BimiRecord,
        mx: &MxRecords,
        verdict: &Verdict,
    ) -> Self {
        Self {
            domain: ctx.domain.clone(),
            domain_type: Some(ctx.domain_type().to_string()),
            dns_server: Some(dns_server),

            spf_record: spf.raw.clone(),
            spf_all: spf.all_qualifier.map(|q| q.to_string()),
            spf_dns_queries: spf.is_present().then_some(spf.dns_lookup_count),
            spf_too_many_dns_queries: spf.is_present().then_some(spf.lookup_budget_exceeded),

            dmarc_record: dmarc.raw.clone(),
            dmarc_p: dmarc.policy.as_ref().map(ToString::to_string),
            dmarc_pct: dmarc.pct,
            dmarc_aspf: dmarc.aspf.as_ref().map(ToString::to_string),
            dmarc_sp: dmarc.subdomain_policy.as_ref().map(ToString::to_string),
            dmarc_forensic_report: dmarc.forensic_uri.clone(),
            dmarc_aggregate_report: dmarc.aggregate_uri.clone(),
            dmarc_from_organizational_domain: dmarc
                .is_present()
                .then_some(dmarc.from_organizational_domain),

            bimi_record: bimi.raw.clone(),
            bimi_version: bimi.version.clone(),
            bimi_location: bimi.location.clone(),
            bimi_authority: bimi.authority.clone(),

            mx_records: (!mx.exchangers.is_empty()).then(|| mx.rendered()),
            mail_provider: mx.provider.map(|p| p.to_string()),

            spoofing_code: Some(verdict.code.code()),
            spoofing_possible: verdict.spoofing_possible,
            spoofing_type: Some(verdict.message.clone()),
            classification_fallback: verdict.fallback,

            error: None,
        }
    }

    /// Result for a domain that produced no verdict.
    pub fn failed(domain: &str, error: &AssessmentError) -> Self {
        Self {
            domain: domain.to_string(),
            error: Some(error.to_string()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
