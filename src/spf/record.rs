//! SPF data types.

use strum_macros::{Display, EnumIter};

use crate::config::SPF_LOOKUP_BUDGET;

/// Qualifier of the record's `all` mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum AllQualifier {
    /// `-all`
    #[strum(serialize = "-all")]
    Fail,
    /// `~all`
    #[strum(serialize = "~all")]
    SoftFail,
    /// `?all`
    #[strum(serialize = "?all")]
    Neutral,
    /// `+all`
    #[strum(serialize = "+all")]
    Pass,
    /// More than one `all` mechanism: the record is malformed
    #[strum(serialize = "multiple")]
    Multiple,
}

impl AllQualifier {
    /// Matches a whole SPF term such as `~all`. A bare `all` is not matched.
    pub(crate) fn from_token(token: &str) -> Option<Self> {
        let token = token.to_ascii_lowercase();
        match token.as_str() {
            "-all" => Some(AllQualifier::Fail),
            "~all" => Some(AllQualifier::SoftFail),
            "?all" => Some(AllQualifier::Neutral),
            "+all" => Some(AllQualifier::Pass),
            _ => None,
        }
    }
}

/// DNS-consuming SPF terms (RFC 7208 section 4.6.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MechanismKind {
    Include,
    Redirect,
    A,
    Mx,
    Ptr,
    Exists,
}

/// What the SPF resolver learned about a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpfRecord {
    /// Record text with quoting stripped; `None` when no SPF record was found
    pub raw: Option<String>,
    /// Qualifier of the `all` mechanism, following `redirect=` when the record has none
    pub all_qualifier: Option<AllQualifier>,
    /// DNS-consuming terms across the whole include/redirect chain
    pub dns_lookup_count: u32,
    /// `dns_lookup_count` is above the RFC 7208 limit
    pub lookup_budget_exceeded: bool,
}

impl SpfRecord {
    /// The record of a domain that publishes no SPF policy.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn new(raw: String, all_qualifier: Option<AllQualifier>, dns_lookup_count: u32) -> Self {
        Self {
            raw: Some(raw),
            all_qualifier,
            dns_lookup_count,
            lookup_budget_exceeded: dns_lookup_count > SPF_LOOKUP_BUDGET,
        }
    }

    pub fn is_present(&self) -> bool {
        self.raw.is_some()
    }
}
