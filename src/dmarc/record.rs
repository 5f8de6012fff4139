//! DMARC data types and tag parsing.

use std::fmt;
use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString};

/// `p=` / `sp=` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Policy {
    None,
    Quarantine,
    Reject,
}

/// `aspf=` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Alignment {
    #[strum(serialize = "r")]
    Relaxed,
    #[strum(serialize = "s")]
    Strict,
}

/// A tag value that is either one the classifier understands or the literal that
/// was published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue<T> {
    Known(T),
    Unrecognized(String),
}

impl<T: FromStr> TagValue<T> {
    fn parse(raw: &str) -> Self {
        raw.parse()
            .map(TagValue::Known)
            .unwrap_or_else(|_| TagValue::Unrecognized(raw.to_string()))
    }
}

impl<T: fmt::Display> fmt::Display for TagValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Known(value) => value.fmt(f),
            TagValue::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

/// What the DMARC resolver learned about a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DmarcRecord {
    /// Record text with quoting stripped; `None` when no DMARC record was found
    pub raw: Option<String>,
    pub policy: Option<TagValue<Policy>>,
    pub subdomain_policy: Option<TagValue<Policy>>,
    /// `None` when the tag is missing or not a non-negative integer; the effective
    /// percentage is then 100
    pub pct: Option<u32>,
    pub aspf: Option<TagValue<Alignment>>,
    /// `ruf=`, only kept when failure reporting is requested with `fo=1`
    pub forensic_uri: Option<String>,
    /// `rua=`
    pub aggregate_uri: Option<String>,
    /// The record was published on the organizational domain, not on the domain itself
    pub from_organizational_domain: bool,
}

impl DmarcRecord {
    /// The record of a domain that publishes no DMARC policy.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_present(&self) -> bool {
        self.raw.is_some()
    }
}

/// Parses the tags of a DMARC record.
///
/// Tags are `;`-separated `name=value` pairs; names are case-insensitive, values
/// are trimmed, and only the first occurrence of a tag counts. Unknown tags are
/// ignored.
pub fn parse_fields(record: &str) -> DmarcRecord {
    let mut policy = None;
    let mut subdomain_policy = None;
    let mut pct = None;
    let mut aspf = None;
    let mut ruf = None;
    let mut rua = None;
    let mut fo: Option<&str> = None;

    for pair in record.split(';') {
        let Some((tag, value)) = pair.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match tag.trim().to_ascii_lowercase().as_str() {
            "p" if policy.is_none() => policy = Some(TagValue::parse(value)),
            "sp" if subdomain_policy.is_none() => subdomain_policy = Some(TagValue::parse(value)),
            // pct keeps its first occurrence even when that one is not numeric
            "pct" if pct.is_none() => pct = Some(value.parse::<u32>().ok()),
            "aspf" if aspf.is_none() => aspf = Some(TagValue::parse(value)),
            "ruf" if ruf.is_none() => ruf = Some(value.to_string()),
            "rua" if rua.is_none() => rua = Some(value.to_string()),
            "fo" if fo.is_none() => fo = Some(value),
            _ => {}
        }
    }

    let failure_reporting = fo.is_some_and(|options| options.split(':').any(|o| o.trim() == "1"));

    DmarcRecord {
        raw: Some(record.to_string()),
        policy,
        subdomain_policy,
        pct: pct.flatten(),
        aspf,
        forensic_uri: ruf.filter(|_| failure_reporting),
        aggregate_uri: rua,
        from_organizational_domain: false,
    }
}
