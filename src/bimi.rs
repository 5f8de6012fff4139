//! BIMI record lookup.
//!
//! Purely informational: the record is reported alongside the verdict and never
//! influences it.

use crate::config::BIMI_LABEL;
use crate::dns::{DnsClient, RecordKind};

/// Tags of the `default._bimi` record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BimiRecord {
    pub raw: Option<String>,
    /// `v=`
    pub version: Option<String>,
    /// `l=`, logo location
    pub location: Option<String>,
    /// `a=`, authority evidence (VMC) location
    pub authority: Option<String>,
}

/// Parses the `v`, `l` and `a` tags of a BIMI record. Empty values count as absent.
pub fn parse_bimi_record(record: &str) -> BimiRecord {
    let mut parsed = BimiRecord {
        raw: Some(record.to_string()),
        ..BimiRecord::default()
    };

    for pair in record.split(';') {
        let Some((tag, value)) = pair.split_once('=') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let slot = match tag.trim().to_ascii_lowercase().as_str() {
            "v" => &mut parsed.version,
            "l" => &mut parsed.location,
            "a" => &mut parsed.authority,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }
    parsed
}

/// Looks up the BIMI record of `domain` under the default selector.
pub async fn resolve_bimi<C: DnsClient>(client: &C, domain: &str) -> BimiRecord {
    let name = format!("{BIMI_LABEL}.{domain}");
    let txt_records = match client.lookup(&name, RecordKind::Txt).await {
        Ok(records) => records,
        Err(e) => {
            log::debug!("No BIMI record at {name}: {e}");
            return BimiRecord::default();
        }
    };

    txt_records
        .iter()
        .find(|txt| txt.contains("v=BIMI"))
        .map(|txt| parse_bimi_record(txt.replace('"', "").trim()))
        .unwrap_or_default()
}
