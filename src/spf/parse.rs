//! SPF record text parsing.
//!
//! Only what the assessment needs: record selection, the `all` qualifier, the
//! DNS-consuming terms and the `redirect=` target. Full grammar checking lives in
//! [`crate::spoofing::syntax`].

use super::record::{AllQualifier, MechanismKind};

/// Picks the SPF record out of a domain's TXT records.
///
/// The first record containing `spf1` wins; double quotes are removed.
pub fn select_spf_record(txt_records: &[String]) -> Option<String> {
    txt_records
        .iter()
        .find(|txt| txt.contains("spf1"))
        .map(|txt| txt.replace('"', "").trim().to_string())
}

/// Scans `record` for `all` mechanisms.
///
/// No match gives `None`, exactly one gives its qualifier, two or more give
/// [`AllQualifier::Multiple`].
pub fn parse_all_qualifier(record: &str) -> Option<AllQualifier> {
    let mut found = record.split_whitespace().filter_map(AllQualifier::from_token);
    let first = found.next()?;
    match found.next() {
        Some(_) => Some(AllQualifier::Multiple),
        None => Some(first),
    }
}

/// A DNS-consuming term of an SPF record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTerm {
    pub kind: MechanismKind,
    /// Domain argument, lowercased; only `include:`/`redirect=` targets are kept
    pub target: Option<String>,
}

impl LookupTerm {
    /// Target whose own SPF record must be added to the chain.
    pub fn expandable_target(&self) -> Option<&str> {
        match self.kind {
            MechanismKind::Include | MechanismKind::Redirect => self.target.as_deref(),
            _ => None,
        }
    }
}

/// Classifies one whitespace-separated term.
fn lookup_term(token: &str) -> Option<LookupTerm> {
    let body = token.trim_start_matches(['+', '-', '~', '?']);
    let name_end = body.find([':', '/', '=']).unwrap_or(body.len());
    let (name, rest) = body.split_at(name_end);
    let name = name.to_ascii_lowercase();
    let argument = |sep: char| {
        rest.strip_prefix(sep)
            .map(|arg| arg.trim_end_matches('.').to_ascii_lowercase())
            .filter(|arg| !arg.is_empty())
    };

    let (kind, target) = match name.as_str() {
        "include" => (MechanismKind::Include, argument(':')),
        "redirect" if rest.starts_with('=') => (MechanismKind::Redirect, argument('=')),
        "a" => (MechanismKind::A, None),
        "mx" => (MechanismKind::Mx, None),
        "ptr" => (MechanismKind::Ptr, None),
        "exists" => (MechanismKind::Exists, None),
        _ => return None,
    };
    Some(LookupTerm { kind, target })
}

/// All DNS-consuming terms of `record`, in order.
pub fn lookup_terms(record: &str) -> Vec<LookupTerm> {
    record.split_whitespace().filter_map(lookup_term).collect()
}

/// Target of the first `redirect=` modifier.
pub fn redirect_target(record: &str) -> Option<String> {
    lookup_terms(record)
        .into_iter()
        .find(|term| term.kind == MechanismKind::Redirect)
        .and_then(|term| term.target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_first_spf_record() {
        let records = vec![
            "google-site-verification=abc".to_string(),
            "\"v=spf1 include:_spf.example.com ~all\"".to_string(),
            "v=spf1 -all".to_string(),
        ];
        assert_eq!(
            select_spf_record(&records).as_deref(),
            Some("v=spf1 include:_spf.example.com ~all")
        );
    }

    #[test]
    fn test_select_without_spf_record() {
        let records = vec!["v=DMARC1; p=none".to_string()];
        assert_eq!(select_spf_record(&records), None);
        assert_eq!(select_spf_record(&[]), None);
    }

    #[test]
    fn test_all_qualifier_each_kind() {
        assert_eq!(parse_all_qualifier("v=spf1 -all"), Some(AllQualifier::Fail));
        assert_eq!(parse_all_qualifier("v=spf1 mx ~all"), Some(AllQualifier::SoftFail));
        assert_eq!(parse_all_qualifier("v=spf1 ?all"), Some(AllQualifier::Neutral));
        assert_eq!(parse_all_qualifier("v=spf1 +all"), Some(AllQualifier::Pass));
        assert_eq!(parse_all_qualifier("v=spf1 a -ALL"), Some(AllQualifier::Fail));
    }

    #[test]
    fn test_all_qualifier_absent() {
        assert_eq!(parse_all_qualifier("v=spf1 include:example.com"), None);
        // bare `all` carries no explicit qualifier and is not counted
        assert_eq!(parse_all_qualifier("v=spf1 a all"), None);
        // not a mechanism, just a domain that happens to contain "-all"
        assert_eq!(parse_all_qualifier("v=spf1 include:mail-all.example.com"), None);
    }

    #[test]
    fn test_all_qualifier_multiple() {
        assert_eq!(
            parse_all_qualifier("v=spf1 -all ~all"),
            Some(AllQualifier::Multiple)
        );
        assert_eq!(
            parse_all_qualifier("v=spf1 -all a -all"),
            Some(AllQualifier::Multiple)
        );
    }

    #[test]
    fn test_lookup_terms_counts_dns_consuming_mechanisms() {
        let terms = lookup_terms(
            "v=spf1 ip4:192.0.2.0/24 a mx:mail.example.com a/24 ?ptr exists:%{i}.x.example \
             include:_spf.Example.com redirect=other.example ip6:2001:db8::/32 -all",
        );
        let kinds: Vec<MechanismKind> = terms.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MechanismKind::A,
                MechanismKind::Mx,
                MechanismKind::A,
                MechanismKind::Ptr,
                MechanismKind::Exists,
                MechanismKind::Include,
                MechanismKind::Redirect,
            ]
        );
        assert_eq!(terms[5].expandable_target(), Some("_spf.example.com"));
        assert_eq!(terms[6].expandable_target(), Some("other.example"));
        assert_eq!(terms[1].expandable_target(), None);
    }

    #[test]
    fn test_lookup_terms_ignores_lookalikes() {
        // `all`, `ip4`, `exp=` and unknown modifiers cost nothing
        assert!(lookup_terms("v=spf1 ip4:1.2.3.4 exp=explain.example all amx").is_empty());
    }

    #[test]
    fn test_redirect_target() {
        assert_eq!(
            redirect_target("v=spf1 redirect=_spf.Example.com."),
            Some("_spf.example.com".to_string())
        );
        assert_eq!(redirect_target("v=spf1 -all"), None);
    }
}
