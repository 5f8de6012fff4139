//! Human-readable rendering of one result.

use colored::*;

use crate::assess::AssessmentResult;

fn good(line: &str) -> String {
    format!("{} {}\n", "[+]".green().bold(), line)
}

fn bad(line: &str) -> String {
    format!("{} {}\n", "[-]".red().bold(), line)
}

fn warning(line: &str) -> String {
    format!("{} {}\n", "[?]".yellow().bold(), line)
}

fn info(line: &str) -> String {
    format!("{} {}\n", "[*]".blue().bold(), line)
}

fn plain(line: &str) -> String {
    format!("{} {}\n", "[*]".bold(), line)
}

/// Renders the console block for one domain.
pub fn render_block(result: &AssessmentResult) -> String {
    let mut out = plain(&format!("Domain: {}", result.domain));

    if let Some(error) = &result.error {
        out.push_str(&bad(&format!("Error: {error}")));
        return out;
    }

    let is_subdomain = result.domain_type.as_deref() == Some("subdomain");
    out.push_str(&plain(&format!("Is subdomain: {is_subdomain}")));
    out.push_str(&plain(&format!(
        "DNS Server: {}",
        result.dns_server.as_deref().unwrap_or("unknown")
    )));

    match &result.spf_record {
        Some(record) => {
            out.push_str(&info(&format!("SPF record: {record}")));
            match result.spf_all.as_deref() {
                None => out.push_str(&info("SPF does not contain an `all` mechanism.")),
                Some("multiple") => {
                    out.push_str(&warning("SPF record contains multiple `all` mechanisms."))
                }
                Some(all) => out.push_str(&info(&format!("SPF all record: {all}"))),
            }
            let queries = result.spf_dns_queries.unwrap_or_default();
            if result.spf_too_many_dns_queries == Some(true) {
                out.push_str(&warning(&format!("Too many SPF DNS lookups: {queries}.")));
            } else {
                out.push_str(&info(&format!("SPF DNS lookup count: {queries}")));
            }
        }
        None => out.push_str(&info("No SPF record found.")),
    }

    match &result.dmarc_record {
        Some(record) => {
            out.push_str(&info(&format!("DMARC record: {record}")));
            if result.dmarc_from_organizational_domain == Some(true) {
                out.push_str(&info("DMARC record inherited from the organizational domain."));
            }
            let fields = [
                ("policy", result.dmarc_p.clone()),
                ("pct", result.dmarc_pct.map(|pct| pct.to_string())),
                ("aspf", result.dmarc_aspf.clone()),
                ("subdomain policy", result.dmarc_sp.clone()),
            ];
            for (name, value) in fields {
                match value {
                    Some(value) => out.push_str(&info(&format!("Found DMARC {name}: {value}"))),
                    None => out.push_str(&info(&format!("No DMARC {name} found."))),
                }
            }
            match &result.dmarc_forensic_report {
                Some(uri) => out.push_str(&plain(&format!("Forensics reports will be sent to: {uri}"))),
                None => out.push_str(&info("No DMARC forensic report location found.")),
            }
            match &result.dmarc_aggregate_report {
                Some(uri) => out.push_str(&plain(&format!("Aggregate reports will be sent to: {uri}"))),
                None => out.push_str(&info("No DMARC aggregate report location found.")),
            }
        }
        None => out.push_str(&info("No DMARC record found.")),
    }

    if let Some(record) = &result.bimi_record {
        out.push_str(&info(&format!("BIMI record: {record}")));
        if let Some(location) = &result.bimi_location {
            out.push_str(&info(&format!("BIMI logo: {location}")));
        }
        if let Some(authority) = &result.bimi_authority {
            out.push_str(&info(&format!("BIMI authority: {authority}")));
        }
    }

    match &result.mx_records {
        Some(records) => {
            out.push_str(&info(&format!("MX records: {}", records.join(", "))));
            if let Some(provider) = &result.mail_provider {
                out.push_str(&info(&format!("Email provider: {provider}")));
            }
        }
        None => out.push_str(&info("No MX records found.")),
    }

    if let Some(message) = &result.spoofing_type {
        let line = match result.spoofing_possible {
            Some(true) => good(message),
            Some(false) => bad(message),
            None => warning(message),
        };
        out.push_str(&line);
    }
    if result.classification_fallback {
        out.push_str(&warning("Verdict derived from record syntax only."));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_verdict_block() {
        let result = AssessmentResult {
            domain: "example.com".to_string(),
            domain_type: Some("domain".to_string()),
            dns_server: Some("1.1.1.1 (public)".to_string()),
            spf_record: Some("v=spf1 -all".to_string()),
            spf_all: Some("-all".to_string()),
            spf_dns_queries: Some(0),
            spf_too_many_dns_queries: Some(false),
            dmarc_record: Some("v=DMARC1; p=reject".to_string()),
            dmarc_p: Some("reject".to_string()),
            mx_records: Some(vec!["10 aspmx.l.google.com".to_string()]),
            mail_provider: Some("Google Workspace".to_string()),
            spoofing_code: Some(8),
            spoofing_possible: Some(false),
            spoofing_type: Some("Spoofing is not possible for example.com.".to_string()),
            ..AssessmentResult::default()
        };
        let block = render_block(&result);
        for expected in [
            "Domain: example.com",
            "Is subdomain: false",
            "DNS Server: 1.1.1.1 (public)",
            "SPF record: v=spf1 -all",
            "SPF all record: -all",
            "SPF DNS lookup count: 0",
            "Found DMARC policy: reject",
            "No DMARC pct found.",
            "No DMARC aggregate report location found.",
            "MX records: 10 aspmx.l.google.com",
            "Email provider: Google Workspace",
            "Spoofing is not possible for example.com.",
        ] {
            assert!(block.contains(expected), "missing {expected:?} in {block}");
        }
    }

    #[test]
    fn test_render_error_block() {
        let result = AssessmentResult {
            domain: "bad domain".to_string(),
            error: Some("invalid domain".to_string()),
            ..AssessmentResult::default()
        };
        let block = render_block(&result);
        assert!(block.contains("Error: invalid domain"));
        assert!(!block.contains("SPF"));
    }

    #[test]
    fn test_render_budget_warning() {
        let result = AssessmentResult {
            domain: "example.com".to_string(),
            spf_record: Some("v=spf1 ~all".to_string()),
            spf_all: Some("~all".to_string()),
            spf_dns_queries: Some(12),
            spf_too_many_dns_queries: Some(true),
            ..AssessmentResult::default()
        };
        assert!(render_block(&result).contains("Too many SPF DNS lookups: 12."));
    }
}
