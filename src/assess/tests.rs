// DomainAssessor tests.

use super::*;
use crate::dns::{MockDnsClient, RecordKind};
use crate::initialization::init_extractor;

fn assessor(dns: &MockDnsClient, discovery: bool) -> DomainAssessor<MockDnsClient> {
    DomainAssessor::new(
        dns.clone(),
        init_extractor(),
        discovery,
        Arc::new(ProcessingStats::new()),
    )
}

#[tokio::test]
async fn test_assess_fully_configured_domain() {
    let dns = MockDnsClient::new();
    dns.add_txt("example.com", "v=spf1 include:_spf.example.net -all");
    dns.add_txt("_spf.example.net", "v=spf1 ip4:192.0.2.0/24 -all");
    dns.add_txt(
        "_dmarc.example.com",
        "v=DMARC1; p=quarantine; aspf=s; sp=reject; pct=100; rua=mailto:d@example.com",
    );

    let result = assessor(&dns, false).assess("Example.com.").await;

    assert_eq!(result.domain, "example.com");
    assert_eq!(result.domain_type.as_deref(), Some("domain"));
    assert_eq!(result.dns_server.as_deref(), Some("system resolver"));
    assert_eq!(result.spf_all.as_deref(), Some("-all"));
    assert_eq!(result.spf_dns_queries, Some(1));
    assert_eq!(result.spf_too_many_dns_queries, Some(false));
    assert_eq!(result.dmarc_p.as_deref(), Some("quarantine"));
    assert_eq!(result.dmarc_aspf.as_deref(), Some("s"));
    assert_eq!(result.dmarc_sp.as_deref(), Some("reject"));
    assert_eq!(result.dmarc_pct, Some(100));
    assert_eq!(result.dmarc_aggregate_report.as_deref(), Some("mailto:d@example.com"));
    assert_eq!(result.dmarc_from_organizational_domain, Some(false));
    assert_eq!(result.spoofing_code, Some(8));
    assert_eq!(result.spoofing_possible, Some(false));
    assert_eq!(
        result.spoofing_type.as_deref(),
        Some("Spoofing is not possible for example.com.")
    );
    assert!(!result.classification_fallback);
    assert!(!result.is_error());
}

#[tokio::test]
async fn test_assess_domain_without_records() {
    let dns = MockDnsClient::new();
    let assessor = assessor(&dns, false);

    let result = assessor.assess("example.com").await;

    assert_eq!(result.spoofing_code, Some(0));
    assert_eq!(result.spoofing_possible, Some(true));
    assert_eq!(result.spf_record, None);
    assert_eq!(result.spf_dns_queries, None);
    assert_eq!(result.dmarc_record, None);
    let stats = assessor.stats();
    assert_eq!(stats.get_warning_count(WarningType::MissingSpfRecord), 1);
    assert_eq!(stats.get_warning_count(WarningType::MissingDmarcRecord), 1);
}

#[tokio::test]
async fn test_assess_invalid_domain() {
    let dns = MockDnsClient::new();
    let assessor = assessor(&dns, true);

    let result = assessor.assess("not a domain").await;

    assert!(result.is_error());
    assert_eq!(result.domain, "not a domain");
    assert_eq!(result.spoofing_code, None);
    assert_eq!(assessor.stats().get_error_count(ErrorType::InvalidDomain), 1);
    assert_eq!(dns.query_count(), 0);
}

#[tokio::test]
async fn test_assess_subdomain_uses_organizational_dmarc() {
    let dns = MockDnsClient::new();
    dns.add_txt("mail.example.com", "v=spf1 ~all");
    dns.add_txt("_dmarc.example.com", "v=DMARC1; p=reject; sp=none");
    let assessor = assessor(&dns, false);

    let result = assessor.assess("mail.example.com").await;

    assert_eq!(result.domain_type.as_deref(), Some("subdomain"));
    assert_eq!(result.dmarc_from_organizational_domain, Some(true));
    assert_eq!(result.spoofing_code, Some(1));
    assert_eq!(
        assessor
            .stats()
            .get_info_count(InfoType::OrganizationalDmarcFallback),
        1
    );
}

#[tokio::test]
async fn test_assess_partial_pct() {
    let dns = MockDnsClient::new();
    dns.add_txt("example.com", "v=spf1 ~all");
    dns.add_txt("_dmarc.example.com", "v=DMARC1; p=none; sp=quarantine; pct=90");

    let result = assessor(&dns, false).assess("example.com").await;

    assert_eq!(result.spoofing_code, Some(3));
    assert_eq!(result.spoofing_possible, None);
    let json = serde_json::to_value(&result).unwrap();
    assert!(json["spoofing_possible"].is_null());
    assert_eq!(json["spoofing_code"], 3);
}

#[tokio::test]
async fn test_assess_reports_fallback() {
    let dns = MockDnsClient::new();
    dns.add_txt("example.com", "v=spf1 -all");
    dns.add_txt("_dmarc.example.com", "v=DMARC1; p=quarentine");
    let assessor = assessor(&dns, false);

    let result = assessor.assess("example.com").await;

    assert!(result.classification_fallback);
    assert_eq!(result.dmarc_p.as_deref(), Some("quarentine"));
    // SPF parses, DMARC does not
    assert_eq!(result.spoofing_code, Some(3));
    assert_eq!(
        assessor.stats().get_error_count(ErrorType::ClassificationFallback),
        1
    );
}

#[tokio::test]
async fn test_assess_with_authoritative_nameserver() {
    let dns = MockDnsClient::new();
    let ns: std::net::IpAddr = "192.0.2.53".parse().unwrap();
    dns.add("example.com", RecordKind::Soa, &["ns1.example.com"]);
    dns.add("ns1.example.com", RecordKind::A, &["192.0.2.53"]);
    dns.add_at(ns, "example.com", RecordKind::Txt, &["v=spf1 -all"]);
    dns.add_at(ns, "_dmarc.example.com", RecordKind::Txt, &["v=DMARC1; p=reject"]);
    let assessor = assessor(&dns, true);

    let result = assessor.assess("example.com").await;

    assert_eq!(result.dns_server.as_deref(), Some("192.0.2.53 (authoritative)"));
    assert_eq!(result.spf_record.as_deref(), Some("v=spf1 -all"));
    assert_eq!(result.dmarc_p.as_deref(), Some("reject"));
    assert_eq!(
        assessor.stats().get_info_count(InfoType::AuthoritativeNameserver),
        1
    );
}

#[tokio::test]
async fn test_authoritative_nameserver_still_counts_nested_lookups() {
    let dns = MockDnsClient::new();
    let ns: std::net::IpAddr = "192.0.2.53".parse().unwrap();
    dns.isolate(ns);
    dns.add("example.com", RecordKind::Soa, &["ns1.example.com"]);
    dns.add("ns1.example.com", RecordKind::A, &["192.0.2.53"]);
    dns.add_at(
        ns,
        "example.com",
        RecordKind::Txt,
        &["v=spf1 include:_spf.google.example -all"],
    );
    dns.add_at(ns, "_dmarc.example.com", RecordKind::Txt, &["v=DMARC1; p=reject"]);
    dns.add_txt(
        "_spf.google.example",
        "v=spf1 include:_nb1.google.example include:_nb2.google.example include:_nb3.google.example ~all",
    );
    dns.add_txt("_nb1.google.example", "v=spf1 ip4:192.0.2.0/24 -all");
    dns.add_txt("_nb2.google.example", "v=spf1 a -all");
    dns.add_txt("_nb3.google.example", "v=spf1 mx ptr -all");

    let result = assessor(&dns, true).assess("example.com").await;

    assert_eq!(result.dns_server.as_deref(), Some("192.0.2.53 (authoritative)"));
    assert_eq!(result.spf_all.as_deref(), Some("-all"));
    assert_eq!(result.spf_dns_queries, Some(7));
    assert_eq!(result.spf_too_many_dns_queries, Some(false));
}

#[tokio::test]
async fn test_assess_with_public_resolver() {
    let dns = MockDnsClient::new();
    dns.add_txt("example.com", "v=spf1 -all");
    dns.add_txt("_dmarc.example.com", "v=DMARC1; p=reject");
    let assessor = assessor(&dns, true);

    let result = assessor.assess("example.com").await;

    assert_eq!(result.dns_server.as_deref(), Some("1.1.1.1 (public)"));
    assert_eq!(assessor.stats().get_info_count(InfoType::PublicResolver), 1);
}

#[tokio::test]
async fn test_assess_reports_bimi() {
    let dns = MockDnsClient::new();
    dns.add_txt(
        "default._bimi.example.com",
        "v=BIMI1; l=https://example.com/logo.svg",
    );

    let result = assessor(&dns, false).assess("example.com").await;

    assert_eq!(result.bimi_version.as_deref(), Some("BIMI1"));
    assert_eq!(
        result.bimi_location.as_deref(),
        Some("https://example.com/logo.svg")
    );
    assert_eq!(result.bimi_authority, None);
}

#[tokio::test]
async fn test_assess_reports_mail_exchangers() {
    let dns = MockDnsClient::new();
    dns.add(
        "example.com",
        RecordKind::Mx,
        &["10 example-com.mail.protection.outlook.com.", "5 backup.example.com."],
    );

    let result = assessor(&dns, false).assess("example.com").await;

    assert_eq!(
        result.mx_records,
        Some(vec![
            "5 backup.example.com".to_string(),
            "10 example-com.mail.protection.outlook.com".to_string(),
        ])
    );
    assert_eq!(result.mail_provider.as_deref(), Some("Microsoft Exchange Online"));
    // informational only
    assert_eq!(result.spoofing_code, Some(0));
}

#[test]
fn test_failed_result_carries_error() {
    let error = AssessmentError::Aborted("example.com".to_string(), "panicked".to_string());
    let result = AssessmentResult::failed("example.com", &error);
    assert!(result.is_error());
    assert_eq!(
        result.error.as_deref(),
        Some("assessment of 'example.com' did not complete: panicked")
    );
    assert_eq!(result.spoofing_code, None);
}
