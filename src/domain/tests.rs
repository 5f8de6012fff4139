// Domain module tests.

use super::*;
use tldextract::TldOption;

fn test_extractor() -> TldExtractor {
    TldExtractor::new(TldOption::default())
}

#[test]
fn test_normalize_plain_domain() {
    assert_eq!(normalize_domain("example.com").unwrap(), "example.com");
}

#[test]
fn test_normalize_trims_and_lowercases() {
    assert_eq!(normalize_domain("  Example.COM \n").unwrap(), "example.com");
}

#[test]
fn test_normalize_strips_scheme_and_path() {
    assert_eq!(
        normalize_domain("https://www.example.com/path?x=1").unwrap(),
        "www.example.com"
    );
    assert_eq!(normalize_domain("HTTP://example.com").unwrap(), "example.com");
}

#[test]
fn test_normalize_strips_trailing_dot() {
    assert_eq!(normalize_domain("example.com.").unwrap(), "example.com");
}

#[test]
fn test_normalize_rejects_empty() {
    assert!(normalize_domain("   ").is_err());
    assert!(normalize_domain("https://").is_err());
}

#[test]
fn test_normalize_rejects_whitespace_inside() {
    let err = normalize_domain("exa mple.com").unwrap_err();
    assert!(err.to_string().contains("whitespace"));
}

#[test]
fn test_normalize_rejects_invalid_characters() {
    let err = normalize_domain("exa$mple.com").unwrap_err();
    assert!(err.to_string().contains("invalid character '$'"));
}

#[test]
fn test_normalize_rejects_empty_label() {
    assert!(normalize_domain("example..com").is_err());
    assert!(normalize_domain(".example.com").is_err());
}

#[test]
fn test_normalize_rejects_overlong_name() {
    let long = format!("{}.com", "a".repeat(MAX_DOMAIN_LENGTH));
    let err = normalize_domain(&long).unwrap_err();
    assert!(err.to_string().contains("253"));
}

#[test]
fn test_normalize_allows_underscore_labels() {
    assert_eq!(
        normalize_domain("_dmarc.example.com").unwrap(),
        "_dmarc.example.com"
    );
}

#[test]
fn test_context_for_registered_domain() {
    let ctx = DomainContext::new(&test_extractor(), "example.com").unwrap();
    assert!(!ctx.is_subdomain);
    assert_eq!(ctx.organizational_domain, "example.com");
    assert_eq!(ctx.domain_type(), "domain");
}

#[test]
fn test_context_for_subdomain() {
    let ctx = DomainContext::new(&test_extractor(), "mail.example.com").unwrap();
    assert!(ctx.is_subdomain);
    assert_eq!(ctx.domain, "mail.example.com");
    assert_eq!(ctx.organizational_domain, "example.com");
    assert_eq!(ctx.domain_type(), "subdomain");
}

#[test]
fn test_context_multi_part_suffix() {
    let ctx = DomainContext::new(&test_extractor(), "a.b.example.co.uk").unwrap();
    assert!(ctx.is_subdomain);
    assert_eq!(ctx.organizational_domain, "example.co.uk");

    let ctx = DomainContext::new(&test_extractor(), "example.co.uk").unwrap();
    assert!(!ctx.is_subdomain);
}
