//! Domain normalization and public-suffix-aware context.
//!
//! This module turns an input line into a normalized domain name and uses the
//! Public Suffix List (via `tldextract`) to decide whether it is a subdomain and
//! what its organizational domain is.
//!
//! Key functions:
//! - `normalize_domain()` - Cleans up user input (scheme, path, trailing dot, case)
//! - `DomainContext::new()` - Builds the immutable per-assessment context

use tldextract::TldExtractor;

use crate::config::MAX_DOMAIN_LENGTH;
use crate::error_handling::AssessmentError;

/// What the assessment knows about the domain before any DNS query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainContext {
    /// Normalized domain being assessed
    pub domain: String,
    /// True when the domain has a non-empty label below its registered domain
    pub is_subdomain: bool,
    /// Registered domain (`example.co.uk` for `mail.example.co.uk`); equals
    /// `domain` when it is not a subdomain
    pub organizational_domain: String,
}

impl DomainContext {
    /// Builds the context for an already normalized domain.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::InvalidDomain` when the Public Suffix List finds no
    /// registrable label (a bare suffix such as `co.uk`, or an unknown TLD).
    pub fn new(extractor: &TldExtractor, domain: &str) -> Result<Self, AssessmentError> {
        let invalid = |reason: &str| AssessmentError::InvalidDomain {
            domain: domain.to_string(),
            reason: reason.to_string(),
        };

        // tldextract expects a URL-shaped input
        let parts = extractor
            .extract(&format!("https://{domain}"))
            .map_err(|e| invalid(&format!("public suffix lookup failed: {e}")))?;

        let organizational_domain = match (parts.domain, parts.suffix) {
            (Some(label), Some(suffix)) if !label.is_empty() && !suffix.is_empty() => {
                format!("{label}.{suffix}")
            }
            _ => return Err(invalid("no registrable domain under a known public suffix")),
        };
        let is_subdomain = parts.subdomain.is_some_and(|s| !s.is_empty());

        Ok(Self {
            domain: domain.to_string(),
            is_subdomain,
            organizational_domain,
        })
    }

    /// `"subdomain"` or `"domain"`, as shown in results.
    pub fn domain_type(&self) -> &'static str {
        if self.is_subdomain {
            "subdomain"
        } else {
            "domain"
        }
    }
}

/// Normalizes one input line into a bare lowercase domain name.
///
/// Strips surrounding whitespace, an `http://`/`https://` scheme, anything from the
/// first `/` on, and a trailing dot.
///
/// # Errors
///
/// Returns `AssessmentError::InvalidDomain` for empty input, embedded whitespace,
/// characters outside letters/digits/`-`/`.`/`_`, empty labels, or names longer than
/// 253 characters.
pub fn normalize_domain(input: &str) -> Result<String, AssessmentError> {
    let invalid = |reason: &str| AssessmentError::InvalidDomain {
        domain: input.to_string(),
        reason: reason.to_string(),
    };

    let mut host = input.trim();
    for scheme in ["https://", "http://"] {
        if let Some(prefix) = host.get(..scheme.len()) {
            if prefix.eq_ignore_ascii_case(scheme) {
                host = &host[scheme.len()..];
                break;
            }
        }
    }
    if let Some((before_path, _)) = host.split_once('/') {
        host = before_path;
    }
    let host = host.strip_suffix('.').unwrap_or(host).to_ascii_lowercase();

    if host.is_empty() {
        return Err(invalid("empty domain"));
    }
    if host.chars().any(char::is_whitespace) {
        return Err(invalid("contains whitespace"));
    }
    if host.len() > MAX_DOMAIN_LENGTH {
        return Err(invalid("longer than 253 characters"));
    }
    if let Some(c) = host
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_')))
    {
        return Err(invalid(&format!("invalid character '{c}'")));
    }
    if host.split('.').any(str::is_empty) {
        return Err(invalid("empty label"));
    }

    Ok(host)
}
