//! Error type definitions.
//!
//! This module defines all error, warning, and info types used throughout the application.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// Failure of a single DNS query.
///
/// Resolvers above the DNS layer treat every variant the same way (record absent);
/// the distinction only feeds logging.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsError {
    /// NXDOMAIN or an empty answer section.
    #[error("no records found")]
    NoRecords,

    /// The query did not complete within the resolver timeout.
    #[error("query timed out")]
    Timeout,

    /// Any other resolver failure (SERVFAIL, refused, malformed response, ...).
    #[error("DNS error: {0}")]
    Other(String),
}

/// Raised when a branch of the spoofability decision table reads a DMARC policy
/// it has no row for.
///
/// Never escapes the classifier: it is logged and routed to the syntax-validation
/// fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    /// A DMARC tag carried a value the decision table has no row for.
    #[error("unrecognized DMARC {tag} value '{value}'")]
    UnrecognizedValue {
        /// Tag name (`p` or `sp`)
        tag: &'static str,
        /// Raw value as published
        value: String,
    },
}

/// Errors that prevent a domain from being assessed at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    /// The input line is not a usable domain name.
    #[error("invalid domain '{domain}': {reason}")]
    InvalidDomain {
        /// Input as given
        domain: String,
        /// Why it was rejected
        reason: String,
    },

    /// The assessment task panicked or was cancelled before completing.
    #[error("assessment of '{0}' did not complete: {1}")]
    Aborted(String, String),
}

/// Types of errors that can occur during a batch run.
///
/// These are failures that prevent a domain from getting a normal verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// Input line rejected before any DNS query
    InvalidDomain,
    /// Assessment task panicked or was cancelled
    AssessmentAborted,
    /// Decision table raised and the syntax fallback produced the verdict
    ClassificationFallback,
}

/// Types of warnings that can occur during a batch run.
///
/// Warnings describe weak or missing configuration; they are valid input states,
/// not processing failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
#[allow(clippy::enum_variant_names)]
pub enum WarningType {
    MissingSpfRecord,
    MissingDmarcRecord,
    SpfLookupBudgetExceeded,
    MultipleAllMechanisms,
}

/// Types of informational metrics collected during a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// DMARC taken from the organizational domain
    OrganizationalDmarcFallback,
    /// Records served by the domain's own (SOA) nameserver
    AuthoritativeNameserver,
    /// Records served by one of the public resolvers
    PublicResolver,
    /// BIMI record present
    BimiRecord,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::InvalidDomain => "Invalid domain",
            ErrorType::AssessmentAborted => "Assessment aborted",
            ErrorType::ClassificationFallback => "Classification fell back to syntax validation",
        }
    }
}

impl WarningType {
    /// Returns a human-readable string representation of the warning type.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::MissingSpfRecord => "Missing SPF record",
            WarningType::MissingDmarcRecord => "Missing DMARC record",
            WarningType::SpfLookupBudgetExceeded => "Too many SPF DNS lookups",
            WarningType::MultipleAllMechanisms => "Multiple SPF all mechanisms",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::OrganizationalDmarcFallback => "Organizational DMARC fallback",
            InfoType::AuthoritativeNameserver => "Authoritative nameserver used",
            InfoType::PublicResolver => "Public resolver used",
            InfoType::BimiRecord => "BIMI record found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_type_has_a_label() {
        for error_type in ErrorType::iter() {
            assert!(!error_type.as_str().is_empty());
        }
        for warning_type in WarningType::iter() {
            assert!(!warning_type.as_str().is_empty());
        }
        for info_type in InfoType::iter() {
            assert!(!info_type.as_str().is_empty());
        }
    }

    #[test]
    fn test_error_type_display_matches_as_str() {
        assert_eq!(
            ErrorType::InvalidDomain.to_string(),
            ErrorType::InvalidDomain.as_str()
        );
    }

    #[test]
    fn test_classification_error_messages() {
        let err = ClassificationError::UnrecognizedValue {
            tag: "p",
            value: "quarentine".into(),
        };
        assert_eq!(err.to_string(), "unrecognized DMARC p value 'quarentine'");
    }

    #[test]
    fn test_invalid_domain_message() {
        let err = AssessmentError::InvalidDomain {
            domain: "bad domain".into(),
            reason: "contains whitespace".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid domain 'bad domain': contains whitespace"
        );
    }
}
