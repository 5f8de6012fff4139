//! SPF record resolution.
//!
//! Fetches a domain's SPF record, works out the qualifier of its `all` mechanism,
//! and tallies the DNS-lookup cost of the whole include/redirect chain against the
//! RFC 7208 limit of ten.

mod lookup;
mod parse;
mod record;

// Re-export public API
pub use lookup::{fetch_spf_record, SpfResolver};
pub use parse::{lookup_terms, parse_all_qualifier, redirect_target, select_spf_record, LookupTerm};
pub use record::{AllQualifier, MechanismKind, SpfRecord};
