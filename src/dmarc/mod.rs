//! DMARC record resolution.
//!
//! Fetches the record at `_dmarc.<domain>`, falls back to the organizational
//! domain for subdomains, and extracts the tags the classifier needs.

mod lookup;
mod record;

// Re-export public API
pub use lookup::{fetch_dmarc_record, select_dmarc_record, DmarcResolver};
pub use record::{parse_fields, Alignment, DmarcRecord, Policy, TagValue};
