//! spoofcheck library: SPF and DMARC spoofability assessment
//!
//! This library looks up a domain's SPF and DMARC records, walks the SPF
//! include/redirect chain to count DNS-consuming mechanisms, and classifies how
//! easily mail from that domain can be spoofed.
//!
//! # Example
//!
//! ```no_run
//! use spoofcheck::{run_assessment, Config, DomainSource};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     source: DomainSource::List(PathBuf::from("domains.txt")),
//!     workers: 8,
//!     ..Default::default()
//! };
//!
//! let report = run_assessment(config).await?;
//! println!("Assessed {} domains: {} succeeded, {} failed",
//!          report.total, report.succeeded, report.failed);
//! # Ok(())
//! # }
//! ```
//!
//! Individual pieces can be used on their own:
//!
//! ```no_run
//! use spoofcheck::dmarc::parse_fields;
//! use spoofcheck::spf::SpfRecord;
//! use spoofcheck::spoofing::decide;
//!
//! let dmarc = parse_fields("v=DMARC1; p=reject");
//! let code = decide(&SpfRecord::absent(), &dmarc).unwrap();
//! assert_eq!(code.code(), 8);
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod assess;
pub mod bimi;
pub mod config;
pub mod dmarc;
pub mod dns;
pub mod domain;
pub mod error_handling;
pub mod initialization;
pub mod mx;
pub mod output;
mod run;
pub mod spf;
pub mod spoofing;

// Re-export public API
pub use app::{domain_line, print_simple_summary, read_domains};
pub use assess::{AssessmentResult, DomainAssessor};
pub use config::{Config, DomainSource, LogFormat, LogLevel, Opt, OutputFormat};
pub use run::{run_assessment, run_batch, AssessmentReport, BatchOutcome};
