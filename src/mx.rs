//! MX lookup and mail provider detection.
//!
//! Informational like BIMI: the exchangers are reported next to the verdict and
//! never change it.

use strum_macros::Display;

use crate::dns::{DnsClient, RecordKind};

/// Hosted mail platforms recognized from exchanger names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MailProvider {
    #[strum(serialize = "Microsoft Exchange Online")]
    ExchangeOnline,
    #[strum(serialize = "Google Workspace")]
    GoogleWorkspace,
    #[strum(serialize = "ProtonMail")]
    ProtonMail,
    #[strum(serialize = "Mailgun")]
    Mailgun,
    #[strum(serialize = "SendGrid")]
    SendGrid,
    #[strum(serialize = "Proofpoint")]
    Proofpoint,
    #[strum(serialize = "Custom/Unknown")]
    Unknown,
}

/// Exchanger host suffixes, checked in order.
const PROVIDER_SUFFIXES: &[(&str, MailProvider)] = &[
    ("outlook.com", MailProvider::ExchangeOnline),
    ("google.com", MailProvider::GoogleWorkspace),
    ("googlemail.com", MailProvider::GoogleWorkspace),
    ("protonmail.ch", MailProvider::ProtonMail),
    ("mailgun.org", MailProvider::Mailgun),
    ("sendgrid.net", MailProvider::SendGrid),
    ("ppe-hosted.com", MailProvider::Proofpoint),
];

/// One `MX` answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailExchanger {
    pub preference: u16,
    pub host: String,
}

impl MailExchanger {
    /// Parses the `"<preference> <host>"` form the DNS client renders.
    fn parse(answer: &str) -> Option<Self> {
        let (preference, host) = answer.trim().split_once(char::is_whitespace)?;
        let host = host.trim().trim_end_matches('.').to_lowercase();
        if host.is_empty() {
            return None;
        }
        Some(Self {
            preference: preference.parse().ok()?,
            host,
        })
    }
}

/// Mail exchangers of a domain, most preferred first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MxRecords {
    pub exchangers: Vec<MailExchanger>,
    pub provider: Option<MailProvider>,
}

impl MxRecords {
    /// Exchangers in `"<preference> <host>"` form.
    pub fn rendered(&self) -> Vec<String> {
        self.exchangers
            .iter()
            .map(|mx| format!("{} {}", mx.preference, mx.host))
            .collect()
    }
}

fn host_matches(host: &str, suffix: &str) -> bool {
    host == suffix || host.ends_with(&format!(".{suffix}"))
}

/// Provider behind a set of exchangers; `None` without exchangers.
pub fn detect_provider(exchangers: &[MailExchanger]) -> Option<MailProvider> {
    if exchangers.is_empty() {
        return None;
    }
    let provider = PROVIDER_SUFFIXES
        .iter()
        .find(|(suffix, _)| exchangers.iter().any(|mx| host_matches(&mx.host, suffix)))
        .map_or(MailProvider::Unknown, |(_, provider)| *provider);
    Some(provider)
}

/// Parses raw `MX` answers; unparseable answers are dropped.
pub fn parse_mx_records(answers: &[String]) -> MxRecords {
    let mut exchangers: Vec<MailExchanger> =
        answers.iter().filter_map(|a| MailExchanger::parse(a)).collect();
    exchangers.sort_by(|a, b| a.preference.cmp(&b.preference).then_with(|| a.host.cmp(&b.host)));
    let provider = detect_provider(&exchangers);
    MxRecords {
        exchangers,
        provider,
    }
}

/// Looks up the mail exchangers of `domain`.
pub async fn resolve_mx<C: DnsClient>(client: &C, domain: &str) -> MxRecords {
    match client.lookup(domain, RecordKind::Mx).await {
        Ok(answers) => parse_mx_records(&answers),
        Err(e) => {
            log::debug!("No MX records for {domain}: {e}");
            MxRecords::default()
        }
    }
}
