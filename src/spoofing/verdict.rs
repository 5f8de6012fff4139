//! The nine spoofability verdicts.

use strum_macros::EnumIter;

/// Closed set of classification outcomes, numbered 0 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[repr(u8)]
pub enum VerdictCode {
    SpoofingPossible = 0,
    SubdomainSpoofingPossible = 1,
    OrganizationalSpoofingPossible = 2,
    SpoofingMightBePossible = 3,
    MailboxDependent = 4,
    OrganizationalMightBePossible = 5,
    SubdomainMightBePossibleMailboxDependent = 6,
    SubdomainPossibleOrganizationalMaybe = 7,
    SpoofingNotPossible = 8,
}

impl VerdictCode {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// `Some(true)` when spoofing is achievable, `Some(false)` only when it is not
    /// possible, `None` when it depends on something the records cannot tell.
    pub fn spoofing_possible(self) -> Option<bool> {
        use VerdictCode::*;
        match self {
            SpoofingPossible
            | SubdomainSpoofingPossible
            | OrganizationalSpoofingPossible
            | SubdomainPossibleOrganizationalMaybe => Some(true),
            SpoofingNotPossible => Some(false),
            SpoofingMightBePossible
            | MailboxDependent
            | OrganizationalMightBePossible
            | SubdomainMightBePossibleMailboxDependent => None,
        }
    }

    pub fn message(self, domain: &str) -> String {
        use VerdictCode::*;
        match self {
            SpoofingPossible => format!("Spoofing possible for {domain}."),
            SubdomainSpoofingPossible => format!("Subdomain spoofing possible for {domain}."),
            OrganizationalSpoofingPossible => {
                format!("Organizational domain spoofing possible for {domain}.")
            }
            SpoofingMightBePossible => format!("Spoofing might be possible for {domain}."),
            MailboxDependent => {
                format!("Spoofing might be possible (Mailbox dependent) for {domain}.")
            }
            OrganizationalMightBePossible => {
                format!("Organizational domain spoofing might be possible for {domain}.")
            }
            SubdomainMightBePossibleMailboxDependent => {
                format!("Subdomain spoofing might be possible (Mailbox dependent) for {domain}.")
            }
            SubdomainPossibleOrganizationalMaybe => format!(
                "Subdomain spoofing is possible and organizational domain spoofing might be possible for {domain}."
            ),
            SpoofingNotPossible => format!("Spoofing is not possible for {domain}."),
        }
    }
}

/// Result of classifying one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub code: VerdictCode,
    pub spoofing_possible: Option<bool>,
    pub message: String,
    /// The decision table could not be applied and the syntax-validation
    /// fallback produced this verdict
    pub fallback: bool,
}

impl Verdict {
    pub fn new(code: VerdictCode, domain: &str, fallback: bool) -> Self {
        Self {
            code,
            spoofing_possible: code.spoofing_possible(),
            message: code.message(domain),
            fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_codes_are_zero_to_eight() {
        let codes: Vec<u8> = VerdictCode::iter().map(VerdictCode::code).collect();
        assert_eq!(codes, (0..=8).collect::<Vec<u8>>());
    }

    #[test]
    fn test_spoofing_possible_tri_state() {
        for code in VerdictCode::iter() {
            let expected = match code.code() {
                0 | 1 | 2 | 7 => Some(true),
                8 => Some(false),
                _ => None,
            };
            assert_eq!(code.spoofing_possible(), expected, "{code:?}");
        }
    }

    #[test]
    fn test_messages_name_the_domain() {
        for code in VerdictCode::iter() {
            assert!(code.message("example.com").contains("example.com"));
        }
        assert_eq!(
            VerdictCode::SpoofingNotPossible.message("example.com"),
            "Spoofing is not possible for example.com."
        );
    }
}
