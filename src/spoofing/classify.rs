//! The spoofability decision table.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. `pct` present and not 100: spoofing might be possible (3)
//! 2. no SPF record: 0 without a DMARC policy, otherwise 8
//! 3. SPF lookup budget exceeded and no DMARC policy: 0
//! 4. several `all` mechanisms: 3 with `p=none`, otherwise 8
//! 5. an `all` qualifier but no DMARC policy: 0
//! 6. by qualifier: `-all`, `~all` and `?all` each have their own sub-table;
//!    `+all` or no qualifier at all is 0
//! 7. anything else: 8

use super::syntax::{is_valid_dmarc, is_valid_spf};
use super::verdict::{Verdict, VerdictCode};
use crate::dmarc::{Alignment, DmarcRecord, Policy, TagValue};
use crate::domain::DomainContext;
use crate::error_handling::ClassificationError;
use crate::spf::{AllQualifier, SpfRecord};

use TagValue::Known;
use VerdictCode::*;

/// Classifies a domain from its resolved SPF and DMARC records.
///
/// Never fails: when a branch of the table reads a `p` or `sp` value it has no row
/// for, the records are checked against minimal grammars instead and the verdict is
/// flagged as a fallback.
pub fn classify(ctx: &DomainContext, spf: &SpfRecord, dmarc: &DmarcRecord) -> Verdict {
    match decide(spf, dmarc) {
        Ok(code) => Verdict::new(code, &ctx.domain, false),
        Err(e) => {
            log::warn!(
                "{}: {}; classifying from record syntax instead",
                ctx.domain,
                e
            );
            Verdict::new(syntax_fallback(spf, dmarc), &ctx.domain, true)
        }
    }
}

/// Unwraps an optional policy tag, rejecting values the table has no row for.
fn known(
    tag: &'static str,
    value: Option<&TagValue<Policy>>,
) -> Result<Option<Policy>, ClassificationError> {
    match value {
        None => Ok(None),
        Some(TagValue::Known(v)) => Ok(Some(*v)),
        Some(TagValue::Unrecognized(raw)) => Err(ClassificationError::UnrecognizedValue {
            tag,
            value: raw.clone(),
        }),
    }
}

/// `aspf` as the sub-tables see it: absent, `r`, `s`, or any other published value.
type Aspf<'a> = Option<&'a TagValue<Alignment>>;

type SubTable = fn(Policy, Aspf<'_>, Option<Policy>) -> VerdictCode;

/// Evaluates the decision table.
///
/// Rules 1 to 3 only test whether tags are present, so an unusable literal never
/// masks them. An unrecognized `aspf` counts as set but neither relaxed nor strict.
///
/// # Errors
///
/// `UnrecognizedValue` when a branch that reads `p` or `sp` meets a literal outside
/// `none`, `quarantine` and `reject`.
pub fn decide(spf: &SpfRecord, dmarc: &DmarcRecord) -> Result<VerdictCode, ClassificationError> {
    if dmarc.pct.is_some_and(|pct| pct != 100) {
        return Ok(SpoofingMightBePossible);
    }

    let has_policy = dmarc.policy.is_some();
    if !spf.is_present() {
        return Ok(if has_policy {
            SpoofingNotPossible
        } else {
            SpoofingPossible
        });
    }
    if spf.lookup_budget_exceeded && !has_policy {
        return Ok(SpoofingPossible);
    }

    let table: SubTable = match spf.all_qualifier {
        Some(AllQualifier::Multiple) => {
            return Ok(match known("p", dmarc.policy.as_ref())? {
                Some(Policy::None) => SpoofingMightBePossible,
                _ => SpoofingNotPossible,
            });
        }
        None | Some(AllQualifier::Pass) => return Ok(SpoofingPossible),
        Some(AllQualifier::Fail) => hard_fail,
        Some(AllQualifier::SoftFail) => soft_fail,
        Some(AllQualifier::Neutral) => neutral,
    };
    let Some(p) = known("p", dmarc.policy.as_ref())? else {
        return Ok(SpoofingPossible);
    };
    let sp = known("sp", dmarc.subdomain_policy.as_ref())?;
    Ok(table(p, dmarc.aspf.as_ref(), sp))
}

fn hard_fail(p: Policy, aspf: Aspf<'_>, sp: Option<Policy>) -> VerdictCode {
    use Policy::{Quarantine, Reject};
    match (p, aspf, sp) {
        (_, _, Some(Policy::None)) => SubdomainSpoofingPossible,
        (Policy::None, Some(Known(Alignment::Relaxed)) | None, None) => MailboxDependent,
        (Policy::None, Some(Known(Alignment::Relaxed)), Some(Reject | Quarantine)) => {
            OrganizationalSpoofingPossible
        }
        (Policy::None, None, Some(Reject | Quarantine)) => OrganizationalMightBePossible,
        _ => SpoofingNotPossible,
    }
}

fn soft_fail(p: Policy, _aspf: Aspf<'_>, sp: Option<Policy>) -> VerdictCode {
    use Policy::{Quarantine, Reject};
    match (p, sp) {
        (Policy::None, Some(Reject | Quarantine)) => OrganizationalSpoofingPossible,
        (Policy::None, None) => SpoofingPossible,
        (Policy::None, Some(Policy::None)) => SubdomainPossibleOrganizationalMaybe,
        (Reject | Quarantine, Some(Policy::None)) => SubdomainSpoofingPossible,
        _ => SpoofingNotPossible,
    }
}

fn neutral(p: Policy, aspf: Aspf<'_>, sp: Option<Policy>) -> VerdictCode {
    use Policy::{Quarantine, Reject};
    match (p, aspf, sp) {
        (Reject | Quarantine, _, Some(Policy::None)) => SubdomainMightBePossibleMailboxDependent,
        (Policy::None, Some(Known(Alignment::Relaxed)), None) => SpoofingPossible,
        (Policy::None, _, Some(Policy::None)) => SubdomainPossibleOrganizationalMaybe,
        (Policy::None, Some(Known(Alignment::Strict)) | None, None) => {
            SubdomainMightBePossibleMailboxDependent
        }
        (Policy::None, Some(_), Some(Reject | Quarantine)) => OrganizationalMightBePossible,
        (Policy::None, None, Some(Reject)) => OrganizationalMightBePossible,
        _ => SpoofingNotPossible,
    }
}

/// Verdict from record shape alone. A missing record counts as malformed, and two
/// malformed records are assumed spoofable.
pub fn syntax_fallback(spf: &SpfRecord, dmarc: &DmarcRecord) -> VerdictCode {
    let spf_ok = spf.raw.as_deref().is_some_and(is_valid_spf);
    let dmarc_ok = dmarc.raw.as_deref().is_some_and(is_valid_dmarc);
    match (spf_ok, dmarc_ok) {
        (false, false) => SpoofingPossible,
        (true, false) => SpoofingMightBePossible,
        (false, true) => SpoofingNotPossible,
        (true, true) => SpoofingMightBePossible,
    }
}
