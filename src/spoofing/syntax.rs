//! Minimal structural grammars for SPF and DMARC records.
//!
//! Only consulted when the decision table cannot be applied. This is a sanity
//! check on the shape of a record, not an RFC validator.

use std::sync::LazyLock;

use regex::Regex;

const SPF_TERM_PATTERN: &str = r"(?xi)^(?:
    [+\-~?]?(?:
        all
      | include:\S+
      | exists:\S+
      | ptr(?::\S+)?
      | (?:a|mx)(?::[^/\s]+)?(?:/\d{1,2})?(?://\d{1,3})?
      | ip4:\d{1,3}(?:\.\d{1,3}){3}(?:/\d{1,2})?
      | ip6:[0-9a-f:.]+(?:/\d{1,3})?
    )
  | (?:redirect|exp)=\S+
)$";
const DMARC_POLICY_PATTERN: &str = r"(?i)^(?:none|quarantine|reject)$";
const DMARC_ALIGNMENT_PATTERN: &str = r"(?i)^[rs]$";
const DMARC_PCT_PATTERN: &str = r"^(?:100|[1-9]?\d)$";
const DMARC_REPORT_URI_PATTERN: &str = r"(?i)^(?:mailto:)?[^\s,@]+@[^\s,@!]+(?:![0-9]+[kmgt]?)?$";
const DMARC_RF_PATTERN: &str = r"(?i)^(?:afrf|iodef)(?::(?:afrf|iodef))*$";
const DMARC_FO_PATTERN: &str = r"(?i)^[01ds](?::[01ds])*$";
const DMARC_RI_PATTERN: &str = r"^\d{1,10}$";
const DMARC_TAG_NAME_PATTERN: &str = r"^[a-z][a-z0-9]*$";

/// Compiles one of the constant patterns above; failure is a programming error.
fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

static SPF_TERM: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(SPF_TERM_PATTERN, "SPF_TERM"));
static DMARC_POLICY: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(DMARC_POLICY_PATTERN, "DMARC_POLICY"));
static DMARC_ALIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(DMARC_ALIGNMENT_PATTERN, "DMARC_ALIGNMENT"));
static DMARC_PCT: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(DMARC_PCT_PATTERN, "DMARC_PCT"));
static DMARC_REPORT_URI: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(DMARC_REPORT_URI_PATTERN, "DMARC_REPORT_URI"));
static DMARC_RF: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(DMARC_RF_PATTERN, "DMARC_RF"));
static DMARC_FO: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(DMARC_FO_PATTERN, "DMARC_FO"));
static DMARC_RI: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(DMARC_RI_PATTERN, "DMARC_RI"));
static DMARC_TAG_NAME: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(DMARC_TAG_NAME_PATTERN, "DMARC_TAG_NAME"));

/// `v=spf1` followed only by known mechanisms and modifiers.
pub fn is_valid_spf(record: &str) -> bool {
    let mut terms = record.split_whitespace();
    match terms.next() {
        Some(version) if version.eq_ignore_ascii_case("v=spf1") => {}
        _ => return false,
    }
    terms.all(|term| SPF_TERM.is_match(term))
}

fn valid_report_uris(value: &str) -> bool {
    value
        .split(',')
        .all(|uri| DMARC_REPORT_URI.is_match(uri.trim()))
}

/// `v=DMARC1` first, a `p=` tag, and well-formed values for every known tag.
pub fn is_valid_dmarc(record: &str) -> bool {
    let mut tags = record
        .split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty());

    match tags.next().and_then(|first| first.split_once('=')) {
        Some((v, version)) if v.trim() == "v" && version.trim() == "DMARC1" => {}
        _ => return false,
    }

    let mut has_policy = false;
    for pair in tags {
        let Some((tag, value)) = pair.split_once('=') else {
            return false;
        };
        let tag = tag.trim().to_ascii_lowercase();
        let value = value.trim();
        let valid = match tag.as_str() {
            "p" => {
                has_policy = true;
                DMARC_POLICY.is_match(value)
            }
            "sp" => DMARC_POLICY.is_match(value),
            "aspf" | "adkim" => DMARC_ALIGNMENT.is_match(value),
            "pct" => DMARC_PCT.is_match(value),
            "rua" | "ruf" => valid_report_uris(value),
            "rf" => DMARC_RF.is_match(value),
            "fo" => DMARC_FO.is_match(value),
            "ri" => DMARC_RI.is_match(value),
            // unknown tags are allowed as long as they look like tags
            _ => DMARC_TAG_NAME.is_match(&tag),
        };
        if !valid {
            return false;
        }
    }
    has_policy
}
