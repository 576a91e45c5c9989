//! Card-code extraction and title normalization.
//!
//! Listings from the two sources embed print codes differently: TCGplayer
//! titles often carry the code inline (`"Monkey.D.Luffy - OP06-054"`) while the
//! storefront keeps it in a separate field. These helpers pull codes out of
//! free text and reduce titles to a comparable form. Every function here is
//! total: missing or malformed input yields `None` or an empty string.

use regex::Regex;
use std::sync::LazyLock;

use crate::config;
use crate::models::TcgPlayerCard;

/// Known code families, tried in order. The last entry is the generic fallback.
static CODE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)OP\d{2}-\d{3}[A-Z]*",
        r"(?i)ST\d{2}-\d{3}[A-Z]*",
        r"(?i)EB\d{2}-\d{3}[A-Z]*",
        r"(?i)PRB\d{2}-\d{3}[A-Z]*",
        r"(?i)P-\d{3}[A-Z]*",
        r"(?i)[A-Z]{2,4}\d{1,2}-\d{3}[A-Z]*",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("card code pattern is valid"))
    .collect()
});

static VARIANT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)[-_]?[A-Z]{1,3}$").expect("suffix pattern is valid"));

static NUMBER_SET_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z0-9]+)-\d+").expect("set prefix pattern is valid"));

/// Find the first known card code in a display name, upper-cased.
///
/// Patterns are tried in declared order and the first hit wins, so
/// `"Luffy OP06-054 ST01-001"` yields `OP06-054`.
pub fn extract_code(name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    CODE_PATTERNS
        .iter()
        .find_map(|re| re.find(name))
        .map(|m| m.as_str().to_uppercase())
}

/// Reduce a display name to a lower-cased title with codes and brackets removed.
pub fn normalize_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let mut cleaned = name.to_string();
    for re in CODE_PATTERNS.iter() {
        cleaned = re.replace_all(&cleaned, "").into_owned();
    }

    cleaned
        .replace(['(', ')', '[', ']'], "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Strip a trailing variant suffix, leaving the base print code.
///
/// `OP06-054SR`, `OP06-054-SR` and `OP06-054_SR` all become `OP06-054`.
/// Codes that do not end in `<digit><1-3 uppercase letters>` are returned
/// unchanged, which makes the operation idempotent.
pub fn normalize_code(code: &str) -> String {
    if code.is_empty() {
        return String::new();
    }
    VARIANT_SUFFIX.replace(code, "$1").into_owned()
}

/// Leading set segment of a raw code (`"OP06-054"` -> `"OP06"`).
pub fn code_set_prefix(code: &str) -> &str {
    code.split('-').next().unwrap_or(code)
}

/// The print code of a TCGplayer listing.
///
/// Prefers the `Number` extended attribute and falls back to scanning the
/// display name.
pub fn tcg_card_code(card: &TcgPlayerCard) -> Option<String> {
    card.extended_value("Number")
        .map(str::to_string)
        .or_else(|| extract_code(&card.name))
}

/// Set code from a `Number` attribute value (`"OP06-054"` -> `"OP06"`).
pub fn set_code_from_number(value: &str) -> Option<String> {
    NUMBER_SET_PREFIX
        .captures(value)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Set code guessed from a set's display name, `"UNK"` when nothing matches.
pub fn set_code_from_set_name(set_name: &str) -> String {
    let lower = set_name.to_lowercase();
    config::SET_NAME_CODES
        .iter()
        .find(|(fragment, _)| lower.contains(fragment))
        .map(|(_, code)| code.to_string())
        .unwrap_or_else(|| "UNK".to_string())
}
