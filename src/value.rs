//! Typed views over the raw string values stored in a section.

use std::num::ParseIntError;

const TRUE_TOKENS: &[&str] = &["true", "yes", "on"];
const FALSE_TOKENS: &[&str] = &["false", "no", "off"];

/// Plain base-10 parsing; a leading `0` never switches radix.
pub(crate) fn parse_int(value: &str) -> Result<i64, ParseIntError> {
    value.parse::<i64>()
}

/// Matches one of the recognised boolean spellings, case-sensitively.
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    if TRUE_TOKENS.contains(&value) {
        Some(true)
    } else if FALSE_TOKENS.contains(&value) {
        Some(false)
    } else {
        None
    }
}

/// Only `yes`/`no` are ever written, whichever spelling was read.
pub(crate) fn format_bool(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
