//! Timecode canonicalization.
//!
//! Detector CSVs have carried timecodes in a handful of shapes over the
//! years (`0:01:02`, `00:01:02.5`, `00:01:02.500`). Downstream tools want a
//! single canonical form, so anything matching `H[H]:MM:SS[.fff]` is
//! rewritten to `HH:MM:SS` or `HH:MM:SS.mmm`. Anything else is passed
//! through verbatim for the downstream tool to interpret.

use regex::Regex;
use std::sync::LazyLock;

static TIMECODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2}):(\d{2})(?:\.(\d{1,3}))?$").expect("valid timecode pattern")
});

/// Normalize a timecode string to `HH:MM:SS` or `HH:MM:SS.mmm`.
///
/// The fraction, when present, is zero-padded on the right to exactly three
/// digits (`.5` becomes `.500`). Strings that do not match the timecode
/// pattern are returned unchanged; this function never fails.
pub fn normalize(raw: &str) -> String {
    let Some(caps) = TIMECODE.captures(raw) else {
        return raw.to_string();
    };

    match caps.get(4) {
        Some(frac) => format!(
            "{:0>2}:{}:{}.{:0<3}",
            &caps[1],
            &caps[2],
            &caps[3],
            frac.as_str()
        ),
        None => format!("{:0>2}:{}:{}", &caps[1], &caps[2], &caps[3]),
    }
}

/// Whether a string is already in the canonical normalized form.
///
/// Canonical timecodes compare correctly as plain strings, which is what
/// the loader relies on to check scene ordering.
pub fn is_canonical(value: &str) -> bool {
    normalize(value) == value && TIMECODE.is_match(value)
}
