//! CSV header schema resolution.
//!
//! Different detector versions emit different header spellings for the same
//! semantic columns. Each semantic field carries an ordered candidate list;
//! the first candidate present in the header row wins. Matching is
//! case-insensitive and ignores surrounding whitespace.

use crate::{Error, Result};

/// Known header spellings for the scene start timestamp, highest priority first.
const START_CANDIDATES: &[&str] = &["start timecode", "start time", "start"];

/// Known header spellings for the scene end timestamp, highest priority first.
const END_CANDIDATES: &[&str] = &["end timecode", "end time", "end"];

/// Column indices selected for the canonical start/end pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSchema {
    pub start: usize,
    pub end: usize,
}

impl ResolvedSchema {
    /// Resolve the start/end columns from one CSV header row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] when no candidate for a required field is
    /// present. This surfaces immediately rather than defaulting: silently
    /// picking the wrong column would corrupt every downstream timestamp.
    pub fn resolve(headers: &[String]) -> Result<Self> {
        let start = find_column(headers, START_CANDIDATES)
            .ok_or_else(|| Error::schema("start", headers))?;
        let end =
            find_column(headers, END_CANDIDATES).ok_or_else(|| Error::schema("end", headers))?;

        Ok(Self { start, end })
    }
}

fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    candidates.iter().find_map(|candidate| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(candidate))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolves_timecode_headers() {
        let schema =
            ResolvedSchema::resolve(&headers(&["Start Timecode", "End Timecode"])).unwrap();
        assert_eq!(schema, ResolvedSchema { start: 0, end: 1 });
    }

    #[test]
    fn test_resolution_is_case_insensitive() {
        let schema =
            ResolvedSchema::resolve(&headers(&["START TIMECODE", "end timECODE"])).unwrap();
        assert_eq!(schema, ResolvedSchema { start: 0, end: 1 });
    }

    #[test]
    fn test_ignores_extra_columns() {
        let schema = ResolvedSchema::resolve(&headers(&[
            "Scene Number",
            "Start Frame",
            "Start Time",
            "End Frame",
            "End Time",
            "Length (seconds)",
        ]))
        .unwrap();
        assert_eq!(schema, ResolvedSchema { start: 2, end: 4 });
    }

    #[test]
    fn test_candidate_priority() {
        // "Start Timecode" outranks "Start Time" even when it appears later.
        let schema =
            ResolvedSchema::resolve(&headers(&["Start Time", "Start Timecode", "End Time"]))
                .unwrap();
        assert_eq!(schema.start, 1);
    }

    #[test]
    fn test_missing_start_column_fails() {
        let err = ResolvedSchema::resolve(&headers(&["From", "End Time"])).unwrap_err();
        assert!(matches!(err, Error::Schema { field: "start", .. }));
    }

    #[test]
    fn test_missing_end_column_fails() {
        let err = ResolvedSchema::resolve(&headers(&["Start Time", "Until"])).unwrap_err();
        assert!(matches!(err, Error::Schema { field: "end", .. }));
    }
}
