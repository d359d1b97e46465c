//! Scene table loading.
//!
//! Detector CSVs can be transiently held open by another process (an editor,
//! an antivirus scan) right after detection finishes, so the open is retried
//! a bounded number of times with a fixed delay before giving up.

use crate::schema::ResolvedSchema;
use crate::table::{split_row, SceneRecord, SceneTable};
use crate::timecode;
use crate::{Error, Result};
use std::path::Path;
use std::time::Duration;

/// Retry behavior for opening the scene CSV.
///
/// Both knobs come from configuration rather than constants so tests can run
/// with a near-zero delay.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total open attempts before giving up (minimum 1).
    pub attempts: u32,
    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_millis(500),
        }
    }
}

/// Load a detector CSV into a [`SceneTable`].
///
/// # Errors
///
/// - [`Error::FileNotFound`] when the path does not exist (not retried)
/// - [`Error::FileLock`] when every open attempt failed
/// - [`Error::Schema`] when no start/end columns can be resolved
/// - [`Error::EmptyTable`] when the CSV has a header row but no scenes
/// - [`Error::MalformedRow`] when a data row is shorter than the resolved
///   columns or its timecodes are out of order
pub fn load_scene_table(path: &Path, retry: &RetryPolicy) -> Result<SceneTable> {
    let text = read_with_retry(path, retry)?;
    parse_table(path, &text)
}

fn read_with_retry(path: &Path, retry: &RetryPolicy) -> Result<String> {
    let attempts = retry.attempts.max(1);

    for attempt in 1..=attempts {
        match std::fs::read_to_string(path) {
            Ok(text) => return Ok(text),
            // A missing file will not appear by waiting; fail immediately.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::file_not_found(path));
            }
            Err(e) => {
                tracing::warn!(
                    "scene table open failed (attempt {attempt}/{attempts}): {e}"
                );
                if attempt < attempts {
                    std::thread::sleep(retry.delay);
                }
            }
        }
    }

    Err(Error::FileLock {
        path: path.to_path_buf(),
        attempts,
    })
}

fn parse_table(path: &Path, text: &str) -> Result<SceneTable> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header_line)) = lines.next() else {
        return Err(Error::empty_table(path));
    };

    let headers = split_row(header_line);
    let schema = ResolvedSchema::resolve(&headers)?;
    let needed = schema.start.max(schema.end) + 1;

    let mut records = Vec::new();
    for (line_no, line) in lines {
        let fields = split_row(line);
        if fields.len() < needed {
            return Err(Error::malformed_row(
                line_no,
                format!("expected at least {needed} columns, found {}", fields.len()),
            ));
        }

        let start = timecode::normalize(&fields[schema.start]);
        let end = timecode::normalize(&fields[schema.end]);

        // Canonical timecodes order correctly as strings; unparsable ones
        // are passed through for the downstream tool to reject.
        if timecode::is_canonical(&start) && timecode::is_canonical(&end) && start >= end {
            return Err(Error::malformed_row(
                line_no,
                format!("start {start} is not before end {end}"),
            ));
        }

        records.push(SceneRecord {
            index: records.len() + 1,
            start,
            end,
        });
    }

    if records.is_empty() {
        return Err(Error::empty_table(path));
    }

    tracing::debug!("loaded {} scenes from {}", records.len(), path.display());
    Ok(SceneTable::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::TempDir;

    fn fast_retry() -> RetryPolicy {
        RetryPolicy {
            attempts: 3,
            delay: Duration::from_millis(1),
        }
    }

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_detector_csv() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "movie-Scenes.csv",
            "Scene Number,Start Frame,Start Timecode,End Frame,End Timecode\n\
             1,0,0:00:00.000,240,0:00:10.5\n\
             2,240,0:00:10.5,480,0:00:20\n",
        );

        let table = load_scene_table(&path, &fast_retry()).unwrap();
        assert_eq!(table.len(), 2);

        let records = table.records();
        assert_eq!(records[0].index, 1);
        assert_eq!(records[0].start, "00:00:00.000");
        assert_eq!(records[0].end, "00:00:10.500");
        assert_eq!(records[1].index, 2);
        assert_eq!(records[1].end, "00:00:20");
    }

    #[test]
    fn test_unparsable_timecodes_pass_through() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "odd.csv",
            "Start Time,End Time\n00:00:01;000,later\n",
        );

        let table = load_scene_table(&path, &fast_retry()).unwrap();
        assert_eq!(table.records()[0].start, "00:00:01;000");
        assert_eq!(table.records()[0].end, "later");
    }

    #[test]
    fn test_header_only_csv_is_empty_table() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "empty.csv", "Start Time,End Time\n");

        let err = load_scene_table(&path, &fast_retry()).unwrap_err();
        assert!(matches!(err, Error::EmptyTable { .. }));
    }

    #[test]
    fn test_blank_file_is_empty_table() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "blank.csv", "\n\n");

        let err = load_scene_table(&path, &fast_retry()).unwrap_err();
        assert!(matches!(err, Error::EmptyTable { .. }));
    }

    #[test]
    fn test_unrecognized_headers_fail_before_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "bad.csv", "From,Until\n0:00:00,0:00:10\n");

        let err = load_scene_table(&path, &fast_retry()).unwrap_err();
        assert!(matches!(err, Error::Schema { field: "start", .. }));
    }

    #[test]
    fn test_short_row_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "short.csv",
            "Start Time,End Time\n0:00:00,0:00:10\n0:00:10\n",
        );

        let err = load_scene_table(&path, &fast_retry()).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { line: 3, .. }));
    }

    #[test]
    fn test_reversed_range_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "reversed.csv",
            "Start Time,End Time\n0:00:10,0:00:05\n",
        );

        let err = load_scene_table(&path, &fast_retry()).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_missing_file_fails_without_retry() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.csv");

        let started = std::time::Instant::now();
        let err = load_scene_table(
            &path,
            &RetryPolicy {
                attempts: 50,
                delay: Duration::from_millis(100),
            },
        )
        .unwrap_err();

        assert!(matches!(err, Error::FileNotFound { .. }));
        // 50 attempts at 100ms would take seconds; NotFound must not retry.
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_unreadable_path_exhausts_retries() {
        let dir = TempDir::new().unwrap();
        // Reading a directory as a file fails with a non-NotFound error on
        // every attempt, standing in for a held lock.
        let err = load_scene_table(dir.path(), &fast_retry()).unwrap_err();
        assert!(matches!(err, Error::FileLock { attempts: 3, .. }));
    }
}
