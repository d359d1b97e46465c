//! Review workspace staging.
//!
//! Turns a directory of produced clips into a triage workspace: empty
//! `keep/` and `reject/` partitions for a human to sort clips into, plus a
//! manifest of every clip and its measured duration.

use crate::paths::is_clip_file;
use anyhow::{Context, Result};
use sceneprep_av::DurationProber;
use std::io::Write;
use std::path::{Path, PathBuf};

const MANIFEST_NAME: &str = "manifest.csv";

/// Stage a clips directory for review under `review_root`.
///
/// Creates `review_root/<clips_dir_name>/{keep,reject}/` (idempotent) and
/// writes `manifest.csv` with one `file,duration_s` row per recognized clip,
/// in lexicographic filename order, durations rounded to 3 decimals.
///
/// The manifest is all-or-nothing: rows are buffered while every clip is
/// probed, then written to a temp file and atomically renamed into place.
/// A probe failure aborts staging with no manifest committed.
pub fn stage_review<P: DurationProber>(
    prober: &P,
    clips_dir: &Path,
    review_root: &Path,
) -> Result<PathBuf> {
    let name = clips_dir
        .file_name()
        .with_context(|| format!("clips directory has no name: {:?}", clips_dir))?;
    let base = review_root.join(name);

    std::fs::create_dir_all(base.join("keep"))?;
    std::fs::create_dir_all(base.join("reject"))?;

    let clips = list_clips(clips_dir)?;
    tracing::info!("staging {} clips from {:?}", clips.len(), clips_dir);

    let mut rows = String::from("file,duration_s\n");
    for clip in &clips {
        let duration = prober
            .duration_seconds(clip)
            .with_context(|| format!("failed to measure duration of {:?}", clip))?;
        let file_name = clip.file_name().unwrap_or_default().to_string_lossy();
        rows.push_str(&format!("{},{}\n", file_name, round3(duration)));
    }

    let mut tmp = tempfile::NamedTempFile::new_in(&base)
        .context("failed to create temporary manifest")?;
    tmp.write_all(rows.as_bytes())?;
    tmp.persist(base.join(MANIFEST_NAME))
        .context("failed to commit manifest")?;

    Ok(base)
}

fn list_clips(clips_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(clips_dir)
        .with_context(|| format!("failed to read clips directory: {:?}", clips_dir))?;

    let mut clips: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_clip_file(path))
        .collect();

    clips.sort();
    Ok(clips)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
