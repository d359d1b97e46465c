//! Clip metadata extraction.
//!
//! Walks a clips tree, probes every clip, and writes a flat
//! `clips_metadata.csv` for downstream dataset tooling. Unlike the split
//! executor this walk is deliberately tolerant: a clip that cannot be probed
//! is logged and skipped so one corrupt file does not sink the whole batch.

use crate::paths::is_clip_file;
use anyhow::{bail, Context, Result};
use sceneprep_av::DetailProber;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const METADATA_HEADER: &str = "video_path,parent_set,filename,duration_sec,width,height,size_bytes";

/// Probe every clip under `clips_root` and write `out_csv`.
///
/// Returns the number of rows written. Fails only when no clips exist at
/// all, or when not a single clip could be probed.
pub fn build_metadata<P: DetailProber>(
    prober: &P,
    clips_root: &Path,
    out_csv: &Path,
) -> Result<usize> {
    let clips = walk_clips(clips_root);
    if clips.is_empty() {
        bail!("no clips found under {:?}; run a split first", clips_root);
    }

    let mut rows = Vec::new();
    for clip in &clips {
        match describe_clip(prober, clip) {
            Ok(row) => rows.push(row),
            Err(e) => tracing::warn!("skipping {}: {e:#}", clip.display()),
        }
    }

    if rows.is_empty() {
        bail!(
            "none of the {} clips under {:?} could be probed",
            clips.len(),
            clips_root
        );
    }

    let mut csv = String::from(METADATA_HEADER);
    csv.push('\n');
    for row in &rows {
        csv.push_str(row);
        csv.push('\n');
    }

    if let Some(parent) = out_csv.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out_csv, csv).with_context(|| format!("failed to write {:?}", out_csv))?;

    tracing::info!("wrote {} metadata rows to {:?}", rows.len(), out_csv);
    Ok(rows.len())
}

fn walk_clips(clips_root: &Path) -> Vec<PathBuf> {
    let mut clips: Vec<PathBuf> = WalkDir::new(clips_root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_clip_file(e.path()))
        .map(|e| e.into_path())
        .collect();

    clips.sort();
    clips
}

fn describe_clip<P: DetailProber>(prober: &P, clip: &Path) -> Result<String> {
    let details = prober.details(clip)?;
    let size_bytes = clip.metadata()?.len();

    let parent_set = clip
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let filename = clip
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(format!(
        "{},{},{},{},{},{},{}",
        clip.display(),
        parent_set,
        filename,
        field(details.duration_seconds),
        field(details.width),
        field(details.height),
        size_bytes
    ))
}

/// Unknown fields are left empty rather than invented.
fn field<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
