//! Scene splitting: planning and execution.
//!
//! Two mutually exclusive backends produce one clip per scene:
//!
//! - [`split_with_remuxer`] — lossless, one mkvmerge invocation over the
//!   whole source with a composite range specification, followed by a
//!   deterministic rename pass
//! - [`split_with_extractor`] — one ffmpeg invocation per scene, either
//!   stream-copied (fast, keyframe-aligned) or re-encoded (frame-accurate)
//!
//! Both are fail-fast: the first tool failure aborts the whole operation,
//! leaving behind only what the tool itself already wrote.

use crate::tools::require_tool;
use crate::{Error, Result};
use sceneprep_scenes::SceneTable;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Stem of the output template handed to the remuxer. The rename pass
/// discovers the tool's outputs by this prefix, so it must never collide
/// with the canonical `scene-NNNN` names a previous run may have left.
const REMUX_STEM: &str = "part";

/// Both backends write Matroska containers.
const CLIP_EXT: &str = "mkv";

/// Fixed re-encode profile for frame-accurate extraction.
const REENCODE_ARGS: &[&str] = &[
    "-c:v", "libx264", "-preset", "veryfast", "-crf", "18", "-c:a", "aac", "-b:a", "192k",
];

/// Splits a whole source into per-range files in one invocation, with
/// tool-defined output naming.
pub trait Remuxer {
    fn split(&self, source: &Path, split_spec: &str, out_template: &Path) -> Result<()>;
}

/// Extracts exactly one range of the source into one output file.
pub trait RangeExtractor {
    fn extract(
        &self,
        source: &Path,
        start: &str,
        end: &str,
        copy_streams: bool,
        output: &Path,
    ) -> Result<()>;
}

/// Remuxing backend that shells out to mkvmerge.
#[derive(Debug, Clone)]
pub struct MkvmergeRemuxer {
    tool: PathBuf,
}

impl MkvmergeRemuxer {
    /// Resolve mkvmerge from the search path.
    pub fn new() -> Result<Self> {
        Ok(Self {
            tool: require_tool("mkvmerge")?,
        })
    }
}

impl Remuxer for MkvmergeRemuxer {
    fn split(&self, source: &Path, split_spec: &str, out_template: &Path) -> Result<()> {
        tracing::debug!(
            "mkvmerge split {} -> {}",
            source.display(),
            out_template.display()
        );

        let result = Command::new(&self.tool)
            .arg("-o")
            .arg(out_template)
            .arg("--split")
            .arg(split_spec)
            .arg(source)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found("mkvmerge")
                } else {
                    Error::Io(e)
                }
            })?;

        // mkvmerge returns 0 for success, 1 for warnings (still OK), 2 for errors
        if !result.status.success() && result.status.code() != Some(1) {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::tool_failed("mkvmerge", stderr.to_string()));
        }

        Ok(())
    }
}

/// Per-range backend that shells out to ffmpeg.
#[derive(Debug, Clone)]
pub struct FfmpegExtractor {
    tool: PathBuf,
}

impl FfmpegExtractor {
    /// Resolve ffmpeg from the search path.
    pub fn new() -> Result<Self> {
        Ok(Self {
            tool: require_tool("ffmpeg")?,
        })
    }
}

impl RangeExtractor for FfmpegExtractor {
    fn extract(
        &self,
        source: &Path,
        start: &str,
        end: &str,
        copy_streams: bool,
        output: &Path,
    ) -> Result<()> {
        let mut cmd = Command::new(&self.tool);
        cmd.args(["-hide_banner", "-loglevel", "error", "-y", "-ss", start, "-to", end, "-i"])
            .arg(source);

        if copy_streams {
            cmd.args(["-c", "copy"]);
        } else {
            cmd.args(REENCODE_ARGS);
        }
        cmd.arg(output);

        let result = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found("ffmpeg")
            } else {
                Error::Io(e)
            }
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::tool_failed("ffmpeg", stderr.to_string()));
        }

        Ok(())
    }
}

/// Split every scene in one remuxer pass, then rename the tool's outputs to
/// the canonical `scene-NNNN.mkv` pattern (4-digit, 1-based).
///
/// The remuxer does not expose a configurable naming scheme, so naming is
/// normalized after the fact: outputs are discovered by the `part-` prefix,
/// sorted lexicographically, and renamed in order. Canonical names left by
/// a previous run are overwritten.
pub fn split_with_remuxer<R: Remuxer>(
    remuxer: &R,
    table: &SceneTable,
    source: &Path,
    outdir: &Path,
) -> Result<Vec<PathBuf>> {
    if table.is_empty() {
        return Err(Error::EmptyTable);
    }

    std::fs::create_dir_all(outdir)?;
    clear_stale_parts(outdir)?;

    let split_spec = build_split_spec(table);
    let template = outdir.join(format!("{REMUX_STEM}.{CLIP_EXT}"));

    tracing::info!(
        "remuxing {} scenes from {} into {}",
        table.len(),
        source.display(),
        outdir.display()
    );
    remuxer.split(source, &split_spec, &template)?;

    rename_outputs(outdir)
}

/// Extract every scene with one extractor invocation each, in index order,
/// writing `NNNNN.mkv` (5-digit, 1-based). A failure on any scene aborts
/// the whole operation.
pub fn split_with_extractor<X: RangeExtractor>(
    extractor: &X,
    table: &SceneTable,
    source: &Path,
    outdir: &Path,
    copy_streams: bool,
) -> Result<Vec<PathBuf>> {
    if table.is_empty() {
        return Err(Error::EmptyTable);
    }

    std::fs::create_dir_all(outdir)?;

    let mut clips = Vec::with_capacity(table.len());
    for record in table {
        let output = outdir.join(format!("{:05}.{CLIP_EXT}", record.index));
        tracing::debug!(
            "extracting scene {} ({} - {})",
            record.index,
            record.start,
            record.end
        );
        extractor.extract(source, &record.start, &record.end, copy_streams, &output)?;
        clips.push(output);
    }

    tracing::info!("extracted {} clips into {}", clips.len(), outdir.display());
    Ok(clips)
}

/// Compose the remuxer's range specification: `parts:` followed by
/// `start-end` pairs joined with commas, one output file per range.
fn build_split_spec(table: &SceneTable) -> String {
    let ranges: Vec<String> = table
        .into_iter()
        .map(|record| format!("{}-{}", record.start, record.end))
        .collect();
    format!("parts:{}", ranges.join(","))
}

/// List `part-*` files in the output directory, sorted lexicographically.
/// The remuxer pads its part numbers, so lexicographic order is range order.
fn discover_parts(outdir: &Path) -> Result<Vec<PathBuf>> {
    let prefix = format!("{REMUX_STEM}-");
    let suffix = format!(".{CLIP_EXT}");

    let mut found = Vec::new();
    for entry in std::fs::read_dir(outdir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with(&prefix) && name.ends_with(&suffix) {
            found.push(entry.path());
        }
    }

    found.sort();
    Ok(found)
}

/// Remove intermediate outputs a previous interrupted run may have left, so
/// discovery only ever sees files from the current invocation.
fn clear_stale_parts(outdir: &Path) -> Result<()> {
    for stale in discover_parts(outdir)? {
        tracing::warn!("removing stale split output {}", stale.display());
        std::fs::remove_file(&stale)?;
    }
    Ok(())
}

fn rename_outputs(outdir: &Path) -> Result<Vec<PathBuf>> {
    let produced = discover_parts(outdir)?;
    if produced.is_empty() {
        return Err(Error::tool_failed(
            "mkvmerge",
            format!(
                "no {REMUX_STEM}-* outputs found in {} after split",
                outdir.display()
            ),
        ));
    }

    let mut clips = Vec::with_capacity(produced.len());
    for (i, path) in produced.iter().enumerate() {
        let target = outdir.join(format!("scene-{:04}.{CLIP_EXT}", i + 1));
        if target.exists() {
            std::fs::remove_file(&target)?;
        }
        std::fs::rename(path, &target)?;
        clips.push(target);
    }

    Ok(clips)
}
