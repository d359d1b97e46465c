//! Scene detection driver.
//!
//! The detector itself is an external black box; this module only resolves
//! it, builds its argument list, and points its CSV output at the
//! conventional scene-table location.

use anyhow::{Context, Result};
use clap::ValueEnum;
use sceneprep_av::{require_tool, Error as AvError};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Detection algorithm selection, forwarded to the external detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DetectMode {
    /// Adaptive thresholding, robust across fades and camera moves.
    Adaptive,
    /// Plain content detection with an optional fixed threshold.
    Content,
}

/// Run the external detector over `input`, writing its CSV into `outdir`
/// (default `<scenedetect_root>/<input_stem>/`). Returns the directory the
/// scene table landed in.
pub fn detect_scenes(
    input: &Path,
    outdir: Option<PathBuf>,
    mode: DetectMode,
    threshold: Option<u32>,
    scenedetect_root: &Path,
) -> Result<PathBuf> {
    let tool = require_tool("scenedetect")?;

    let stem = input
        .file_stem()
        .with_context(|| format!("input has no file stem: {:?}", input))?;
    let outdir = outdir.unwrap_or_else(|| scenedetect_root.join(stem));
    std::fs::create_dir_all(&outdir)?;

    let mut cmd = Command::new(&tool);
    cmd.arg("-i").arg(input);

    match mode {
        DetectMode::Content => {
            cmd.arg("detect-content");
            if let Some(threshold) = threshold {
                cmd.args(["--threshold", &threshold.to_string()]);
            }
        }
        DetectMode::Adaptive => {
            cmd.arg("detect-adaptive");
        }
    }

    cmd.args(["list-scenes", "--format", "csv", "-o"]).arg(&outdir);

    tracing::info!("detecting scenes in {:?} ({:?} mode)", input, mode);

    // The detector reports progress on its own stdout; let it through.
    let status = cmd.status().map_err(AvError::Io)?;
    if !status.success() {
        return Err(AvError::tool_failed("scenedetect", format!("exit status {status}")).into());
    }

    Ok(outdir)
}
