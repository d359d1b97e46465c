//! Disc ripping driver.

use anyhow::Result;
use sceneprep_av::{require_tool, Error as AvError};
use std::path::Path;
use std::process::Command;

/// Rip all titles longer than `minlength_secs` from `disc` into `out`.
pub fn rip_disc(out: &Path, disc: &str, minlength_secs: u32) -> Result<()> {
    let tool = require_tool("makemkvcon")?;
    std::fs::create_dir_all(out)?;

    tracing::info!("ripping disc {disc} into {:?}", out);

    // Ripping takes a long time; inherit stdio so progress is visible.
    let status = Command::new(&tool)
        .arg("mkv")
        .arg(format!("disc:{disc}"))
        .arg("all")
        .arg(out)
        .arg(format!("--minlength={minlength_secs}"))
        .arg("--progress=-stdout")
        .status()
        .map_err(AvError::Io)?;

    if !status.success() {
        return Err(AvError::tool_failed("makemkvcon", format!("exit status {status}")).into());
    }

    Ok(())
}
