//! Working-directory bootstrap.

use anyhow::{Context, Result};
use std::path::Path;

/// Subdirectories of the data root the pipeline stages write into.
const DATA_DIRS: &[&str] = &["sources", "scenedetect", "clips", "review"];

const EXAMPLE_CONFIG: &str = "\
[paths]
data_root = \"data\"

[scene_table]
retry_attempts = 5
retry_delay_ms = 500
";

/// Idempotently create the data skeleton and an example config.
///
/// Existing directories are left alone and an existing config file is never
/// overwritten, so this is safe to run repeatedly.
pub fn init_workspace(data_root: &Path, config_path: &Path) -> Result<()> {
    for dir in DATA_DIRS {
        let path = data_root.join(dir);
        std::fs::create_dir_all(&path)
            .with_context(|| format!("failed to create {:?}", path))?;
        // Keep the skeleton in version control even while empty.
        std::fs::write(path.join(".gitkeep"), b"")?;
    }

    if !config_path.exists() {
        std::fs::write(config_path, EXAMPLE_CONFIG)
            .with_context(|| format!("failed to write {:?}", config_path))?;
        tracing::info!("wrote example config to {:?}", config_path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_skeleton() {
        let temp = TempDir::new().unwrap();
        let data_root = temp.path().join("data");
        let config = temp.path().join("sceneprep.toml");

        init_workspace(&data_root, &config).unwrap();

        for dir in ["sources", "scenedetect", "clips", "review"] {
            assert!(data_root.join(dir).is_dir());
            assert!(data_root.join(dir).join(".gitkeep").is_file());
        }
        assert!(config.is_file());
    }

    #[test]
    fn test_init_is_idempotent_and_preserves_config() {
        let temp = TempDir::new().unwrap();
        let data_root = temp.path().join("data");
        let config = temp.path().join("sceneprep.toml");

        init_workspace(&data_root, &config).unwrap();
        std::fs::write(&config, "[paths]\ndata_root = \"elsewhere\"\n").unwrap();

        init_workspace(&data_root, &config).unwrap();

        let content = std::fs::read_to_string(&config).unwrap();
        assert!(content.contains("elsewhere"));
    }
}
