//! Configuration loading.

use anyhow::{Context, Result};
use sceneprep_scenes::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub scene_table: SceneTableConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Root under which sources, scene tables, clips, and review workspaces live.
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SceneTableConfig {
    /// Open attempts before a locked scene CSV is given up on.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Fixed delay between open attempts, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_data_root() -> PathBuf {
    PathBuf::from("data")
}

fn default_retry_attempts() -> u32 {
    5
}

fn default_retry_delay_ms() -> u64 {
    500
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
        }
    }
}

impl Default for SceneTableConfig {
    fn default() -> Self {
        Self {
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Config {
    pub fn sources_dir(&self) -> PathBuf {
        self.paths.data_root.join("sources")
    }

    pub fn scenedetect_dir(&self) -> PathBuf {
        self.paths.data_root.join("scenedetect")
    }

    pub fn clips_dir(&self) -> PathBuf {
        self.paths.data_root.join("clips")
    }

    pub fn review_root(&self) -> PathBuf {
        self.paths.data_root.join("review")
    }
}

impl SceneTableConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.retry_attempts,
            delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./sceneprep.toml", "~/.config/sceneprep/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.paths.data_root, PathBuf::from("data"));
        assert_eq!(config.scene_table.retry_attempts, 5);
        assert_eq!(config.scene_table.retry_delay_ms, 500);
        assert_eq!(config.clips_dir(), PathBuf::from("data/clips"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [scene_table]
            retry_attempts = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.scene_table.retry_attempts, 2);
        assert_eq!(config.scene_table.retry_delay_ms, 500);
        assert_eq!(config.paths.data_root, PathBuf::from("data"));
    }

    #[test]
    fn test_retry_policy_conversion() {
        let config: Config = toml::from_str(
            r#"
            [scene_table]
            retry_attempts = 3
            retry_delay_ms = 10
            "#,
        )
        .unwrap();

        let policy = config.scene_table.retry_policy();
        assert_eq!(policy.attempts, 3);
        assert_eq!(policy.delay, Duration::from_millis(10));
    }
}
