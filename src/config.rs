//! Config file loading

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use repo_ray_core::TransformConfig;
use repo_ray_server::ServerConfig;
use serde::Deserialize;

/// Picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "repo-ray.toml";

/// Everything `repo-ray.toml` can set. Every field is optional.
///
/// ```toml
/// [transform]
/// flat_cap = 25
/// tree_cap = 50
/// icons = true
/// direction = "TD"
/// root_label = "Repository"
///
/// [server]
/// host = "127.0.0.1"
/// port = 7890
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub transform: TransformConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load `explicit` if given (it must exist), else `repo-ray.toml` in `cwd` if
    /// present, else defaults.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> anyhow::Result<Self> {
        let path: Option<PathBuf> = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Some(cwd.join(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
        };

        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                let config: AppConfig = toml::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?;
                tracing::debug!("Loaded config from {}", path.display());
                config
            }
            None => AppConfig::default(),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.transform.flat_cap == 0 || self.transform.tree_cap == 0 {
            bail!("entry caps must be at least 1");
        }
        Ok(())
    }
}
