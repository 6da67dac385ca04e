//! Optional `publish.toml` configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Configuration file structure (publish.toml).
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub docs: DocsSection,
    #[serde(default)]
    pub deploy: DeploySection,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct DocsSection {
    /// Version used when `-v` is not given
    pub version: Option<String>,
    #[serde(default = "default_site_dir")]
    pub site_dir: PathBuf,
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,
    #[serde(default = "default_api_template_dir")]
    pub api_template_dir: PathBuf,
}

impl Default for DocsSection {
    fn default() -> Self {
        Self {
            version: None,
            site_dir: default_site_dir(),
            temp_dir: default_temp_dir(),
            api_template_dir: default_api_template_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct DeploySection {
    pub remote: Option<String>,
    pub branch: Option<String>,
    pub message: Option<String>,
}

fn default_site_dir() -> PathBuf {
    PathBuf::from("site")
}
fn default_temp_dir() -> PathBuf {
    PathBuf::from("temp")
}
fn default_api_template_dir() -> PathBuf {
    PathBuf::from("api_reference")
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());

    Ok(config)
}
