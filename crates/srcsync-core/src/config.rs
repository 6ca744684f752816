use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SourceTypeError;
use crate::registry::SourceTypeRegistry;
use crate::source_list::DEFAULT_SOURCE_LIST;
use crate::source_type::SourceTypeDef;

/// Global configuration loaded from `~/.config/srcsync/config.toml`.
///
/// Every field is optional in the file; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SrcsyncConfig {
    /// Source list path; relative paths are taken from the working directory.
    pub input: PathBuf,
    /// Maximum concurrent fetch commands (1 = strictly sequential).
    pub jobs: usize,
    /// Shell used to run expanded commands (`<shell> -c <command>`).
    pub shell: String,
    /// Exit non-zero when any URL failed or could not be resolved.
    pub fail_on_error: bool,
    /// Extra source types, consulted before the built-in ones.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_types: Vec<SourceTypeDef>,
}

impl Default for SrcsyncConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_SOURCE_LIST),
            jobs: 1,
            shell: "sh".to_string(),
            fail_on_error: false,
            source_types: Vec::new(),
        }
    }
}

impl SrcsyncConfig {
    /// Registry of custom plus built-in source types. Fails on any malformed descriptor.
    pub fn registry(&self) -> Result<SourceTypeRegistry, SourceTypeError> {
        SourceTypeRegistry::with_custom(&self.source_types)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("srcsync")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SrcsyncConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SrcsyncConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

pub fn load_from_path(path: &Path) -> Result<SrcsyncConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: SrcsyncConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
