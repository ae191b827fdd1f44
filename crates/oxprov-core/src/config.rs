use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// OOMMF's directory for locally installed Oxs extensions, relative to the checkout root.
pub const DEFAULT_EXTENSIONS_ROOT: &str = "oommf/app/oxs/local";

/// Global configuration loaded from `~/.config/oxprov/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OxprovConfig {
    /// Directory that receives one subdirectory per extension. Relative paths
    /// are resolved against the current directory.
    pub extensions_root: PathBuf,
    /// git executable to run.
    #[serde(default = "default_git_program")]
    pub git_program: String,
    /// Source path used by `oxprov simple` when none is given.
    #[serde(default = "default_from_path")]
    pub default_from_path: String,
    /// Parent directory for the temporary clone (None = system temp dir).
    #[serde(default)]
    pub work_dir: Option<PathBuf>,
}

fn default_git_program() -> String {
    "git".to_string()
}

fn default_from_path() -> String {
    "src".to_string()
}

impl Default for OxprovConfig {
    fn default() -> Self {
        Self {
            extensions_root: PathBuf::from(DEFAULT_EXTENSIONS_ROOT),
            git_program: default_git_program(),
            default_from_path: default_from_path(),
            work_dir: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("oxprov")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<OxprovConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = OxprovConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: OxprovConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
