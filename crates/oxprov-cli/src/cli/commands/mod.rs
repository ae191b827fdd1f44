//! CLI command handlers. Each command is in its own file.

mod completions;
mod extract;
mod show;

pub use completions::run_completions;
pub use extract::{run_extract, ExtractOptions};
pub use show::run_show;

use anyhow::{Context, Result};
use oxprov_core::config::OxprovConfig;
use std::path::{Path, PathBuf};

/// Extensions root from the flag or config, made absolute against the current directory.
pub(crate) fn resolve_root(flag: Option<PathBuf>, cfg: &OxprovConfig) -> Result<PathBuf> {
    let root = flag.unwrap_or_else(|| cfg.extensions_root.clone());
    absolutize(&root)
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("determine current directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_config_root() {
        let cfg = OxprovConfig::default();
        let root = resolve_root(Some(PathBuf::from("/opt/ext")), &cfg).unwrap();
        assert_eq!(root, PathBuf::from("/opt/ext"));
    }

    #[test]
    fn relative_config_root_is_made_absolute() {
        let cfg = OxprovConfig::default();
        let root = resolve_root(None, &cfg).unwrap();
        assert!(root.is_absolute());
        assert!(root.ends_with("oommf/app/oxs/local"));
    }
}
