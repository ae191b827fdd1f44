//! `oxprov show <name>` – print the provenance log of an installed extension.

use anyhow::{Context, Result};
use oxprov_core::config::OxprovConfig;
use oxprov_core::provenance;
use oxprov_core::ExtractError;
use std::fs;
use std::path::{Path, PathBuf};

use super::resolve_root;

pub fn run_show(cfg: &OxprovConfig, short_name: &str, extensions_root: Option<PathBuf>) -> Result<()> {
    let root = resolve_root(extensions_root, cfg)?;
    let log = find_log(&root.join(short_name), short_name)?;
    let text = fs::read_to_string(&log).with_context(|| format!("read {}", log.display()))?;
    print!("{text}");
    Ok(())
}

/// Either log flavor inside `dir`; the full extraction's name wins if both exist.
fn find_log(dir: &Path, short_name: &str) -> Result<PathBuf, ExtractError> {
    [
        provenance::log_file_name(short_name),
        provenance::simple_log_file_name(short_name),
    ]
    .into_iter()
    .map(|name| dir.join(name))
    .find(|p| p.is_file())
    .ok_or_else(|| {
        ExtractError::Configuration(format!(
            "no provenance log for {short_name} in {}",
            dir.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_full_then_simple_log() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("extension-provenance-foo.log"), "simple").unwrap();
        assert_eq!(
            find_log(dir.path(), "foo").unwrap(),
            dir.path().join("extension-provenance-foo.log")
        );
        fs::write(dir.path().join("provenance-foo.log"), "full").unwrap();
        assert_eq!(
            find_log(dir.path(), "foo").unwrap(),
            dir.path().join("provenance-foo.log")
        );
    }

    #[test]
    fn missing_log_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_log(dir.path(), "foo").unwrap_err();
        assert!(matches!(err, ExtractError::Configuration(_)));
    }
}
