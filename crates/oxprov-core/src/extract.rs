//! The extraction pipeline: clone, snapshot, log, replace destination, copy.
//!
//! Everything that can fail before the destination is touched (clone,
//! archive, source-path check, log rendering) runs inside a private temporary
//! directory. Only then is `<extensions_root>/<short_name>` modified. The
//! temporary directory is removed on every exit path.
//!
//! Concurrent runs for the same short name race on the destination
//! directory; callers are expected to run one extraction at a time per target.

use crate::checksum;
use crate::error::ExtractError;
use crate::fsops;
use crate::git::Vcs;
use crate::provenance::{self, ProvenanceRecord};
use crate::repo_ref::RepoRef;
use chrono::Local;
use serde::Serialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tempfile::TempDir;

/// Which flavor of extraction to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// Replace the destination, log to `provenance-<short>.log`, optionally snapshot HEAD as zip.
    Full { archive: bool },
    /// Copy into the destination without cleaning it, no snapshot,
    /// log to `extension-provenance-<short>.log`.
    Simple,
}

impl ExtractMode {
    pub fn archives(self) -> bool {
        matches!(self, ExtractMode::Full { archive: true })
    }

    pub fn cleans_destination(self) -> bool {
        matches!(self, ExtractMode::Full { .. })
    }

    pub fn log_file_name(self, short_name: &str) -> String {
        match self {
            ExtractMode::Full { .. } => provenance::log_file_name(short_name),
            ExtractMode::Simple => provenance::simple_log_file_name(short_name),
        }
    }
}

/// One extraction, fully resolved before anything runs.
#[derive(Debug, Clone)]
pub struct ExtractRequest {
    pub repo: RepoRef,
    /// Directory inside the repository whose immediate files are copied (`.` = root).
    pub from_path: String,
    pub extensions_root: PathBuf,
    pub mode: ExtractMode,
    /// Parent of the temporary clone; system temp dir when `None`.
    pub work_dir: Option<PathBuf>,
}

impl ExtractRequest {
    pub fn new(
        repo: RepoRef,
        from_path: impl Into<String>,
        extensions_root: impl Into<PathBuf>,
        mode: ExtractMode,
    ) -> Self {
        ExtractRequest {
            repo,
            from_path: from_path.into(),
            extensions_root: extensions_root.into(),
            mode,
            work_dir: None,
        }
    }

    pub fn with_work_dir(mut self, work_dir: Option<PathBuf>) -> Self {
        self.work_dir = work_dir;
        self
    }

    /// `<extensions_root>/<short_name>`
    pub fn destination(&self) -> PathBuf {
        self.extensions_root.join(self.repo.short_name())
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractReport {
    pub short_name: String,
    pub commit: String,
    pub destination: PathBuf,
    pub copied_files: Vec<String>,
    pub log_path: PathBuf,
    pub archive_path: Option<PathBuf>,
    pub archive_sha256: Option<String>,
    /// RFC 3339.
    pub cloned_on: String,
}

/// Removes the temporary clone when dropped, logging instead of failing.
struct WorkDirGuard {
    dir: Option<TempDir>,
}

impl WorkDirGuard {
    fn create(parent: Option<&Path>) -> Result<Self, ExtractError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("oxprov-");
        let dir = match parent {
            Some(p) => builder
                .tempdir_in(p)
                .map_err(|e| ExtractError::io("create work directory in", p, e))?,
            None => builder
                .tempdir()
                .map_err(|e| ExtractError::io("create work directory in", std::env::temp_dir(), e))?,
        };
        tracing::debug!(path = %dir.path().display(), "created work directory");
        Ok(WorkDirGuard { dir: Some(dir) })
    }

    fn path(&self) -> &Path {
        self.dir.as_ref().map(TempDir::path).unwrap_or(Path::new(""))
    }
}

impl Drop for WorkDirGuard {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            match dir.close() {
                Ok(()) => tracing::debug!(path = %path.display(), "removed work directory"),
                Err(e) => {
                    tracing::warn!(path = %path.display(), "could not remove work directory: {}", e)
                }
            }
        }
    }
}

/// Runs one extraction. Any step failing aborts the run; nothing is retried.
pub fn extract(req: &ExtractRequest, vcs: &dyn Vcs) -> Result<ExtractReport, ExtractError> {
    let short_name = req.repo.short_name();
    let destination = req.destination();
    tracing::info!(
        repo = %req.repo,
        from = %req.from_path,
        mode = ?req.mode,
        "processing {}, copy from {}",
        short_name,
        req.from_path
    );

    let work = WorkDirGuard::create(req.work_dir.as_deref())?;
    let clone_dir = work.path().join("clone");
    let commit = vcs.clone_repo(req.repo.url(), &clone_dir)?;
    tracing::info!(commit = %commit.hash, "cloned {}", req.repo.url());

    let src_dir = resolve_source_dir(&clone_dir, &req.from_path)?;

    let staged_archive = if req.mode.archives() {
        let path = work.path().join(req.repo.archive_file_name());
        vcs.archive(&clone_dir, "HEAD", &path)?;
        tracing::info!(archive = %path.display(), "archived HEAD");
        Some(path)
    } else {
        None
    };

    let cloned_on = Local::now();
    let record = ProvenanceRecord {
        url: req.repo.url().to_string(),
        short_name: short_name.to_string(),
        archive_name: staged_archive.as_ref().map(|_| req.repo.archive_file_name()),
        cloned_on,
        from_path: req.from_path.clone(),
        last_commit: vcs.last_commit_info(&clone_dir)?,
        file_list: fsops::list_dir(&src_dir)?,
    };
    let staged_log = work.path().join(req.mode.log_file_name(short_name));
    fs::write(&staged_log, record.render())
        .map_err(|e| ExtractError::io("write", &staged_log, e))?;

    // Destination is modified from here on; no rollback.
    if req.mode.cleans_destination() {
        fsops::remove_tree(&destination)?;
    }
    fsops::make_dir(&destination)?;

    let copied_files = fsops::copy_children(&src_dir, &destination)?;
    tracing::info!(
        count = copied_files.len(),
        dest = %destination.display(),
        "copied source files"
    );

    let log_path = fsops::move_file(&staged_log, &destination)?;
    tracing::info!("provenance information recorded in {}", log_path.display());
    let archive_path = staged_archive
        .map(|a| fsops::move_file(&a, &destination))
        .transpose()?;
    let archive_sha256 = archive_path
        .as_deref()
        .map(checksum::sha256_path)
        .transpose()?;

    Ok(ExtractReport {
        short_name: short_name.to_string(),
        commit: commit.hash,
        destination,
        copied_files,
        log_path,
        archive_path,
        archive_sha256,
        cloned_on: cloned_on.to_rfc3339(),
    })
}

/// `from_path` inside the clone. Must stay inside the repository and be a directory.
fn resolve_source_dir(clone_dir: &Path, from_path: &str) -> Result<PathBuf, ExtractError> {
    let rel = Path::new(from_path);
    let escapes = rel
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if from_path.is_empty() || escapes {
        return Err(ExtractError::Configuration(format!(
            "source path must be relative to the repository root: {from_path:?}"
        )));
    }
    let dir = clone_dir.join(rel);
    if !dir.is_dir() {
        return Err(ExtractError::Configuration(format!(
            "source path {from_path:?} is not a directory in the repository"
        )));
    }
    // A committed symlink could point the source anywhere on disk.
    let clone_root = clone_dir
        .canonicalize()
        .map_err(|e| ExtractError::io("resolve", clone_dir, e))?;
    let resolved = dir
        .canonicalize()
        .map_err(|e| ExtractError::io("resolve", &dir, e))?;
    if !resolved.starts_with(&clone_root) {
        return Err(ExtractError::Configuration(format!(
            "source path {from_path:?} resolves outside the repository"
        )));
    }
    Ok(resolved)
}
