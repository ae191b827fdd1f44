//! Filesystem collaborators: listing, non-recursive copy, tree removal.
//!
//! Hidden entries (leading `.`) are ignored everywhere, matching how a shell
//! glob `src/*` would see the directory.

use crate::error::ExtractError;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

/// `ls -l`-style listing of the non-hidden entries directly under `path`, sorted by name.
///
/// Each line is `<mode> <size> <mtime> <name>`; directories get a trailing `/`.
pub fn list_dir(path: &Path) -> Result<String, ExtractError> {
    let mut lines = Vec::new();
    for entry in visible_entries(path)? {
        let meta = fs::symlink_metadata(&entry)
            .map_err(|e| ExtractError::io("stat", &entry, e))?;
        let name = file_name(&entry);
        let suffix = if meta.is_dir() { "/" } else { "" };
        let mtime = meta
            .modified()
            .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| "-".to_string());
        lines.push(format!(
            "{} {:>10} {} {}{}",
            mode_string(&meta),
            meta.len(),
            mtime,
            name,
            suffix
        ));
    }
    let mut out = format!("total {}\n", lines.len());
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Copies every regular file directly under `src` into `dest`, keeping names.
/// Subdirectories, symlinks and other non-regular entries are skipped, so a
/// link can never pull in a file from outside `src`. Returns the copied names.
pub fn copy_children(src: &Path, dest: &Path) -> Result<Vec<String>, ExtractError> {
    let mut copied = Vec::new();
    for entry in visible_entries(src)? {
        let meta =
            fs::symlink_metadata(&entry).map_err(|e| ExtractError::io("stat", &entry, e))?;
        let name = file_name(&entry);
        if !meta.is_file() {
            tracing::debug!(path = %entry.display(), "skipping non-regular entry");
            continue;
        }
        let target = dest.join(&name);
        fs::copy(&entry, &target).map_err(|e| ExtractError::io("copy", &entry, e))?;
        tracing::debug!(from = %entry.display(), to = %target.display(), "copied");
        copied.push(name);
    }
    Ok(copied)
}

/// Recursively deletes `path`, or unlinks it when it is a file or symlink.
/// Missing paths are not an error.
pub fn remove_tree(path: &Path) -> Result<(), ExtractError> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(ExtractError::io("stat", path, e)),
    };
    let removed = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match removed {
        Ok(()) => {
            tracing::info!(path = %path.display(), "removed existing destination");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ExtractError::io("remove", path, e)),
    }
}

/// Creates `path` and any missing parents.
pub fn make_dir(path: &Path) -> Result<(), ExtractError> {
    fs::create_dir_all(path).map_err(|e| ExtractError::io("create directory", path, e))
}

/// Moves `file` into `dest_dir`, falling back to copy + delete when a rename
/// would cross filesystems. Returns the new path.
pub fn move_file(file: &Path, dest_dir: &Path) -> Result<PathBuf, ExtractError> {
    let target = dest_dir.join(file_name(file));
    if fs::rename(file, &target).is_err() {
        fs::copy(file, &target).map_err(|e| ExtractError::io("copy", file, e))?;
        fs::remove_file(file).map_err(|e| ExtractError::io("remove", file, e))?;
    }
    Ok(target)
}

fn visible_entries(dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let read = fs::read_dir(dir).map_err(|e| ExtractError::io("read directory", dir, e))?;
    let mut entries = Vec::new();
    for entry in read {
        let entry = entry.map_err(|e| ExtractError::io("read directory", dir, e))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(unix)]
fn mode_string(meta: &fs::Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;

    let kind = if meta.file_type().is_symlink() {
        'l'
    } else if meta.is_dir() {
        'd'
    } else {
        '-'
    };
    let mode = meta.permissions().mode();
    let mut s = String::with_capacity(10);
    s.push(kind);
    for shift in [6u32, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        s.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        s.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        s.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    s
}

#[cfg(not(unix))]
fn mode_string(meta: &fs::Metadata) -> String {
    let kind = if meta.is_dir() { "d" } else { "-" };
    let rw = if meta.permissions().readonly() { "r-" } else { "rw" };
    format!("{kind}{rw}-------")
}
