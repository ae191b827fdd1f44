//! Builds a throwaway local git repository for integration tests.
//!
//! The repository directory is named `foo-ext.git` so its path is a valid
//! clone URL without any network access.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// True when a `git` executable can be run. Tests skip themselves otherwise.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args([
            "-c",
            "user.name=Fixture Author",
            "-c",
            "user.email=fixture@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .status()
        .expect("run git");
    assert!(status.success(), "git {args:?} failed");
}

/// Creates `<parent>/foo-ext.git` with two commits and returns its path.
///
/// Layout at HEAD:
/// ```text
/// README.md
/// src/dmi.cc
/// src/dmi.h
/// src/tests/t.mif
/// examples/demo.mif
/// ```
pub fn create(parent: &Path) -> PathBuf {
    let repo = parent.join("foo-ext.git");
    fs::create_dir_all(&repo).unwrap();
    git(&repo, &["init", "--quiet"]);

    fs::write(repo.join("README.md"), "# foo-ext\n").unwrap();
    commit_all(&repo, "Initial import");

    fs::create_dir_all(repo.join("src").join("tests")).unwrap();
    fs::create_dir_all(repo.join("examples")).unwrap();
    fs::write(repo.join("src").join("dmi.cc"), "// dmi term\n").unwrap();
    fs::write(repo.join("src").join("dmi.h"), "// dmi header\n").unwrap();
    fs::write(repo.join("src").join("tests").join("t.mif"), "# test\n").unwrap();
    fs::write(repo.join("examples").join("demo.mif"), "# demo\n").unwrap();
    commit_all(&repo, "Add DMI energy term");

    repo
}

/// Stages everything in `repo` and commits it.
pub fn commit_all(repo: &Path, message: &str) {
    git(repo, &["add", "-A"]);
    git(repo, &["commit", "--quiet", "-m", message]);
}

/// True when an `unzip` executable can be run.
pub fn unzip_available() -> bool {
    Command::new("unzip")
        .arg("-v")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Extracts `archive` into `dest` with `unzip`.
pub fn unzip(archive: &Path, dest: &Path) {
    let status = Command::new("unzip")
        .arg("-q")
        .arg(archive)
        .arg("-d")
        .arg(dest)
        .status()
        .expect("run unzip");
    assert!(status.success(), "unzip {} failed", archive.display());
}

/// Every regular file under `root` (excluding `.git`), keyed by `/`-joined relative path.
pub fn tree_files(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut out = BTreeMap::new();
    collect(root, root, &mut out);
    out
}

fn collect(root: &Path, dir: &Path, out: &mut BTreeMap<String, Vec<u8>>) {
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        if entry.file_name() == ".git" {
            continue;
        }
        let path = entry.path();
        if entry.file_type().unwrap().is_dir() {
            collect(root, &path, out);
        } else {
            let rel = path
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            out.insert(rel, fs::read(&path).unwrap());
        }
    }
}
