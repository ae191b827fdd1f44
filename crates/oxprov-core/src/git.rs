//! Version-control collaborator.
//!
//! The pipeline only needs three things from git: clone, archive a revision,
//! and describe the last commit. [`Vcs`] is the seam; [`GitCli`] drives the
//! `git` binary with argument lists (never a shell string).

use crate::error::ExtractError;
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

/// Commit the clone checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    pub hash: String,
}

pub trait Vcs {
    /// Clone `url` into `dest` (which must not exist yet).
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<CommitRef, ExtractError>;

    /// Write a zip of `rev`'s full tree to `out_file`.
    fn archive(&self, repo_dir: &Path, rev: &str, out_file: &Path) -> Result<(), ExtractError>;

    /// Author, date and message of the most recent commit on the checked-out branch.
    fn last_commit_info(&self, repo_dir: &Path) -> Result<String, ExtractError>;
}

/// [`Vcs`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitCli {
    pub fn new(program: impl Into<String>) -> Self {
        GitCli {
            program: program.into(),
        }
    }

    fn command(&self, repo_dir: Option<&Path>) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(dir) = repo_dir {
            cmd.arg("-C").arg(dir);
        }
        // Fail instead of blocking on a credential prompt.
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd
    }
}

impl Vcs for GitCli {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<CommitRef, ExtractError> {
        let mut cmd = self.command(None);
        cmd.arg("clone").arg("--quiet").arg("--").arg(url).arg(dest);
        run(&mut cmd)?;

        let mut rev = self.command(Some(dest));
        rev.args(["rev-parse", "HEAD"]);
        let out = run(&mut rev)?;
        Ok(CommitRef {
            hash: String::from_utf8_lossy(&out.stdout).trim().to_string(),
        })
    }

    fn archive(&self, repo_dir: &Path, rev: &str, out_file: &Path) -> Result<(), ExtractError> {
        let mut cmd = self.command(Some(repo_dir));
        cmd.args(["archive", "--format=zip"])
            .arg("--output")
            .arg(out_file)
            .arg(rev);
        run(&mut cmd)?;
        Ok(())
    }

    fn last_commit_info(&self, repo_dir: &Path) -> Result<String, ExtractError> {
        let mut cmd = self.command(Some(repo_dir));
        cmd.args(["log", "-1", "HEAD"]);
        let out = run(&mut cmd)?;
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

/// Runs `cmd` to completion, capturing output. Non-zero exit becomes
/// [`ExtractError::ExternalTool`] with the command line and stderr.
pub(crate) fn run(cmd: &mut Command) -> Result<Output, ExtractError> {
    let command_line = display_command(cmd);
    tracing::debug!(command = %command_line, "running");
    let output = cmd.output().map_err(|source| ExtractError::Spawn {
        command: command_line.clone(),
        source,
    })?;
    if !output.status.success() {
        return Err(ExtractError::ExternalTool {
            command: command_line,
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(output)
}

/// Human-readable argv for diagnostics. Not meant to be fed back to a shell.
fn display_command(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(OsStr::to_string_lossy)
        .collect::<Vec<_>>()
        .join(" ")
}
