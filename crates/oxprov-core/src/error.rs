//! Error taxonomy for the extraction pipeline.

use std::io;
use std::path::PathBuf;

/// Every failure the pipeline can report. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Malformed input: URL without `.git`, missing source path, and so on.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A spawned command ran but exited non-zero (`status` is `None` when killed by a signal).
    #[error("`{command}` failed ({}){}", exit_label(.status), stderr_suffix(.stderr))]
    ExternalTool {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// The program could not be started at all (not installed, not executable).
    #[error("could not run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// Filesystem operation failed.
    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExtractError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ExtractError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

fn exit_label(status: &Option<i32>) -> String {
    match *status {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_tool_display_includes_status_and_stderr() {
        let err = ExtractError::ExternalTool {
            command: "git clone https://example.com/x.git /tmp/c".into(),
            status: Some(128),
            stderr: "fatal: repository not found\n".into(),
        };
        assert_eq!(
            err.to_string(),
            "`git clone https://example.com/x.git /tmp/c` failed (exit status 128): fatal: repository not found"
        );
    }

    #[test]
    fn external_tool_display_signal_no_stderr() {
        let err = ExtractError::ExternalTool {
            command: "git archive".into(),
            status: None,
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "`git archive` failed (terminated by signal)");
    }

    #[test]
    fn io_display_names_action_and_path() {
        let err = ExtractError::io(
            "remove",
            "/x/y",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "remove /x/y: denied");
    }
}
