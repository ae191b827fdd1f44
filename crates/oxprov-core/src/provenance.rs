//! Provenance log: where copied extension sources came from.

use chrono::{DateTime, Local};

/// asctime-style timestamp, e.g. `Mon Oct 19 14:03:07 2026`.
pub const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Log file name used by the full (archiving) extraction.
pub fn log_file_name(short_name: &str) -> String {
    format!("provenance-{short_name}.log")
}

/// Log file name used by the simplified extraction.
pub fn simple_log_file_name(short_name: &str) -> String {
    format!("extension-provenance-{short_name}.log")
}

/// Everything the log records. Rendered once and written; not kept around.
#[derive(Debug, Clone)]
pub struct ProvenanceRecord {
    pub url: String,
    pub short_name: String,
    /// `None` when no snapshot was taken; drops the archive lines.
    pub archive_name: Option<String>,
    pub cloned_on: DateTime<Local>,
    pub from_path: String,
    pub last_commit: String,
    pub file_list: String,
}

impl ProvenanceRecord {
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("== git-repo-url: {}\n", self.url));
        out.push_str(&format!("== repo-name: {}\n", self.short_name));
        if let Some(archive) = &self.archive_name {
            out.push_str(&format!("== snap-shot-of-repo: {archive}\n"));
        }
        out.push_str(&format!(
            "== cloned-on-date: {}\n",
            self.cloned_on.format(TIMESTAMP_FORMAT)
        ));
        out.push_str(&format!(
            "== copied-files-from-path-in-repo: {}\n",
            with_trailing_slash(&self.from_path)
        ));
        out.push_str("last commit:\n");
        out.push_str(&self.last_commit);
        out.push('\n');
        out.push_str("== src file-list:\n");
        out.push_str(&self.file_list);
        out.push('\n');
        if let Some(archive) = &self.archive_name {
            out.push_str(&format!(
                "== see contents of {archive} for additional info, examples, etc.\n"
            ));
        }
        out
    }
}

/// Parses the `cloned-on-date` field back out of a rendered log.
pub fn parse_cloned_on(log: &str) -> Option<chrono::NaiveDateTime> {
    let value = log
        .lines()
        .find_map(|l| l.strip_prefix("== cloned-on-date: "))?;
    chrono::NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).ok()
}

fn with_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}
