//! `oxprov extract` and `oxprov simple`: run the pipeline and report what landed where.

use anyhow::Result;
use oxprov_core::config::OxprovConfig;
use oxprov_core::{extract, ExtractMode, ExtractReport, ExtractRequest, GitCli, RepoRef};
use std::path::PathBuf;

use super::resolve_root;

/// Arguments shared by both extraction subcommands.
#[derive(Debug)]
pub struct ExtractOptions<'a> {
    pub url: &'a str,
    pub from_path: &'a str,
    pub mode: ExtractMode,
    pub extensions_root: Option<PathBuf>,
    pub work_dir: Option<PathBuf>,
    pub json: bool,
}

pub fn run_extract(cfg: &OxprovConfig, opts: ExtractOptions<'_>) -> Result<()> {
    let repo = RepoRef::parse(opts.url)?;
    let root = resolve_root(opts.extensions_root, cfg)?;
    let work_dir = opts.work_dir.or_else(|| cfg.work_dir.clone());
    let req = ExtractRequest::new(repo, opts.from_path, root, opts.mode).with_work_dir(work_dir);

    let report = extract(&req, &GitCli::new(cfg.git_program.as_str()))?;
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", summary(&report));
    }
    Ok(())
}

fn summary(report: &ExtractReport) -> String {
    let mut out = format!(
        "Extracted {} ({}) into {}\n",
        report.short_name,
        short_hash(&report.commit),
        report.destination.display()
    );
    out.push_str(&format!(
        "  copied {} file(s): {}\n",
        report.copied_files.len(),
        report.copied_files.join(", ")
    ));
    out.push_str(&format!("  provenance log: {}\n", report.log_path.display()));
    if let Some(archive) = &report.archive_path {
        out.push_str(&format!("  snapshot: {}\n", archive.display()));
    }
    if let Some(sha) = &report.archive_sha256 {
        out.push_str(&format!("  snapshot sha256: {sha}\n"));
    }
    out
}

fn short_hash(hash: &str) -> &str {
    hash.get(..12).unwrap_or(hash)
}
