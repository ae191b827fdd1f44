//! CLI for oxprov.

mod commands;
mod usage;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use oxprov_core::config::{self, OxprovConfig};
use oxprov_core::ExtractMode;
use std::path::PathBuf;

use commands::{run_completions, run_extract, run_show, ExtractOptions};

pub use usage::usage_message;

const EXTRACT_EXAMPLES: &str = "\
Examples:
  oxprov extract https://github.com/joommf/oommf-extension-dmi-cnv.git src
  oxprov extract https://github.com/yuyahagi/oommf-mel.git .";

const SIMPLE_EXAMPLES: &str = "\
Examples:
  oxprov simple https://github.com/joommf/oommf-extension-dmi-cnv.git
  oxprov simple https://github.com/yuyahagi/oommf-mel.git .";

/// Top-level CLI for oxprov.
#[derive(Debug, Parser)]
#[command(name = "oxprov", version)]
#[command(
    about = "Copy OOMMF extension sources from a git repository and record their provenance",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Clone URL, replace <root>/<name> with the files directly under FROMPATH,
    /// and store a zip snapshot of HEAD plus a provenance log next to them.
    #[command(after_help = EXTRACT_EXAMPLES, arg_required_else_help = true)]
    Extract {
        /// Git repository URL (must end in `.git`).
        #[arg(value_name = "URL")]
        url: String,
        /// Directory inside the repository to copy from (`.` for the root).
        #[arg(value_name = "FROMPATH")]
        from_path: String,
        /// Skip the zip snapshot.
        #[arg(long)]
        no_archive: bool,
        /// Extensions root (default from config: oommf/app/oxs/local).
        #[arg(long, value_name = "DIR")]
        extensions_root: Option<PathBuf>,
        /// Parent directory for the temporary clone.
        #[arg(long, value_name = "DIR")]
        work_dir: Option<PathBuf>,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Copy the files directly under FROMPATH (default `src`) into <root>/<name>
    /// without cleaning it first or taking a snapshot.
    #[command(after_help = SIMPLE_EXAMPLES, arg_required_else_help = true)]
    Simple {
        /// Git repository URL (must end in `.git`).
        #[arg(value_name = "URL")]
        url: String,
        /// Directory inside the repository to copy from.
        #[arg(value_name = "FROMPATH")]
        from_path: Option<String>,
        /// Extensions root (default from config).
        #[arg(long, value_name = "DIR")]
        extensions_root: Option<PathBuf>,
        /// Parent directory for the temporary clone.
        #[arg(long, value_name = "DIR")]
        work_dir: Option<PathBuf>,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the provenance log of an installed extension.
    Show {
        /// Extension short name (the repository name without `.git`).
        short_name: String,
        /// Extensions root (default from config).
        #[arg(long, value_name = "DIR")]
        extensions_root: Option<PathBuf>,
    },

    /// Generate a shell completion script on stdout.
    Completions {
        shell: Shell,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            CliCommand::Extract {
                url,
                from_path,
                no_archive,
                extensions_root,
                work_dir,
                json,
            } => {
                let cfg = load_config()?;
                run_extract(
                    &cfg,
                    ExtractOptions {
                        url: &url,
                        from_path: &from_path,
                        mode: ExtractMode::Full {
                            archive: !no_archive,
                        },
                        extensions_root,
                        work_dir,
                        json,
                    },
                )?;
            }
            CliCommand::Simple {
                url,
                from_path,
                extensions_root,
                work_dir,
                json,
            } => {
                let cfg = load_config()?;
                let from_path = from_path.unwrap_or_else(|| cfg.default_from_path.clone());
                run_extract(
                    &cfg,
                    ExtractOptions {
                        url: &url,
                        from_path: &from_path,
                        mode: ExtractMode::Simple,
                        extensions_root,
                        work_dir,
                        json,
                    },
                )?;
            }
            CliCommand::Show {
                short_name,
                extensions_root,
            } => {
                let cfg = load_config()?;
                run_show(&cfg, &short_name, extensions_root)?;
            }
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

fn load_config() -> Result<OxprovConfig> {
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

#[cfg(test)]
mod tests;
