use clap::Parser;
use oxprov_core::logging;
use std::ffi::OsString;

mod cli;

use crate::cli::{usage_message, Cli};

fn main() {
    // Parse before touching the filesystem: a usage error must not create logs or config.
    let args: Vec<OsString> = std::env::args_os().collect();
    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) => match usage_message(&err, &args) {
            Some(message) => {
                eprint!("{message}");
                std::process::exit(2);
            }
            None => err.exit(),
        },
    };

    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("log file unavailable, logging to stderr: {:#}", err);
    }

    if let Err(err) = cli.run() {
        tracing::error!("{:#}", err);
        eprintln!("oxprov error: {:#}", err);
        std::process::exit(1);
    }
}
