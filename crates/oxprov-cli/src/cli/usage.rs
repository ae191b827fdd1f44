//! Usage text for rejected command lines.
//!
//! clap's own error for a missing or extra positional is a two-line hint.
//! For `extract` and `simple` a wrong argument count instead prints the
//! subcommand's full help (which carries example invocations) followed by
//! clap's diagnostic and how many arguments were received.

use clap::error::ErrorKind;
use clap::CommandFactory;
use std::ffi::OsString;

use super::Cli;

/// Options of `extract`/`simple` that consume the following argument.
const VALUE_OPTIONS: &[&str] = &["--extensions-root", "--work-dir"];

/// Positional count a subcommand accepts: `(min, max)`.
fn expected_positionals(subcommand: &str) -> Option<(usize, usize)> {
    match subcommand {
        "extract" => Some((2, 2)),
        "simple" => Some((1, 2)),
        _ => None,
    }
}

/// Full usage message when `err` stems from a wrong positional count on
/// `extract` or `simple`; `None` means clap's own rendering should be used.
pub fn usage_message(err: &clap::Error, args: &[OsString]) -> Option<String> {
    if !matches!(
        err.kind(),
        ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument
    ) {
        return None;
    }
    let args: Vec<String> = args
        .iter()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let sub_index = args.iter().position(|a| !a.starts_with('-'))?;
    let subcommand = args[sub_index].as_str();
    let (min, max) = expected_positionals(subcommand)?;
    let positionals = positionals(&args[sub_index + 1..]);
    if (min..=max).contains(&positionals.len()) {
        return None;
    }

    let mut cmd = Cli::command();
    cmd.build();
    let help = cmd.find_subcommand_mut(subcommand)?.render_long_help();

    let need = if min == max {
        min.to_string()
    } else {
        format!("{min} or {max}")
    };
    Some(format!(
        "{help}\n{}\nReceived {} argument(s) {:?}, but `oxprov {subcommand}` needs {need}.\n",
        err.render(),
        positionals.len(),
        positionals
    ))
}

fn positionals(args: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--" {
            out.extend(iter.by_ref().cloned());
            break;
        }
        if arg.starts_with('-') && arg.len() > 1 {
            if VALUE_OPTIONS.contains(&arg.as_str()) {
                iter.next();
            }
            continue;
        }
        out.push(arg.clone());
    }
    out
}
