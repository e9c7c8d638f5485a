//! ArgMatches → CliAction conversion.
//!
//! Global flags may appear before or after the subcommand; clap propagates
//! them into the subcommand's matches, so they are read from there.

use std::path::PathBuf;

use clap::ArgMatches;
use flatanim::CodecLimits;
use tracing::Level;

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    /// Print document statistics.
    Inspect { input: PathBuf, json: bool },
    /// Decode a document to JSON.
    Dump {
        input: PathBuf,
        output: Option<PathBuf>,
    },
    /// Encode a JSON document.
    Pack { input: PathBuf, output: PathBuf },
    /// Round-trip a document and compare.
    Verify { input: PathBuf },
    /// Print the binary layout.
    Schema,
}

/// Parsed invocation: the action plus the settings shared by every command.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub action: CliAction,
    pub limits: CodecLimits,
    pub log_level: Level,
}

/// Convert clap ArgMatches into an Invocation.
pub fn matches_to_invocation(matches: &ArgMatches) -> Result<Invocation, String> {
    let (sub_name, sub) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    let action = match sub_name {
        "inspect" => CliAction::Inspect {
            input: path_arg(sub, "input")?,
            json: sub.get_flag("json"),
        },
        "dump" => CliAction::Dump {
            input: path_arg(sub, "input")?,
            output: sub.get_one::<String>("output").map(PathBuf::from),
        },
        "pack" => CliAction::Pack {
            input: path_arg(sub, "input")?,
            output: path_arg(sub, "output")?,
        },
        "verify" => CliAction::Verify {
            input: path_arg(sub, "input")?,
        },
        "schema" => CliAction::Schema,
        other => return Err(format!("Unknown command: {}", other)),
    };

    Ok(Invocation {
        action,
        limits: limits_from(sub),
        log_level: log_level_from(sub),
    })
}

fn path_arg(matches: &ArgMatches, name: &str) -> Result<PathBuf, String> {
    matches
        .get_one::<String>(name)
        .map(PathBuf::from)
        .ok_or_else(|| format!("Missing argument: {}", name))
}

fn limits_from(matches: &ArgMatches) -> CodecLimits {
    let mut limits = CodecLimits::default();
    if let Some(depth) = matches.get_one::<usize>("max-depth") {
        limits = limits.with_max_depth(*depth);
    }
    if matches.get_flag("lenient") {
        limits = limits.lenient();
    }
    limits
}

fn log_level_from(matches: &ArgMatches) -> Level {
    if matches.get_flag("verbose") {
        Level::DEBUG
    } else if matches.get_flag("quiet") {
        Level::WARN
    } else {
        Level::INFO
    }
}
