//! Command-line definition.

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the full `flatanim` command tree.
pub fn build_cli() -> Command {
    Command::new("flatanim")
        .about("Inspect, convert and verify flatanim animation documents")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet")
                .help("Log timing and progress details"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Only log warnings and errors"),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .global(true)
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Maximum symbol nesting depth (default 512)"),
        )
        .arg(
            Arg::new("lenient")
                .long("lenient")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Truncate mismatched per-sample vectors instead of rejecting the file"),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print document statistics")
                .arg(input_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print statistics as JSON"),
                ),
        )
        .subcommand(
            Command::new("dump")
                .about("Decode a document and print it as JSON")
                .arg(input_arg())
                .arg(output_arg(false)),
        )
        .subcommand(
            Command::new("pack")
                .about("Encode a JSON document into the binary format")
                .arg(input_arg())
                .arg(output_arg(true)),
        )
        .subcommand(
            Command::new("verify")
                .about("Check that a document decodes and re-encodes to the same tree")
                .arg(input_arg()),
        )
        .subcommand(Command::new("schema").about("Print the table layout of the binary format"))
}

fn input_arg() -> Arg {
    Arg::new("input")
        .required(true)
        .value_name("FILE")
        .help("Input file")
}

fn output_arg(required: bool) -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .required(required)
        .help("Output file")
}
