//! flatanim CLI: inspect and convert animation documents without a host.
//!
//! - `flatanim inspect FILE`: node and sample counts
//! - `flatanim dump FILE [-o OUT]`: binary → JSON
//! - `flatanim pack FILE -o OUT`: JSON → binary
//! - `flatanim verify FILE`: decode, re-encode and compare
//! - `flatanim schema`: print the table layout

mod commands;
mod parse;

use std::fmt::Write as _;
use std::fs;
use std::process;

use anyhow::{bail, Context, Result};
use flatanim::schema::{FieldKind, TABLES};
use flatanim::Codec;
use tracing::{debug, info, warn};

use commands::build_cli;
use parse::{matches_to_invocation, CliAction, Invocation};

fn main() {
    let matches = build_cli().get_matches();

    let invocation = match matches_to_invocation(&matches) {
        Ok(inv) => inv,
        Err(e) => {
            eprintln!("(error) {}", e);
            process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(invocation.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&invocation) {
        eprintln!("(error) {:#}", e);
        process::exit(1);
    }
}

fn run(invocation: &Invocation) -> Result<()> {
    let codec = Codec::with_limits(invocation.limits.clone());
    match &invocation.action {
        CliAction::Inspect { input, json } => {
            let stage = codec
                .read_stage(input)
                .with_context(|| format!("reading {}", input.display()))?;
            let stats = stage.stats();
            if *json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{}", input.display());
                println!("  symbols:   {}", stats.symbols);
                println!("  timelines: {}", stats.timelines);
                println!("  frames:    {}", stats.frames);
                println!("  lines:     {}", stats.lines);
                println!("  samples:   {}", stats.samples);
                println!("  max depth: {}", stats.max_depth);
            }
        }
        CliAction::Dump { input, output } => {
            let stage = codec
                .read_stage(input)
                .with_context(|| format!("reading {}", input.display()))?;
            let json = flatanim::io::stage_to_json(&stage)?;
            match output {
                Some(path) => {
                    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
                    info!("Wrote JSON to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        CliAction::Pack { input, output } => {
            let text = fs::read_to_string(input)
                .with_context(|| format!("reading {}", input.display()))?;
            let stage = flatanim::io::stage_from_json(&text)
                .with_context(|| format!("parsing {}", input.display()))?;
            let written = codec
                .write_stage(output, &stage)
                .with_context(|| format!("writing {}", output.display()))?;
            debug!("Packed {} symbols into {} bytes", stage.symbols.len(), written);
        }
        CliAction::Verify { input } => {
            let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
            let stage = codec.decode(&bytes)?;
            let reencoded = codec.encode(&stage)?;
            // Compare bytes, not trees: NaN samples never compare equal.
            let again = codec.encode(&codec.decode(&reencoded)?)?;
            if again != reencoded {
                bail!("{}: document changed after re-encoding", input.display());
            }
            if reencoded != bytes {
                // Same tree, different layout: written by another encoder.
                warn!(
                    "{}: re-encoded layout differs ({} → {} bytes)",
                    input.display(),
                    bytes.len(),
                    reencoded.len()
                );
            }
            println!("{}: ok", input.display());
        }
        CliAction::Schema => print!("{}", format_schema()),
    }
    Ok(())
}

fn format_schema() -> String {
    let mut out = String::new();
    for table in TABLES {
        let _ = writeln!(out, "table {} {{", table.name);
        for field in table.fields {
            let _ = writeln!(
                out,
                "  {:>2}  {:<24} {:<20} = {}",
                field.slot,
                field.name,
                kind_name(field.kind),
                field.default
            );
        }
        let _ = writeln!(out, "}}");
    }
    out
}

fn kind_name(kind: FieldKind) -> String {
    match kind {
        FieldKind::Bool => "bool".to_string(),
        FieldKind::Int => "int".to_string(),
        FieldKind::Float => "float".to_string(),
        FieldKind::String => "string".to_string(),
        FieldKind::Struct(name) | FieldKind::Table(name) => name.to_string(),
        FieldKind::ScalarVector(name)
        | FieldKind::StructVector(name)
        | FieldKind::TableVector(name) => format!("[{}]", name),
    }
}
