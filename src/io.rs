//! File import and export.
//!
//! These helpers are the only place where documents meet the filesystem;
//! the codec itself works on byte slices. Loading and building are timed and
//! logged separately so slow files can be attributed to disk or to decoding.

use std::fs;
use std::path::Path;
use std::time::Instant;

use flatanim_core::{CodecLimits, Stage, Symbol};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::Result;

/// Read and decode a document file with default limits.
pub fn read_stage(path: impl AsRef<Path>) -> Result<Stage> {
    read_stage_with(path.as_ref(), &CodecLimits::default())
}

/// Encode a document and write it to a file with default limits.
///
/// Returns the number of bytes written.
pub fn write_stage(path: impl AsRef<Path>, stage: &Stage) -> Result<usize> {
    write_stage_with(path.as_ref(), stage, &CodecLimits::default())
}

/// Read a document file as one root symbol named after the file stem.
///
/// Every top-level symbol of the file becomes a child of the returned
/// symbol, in order.
pub fn import_symbol(path: impl AsRef<Path>) -> Result<Symbol> {
    import_symbol_with(path.as_ref(), &CodecLimits::default())
}

pub(crate) fn read_stage_with(path: &Path, limits: &CodecLimits) -> Result<Stage> {
    let started = Instant::now();
    let bytes = fs::read(path)?;
    debug!(
        "Loading {} bytes from {} in {} ms",
        bytes.len(),
        path.display(),
        started.elapsed().as_millis()
    );

    let started = Instant::now();
    let stage = flatanim_wire::decode_with(&bytes, limits)?;
    debug!(
        "Creating document with {} symbols in {} ms",
        stage.symbols.len(),
        started.elapsed().as_millis()
    );
    Ok(stage)
}

pub(crate) fn write_stage_with(path: &Path, stage: &Stage, limits: &CodecLimits) -> Result<usize> {
    let started = Instant::now();
    let bytes = flatanim_wire::encode_with(stage, limits)?;
    fs::write(path, &bytes)?;
    info!(
        "Exported {} bytes to {} in {} ms",
        bytes.len(),
        path.display(),
        started.elapsed().as_millis()
    );
    Ok(bytes.len())
}

pub(crate) fn import_symbol_with(path: &Path, limits: &CodecLimits) -> Result<Symbol> {
    let stage = read_stage_with(path, limits)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(stage.into_root_symbol(name))
}

/// Render a document as pretty-printed JSON.
pub fn stage_to_json(stage: &Stage) -> Result<String> {
    Ok(serde_json::to_string_pretty(stage)?)
}

/// Parse a document from JSON; missing fields take their defaults.
///
/// Nesting is not limited here: each symbol level is three JSON levels, so
/// the parser's recursion limit is lifted and the stack grows on demand.
pub fn stage_from_json(json: &str) -> Result<Stage> {
    let mut de = serde_json::Deserializer::from_str(json);
    de.disable_recursion_limit();
    let stage = Stage::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(stage)
}
