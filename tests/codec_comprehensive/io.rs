//! File Helper Tests
//!
//! read_stage / write_stage / import_symbol through real temp files.

use crate::*;
use flatanim::io::{stage_from_json, stage_to_json};

#[test]
fn test_write_read_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.flatanim");
    let stage = sample_stage();

    let written = write_stage(&path, &stage).unwrap();
    assert_eq!(written, encode(&stage).unwrap().len());
    assert_eq!(read_stage(&path).unwrap(), stage);
}

#[test]
fn test_import_symbol_wraps_stage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hero_run.flatanim");
    let stage = sample_stage();
    write_stage(&path, &stage).unwrap();

    let root = import_symbol(&path).unwrap();
    assert_eq!(root.base.display_name, "hero_run");
    assert_eq!(root.base.transform, stage.transform);
    assert_eq!(root.children.len(), stage.symbols.len());
    for (child, original) in root.children.iter().zip(&stage.symbols) {
        assert_eq!(child, &Child::Symbol(original.clone()));
    }
}

#[test]
fn test_codec_limits_apply_to_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deep.flatanim");
    let stage = Stage::new().with_symbol(Symbol::named("a").with_child(Symbol::named("b")));
    write_stage(&path, &stage).unwrap();

    let shallow = Codec::builder().max_depth(1).build();
    assert!(shallow.read_stage(&path).unwrap_err().is_malformed());
    assert!(shallow.write_stage(&path, &stage).unwrap_err().is_invalid());
    assert_eq!(Codec::new().read_stage(&path).unwrap(), stage);
}

#[test]
fn test_invalid_document_is_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.flatanim");
    let mut line = sample_line(2);
    line.colors.clear();
    let stage = Stage::new().with_symbol(
        Symbol::named("s").with_child(Timeline::named("t").with_frame(Frame::default().with_line(line))),
    );
    assert!(write_stage(&path, &stage).unwrap_err().is_invalid());
    assert!(!path.exists());
}

#[test]
fn test_json_and_binary_agree() {
    let stage = sample_stage();
    let json = stage_to_json(&stage).unwrap();
    let from_json = stage_from_json(&json).unwrap();
    assert_eq!(encode(&from_json).unwrap(), encode(&stage).unwrap());
}
