//! Truncated and Corrupt Buffer Tests
//!
//! Damaged input yields a MalformedDocument error, never a panic.

use crate::*;

#[test]
fn test_every_prefix_is_an_error_or_a_value() {
    let bytes = encode(&sample_stage()).unwrap();
    for len in 0..bytes.len() {
        if let Err(e) = decode(&bytes[..len]) {
            assert!(e.is_malformed(), "prefix {len}: {e}");
        }
    }
}

#[test]
fn test_empty_input() {
    assert!(decode(&[]).unwrap_err().is_malformed());
}

#[test]
fn test_random_garbage() {
    let garbage: Vec<u8> = (0..1024u32).map(|i| (i.wrapping_mul(2_654_435_761) >> 24) as u8).collect();
    if let Err(e) = decode(&garbage) {
        assert!(e.is_malformed());
    }
}

#[test]
fn test_single_byte_corruption_never_panics() {
    let bytes = encode(&sample_stage()).unwrap();
    for at in 0..bytes.len() {
        for value in [0x00, 0x7f, 0xff] {
            let mut damaged = bytes.clone();
            damaged[at] = value;
            let _ = decode(&damaged);
            let _ = Codec::builder().lenient().build().decode(&damaged);
        }
    }
}

#[test]
fn test_lenient_accepts_what_strict_rejects() {
    // The encoder never writes mismatched lengths, so shrink the widths
    // count of a valid buffer in place.
    let mut line = sample_line(3);
    line.widths = vec![0.5, 0.5, 0.5];
    let stage = Stage::new().with_symbol(
        Symbol::named("s").with_child(Timeline::named("t").with_frame(Frame::default().with_line(line))),
    );
    let mut bytes = encode(&stage).unwrap();

    // widths is the only vector of three 0.5 floats
    let pattern: Vec<u8> = [3u32.to_le_bytes(), 0.5f32.to_le_bytes(), 0.5f32.to_le_bytes()].concat();
    let at = bytes
        .windows(pattern.len())
        .position(|w| w == pattern.as_slice())
        .unwrap();
    bytes[at..at + 4].copy_from_slice(&2u32.to_le_bytes());

    let err = decode(&bytes).unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedDocument(DecodeError::ParallelLengthMismatch {
            sequence: LineSequence::Widths,
            expected: 3,
            actual: 2,
        })
    ));

    let back = Codec::builder().lenient().build().decode(&bytes).unwrap();
    let Child::Timeline(t) = &back.symbols[0].children[0] else {
        panic!("expected timeline");
    };
    let line = &t.frames[0].lines[0];
    assert_eq!(line.sample_count(), 2);
    assert!(line.validate().is_ok());
}
