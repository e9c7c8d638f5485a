//! Parallel Vector Tests
//!
//! The six per-sample vectors of a Line must share one length.

use crate::*;

fn stage_with_line(line: Line) -> Stage {
    Stage::new().with_symbol(
        Symbol::named("s").with_child(Timeline::named("t").with_frame(Frame::default().with_line(line))),
    )
}

#[test]
fn test_points_3_widths_2_rejected() {
    let mut line = sample_line(3);
    line.widths.truncate(2);
    let err = encode(&stage_with_line(line)).unwrap_err();
    assert!(err.is_invalid());
    match err {
        Error::InvalidDocument(EncodeError::ParallelLengthMismatch {
            sequence,
            expected,
            actual,
        }) => {
            assert_eq!(sequence, LineSequence::Widths);
            assert_eq!(expected, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_every_sequence_is_checked() {
    let truncate: [fn(&mut Line); 5] = [
        |l| l.widths.truncate(3),
        |l| l.colors.truncate(3),
        |l| l.lights.truncate(3),
        |l| l.rotations.truncate(3),
        |l| l.cam_orientations.truncate(3),
    ];
    for cut in truncate {
        let mut line = sample_line(4);
        cut(&mut line);
        assert!(encode(&stage_with_line(line)).unwrap_err().is_invalid());
    }
}

#[test]
fn test_longer_sequence_rejected() {
    let mut line = sample_line(2);
    line.colors.push(Color::WHITE);
    assert!(encode(&stage_with_line(line)).is_err());
}

#[test]
fn test_samples_without_points_rejected() {
    let mut line = Line::default();
    line.lights.push(1.0);
    assert!(encode(&stage_with_line(line)).is_err());
}

#[test]
fn test_empty_line_roundtrip() {
    let stage = stage_with_line(Line::default());
    assert_eq!(decode(&encode(&stage).unwrap()).unwrap(), stage);
}

#[test]
fn test_document_validate_matches_encoder() {
    let mut line = sample_line(3);
    line.rotations.clear();
    let stage = stage_with_line(line);
    assert!(stage.validate().is_err());
    assert!(encode(&stage).is_err());
    assert!(sample_stage().validate().is_ok());
}
