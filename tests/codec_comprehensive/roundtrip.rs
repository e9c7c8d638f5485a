//! Round-trip Tests
//!
//! decode(encode(x)) == x for representative documents.

use crate::*;

#[test]
fn test_sample_stage_roundtrip() {
    let stage = sample_stage();
    let bytes = encode(&stage).unwrap();
    assert_eq!(decode(&bytes).unwrap(), stage);
}

#[test]
fn test_empty_document_roundtrip() {
    let bytes = encode(&Stage::new()).unwrap();
    let back = decode(&bytes).unwrap();
    assert!(back.symbols.is_empty());
    assert_eq!(back.transform, Transform::IDENTITY);
}

#[test]
fn test_empty_symbol_roundtrip() {
    let stage = Stage::new().with_symbol(Symbol::named("empty"));
    assert_eq!(decode(&encode(&stage).unwrap()).unwrap(), stage);
}

#[test]
fn test_unicode_display_names() {
    let stage = Stage::new().with_symbol(
        Symbol::named("персонаж 🎨").with_child(Timeline::named("歩く")),
    );
    assert_eq!(decode(&encode(&stage).unwrap()).unwrap(), stage);
}

#[test]
fn test_special_floats_survive() {
    let mut line = sample_line(2);
    line.widths[0] = -0.0;
    line.lights[1] = f32::INFINITY;
    line.points[1] = Vec3::new(f32::MIN_POSITIVE, f32::MAX, -f32::MAX);
    let mut symbol = Symbol::named("s").with_child(
        Timeline::named("t").with_frame(Frame::default().with_line(line)),
    );
    symbol.base.opacity = -0.0;

    let stage = Stage::new().with_symbol(symbol);
    let back = decode(&encode(&stage).unwrap()).unwrap();
    assert_eq!(back, stage);
    assert!(back.symbols[0].base.opacity.is_sign_negative());
}

#[test]
fn test_brush_settings_roundtrip() {
    let brush = BrushStyle {
        brush_type: BrushType::Cube,
        brush_mode: BrushMode::Fill,
        is_one_sided: true,
        is_flat: true,
        taper_opacity: true,
        taper_shape: true,
        constant_width: true,
        multi_line: true,
        is_web: true,
        is_object_space_tex: true,
        texture_index: -1,
    };
    let mut line = sample_line(1);
    line.brush = brush;
    let stage = Stage::new().with_symbol(
        Symbol::named("s").with_child(Timeline::named("t").with_frame(Frame::default().with_line(line))),
    );
    let back = decode(&encode(&stage).unwrap()).unwrap();
    let Child::Timeline(t) = &back.symbols[0].children[0] else {
        panic!("expected timeline");
    };
    assert_eq!(t.frames[0].lines[0].brush, brush);
}

#[test]
fn test_encoding_is_deterministic() {
    let stage = sample_stage();
    assert_eq!(encode(&stage).unwrap(), encode(&stage).unwrap());
    assert_eq!(encode(&stage.clone()).unwrap(), encode(&stage).unwrap());
}

#[test]
fn test_reencode_is_stable() {
    let bytes = encode(&sample_stage()).unwrap();
    let again = encode(&decode(&bytes).unwrap()).unwrap();
    assert_eq!(bytes, again);
}
