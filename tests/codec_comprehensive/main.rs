//! Codec Comprehensive Test Suite
//!
//! End-to-end tests of the public facade: documents go through `encode` and
//! `decode` (and the file helpers) exactly as an application would use them.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all codec tests
//! cargo test --test codec_comprehensive
//!
//! # Run only the depth tests
//! cargo test --test codec_comprehensive depth::
//! ```

use flatanim::prelude::*;
use flatanim::{DecodeError, EncodeError, LineSequence, DEFAULT_DISPLAY_NAME, DEFAULT_MAX_DEPTH};

// Test modules
pub mod child_order;
pub mod defaults;
pub mod depth;
pub mod io;
pub mod parallel;
pub mod properties;
pub mod roundtrip;
pub mod truncation;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// A line with `n` distinct samples
pub fn sample_line(n: usize) -> Line {
    let mut line = Line::default();
    for i in 0..n {
        let f = i as f32;
        line.push_sample(
            Vec3::new(f, f * 0.5, -f),
            0.01 + f * 0.001,
            Color::new(f / 10.0, 0.2, 0.3, 1.0),
            0.8,
            Quaternion::new(0.0, 0.0, (f * 0.1).sin(), (f * 0.1).cos()),
            Quaternion::IDENTITY,
        );
    }
    line
}

/// A small but complete document: nested symbols, several timelines,
/// instance frames and non-default playable fields
pub fn sample_stage() -> Stage {
    let mut brush = BrushStyle {
        brush_type: BrushType::Cylinder,
        is_flat: true,
        texture_index: 3,
        ..BrushStyle::default()
    };
    brush.taper_shape = true;

    let mut styled = sample_line(5);
    styled.brush = brush;
    styled.transform = Transform::from_position(Vec3::new(0.0, 0.0, 1.0));

    let walk = Timeline::named("walk")
        .with_frame(Frame::default().with_line(sample_line(3)).with_line(styled))
        .with_frame(Frame {
            transform: Transform::IDENTITY,
            is_instance: true,
            lines: Vec::new(),
        });

    let mut hidden = Timeline::named("shadow");
    hidden.base.is_visible = false;
    hidden.base.opacity = 0.4;
    hidden.base.index_in_symbol = 1;

    let mut character = Symbol::named("character").with_child(walk).with_child(hidden);
    character.base.expanded_in_layer_list = true;
    character.base.transform = Transform::new(
        Vec3::new(1.0, 0.0, 0.0),
        Quaternion::new(0.0, 0.7071, 0.0, 0.7071),
        Vec3::new(2.0, 2.0, 2.0),
    );

    Stage {
        transform: Transform::from_position(Vec3::new(0.0, -1.0, 0.0)),
        symbols: vec![
            character,
            Symbol::named("background")
                .with_child(Symbol::named("sky").with_child(Timeline::named("clouds"))),
        ],
    }
}

/// Run `f` on a thread with a large stack
///
/// Encoding, decoding and comparing recurse once per nesting level.
pub fn with_big_stack<F: FnOnce() + Send + 'static>(f: F) {
    std::thread::Builder::new()
        .stack_size(512 * 1024 * 1024)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap();
}
