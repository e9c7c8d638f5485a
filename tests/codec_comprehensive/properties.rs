//! Property-based round-trip tests.

use proptest::prelude::*;

use crate::*;

/// Finite f32s; NaN would break `PartialEq` on the decoded tree.
fn finite() -> impl Strategy<Value = f32> {
    any::<f32>().prop_filter("finite", |f| f.is_finite())
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (finite(), finite(), finite()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn arb_quat() -> impl Strategy<Value = Quaternion> {
    (finite(), finite(), finite(), finite()).prop_map(|(x, y, z, w)| Quaternion::new(x, y, z, w))
}

fn arb_color() -> impl Strategy<Value = Color> {
    (finite(), finite(), finite(), finite()).prop_map(|(r, g, b, a)| Color::new(r, g, b, a))
}

fn arb_transform() -> impl Strategy<Value = Transform> {
    prop_oneof![
        Just(Transform::IDENTITY),
        (arb_vec3(), arb_quat(), arb_vec3()).prop_map(|(p, r, s)| Transform::new(p, r, s)),
    ]
}

fn arb_brush() -> impl Strategy<Value = BrushStyle> {
    (any::<u8>(), any::<u8>(), any::<[bool; 8]>(), any::<i32>()).prop_map(|(t, m, f, tex)| {
        BrushStyle {
            brush_type: BrushType::from_u8(t),
            brush_mode: BrushMode::from_u8(m),
            is_one_sided: f[0],
            is_flat: f[1],
            taper_opacity: f[2],
            taper_shape: f[3],
            constant_width: f[4],
            multi_line: f[5],
            is_web: f[6],
            is_object_space_tex: f[7],
            texture_index: tex,
        }
    })
}

fn arb_line() -> impl Strategy<Value = Line> {
    (
        arb_transform(),
        arb_brush(),
        prop::collection::vec((arb_vec3(), finite(), arb_color(), finite(), arb_quat(), arb_quat()), 0..6),
    )
        .prop_map(|(transform, brush, samples)| {
            let mut line = Line {
                transform,
                brush,
                ..Line::default()
            };
            for (p, w, c, l, r, o) in samples {
                line.push_sample(p, w, c, l, r, o);
            }
            line
        })
}

fn arb_base() -> impl Strategy<Value = PlayableBase> {
    // Empty names are stored as the default name, so they do not round-trip.
    ("[a-zA-Z0-9 _-]{1,12}", arb_transform(), finite(), any::<bool>(), any::<bool>(), any::<i32>())
        .prop_map(|(name, transform, opacity, visible, expanded, index)| PlayableBase {
            display_name: name,
            transform,
            opacity,
            is_visible: visible,
            expanded_in_layer_list: expanded,
            index_in_symbol: index,
        })
}

fn arb_frame() -> impl Strategy<Value = Frame> {
    (arb_transform(), any::<bool>(), prop::collection::vec(arb_line(), 0..3)).prop_map(
        |(transform, is_instance, lines)| Frame {
            transform,
            is_instance,
            lines,
        },
    )
}

fn arb_timeline() -> impl Strategy<Value = Timeline> {
    (arb_base(), prop::collection::vec(arb_frame(), 0..3))
        .prop_map(|(base, frames)| Timeline { base, frames })
}

fn arb_symbol() -> impl Strategy<Value = Symbol> {
    let leaf = (arb_base(), prop::collection::vec(arb_timeline(), 0..3)).prop_map(
        |(base, timelines)| Symbol {
            base,
            children: timelines.into_iter().map(Child::Timeline).collect(),
        },
    );
    leaf.prop_recursive(4, 24, 4, |inner| {
        (
            arb_base(),
            prop::collection::vec(
                prop_oneof![
                    inner.prop_map(Child::Symbol),
                    arb_timeline().prop_map(Child::Timeline),
                ],
                0..4,
            ),
        )
            .prop_map(|(base, children)| Symbol { base, children })
    })
}

fn arb_stage() -> impl Strategy<Value = Stage> {
    (arb_transform(), prop::collection::vec(arb_symbol(), 0..3))
        .prop_map(|(transform, symbols)| Stage { transform, symbols })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stage_roundtrip(stage in arb_stage()) {
        let bytes = encode(&stage).expect("encoding should succeed");
        let decoded = decode(&bytes).expect("decoding should succeed");
        prop_assert_eq!(stage, decoded);
    }

    #[test]
    fn encoding_is_deterministic(stage in arb_stage()) {
        prop_assert_eq!(encode(&stage).unwrap(), encode(&stage).unwrap());
    }

    #[test]
    fn truncated_buffers_never_panic(stage in arb_stage(), cut in any::<prop::sample::Index>()) {
        let bytes = encode(&stage).unwrap();
        let len = cut.index(bytes.len() + 1);
        if let Err(e) = decode(&bytes[..len]) {
            prop_assert!(e.is_malformed());
        }
    }
}
