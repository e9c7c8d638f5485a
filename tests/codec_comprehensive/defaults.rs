//! Default Omission Tests
//!
//! Fields equal to their schema default are not written, yet decode back to
//! the default.

use crate::*;

fn stage_with(symbol: Symbol) -> Stage {
    Stage::new().with_symbol(symbol)
}

#[test]
fn test_default_opacity_is_omitted() {
    let default = stage_with(Symbol::named("s"));
    let mut faded = Symbol::named("s");
    faded.base.opacity = 0.5;
    let faded = stage_with(faded);

    let default_bytes = encode(&default).unwrap();
    let faded_bytes = encode(&faded).unwrap();
    assert!(default_bytes.len() < faded_bytes.len());

    let back = decode(&default_bytes).unwrap();
    assert_eq!(back.symbols[0].base.opacity, 1.0);
}

#[test]
fn test_default_name_is_omitted() {
    let named = encode(&stage_with(Symbol::named("layer"))).unwrap();
    let default = encode(&stage_with(Symbol::default())).unwrap();
    assert!(default.len() < named.len());
    assert_eq!(decode(&default).unwrap().symbols[0].base.display_name, "Stage");
}

#[test]
fn test_empty_name_decodes_as_default() {
    let back = decode(&encode(&stage_with(Symbol::named(""))).unwrap()).unwrap();
    assert_eq!(back.symbols[0].base.display_name, DEFAULT_DISPLAY_NAME);
}

#[test]
fn test_identity_transform_is_omitted() {
    let plain = encode(&Stage::new()).unwrap();
    let moved = encode(&Stage {
        transform: Transform::from_position(Vec3::new(0.0, 0.0, 0.1)),
        symbols: Vec::new(),
    })
    .unwrap();
    // 40-byte struct plus its vtable entry
    assert!(moved.len() >= plain.len() + 40);
}

#[test]
fn test_all_playable_defaults_decode() {
    let back = decode(&encode(&stage_with(Symbol::default())).unwrap()).unwrap();
    assert_eq!(back.symbols[0].base, PlayableBase::default());
}

#[test]
fn test_non_default_flags_survive() {
    let mut symbol = Symbol::named("s");
    symbol.base.is_visible = false;
    symbol.base.expanded_in_layer_list = true;
    symbol.base.index_in_symbol = -4;
    let back = decode(&encode(&stage_with(symbol.clone())).unwrap()).unwrap();
    assert_eq!(back.symbols[0], symbol);
}
