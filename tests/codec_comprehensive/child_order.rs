//! Child Order Tests
//!
//! The interleaving of symbols and timelines inside a symbol survives a
//! round trip.

use crate::*;

fn kinds(symbol: &Symbol) -> String {
    symbol
        .children
        .iter()
        .map(|c| if c.is_timeline() { 'T' } else { 'S' })
        .collect()
}

#[test]
fn test_interleaved_children_roundtrip() {
    let symbol = Symbol::named("mixed")
        .with_child(Symbol::named("a"))
        .with_child(Timeline::named("b"))
        .with_child(Symbol::named("c"))
        .with_child(Timeline::named("d"));
    let stage = Stage::new().with_symbol(symbol);

    let back = decode(&encode(&stage).unwrap()).unwrap();
    assert_eq!(kinds(&back.symbols[0]), "STST");
    let names: Vec<_> = back.symbols[0]
        .children
        .iter()
        .map(|c| c.base().display_name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_timelines_first_needs_no_order_vector() {
    let ordered = Symbol::named("x")
        .with_child(Timeline::named("t"))
        .with_child(Symbol::named("s"));
    let reversed = Symbol::named("x")
        .with_child(Symbol::named("s"))
        .with_child(Timeline::named("t"));

    let ordered_bytes = encode(&Stage::new().with_symbol(ordered)).unwrap();
    let reversed_bytes = encode(&Stage::new().with_symbol(reversed.clone())).unwrap();
    assert!(ordered_bytes.len() < reversed_bytes.len());

    let back = decode(&reversed_bytes).unwrap();
    assert_eq!(back.symbols[0], reversed);
}

#[test]
fn test_only_symbols_or_only_timelines() {
    for symbol in [
        Symbol::named("s").with_child(Symbol::named("1")).with_child(Symbol::named("2")),
        Symbol::named("t").with_child(Timeline::named("1")).with_child(Timeline::named("2")),
    ] {
        let stage = Stage::new().with_symbol(symbol);
        assert_eq!(decode(&encode(&stage).unwrap()).unwrap(), stage);
    }
}
