//! Depth Robustness Tests
//!
//! Deep nesting fails with a typed error instead of overflowing the stack.

use crate::*;

fn nested(depth: usize) -> Stage {
    let mut symbol = Symbol::named("leaf");
    for i in 1..depth {
        symbol = Symbol::named(format!("level {i}")).with_child(symbol);
    }
    Stage::new().with_symbol(symbol)
}

#[test]
fn test_10000_deep_encode_fails_cleanly() {
    let stage = nested(10_000);
    let err = encode(&stage).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidDocument(EncodeError::DepthLimitExceeded { limit: 512 })
    ));
    drop(stage);
}

#[test]
fn test_depth_at_limit_roundtrips() {
    with_big_stack(|| {
        let stage = nested(DEFAULT_MAX_DEPTH);
        let bytes = encode(&stage).unwrap();
        assert_eq!(decode(&bytes).unwrap().stats().max_depth, DEFAULT_MAX_DEPTH);

        assert!(encode(&nested(DEFAULT_MAX_DEPTH + 1)).is_err());
    });
}

#[test]
fn test_raised_limit_allows_deeper_documents() {
    with_big_stack(|| {
        let stage = nested(2_000);
        let codec = Codec::builder().max_depth(2_000).build();
        let bytes = codec.encode(&stage).unwrap();

        let err = decode(&bytes).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedDocument(DecodeError::DepthLimitExceeded { limit: 512 })
        ));
        assert_eq!(codec.decode(&bytes).unwrap().stats().max_depth, 2_000);
    });
}

#[test]
fn test_stats_on_deep_document() {
    assert_eq!(nested(10_000).stats().max_depth, 10_000);
}
