//! Property-based tests for the transform pipeline
//!
//! Trimming, casing and rounding must be idempotent, and an intersection
//! must transform exactly like its parts applied in sequence.

use contour_core::prelude::*;
use proptest::prelude::*;
use serde_json::{json, Value};

fn casing_strategy() -> impl Strategy<Value = Casing> {
    prop_oneof![
        Just(Casing::Lower),
        Just(Casing::Upper),
        Just(Casing::Capitalize),
        Just(Casing::KebabCase),
        Just(Casing::KebabLowerCase),
    ]
}

fn rounding_strategy() -> impl Strategy<Value = Rounding> {
    prop_oneof![Just(Rounding::Ceil), Just(Rounding::Floor), Just(Rounding::Round)]
}

/// Strategy for arbitrary JSON values with controlled complexity
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 @.]{0,20}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::hash_map("[a-c]", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_trim_is_idempotent(input in "[ \t]{0,3}[a-zA-Z ]{0,20}[ \t]{0,3}") {
        let schema = string();
        let once = schema.normalize(json!(input));
        prop_assert_eq!(schema.normalize(once.clone()), once);
    }

    #[test]
    fn prop_casing_is_idempotent(
        input in "[a-zA-Z0-9 _-]{0,24}",
        casing in casing_strategy()
    ) {
        let schema = string().case(casing).expect("fresh schema");
        let once = schema.normalize(json!(input));
        prop_assert_eq!(schema.normalize(once.clone()), once);
    }

    #[test]
    fn prop_rounding_is_idempotent(
        input in -1.0e6f64..1.0e6,
        rounding in rounding_strategy()
    ) {
        let schema = number().float().and_then(|s| s.round(rounding)).expect("fresh schema");
        let once = schema.normalize(json!(input));
        prop_assert_eq!(schema.normalize(once.clone()), once.clone());
        prop_assert!(once.as_f64().map_or(false, |n| n.fract() == 0.0));
    }

    #[test]
    fn prop_rounding_keeps_integers(
        signed in any::<i64>(),
        unsigned in any::<u64>(),
        rounding in rounding_strategy()
    ) {
        let schema = number().round(rounding).expect("fresh schema");
        prop_assert_eq!(schema.normalize(json!(signed)), json!(signed));
        prop_assert_eq!(schema.normalize(json!(unsigned)), json!(unsigned));
    }

    #[test]
    fn prop_and_transform_is_sequential(
        input in "[ ]{0,2}[a-zA-Z ]{0,16}",
        first in casing_strategy(),
        second in casing_strategy()
    ) {
        let a = string().case(first).expect("fresh schema").boxed();
        let b = string().case(second).expect("fresh schema").boxed();
        let both = and(vec![a.clone(), b.clone()]).expect("two parts");
        let ctx = TransformationContext::default();

        prop_assert_eq!(
            both.transform(Some(json!(input.clone())), &ctx),
            b.transform(a.transform(Some(json!(input)), &ctx), &ctx)
        );
    }

    #[test]
    fn prop_validation_never_panics(input in json_value_strategy()) {
        let schema = object([
            ("a", or(vec![string().boxed(), array(number()).boxed()]).expect("two branches").boxed()),
            ("b", mapped(string(), boolean()).optional().expect("fresh schema").boxed()),
            ("c", tuple(vec![email().boxed(), date().nullable().expect("fresh schema").boxed()]).boxed()),
        ]);
        let _ = schema.check(&input);
        let _ = schema.validate(Some(&input), &ValidationContext::collect_all());
        let _ = schema.normalize(input);
    }

    #[test]
    fn prop_collect_all_finds_at_least_abort_early(input in json_value_strategy()) {
        let schema = object([
            ("a", string().boxed()),
            ("b", number().boxed()),
            ("c", boolean().optional().expect("fresh schema").boxed()),
        ]);
        let early = schema.check(&input).err().map_or(0, |issue| issue.leaf_count());
        let all = schema
            .validate(Some(&input), &ValidationContext::collect_all())
            .err()
            .map_or(0, |issue| issue.leaf_count());
        prop_assert!(all >= early);
    }
}
