//! Property tests for parse/serialize round trips and structural equality

use jsondom::{Map, Value};
use proptest::prelude::*;

/// Generate an arbitrary finite number; NaN and infinity have no text representation
fn arb_number() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<i32>().prop_map(f64::from),
        any::<f64>().prop_filter("finite", |num| num.is_finite()),
    ]
}

/// Generate an arbitrary document, nesting stays well below the default depth limit
fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        arb_number().prop_map(Value::Number),
        any::<String>().prop_map(Value::String),
    ];

    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::vec((any::<String>(), inner), 0..8)
                .prop_map(|members| Value::Object(members.into_iter().collect::<Map>())),
        ]
    })
}

// rebuilds every object of the tree with its members in reverse insertion order
fn reverse_members(val: &Value) -> Value {
    match val {
        Value::Array(values) => Value::Array(values.iter().map(reverse_members).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .rev()
                .map(|(key, val)| (key.clone(), reverse_members(val)))
                .collect(),
        ),
        other => other.clone(),
    }
}

proptest! {
    #[test]
    fn round_trip(val in arb_value()) {
        let text = val.serialize();
        let parsed = jsondom::from_str(&text);

        prop_assert_eq!(parsed, Ok(val));
    }

    #[test]
    fn serialization_is_idempotent(val in arb_value()) {
        let text = val.serialize();
        let parsed = jsondom::from_str(&text).unwrap();

        prop_assert_eq!(parsed.serialize(), text);
    }

    #[test]
    fn equality_is_reflexive_and_symmetric(a in arb_value(), b in arb_value()) {
        prop_assert_eq!(&a, &a.clone());
        prop_assert_eq!(a == b, b == a);
    }

    #[test]
    fn member_order_is_irrelevant(val in arb_value()) {
        let reversed = reverse_members(&val);

        prop_assert_eq!(&reversed, &val);
        prop_assert_eq!(reversed.serialize(), val.serialize());
    }

    #[test]
    fn arbitrary_input_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = jsondom::from_slice(&bytes);
    }
}
