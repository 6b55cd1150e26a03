//! Property tests: the writer's output always reads back to an equal
//! value, and the reader never panics on arbitrary text.

use anyedn::lex::tokenize_all;
use anyedn::read::decode_string;
use anyedn::write::encode_string;
use anyedn::{dumps, loads, loads_with, Settings, Value};
use proptest::prelude::*;

fn name() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9.*+!_?$%&=-]{0,8}"
        .prop_filter("reserved words", |s| !matches!(s.as_str(), "true" | "false" | "nil"))
}

fn symbol_text() -> impl Strategy<Value = String> {
    prop_oneof![
        name(),
        (name(), name()).prop_map(|(ns, n)| format!("{ns}/{n}")),
    ]
}

fn tag_name() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9.]{0,8}"
        .prop_filter("tags written natively", |s| !matches!(s.as_str(), "char" | "list"))
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::int),
        any::<f64>().prop_filter("NaN is not equal to itself", |x| !x.is_nan())
            .prop_map(Value::Float),
        any::<String>().prop_map(|s| Value::string(&s)),
        any::<char>().prop_map(Value::Char),
        symbol_text().prop_map(|s| Value::symbol(&s)),
        symbol_text().prop_map(|s| Value::keyword(&s)),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Vector),
            prop::collection::vec(inner.clone(), 0..6)
                .prop_map(|xs| Value::Set(xs.into_iter().collect())),
            prop::collection::vec((inner.clone(), inner.clone()), 0..6)
                .prop_map(|kvs| Value::Map(kvs.into_iter().collect())),
            (tag_name(), inner).prop_map(|(t, v)| Value::tagged(&t, v)),
        ]
    })
}

proptest! {
    #[test]
    fn prop_string_escapes_invert(s in any::<String>()) {
        prop_assert_eq!(decode_string(&encode_string(&s)).unwrap(), s);
    }

    #[test]
    fn prop_values_round_trip(v in value()) {
        let settings = Settings::default().accept_unknown_tags(true);
        let text = dumps(&v).unwrap();
        let back = loads_with(&text, &settings).unwrap();
        prop_assert_eq!(&back, &v);
        prop_assert_eq!(dumps(&back).unwrap(), text);
    }

    #[test]
    fn prop_reader_does_not_panic(s in "[-+#:\\\\;,.()\\[\\]{}\" a-z0-9\n]{0,40}") {
        let _ = tokenize_all(&s);
        let _ = loads(&s);
    }

    #[test]
    fn prop_reader_does_not_panic_on_any_text(s in any::<String>()) {
        let _ = loads(&s);
    }
}
