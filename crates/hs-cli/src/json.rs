use hs_core::HostValue;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde_json::{Number, Value};

/// Reads a JSON document into the host value model. Arrays become tuples and
/// objects become objects, since JSON declares no element types. Object keys
/// arrive in ascending order: `serde_json` keeps objects in a sorted map.
pub(crate) fn json_to_host(value: Value) -> HostValue {
    match value {
        Value::Null => HostValue::Null,
        Value::Bool(value) => HostValue::Bool(value),
        Value::Number(number) => number_to_host(&number),
        Value::String(value) => HostValue::String(value),
        Value::Array(values) => HostValue::Tuple(values.into_iter().map(json_to_host).collect()),
        Value::Object(entries) => HostValue::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key, json_to_host(value)))
                .collect::<IndexMap<_, _>>(),
        ),
    }
}

fn number_to_host(number: &Number) -> HostValue {
    if let Some(value) = number.as_i64() {
        return HostValue::Int64(value);
    }
    if let Some(value) = number.as_u64() {
        return HostValue::BigNumber(Decimal::from(value));
    }
    number
        .as_f64()
        .map(HostValue::Float64)
        .unwrap_or(HostValue::Null)
}

pub(crate) fn host_to_json(value: &HostValue) -> Value {
    match value {
        HostValue::Null | HostValue::Unknown => Value::Null,
        HostValue::Bool(value) => Value::Bool(*value),
        HostValue::Int64(value) => Value::from(*value),
        HostValue::Float64(value) => Number::from_f64(*value)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        HostValue::BigNumber(value) => {
            let text = value.normalize().to_string();
            text.parse::<Number>()
                .map(Value::Number)
                .unwrap_or(Value::String(text))
        }
        HostValue::String(value) => Value::String(value.clone()),
        HostValue::List(list) => Value::Array(list.elements().iter().map(host_to_json).collect()),
        HostValue::Tuple(elements) => Value::Array(elements.iter().map(host_to_json).collect()),
        HostValue::Map(map) => Value::Object(
            map.entries()
                .iter()
                .map(|(key, value)| (key.clone(), host_to_json(value)))
                .collect(),
        ),
        HostValue::Object(attributes) => Value::Object(
            attributes
                .iter()
                .map(|(key, value)| (key.clone(), host_to_json(value)))
                .collect(),
        ),
        HostValue::Dynamic(inner) => host_to_json(inner),
    }
}

#[cfg(test)]
mod json_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_numbers_pick_the_narrowest_host_kind() {
        assert_eq!(json_to_host(json!(7)), HostValue::Int64(7));
        assert_eq!(json_to_host(json!(1.5)), HostValue::Float64(1.5));
        assert_eq!(
            json_to_host(json!(u64::MAX)),
            HostValue::BigNumber(Decimal::from(u64::MAX))
        );
    }

    #[test]
    fn json_collections_become_tuples_and_objects() {
        let value = json_to_host(json!({ "v": [1, "a", null], "w": { "k": true } }));
        assert_eq!(
            value,
            HostValue::object([
                (
                    "v",
                    HostValue::Tuple(vec![
                        HostValue::Int64(1),
                        HostValue::string("a"),
                        HostValue::Null
                    ])
                ),
                ("w", HostValue::object([("k", HostValue::Bool(true))])),
            ])
        );
    }

    #[test]
    fn object_keys_arrive_sorted() {
        let value: Value = serde_json::from_str(r#"{ "b": 1, "c": 2, "a": 3 }"#).expect("json");
        let HostValue::Object(attributes) = json_to_host(value) else {
            panic!("expected object");
        };
        assert_eq!(attributes.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn host_values_render_back_to_json() {
        let value = HostValue::dynamic(HostValue::object([
            ("n", HostValue::BigNumber(Decimal::new(1250, 3))),
            ("f", HostValue::Float64(f64::NAN)),
            ("u", HostValue::Unknown),
            ("t", HostValue::Tuple(vec![HostValue::Int64(1)])),
        ]));
        assert_eq!(
            host_to_json(&value),
            json!({ "n": 1.25, "f": null, "u": null, "t": [1] })
        );
    }
}
