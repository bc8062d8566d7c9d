//! JSON bridge for the CLI.
//!
//! A convenience mapping so values can be written on the command line and
//! printed for humans. It is deliberately lossy in both directions (JSON has
//! no temporal kinds, no 32-bit floats, no symbols); the codec itself never
//! touches JSON.

use bytes::Bytes;
use serde_json::{json, Map, Number};
use veclink_types::{null, ListKind, Value};

/// Build a value tree from parsed JSON.
///
/// null → NIL, booleans → BOOL, integers → LONG, floats → FLOAT, strings →
/// char vectors, arrays → lists, objects → dicts keyed by a symbol vector.
pub fn value_from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Nil,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::long(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(null::NULL_FLOAT))
            }
        }
        serde_json::Value::String(s) => Value::char_vec(Bytes::copy_from_slice(s.as_bytes())),
        serde_json::Value::Array(items) => {
            Value::list(items.iter().map(value_from_json).collect())
        }
        serde_json::Value::Object(map) => {
            let keys = map.keys().cloned().collect();
            let values = map.values().map(value_from_json).collect();
            Value::dict(
                Value::symbol_vec(keys),
                Value::List(ListKind::List, values),
            )
        }
    }
}

/// Render a value tree as JSON for display.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Nil => serde_json::Value::Null,
        Value::Any => json!("<any>"),
        Value::LambdaRec => json!("<lambda-rec>"),
        Value::Reagent => json!("<reagent>"),
        Value::Bool(b) => json!(b),
        Value::Byte(v) => json!(v),
        Value::Short(v) => json!(v),
        Value::Int(_, v) => json!(v),
        Value::Long(_, v) => json!(v),
        Value::Real(v) => float_json(*v as f64),
        Value::Float(v) => float_json(*v),
        Value::Enum(v) => json!(v),
        Value::Guid(g) => json!(g.to_string()),
        Value::Symbol(_, s) => json!(s),
        Value::BoolVec(v) => json!(v),
        Value::ByteVec(v) => json!(v),
        Value::ShortVec(v) => json!(v),
        Value::IntVec(_, v) => json!(v),
        Value::LongVec(_, v) => json!(v),
        Value::RealVec(v) => {
            serde_json::Value::Array(v.iter().map(|x| float_json(*x as f64)).collect())
        }
        Value::FloatVec(v) => serde_json::Value::Array(v.iter().map(|x| float_json(*x)).collect()),
        Value::EnumVec(v) => json!(v),
        Value::GuidVec(v) => {
            serde_json::Value::Array(v.iter().map(|g| json!(g.to_string())).collect())
        }
        Value::SymbolVec(_, v) => json!(v),
        Value::CharVec(v) => json!(String::from_utf8_lossy(v)),
        Value::List(_, items) => {
            serde_json::Value::Array(items.iter().map(value_to_json).collect())
        }
        Value::Dict(_, keys, values) => dict_json(keys, values),
        Value::Table(keys, values) => json!({
            "keys": value_to_json(keys),
            "values": value_to_json(values),
        }),
        Value::Pattern(exprs, arms) => json!({
            "exprs": value_to_json(exprs),
            "arms": value_to_json(arms),
        }),
        Value::Lambda(_, lambda) => json!({
            "text": lambda.text,
            "cargs": lambda.cargs,
            "clocals": lambda.clocals,
            "body": value_to_json(&lambda.body),
        }),
    }
}

fn float_json(v: f64) -> serde_json::Value {
    // JSON numbers cannot carry NaN or infinities; keep them readable.
    if null::is_null_float(v) {
        json!("0n")
    } else if v.is_nan() {
        json!("NaN")
    } else if v == f64::INFINITY {
        json!("0w")
    } else if v == f64::NEG_INFINITY {
        json!("-0w")
    } else {
        Number::from_f64(v).map(serde_json::Value::Number).unwrap_or(serde_json::Value::Null)
    }
}

fn dict_json(keys: &Value, values: &Value) -> serde_json::Value {
    // A symbol-keyed dict with matching lengths renders as a JSON object.
    if let (Value::SymbolVec(_, names), Some(items)) = (keys, values.as_list()) {
        if names.len() == items.len() {
            let mut map = Map::new();
            for (name, item) in names.iter().zip(items) {
                map.insert(name.clone(), value_to_json(item));
            }
            return serde_json::Value::Object(map);
        }
    }
    json!({
        "keys": value_to_json(keys),
        "values": value_to_json(values),
    })
}

#[cfg(test)]
mod tests {
    use veclink_types::{DictKind, SymbolKind};

    use super::*;

    #[test]
    fn json_to_value_shapes() {
        let parsed: serde_json::Value =
            serde_json::from_str(r#"{"a": 1, "b": [true, null, 2.5], "c": "text"}"#).unwrap();
        let v = value_from_json(&parsed);

        match &v {
            Value::Dict(DictKind::Dict, keys, values) => {
                assert_eq!(
                    **keys,
                    Value::SymbolVec(
                        SymbolKind::Symbol,
                        vec!["a".into(), "b".into(), "c".into()]
                    )
                );
                match values.as_list() {
                    Some([Value::Long(_, 1), Value::List(_, inner), Value::CharVec(text)]) => {
                        assert_eq!(
                            inner.as_slice(),
                            &[Value::Bool(true), Value::Nil, Value::Float(2.5)]
                        );
                        assert_eq!(text.as_ref(), b"text");
                    }
                    other => panic!("unexpected dict values: {other:?}"),
                }
            }
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn value_to_json_roundtrips_simple_shapes() {
        let v = Value::dict(
            Value::symbol_vec(vec!["x".into(), "y".into()]),
            Value::list(vec![Value::long(10), Value::from("hi")]),
        );
        let rendered = value_to_json(&v);
        assert_eq!(rendered, serde_json::json!({"x": 10, "y": "hi"}));
    }

    #[test]
    fn special_floats_render_as_strings() {
        assert_eq!(value_to_json(&Value::null_float()), json!("0n"));
        assert_eq!(value_to_json(&Value::Float(f64::INFINITY)), json!("0w"));
        assert_eq!(value_to_json(&Value::Float(f64::NEG_INFINITY)), json!("-0w"));
        assert_eq!(value_to_json(&Value::Float(1.5)), json!(1.5));
    }

    #[test]
    fn non_utf8_char_vec_renders_lossy() {
        let v = Value::char_vec(vec![0xFFu8, b'o', b'k']);
        assert!(matches!(value_to_json(&v), serde_json::Value::String(_)));
    }
}
