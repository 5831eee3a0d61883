use super::*;
use serde::Serialize;
use std::collections::HashMap;

#[test]
fn integer_widths_widen_to_int() {
    assert_eq!(Value::from(5_i16), Value::Int(5));
    assert_eq!(Value::from(5_u32), Value::Int(5));
    assert_eq!(Value::from(-5_i64), Value::Int(-5));
}

#[test]
fn wide_integers_convert_when_they_fit() {
    let items = vec!["a", "b", "c"];
    let map = FieldMap::new().with("n", Value::try_from(items.len()).unwrap());
    assert_eq!(map.get("n"), Some(&Value::Int(3)));
    assert_eq!(Value::try_from(7_u64).unwrap(), Value::Int(7));

    let err = Value::try_from(u64::MAX).unwrap_err();
    assert!(matches!(err, crate::SqlError::Validation(_)));
}

#[test]
fn option_becomes_nullable() {
    let some: Value = Some(3_i32).into();
    assert_eq!(
        some,
        Value::Nullable(Box::new(Nullable {
            value: Value::Int(3),
            valid: true
        }))
    );
    assert!(!some.is_null());

    let none: Value = Option::<bool>::None.into();
    assert!(none.is_null());
}

#[test]
fn nullable_accessors() {
    let n = Nullable::new(4_i64);
    assert_eq!(n.get(), Some(&4));
    assert_eq!(n.into_option(), Some(4));

    let n = Nullable::<i64>::null();
    assert_eq!(n.get(), None);
    assert_eq!(Nullable::from(Some("x")).into_option(), Some("x"));
}

#[test]
fn raw_is_not_bound() {
    let v: Value = raw("now()").into();
    assert!(v.is_raw());
    assert_eq!(v.as_raw().map(Raw::as_str), Some("now()"));
    assert!(!Value::Int(1).is_raw());
}

#[test]
fn field_map_iterates_sorted() {
    let map = FieldMap::new()
        .with("yes", "no")
        .with("ok", "coral")
        .with("raw", raw("now()"));
    let names: Vec<_> = map.names().collect();
    assert_eq!(names, ["ok", "raw", "yes"]);
    assert_eq!(map.len(), 3);
    assert_eq!(map.bound_len(), 2);
}

#[test]
fn field_map_set_replaces() {
    let mut map = FieldMap::new();
    map.set("a", 1).set("a", 2);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("a"), Some(&Value::Int(2)));
    assert_eq!(map.remove("a"), Some(Value::Int(2)));
    assert!(map.is_empty());
}

#[test]
fn field_map_from_hash_map() {
    let mut h = HashMap::new();
    h.insert("b", 2_i64);
    h.insert("a", 1_i64);
    let map = FieldMap::from(h);
    let pairs: Vec<_> = map.iter().map(|(k, v)| (k, v.clone())).collect();
    assert_eq!(pairs, [("a", Value::Int(1)), ("b", Value::Int(2))]);
}

#[test]
fn field_map_macro() {
    let map = crate::field_map! {
        "name" => "alice",
        "age" => 30,
        "created_at" => raw("now()"),
    };
    assert_eq!(map.get("age"), Some(&Value::Int(30)));
    assert!(map.contains("created_at"));
    assert!(crate::field_map! {}.is_empty());
}

#[derive(Serialize)]
struct NewUser {
    name: String,
    age: u8,
    score: f64,
    admin: bool,
    nickname: Option<String>,
    tags: Vec<String>,
}

#[test]
fn field_map_from_serialize() {
    let user = NewUser {
        name: "bob".into(),
        age: 42,
        score: 1.5,
        admin: false,
        nickname: None,
        tags: vec!["a".into()],
    };
    let map = FieldMap::from_serialize(&user).unwrap();
    assert_eq!(map.get("name"), Some(&Value::Text("bob".into())));
    assert_eq!(map.get("age"), Some(&Value::Int(42)));
    assert_eq!(map.get("score"), Some(&Value::Float(1.5)));
    assert_eq!(map.get("admin"), Some(&Value::Bool(false)));
    assert_eq!(map.get("nickname"), Some(&Value::Null));
    assert_eq!(map.get("tags"), Some(&Value::Json(serde_json::json!(["a"]))));
}

#[test]
fn field_map_from_serialize_rejects_scalars() {
    let err = FieldMap::from_serialize(&5).unwrap_err();
    assert!(matches!(err, crate::SqlError::Serialization(_)));
}
