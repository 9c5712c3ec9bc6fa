use pretty_assertions::assert_eq;

use super::*;

#[test]
fn scalars_report_boxed_runtime_types() {
    assert_eq!(Value::Int32(1).runtime_type(), Some(RawType::int32()));
    assert_eq!(Value::Float64(1.5).runtime_type(), Some(RawType::float64()));
    assert_eq!(Value::str("x").runtime_type(), Some(RawType::string()));
    assert_eq!(Value::Null.runtime_type(), None);
}

#[test]
fn instance_checks_follow_assignability() {
    let value = Value::Int64(7);

    assert!(value.is_instance_of(&RawType::int64()));
    assert!(value.is_instance_of(&RawType::prim_i64()));
    assert!(value.is_instance_of(&RawType::number()));
    assert!(value.is_instance_of(&RawType::any()));
    assert!(!value.is_instance_of(&RawType::string()));
    assert!(!Value::Null.is_instance_of(&RawType::any()));
}

#[test]
fn collections_report_capability_types() {
    let list = Value::List(vec![Value::Int32(1)]);
    let ints = Value::array(&RawType::int32(), vec![Value::Int32(1)]);

    assert!(list.is_instance_of(&RawType::collection()));
    assert!(ints.is_instance_of(&RawType::number().array_type()));
    assert_eq!(ints.items(), Some(&[Value::Int32(1)][..]));
}

#[test]
fn objects_compare_by_payload_identity() {
    let point = RawType::class("Point").build();
    let a = Value::object(&point, (1, 2));
    let b = Value::object(&point, (1, 2));

    assert_eq!(a, a.clone());
    assert_ne!(a, b);
    assert_eq!(
        a.as_object().and_then(|o| o.downcast_ref::<(i32, i32)>()),
        Some(&(1, 2))
    );
}

#[test]
fn display_renders_contents() {
    let color = RawType::enumeration("Color", ["Red"]).build();
    let map = Value::Map(vec![(Value::str("a"), Value::Int32(1))]);

    assert_eq!(Value::List(vec![Value::Int32(1), Value::Bool(true)]).to_string(), "[1, true]");
    assert_eq!(map.to_string(), "{a=1}");
    assert_eq!(Value::enum_variant(&color, "Red").to_string(), "Red");
    assert_eq!(Value::Null.to_string(), "null");
}

#[test]
fn numeric_accessors_widen() {
    assert_eq!(Value::Int8(-3).as_i64(), Some(-3));
    assert_eq!(Value::Float32(0.5).as_f64(), Some(0.5));
    assert_eq!(Value::str("1").as_i64(), None);
}
