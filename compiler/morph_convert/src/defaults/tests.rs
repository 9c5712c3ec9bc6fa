use morph_types::{RawType, TypeDescriptor};
use pretty_assertions::assert_eq;

use super::*;

fn convert(value: Value, target: impl Into<TypeDescriptor>) -> Result<Value, ConversionError> {
    ConversionService::with_defaults().convert(&value, target)
}

fn converted(value: Value, target: impl Into<TypeDescriptor>) -> Value {
    match convert(value, target) {
        Ok(value) => value,
        Err(err) => panic!("conversion failed: {err}"),
    }
}

fn color() -> RawType {
    RawType::enumeration("Color", ["Red", "Green", "Blue"]).build()
}

#[test]
fn number_to_number() {
    assert_eq!(converted(Value::Int32(7), &RawType::int64()), Value::Int64(7));
    assert_eq!(converted(Value::Int64(7), &RawType::prim_i8()), Value::Int8(7));
    assert_eq!(converted(Value::Float64(7.75), &RawType::int16()), Value::Int16(7));
    assert_eq!(converted(Value::Int8(-3), &RawType::float32()), Value::Float32(-3.0));
}

#[test]
fn number_overflow_is_a_conversion_failure() {
    let err = convert(Value::Int64(1 << 40), &RawType::int32());

    assert!(err.is_err_and(|err| err.is_conversion_failed()));
}

#[test]
fn same_numeric_type_is_identity() {
    let service = ConversionService::with_defaults();
    let int32 = TypeDescriptor::of(RawType::int32());

    assert!(service.can_bypass_convert(Some(&int32), &int32));
}

#[test]
fn string_to_number() {
    assert_eq!(converted(Value::str(" 42 "), &RawType::int32()), Value::Int32(42));
    assert_eq!(converted(Value::str("0x10"), &RawType::int64()), Value::Int64(16));
    assert_eq!(converted(Value::str("2.5"), &RawType::float64()), Value::Float64(2.5));
    assert_eq!(converted(Value::str(""), &RawType::int32()), Value::Null);
    assert!(convert(Value::str("999"), &RawType::int8()).is_err());
    assert!(convert(Value::str("abc"), &RawType::int32()).is_err());
}

#[test]
fn empty_string_to_primitive_fails() {
    let err = convert(Value::str(""), &RawType::prim_i32());

    assert!(err.is_err_and(|err| err.is_conversion_failed()));
}

#[test]
fn string_to_bool() {
    for text in ["true", "On", "YES", "1"] {
        assert_eq!(converted(Value::str(text), &RawType::boolean()), Value::Bool(true));
    }
    for text in ["false", "off", "No", "0"] {
        assert_eq!(converted(Value::str(text), &RawType::boolean()), Value::Bool(false));
    }
    assert_eq!(converted(Value::str("  "), &RawType::boolean()), Value::Null);
    assert!(convert(Value::str("maybe"), &RawType::boolean()).is_err());
}

#[test]
fn string_to_char() {
    assert_eq!(converted(Value::str("x"), &RawType::character()), Value::Char('x'));
    assert_eq!(converted(Value::str(""), &RawType::character()), Value::Null);
    assert!(convert(Value::str("xy"), &RawType::character()).is_err());
}

#[test]
fn scalars_to_string() {
    assert_eq!(converted(Value::Int32(-5), &RawType::string()), Value::str("-5"));
    assert_eq!(converted(Value::Float64(1.5), &RawType::string()), Value::str("1.5"));
    assert_eq!(converted(Value::Bool(true), &RawType::string()), Value::str("true"));
    assert_eq!(converted(Value::Char('z'), &RawType::string()), Value::str("z"));
}

#[test]
fn char_and_number() {
    assert_eq!(converted(Value::Char('A'), &RawType::int32()), Value::Int32(65));
    assert_eq!(converted(Value::Int64(97), &RawType::character()), Value::Char('a'));
}

#[test]
fn string_to_enum_and_back() {
    let color = color();

    let green = converted(Value::str("Green"), &color);
    assert_eq!(green, Value::enum_variant(&color, "Green"));
    assert_eq!(converted(green, &RawType::string()), Value::str("Green"));

    assert_eq!(converted(Value::str(""), &color), Value::Null);
    assert!(convert(Value::str("Purple"), &color).is_err());
}

#[test]
fn string_to_enum_requires_an_enum_target() {
    let service = ConversionService::with_defaults();

    assert!(!service.can_convert(Some(&RawType::string()), &RawType::enum_base()));
}

#[test]
fn array_to_array_converts_elements() {
    let strings = Value::array(&RawType::string(), vec![Value::str("1"), Value::str("2")]);

    assert_eq!(
        converted(strings, &RawType::prim_i32().array_type()),
        Value::array(&RawType::prim_i32(), vec![Value::Int32(1), Value::Int32(2)])
    );
}

#[test]
fn covariant_array_is_returned_as_is() {
    let ints = Value::array(&RawType::int32(), vec![Value::Int32(1)]);

    assert_eq!(converted(ints.clone(), &RawType::number().array_type()), ints);
}

#[test]
fn array_to_collection() {
    let ints = Value::array(&RawType::int32(), vec![Value::Int32(1), Value::Int32(1)]);
    let strings = TypeDescriptor::collection(RawType::set(), RawType::string().into());

    assert_eq!(converted(ints, strings), Value::Set(vec![Value::str("1")]));
}

#[test]
fn collection_to_array() {
    let list = Value::List(vec![Value::str("3"), Value::str("4")]);

    assert_eq!(
        converted(list, &RawType::int64().array_type()),
        Value::array(&RawType::int64(), vec![Value::Int64(3), Value::Int64(4)])
    );
}

#[test]
fn collection_to_collection() {
    let list = Value::List(vec![Value::str("5"), Value::Null]);
    let ints = TypeDescriptor::collection(RawType::list(), RawType::int32().into());

    assert_eq!(
        converted(list.clone(), ints),
        Value::List(vec![Value::Int32(5), Value::Null])
    );
    assert_eq!(converted(list, &RawType::list()), Value::List(vec![Value::str("5"), Value::Null]));
}

#[test]
fn element_failure_fails_the_collection() {
    let list = Value::List(vec![Value::str("5"), Value::str("five")]);
    let ints = TypeDescriptor::collection(RawType::list(), RawType::int32().into());

    assert!(convert(list, ints).is_err_and(|err| err.is_conversion_failed()));
}

#[test]
fn collection_elements_must_be_convertible() {
    let service = ConversionService::with_defaults();
    let list_of = |element: RawType| TypeDescriptor::collection(RawType::list(), element.into());
    let point = RawType::class("Point").build();

    assert!(service.can_convert_types(Some(&list_of(RawType::string())), &list_of(RawType::int32())));
    assert!(!service.can_convert_types(Some(&list_of(point)), &list_of(RawType::int32())));
}

#[test]
fn map_to_map_converts_keys_and_values() {
    let map = Value::Map(vec![(Value::str("1"), Value::str("true"))]);
    let target = TypeDescriptor::map(
        RawType::map(),
        RawType::int32().into(),
        RawType::boolean().into(),
    );

    assert_eq!(
        converted(map, target),
        Value::Map(vec![(Value::Int32(1), Value::Bool(true))])
    );
}
