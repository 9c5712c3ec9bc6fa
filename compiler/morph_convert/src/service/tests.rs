use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;

use super::*;
use crate::{converter_fn, ConditionalConverter, FnConverter};

fn parse_int(
) -> FnConverter<impl Fn(&Value) -> Result<Value, ConversionError> + Send + Sync> {
    converter_fn(|value| {
        let text = value.as_str().unwrap_or_default();
        text.parse::<i32>()
            .map(Value::Int32)
            .map_err(ConversionError::other)
    })
}

fn desc(raw: &RawType) -> TypeDescriptor {
    TypeDescriptor::from(raw)
}

#[test]
fn converts_through_registered_converter() {
    let service = ConversionService::new();
    service.add_converter_for(&RawType::string(), &RawType::int32(), parse_int());

    let converted = service.convert(&Value::str("12"), &RawType::int32());

    assert_eq!(converted.ok(), Some(Value::Int32(12)));
}

#[test]
fn converter_declaring_types_registers_itself() {
    let service = ConversionService::new();
    let converter = parse_int().with_types(&RawType::string(), &RawType::int32());

    assert!(service.add_converter(converter).is_ok());
    assert!(service.can_convert(Some(&RawType::string()), &RawType::int32()));
}

#[test]
fn converter_without_types_is_rejected() {
    let service = ConversionService::new();

    let err = service.add_converter(parse_int());

    assert!(matches!(
        err,
        Err(ConversionError::UnresolvableConverterTypes { .. })
    ));
}

#[test]
fn assignable_source_is_identity() {
    let service = ConversionService::new();
    let number = desc(&RawType::number());

    assert!(service.can_bypass_convert(Some(&desc(&RawType::int32())), &number));
    assert!(service.can_convert(Some(&RawType::int32()), &RawType::number()));

    let value = Value::Int32(7);
    assert_eq!(service.convert(&value, &RawType::number()).ok(), Some(value));
}

#[test]
fn registered_converter_is_not_a_bypass() {
    let service = ConversionService::new();
    service.add_converter_for(&RawType::string(), &RawType::int32(), parse_int());

    let (string, int32) = (desc(&RawType::string()), desc(&RawType::int32()));
    assert!(service.can_convert_types(Some(&string), &int32));
    assert!(!service.can_bypass_convert(Some(&string), &int32));
}

#[test]
fn absent_source_always_converts() {
    let service = ConversionService::new();
    let target = desc(&RawType::int32());

    assert!(service.can_convert(None, &RawType::int32()));
    assert!(service.can_bypass_convert(None, &target));
    assert_eq!(
        service.convert_with(&Value::Null, None, &target).ok(),
        Some(Value::Null)
    );
}

#[test]
fn null_to_primitive_fails() {
    let service = ConversionService::new();

    let err = service.convert(&Value::Null, &RawType::prim_i32());

    assert!(err.is_err_and(|err| err.is_conversion_failed()));
}

#[test]
fn null_with_source_type_converts_to_null() {
    let service = ConversionService::new();
    let string = desc(&RawType::string());

    let converted = service.convert_with(&Value::Null, Some(&string), &desc(&RawType::boolean()));

    assert_eq!(converted.ok(), Some(Value::Null));
}

#[test]
fn value_without_source_type_is_rejected() {
    let service = ConversionService::new();

    let err = service.convert_with(&Value::Int32(1), None, &desc(&RawType::int32()));

    assert!(matches!(err, Err(ConversionError::MissingSourceType { .. })));
}

#[test]
fn mismatched_source_type_is_rejected() {
    let service = ConversionService::new();

    let err = service.convert_with(
        &Value::Int32(1),
        Some(&desc(&RawType::string())),
        &desc(&RawType::string()),
    );

    assert!(matches!(err, Err(ConversionError::SourceTypeMismatch { .. })));
}

#[test]
fn unrelated_types_are_not_found() {
    let service = ConversionService::new();

    assert!(!service.can_convert(Some(&RawType::string()), &RawType::int32()));
    let err = service.convert(&Value::str("1"), &RawType::int32());
    assert!(err.is_err_and(|err| err.is_not_found()));
}

#[test]
fn converter_faults_are_wrapped() {
    let service = ConversionService::new();
    service.add_converter_for(&RawType::string(), &RawType::int32(), parse_int());

    let Err(err) = service.convert(&Value::str("twelve"), &RawType::int32()) else {
        panic!("`twelve` should not parse");
    };

    let ConversionError::ConversionFailed { value, cause, .. } = &err else {
        panic!("expected a conversion failure, got {err:?}");
    };
    assert_eq!(*value, Value::str("twelve"));
    assert_eq!(cause.to_string(), "invalid digit found in string");
}

#[test]
fn conversion_failed_is_not_rewrapped() {
    let service = ConversionService::new();
    service.add_converter_for(
        &RawType::string(),
        &RawType::int32(),
        converter_fn(|value| {
            Err(ConversionError::ConversionFailed {
                source_type: None,
                target_type: RawType::int32().into(),
                value: value.clone(),
                cause: Box::new(ConversionError::custom("inner")),
            })
        }),
    );

    let Err(ConversionError::ConversionFailed { cause, .. }) =
        service.convert(&Value::str("x"), &RawType::int32())
    else {
        panic!("expected a conversion failure");
    };
    assert_eq!(cause.to_string(), "inner");
}

#[test]
fn null_result_for_primitive_target_fails() {
    let service = ConversionService::new();
    service.add_converter_for(
        &RawType::string(),
        &RawType::int32(),
        converter_fn(|_| Ok(Value::Null)),
    );

    assert_eq!(
        service.convert(&Value::str(""), &RawType::int32()).ok(),
        Some(Value::Null)
    );
    let err = service.convert(&Value::str(""), &RawType::prim_i32());
    assert!(err.is_err_and(|err| err.is_conversion_failed()));
}

struct Counting {
    calls: Arc<AtomicUsize>,
    accepts: bool,
}

impl GenericConverter for Counting {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![ConvertiblePair::new(RawType::string(), RawType::int32())])
    }

    fn convert(
        &self,
        _source: &Value,
        _source_type: &TypeDescriptor,
        _target_type: &TypeDescriptor,
        _service: &ConversionService,
    ) -> Result<Value, ConversionError> {
        Ok(Value::Int32(0))
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        Some(self)
    }
}

impl ConditionalConverter for Counting {
    fn matches(&self, _: &TypeDescriptor, _: &TypeDescriptor, _: &ConversionService) -> bool {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.accepts
    }
}

#[test]
fn lookups_are_cached() {
    let service = ConversionService::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let registered = service.add_generic_converter(Counting {
        calls: Arc::clone(&calls),
        accepts: true,
    });
    assert!(registered.is_ok());

    for _ in 0..3 {
        assert!(service.can_convert(Some(&RawType::string()), &RawType::int32()));
    }

    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn no_match_is_cached() {
    let service = ConversionService::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let registered = service.add_generic_converter(Counting {
        calls: Arc::clone(&calls),
        accepts: false,
    });
    assert!(registered.is_ok());

    for _ in 0..3 {
        assert!(!service.can_convert(Some(&RawType::string()), &RawType::int32()));
    }

    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn uncached_service_walks_every_time() {
    let service = ConversionService::with_config(&ConversionConfig::uncached());
    let calls = Arc::new(AtomicUsize::new(0));
    let registered = service.add_generic_converter(Counting {
        calls: Arc::clone(&calls),
        accepts: true,
    });
    assert!(registered.is_ok());

    for _ in 0..3 {
        assert!(service.can_convert(Some(&RawType::string()), &RawType::int32()));
    }

    assert_eq!(calls.load(Ordering::Relaxed), 3);
}

#[test]
fn registration_invalidates_cached_no_match() {
    let service = ConversionService::new();
    assert!(!service.can_convert(Some(&RawType::string()), &RawType::int32()));

    service.add_converter_for(&RawType::string(), &RawType::int32(), parse_int());

    assert!(service.can_convert(Some(&RawType::string()), &RawType::int32()));
}

#[test]
fn removal_invalidates_cached_converter() {
    let service = ConversionService::new();
    service.add_converter_for(&RawType::string(), &RawType::int32(), parse_int());
    assert!(service.can_convert(Some(&RawType::string()), &RawType::int32()));

    assert!(service.remove_convertible(&RawType::string(), &RawType::prim_i32()));

    assert!(!service.can_convert(Some(&RawType::string()), &RawType::int32()));
}

#[test]
fn listing_delegates_to_registry() {
    let service = ConversionService::new();
    service.add_converter_for(&RawType::string(), &RawType::int32(), parse_int());

    let listing = service.to_string();

    assert!(listing.starts_with("ConversionService converters ="));
    assert!(listing.contains("String -> Int32: "));
}

#[test]
fn defaults_follow_config() {
    let empty = ConversionService::new();
    let loaded = ConversionService::with_defaults();

    assert!(!empty.can_convert(Some(&RawType::string()), &RawType::int32()));
    assert!(loaded.can_convert(Some(&RawType::string()), &RawType::int32()));
}
