//! A shared service used from many threads while converters are being
//! registered and removed.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::Arc;
use std::thread;

use morph_convert::{converter_fn, ConversionService};
use morph_types::{RawType, Value};

#[test]
fn concurrent_conversions_agree() {
    morph_convert::init_tracing();
    let service = Arc::new(ConversionService::with_defaults());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for n in 0..200_i32 {
                    let n = n * 8 + worker;
                    let text = service.convert(&Value::Int32(n), &RawType::string()).unwrap();
                    let back = service.convert(&text, &RawType::int32()).unwrap();
                    assert_eq!(back, Value::Int32(n));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn registration_while_converting() {
    morph_convert::init_tracing();
    let service = Arc::new(ConversionService::with_defaults());
    let point = RawType::class("Point").build();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for _ in 0..500 {
                    let converted = service
                        .convert(&Value::str("yes"), &RawType::boolean())
                        .unwrap();
                    assert_eq!(converted, Value::Bool(true));
                }
            })
        })
        .collect();

    for _ in 0..50 {
        service.add_converter_for(
            &RawType::string(),
            &point,
            converter_fn(|_| Ok(Value::Null)),
        );
        assert!(service.can_convert(Some(&RawType::string()), &point));
        assert!(service.remove_convertible(&RawType::string(), &point));
    }

    for reader in readers {
        reader.join().unwrap();
    }

    assert!(!service.can_convert(Some(&RawType::string()), &point));
}
