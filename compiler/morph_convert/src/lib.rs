//! Pluggable type-conversion engine.
//!
//! A [`ConversionService`] turns a [`Value`](morph_types::Value) of one
//! runtime type into an equivalent value of another. Conversion rules are
//! registered converters, not built-in coercions; lookups walk the source
//! and target type hierarchies, so a converter registered for `Number`
//! also serves `Int32`.
//!
//! # Converter shapes
//!
//! - [`Converter`]: one fixed `(source, target)` pair.
//! - [`GenericConverter`]: any number of pairs, or none when conditional.
//! - [`ConverterFactory`]: one source to a family of targets.
//! - [`ConditionalConverter`]: an optional predicate any of them can carry.
//!
//! # Example
//!
//! ```
//! use morph_convert::ConversionService;
//! use morph_types::{RawType, Value};
//!
//! let service = ConversionService::with_defaults();
//!
//! let n = service.convert(&Value::str("42"), &RawType::int32()).unwrap();
//! assert_eq!(n, Value::Int32(42));
//!
//! let s = service.convert(&n, &RawType::string()).unwrap();
//! assert_eq!(s, Value::str("42"));
//! ```

mod adapter;
mod cache;
mod config;
mod converter;
mod defaults;
mod error;
mod pair;
mod registry;
mod sentinel;
mod service;

pub use config::ConversionConfig;
pub use converter::{
    converter_fn, ConditionalConverter, Converter, ConverterFactory, FnConverter,
    GenericConverter,
};
pub use error::{BoxError, ConversionError};
pub use pair::ConvertiblePair;
pub use service::ConversionService;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset or invalid, or when a global
/// subscriber is already installed. Safe to call more than once.
///
/// ```
/// morph_convert::init_tracing();
/// morph_convert::init_tracing();
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(filter) = EnvFilter::try_from_default_env() else {
            return;
        };
        // The host may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .try_init();
    });
}
