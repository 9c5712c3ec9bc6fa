//! Built-in converters registered by
//! [`ConversionService::with_defaults`](crate::ConversionService::with_defaults).
//!
//! Every unit here goes through the same registration path as a caller's
//! own converter, so registering a custom converter for the same pair
//! shadows the built-in one.

mod collection;
mod enums;
mod number;
mod string;

use morph_types::Value;

use crate::{ConversionError, ConversionService};

pub(crate) fn register_defaults(service: &ConversionService) {
    number::register(service);
    string::register(service);
    enums::register(service);
    collection::register(service);
    tracing::debug!("registered default converters");
}

/// Fault for a source value of the wrong shape.
fn unexpected(value: &Value, expected: &str) -> ConversionError {
    ConversionError::custom(format!("expected {expected} value, found `{value}`"))
}

#[cfg(test)]
mod tests;
