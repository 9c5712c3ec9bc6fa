//! Conversion faults.
//!
//! Every fault is reported synchronously and never retried: conversions are
//! assumed deterministic and free of side effects.

use std::error::Error;

use morph_types::{TypeDescriptor, Value};

/// Boxed cause carried by a wrapped conversion failure.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Error raised by registration, lookup, or conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// A non-null value whose declared source type does not describe it.
    #[error("source value `{value}` is not an instance of `{source_type}`")]
    SourceTypeMismatch {
        value: Value,
        source_type: TypeDescriptor,
    },

    /// A non-null value passed without a source type.
    #[error("source value `{value}` was supplied without a source type")]
    MissingSourceType { value: Value },

    /// A generic converter that declares no pairs and has no predicate.
    #[error(
        "converter `{converter}` declares no convertible pairs and is not conditional"
    )]
    MissingConvertibleTypes { converter: String },

    /// A converter or factory registered without declaring its types.
    #[error(
        "unable to determine source and target types for `{converter}`; register it with explicit types"
    )]
    UnresolvableConverterTypes { converter: String },

    /// No converter, factory, or bypass applies.
    #[error(
        "no converter found capable of converting from `{}` to `{target_type}`",
        describe(.source_type)
    )]
    ConverterNotFound {
        source_type: Option<TypeDescriptor>,
        target_type: TypeDescriptor,
    },

    /// A converter failed, or produced null for a primitive target.
    #[error(
        "failed to convert from `{}` to `{target_type}` for value `{value}`: {cause}",
        describe(.source_type)
    )]
    ConversionFailed {
        source_type: Option<TypeDescriptor>,
        target_type: TypeDescriptor,
        value: Value,
        #[source]
        cause: BoxError,
    },

    /// Fault raised inside converter logic.
    #[error("{0}")]
    Custom(String),

    /// Foreign error raised inside converter logic.
    #[error(transparent)]
    Other(BoxError),
}

impl ConversionError {
    /// Fault with a plain message, for use inside converters.
    pub fn custom(message: impl Into<String>) -> Self {
        ConversionError::Custom(message.into())
    }

    /// Wrap a foreign error raised inside a converter.
    pub fn other(err: impl Into<BoxError>) -> Self {
        ConversionError::Other(err.into())
    }

    /// Whether this is an already-wrapped conversion failure.
    #[inline]
    pub fn is_conversion_failed(&self) -> bool {
        matches!(self, ConversionError::ConversionFailed { .. })
    }

    /// Whether this reports a missing converter.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConversionError::ConverterNotFound { .. })
    }
}

fn describe(ty: &Option<TypeDescriptor>) -> String {
    match ty {
        Some(ty) => ty.to_string(),
        None => "null".to_owned(),
    }
}
