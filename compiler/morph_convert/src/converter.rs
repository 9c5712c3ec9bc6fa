//! Converter authoring styles.
//!
//! Three shapes of converter can be registered:
//!
//! | Trait               | Declares                    | Converts given            |
//! | ------------------- | --------------------------- | ------------------------- |
//! | [`Converter`]       | one `(source, target)` pair | the value only            |
//! | [`GenericConverter`]| any number of pairs, or none| the value and both types  |
//! | [`ConverterFactory`]| `(source, family root)`     | a unit per exact target   |
//!
//! Any of them may also carry the [`ConditionalConverter`] capability, a
//! dynamic predicate consulted after the static pair matched. The registry
//! only ever evaluates [`GenericConverter`]; the other two shapes are
//! adapted into it on registration.
//!
//! Converters are shared by every concurrent caller, so they must not hold
//! mutable state beyond their own immutable configuration.

use std::sync::Arc;

use morph_types::{RawType, TypeDescriptor, Value};

use crate::{ConversionError, ConversionService, ConvertiblePair};

/// Dynamic accept/reject predicate layered on a converter.
pub trait ConditionalConverter: Send + Sync {
    /// Whether the conversion from `source_type` to `target_type` should be
    /// handled by this converter.
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &ConversionService,
    ) -> bool;
}

/// Fixed 1:1 converter.
pub trait Converter: Send + Sync {
    /// Convert a non-null `source`.
    fn convert(&self, source: &Value) -> Result<Value, ConversionError>;

    /// The source and target this converter was written for, when it can
    /// name them. Registration without explicit types requires this.
    fn convertible_types(&self) -> Option<(TypeDescriptor, TypeDescriptor)> {
        None
    }

    /// The predicate capability, when the converter has one.
    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        None
    }

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Converter that declares its pairs and receives both descriptors.
pub trait GenericConverter: Send + Sync {
    /// Pairs served by this converter. `None` registers it globally, which
    /// is only legal for conditional converters.
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>>;

    /// Convert `source`, which may be null.
    ///
    /// `service` is the conversion service doing the lookup, for converters
    /// that convert nested values.
    fn convert(
        &self,
        source: &Value,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &ConversionService,
    ) -> Result<Value, ConversionError>;

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        None
    }

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Produces converters from one source type to a family of target types.
pub trait ConverterFactory: Send + Sync {
    /// The converter for the exact `target`, or `None` when `target` is
    /// outside the family this factory serves.
    fn converter(&self, target: &RawType) -> Option<Arc<dyn Converter>>;

    /// The source type and the root of the produced family, when the
    /// factory can name them.
    fn convertible_types(&self) -> Option<(RawType, RawType)> {
        None
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        None
    }

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Closure-backed [`Converter`]. Build one with [`converter_fn`].
pub struct FnConverter<F> {
    types: Option<(TypeDescriptor, TypeDescriptor)>,
    convert: F,
}

impl<F> FnConverter<F> {
    /// Declare the types this closure converts between, so it can be
    /// registered without naming them again.
    #[must_use]
    pub fn with_types(
        mut self,
        source: impl Into<TypeDescriptor>,
        target: impl Into<TypeDescriptor>,
    ) -> Self {
        self.types = Some((source.into(), target.into()));
        self
    }
}

/// Wrap a closure as a [`Converter`].
pub fn converter_fn<F>(convert: F) -> FnConverter<F>
where
    F: Fn(&Value) -> Result<Value, ConversionError> + Send + Sync,
{
    FnConverter {
        types: None,
        convert,
    }
}

impl<F> Converter for FnConverter<F>
where
    F: Fn(&Value) -> Result<Value, ConversionError> + Send + Sync,
{
    fn convert(&self, source: &Value) -> Result<Value, ConversionError> {
        (self.convert)(source)
    }

    fn convertible_types(&self) -> Option<(TypeDescriptor, TypeDescriptor)> {
        self.types.clone()
    }
}
