//! The conversion service facade.
//!
//! [`ConversionService`] owns the converter registry and the lookup cache,
//! and is the one entry point for registration and conversion. It is
//! `Send + Sync`; share it behind an `Arc` and register converters from
//! any thread while others convert.
//!
//! # Resolution
//!
//! ```text
//! cache hit?            -> cached outcome
//! registry walk match?  -> that converter
//! source assignable?    -> identity
//! otherwise             -> no match
//! ```
//!
//! Every outcome, "no match" included, is cached until the next
//! registration or removal.

use std::fmt;
use std::sync::Arc;

use morph_types::{RawType, TypeDescriptor, Value};

use crate::adapter::{ConverterAdapter, ConverterFactoryAdapter};
use crate::cache::{CacheKey, ConverterCache};
use crate::registry::ConverterRegistry;
use crate::sentinel::Lookup;
use crate::{
    defaults, ConversionConfig, ConversionError, Converter, ConverterFactory, ConvertiblePair,
    GenericConverter,
};

/// Registry-backed conversion between runtime types.
pub struct ConversionService {
    registry: ConverterRegistry,
    cache: ConverterCache,
}

impl Default for ConversionService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionService {
    /// An empty service with default cache settings.
    pub fn new() -> Self {
        Self::with_config(&ConversionConfig::default())
    }

    /// A service with the built-in converters registered.
    pub fn with_defaults() -> Self {
        Self::with_config(&ConversionConfig::with_defaults())
    }

    pub fn with_config(config: &ConversionConfig) -> Self {
        let service = ConversionService {
            registry: ConverterRegistry::new(),
            cache: ConverterCache::new(config.cache_capacity),
        };
        if config.register_defaults {
            service.add_default_converters();
        }
        service
    }

    /// Register the built-in scalar, enum, and collection converters.
    pub fn add_default_converters(&self) {
        defaults::register_defaults(self);
    }

    // Registration

    /// Register a converter that declares its own source and target types.
    pub fn add_converter<C>(&self, converter: C) -> Result<(), ConversionError>
    where
        C: Converter + 'static,
    {
        let Some((source, target)) = converter.convertible_types() else {
            return Err(ConversionError::UnresolvableConverterTypes {
                converter: converter.name().to_owned(),
            });
        };
        self.install(ConverterAdapter::new(Arc::new(converter), &source, target));
        Ok(())
    }

    /// Register a converter for explicitly named types.
    pub fn add_converter_for<C>(
        &self,
        source: impl Into<TypeDescriptor>,
        target: impl Into<TypeDescriptor>,
        converter: C,
    ) where
        C: Converter + 'static,
    {
        let source = source.into();
        self.install(ConverterAdapter::new(Arc::new(converter), &source, target.into()));
    }

    /// Register a generic converter. One declaring no pairs must be
    /// conditional; it is then consulted for every candidate pair.
    pub fn add_generic_converter<G>(&self, converter: G) -> Result<(), ConversionError>
    where
        G: GenericConverter + 'static,
    {
        self.registry.add(Arc::new(converter))?;
        self.cache.invalidate();
        Ok(())
    }

    /// Register a factory that declares its source type and target family.
    pub fn add_converter_factory<F>(&self, factory: F) -> Result<(), ConversionError>
    where
        F: ConverterFactory + 'static,
    {
        let Some((source, target)) = factory.convertible_types() else {
            return Err(ConversionError::UnresolvableConverterTypes {
                converter: factory.name().to_owned(),
            });
        };
        self.add_converter_factory_for(&source, &target, factory);
        Ok(())
    }

    /// Register a factory for an explicitly named source type and target
    /// family root.
    pub fn add_converter_factory_for<F>(&self, source: &RawType, target: &RawType, factory: F)
    where
        F: ConverterFactory + 'static,
    {
        let pair = ConvertiblePair::new(source.object_type(), target.object_type());
        self.install(ConverterFactoryAdapter::new(Arc::new(factory), pair));
    }

    /// Remove every converter registered for exactly `source → target`.
    /// Returns whether any were registered.
    pub fn remove_convertible(&self, source: &RawType, target: &RawType) -> bool {
        let removed = self
            .registry
            .remove(&source.object_type(), &target.object_type());
        self.cache.invalidate();
        removed
    }

    /// Register a converter known to declare its pairs.
    pub(crate) fn install(&self, converter: impl GenericConverter + 'static) {
        self.registry.insert(Arc::new(converter));
        self.cache.invalidate();
    }

    // Queries

    /// Whether values of `source` can be converted to `target`. An absent
    /// source stands for a null value, which always converts.
    pub fn can_convert(&self, source: Option<&RawType>, target: &RawType) -> bool {
        let source = source.map(TypeDescriptor::from);
        self.can_convert_types(source.as_ref(), &TypeDescriptor::from(target))
    }

    /// Descriptor form of [`can_convert`](Self::can_convert).
    pub fn can_convert_types(
        &self,
        source_type: Option<&TypeDescriptor>,
        target_type: &TypeDescriptor,
    ) -> bool {
        match source_type {
            Some(source_type) => self.converter(source_type, target_type).is_match(),
            None => true,
        }
    }

    /// Whether conversion from `source_type` to `target_type` returns the
    /// value unchanged, without any converter involved.
    pub fn can_bypass_convert(
        &self,
        source_type: Option<&TypeDescriptor>,
        target_type: &TypeDescriptor,
    ) -> bool {
        match source_type {
            Some(source_type) => self.converter(source_type, target_type).is_identity(),
            None => true,
        }
    }

    /// Convert `value` to `target`, taking the source type from the
    /// value's runtime type.
    pub fn convert(
        &self,
        value: &Value,
        target: impl Into<TypeDescriptor>,
    ) -> Result<Value, ConversionError> {
        let source_type = TypeDescriptor::for_value(value);
        self.convert_with(value, source_type.as_ref(), &target.into())
    }

    /// Convert `value`, described by `source_type`, to `target_type`.
    ///
    /// `source_type` may be absent only for a null value.
    pub fn convert_with(
        &self,
        value: &Value,
        source_type: Option<&TypeDescriptor>,
        target_type: &TypeDescriptor,
    ) -> Result<Value, ConversionError> {
        let Some(source_type) = source_type else {
            if !value.is_null() {
                return Err(ConversionError::MissingSourceType {
                    value: value.clone(),
                });
            }
            return handle_result(None, target_type, Value::Null);
        };
        if !value.is_null() && !value.is_instance_of(&source_type.object_type()) {
            return Err(ConversionError::SourceTypeMismatch {
                value: value.clone(),
                source_type: source_type.clone(),
            });
        }

        match self.converter(source_type, target_type) {
            Lookup::Converter(converter) => {
                let result = converter
                    .convert(value, source_type, target_type, self)
                    .map_err(|err| wrap_failure(err, source_type, target_type, value))?;
                handle_result(Some(source_type), target_type, result)
            }
            Lookup::Identity => handle_result(Some(source_type), target_type, value.clone()),
            Lookup::NoMatch => handle_converter_not_found(value, source_type, target_type),
        }
    }

    /// Resolve the converter for a descriptor pair, consulting the cache.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(source = %source_type, target = %target_type)
    )]
    fn converter(&self, source_type: &TypeDescriptor, target_type: &TypeDescriptor) -> Lookup {
        let key = CacheKey::new(source_type, target_type);
        if let Some(lookup) = self.cache.get(&key) {
            tracing::trace!(?lookup, "cache hit");
            return lookup;
        }

        let generation = self.cache.generation();
        let lookup = match self.registry.find(source_type, target_type, self) {
            Some(converter) => Lookup::Converter(converter),
            None => default_converter(source_type, target_type),
        };
        tracing::trace!(?lookup, "cache miss");
        self.cache.insert(key, lookup.clone(), generation);
        lookup
    }
}

impl fmt::Display for ConversionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.registry, f)
    }
}

/// Fallback when no registered converter matches.
fn default_converter(source_type: &TypeDescriptor, target_type: &TypeDescriptor) -> Lookup {
    if source_type.is_assignable_to(target_type) {
        Lookup::Identity
    } else {
        Lookup::NoMatch
    }
}

fn wrap_failure(
    err: ConversionError,
    source_type: &TypeDescriptor,
    target_type: &TypeDescriptor,
    value: &Value,
) -> ConversionError {
    if err.is_conversion_failed() {
        return err;
    }
    ConversionError::ConversionFailed {
        source_type: Some(source_type.clone()),
        target_type: target_type.clone(),
        value: value.clone(),
        cause: Box::new(err),
    }
}

fn handle_result(
    source_type: Option<&TypeDescriptor>,
    target_type: &TypeDescriptor,
    result: Value,
) -> Result<Value, ConversionError> {
    if result.is_null() {
        assert_not_primitive_target(source_type, target_type)?;
    }
    Ok(result)
}

fn handle_converter_not_found(
    value: &Value,
    source_type: &TypeDescriptor,
    target_type: &TypeDescriptor,
) -> Result<Value, ConversionError> {
    if value.is_null() {
        assert_not_primitive_target(Some(source_type), target_type)?;
        return Ok(Value::Null);
    }
    if source_type.is_assignable_to(target_type) && value.is_instance_of(&target_type.object_type())
    {
        return Ok(value.clone());
    }
    Err(ConversionError::ConverterNotFound {
        source_type: Some(source_type.clone()),
        target_type: target_type.clone(),
    })
}

fn assert_not_primitive_target(
    source_type: Option<&TypeDescriptor>,
    target_type: &TypeDescriptor,
) -> Result<(), ConversionError> {
    if !target_type.is_primitive() {
        return Ok(());
    }
    Err(ConversionError::ConversionFailed {
        source_type: source_type.cloned(),
        target_type: target_type.clone(),
        value: Value::Null,
        cause: Box::new(ConversionError::custom(
            "a null value cannot be assigned to a primitive type",
        )),
    })
}

#[cfg(test)]
mod tests;
