//! Adapters lifting [`Converter`] and [`ConverterFactory`] into the
//! [`GenericConverter`] protocol the registry evaluates.
//!
//! Both adapters are always conditional: the static pair only narrows the
//! search, and the predicate decides on the exact requested types.

use std::sync::Arc;

use morph_types::{TypeDescriptor, Value};

use crate::{
    ConditionalConverter, ConversionError, ConversionService, Converter, ConverterFactory,
    ConvertiblePair, GenericConverter,
};

/// Presents a fixed-pair [`Converter`] as a [`GenericConverter`].
pub(crate) struct ConverterAdapter {
    converter: Arc<dyn Converter>,
    pair: ConvertiblePair,
    target_type: TypeDescriptor,
}

impl ConverterAdapter {
    /// Adapt `converter` for `source → target`. Primitive types are keyed
    /// by their object types, which is what the hierarchy walk produces.
    pub(crate) fn new(
        converter: Arc<dyn Converter>,
        source: &TypeDescriptor,
        target: TypeDescriptor,
    ) -> Self {
        let pair = ConvertiblePair::new(source.object_type(), target.object_type());
        ConverterAdapter {
            converter,
            pair,
            target_type: target,
        }
    }
}

impl GenericConverter for ConverterAdapter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![self.pair.clone()])
    }

    fn convert(
        &self,
        source: &Value,
        _source_type: &TypeDescriptor,
        _target_type: &TypeDescriptor,
        _service: &ConversionService,
    ) -> Result<Value, ConversionError> {
        if source.is_null() {
            return Ok(Value::Null);
        }
        self.converter.convert(source)
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        Some(self)
    }

    fn name(&self) -> &str {
        self.converter.name()
    }
}

impl ConditionalConverter for ConverterAdapter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &ConversionService,
    ) -> bool {
        // Fixed-pair converters serve their exact target only.
        if *self.pair.target() != target_type.object_type() {
            return false;
        }
        if target_type.has_generics() && !self.target_type.is_assignable_to(target_type) {
            return false;
        }
        self.converter
            .as_conditional()
            .map_or(true, |condition| {
                condition.matches(source_type, target_type, service)
            })
    }
}

/// Presents a [`ConverterFactory`] as a [`GenericConverter`].
pub(crate) struct ConverterFactoryAdapter {
    factory: Arc<dyn ConverterFactory>,
    pair: ConvertiblePair,
}

impl ConverterFactoryAdapter {
    pub(crate) fn new(factory: Arc<dyn ConverterFactory>, pair: ConvertiblePair) -> Self {
        ConverterFactoryAdapter { factory, pair }
    }
}

impl GenericConverter for ConverterFactoryAdapter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![self.pair.clone()])
    }

    fn convert(
        &self,
        source: &Value,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        _service: &ConversionService,
    ) -> Result<Value, ConversionError> {
        if source.is_null() {
            return Ok(Value::Null);
        }
        let Some(converter) = self.factory.converter(&target_type.object_type()) else {
            return Err(ConversionError::ConverterNotFound {
                source_type: Some(source_type.clone()),
                target_type: target_type.clone(),
            });
        };
        converter.convert(source)
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        Some(self)
    }

    fn name(&self) -> &str {
        self.factory.name()
    }
}

impl ConditionalConverter for ConverterFactoryAdapter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &ConversionService,
    ) -> bool {
        let factory_accepts = self
            .factory
            .as_conditional()
            .map_or(true, |condition| {
                condition.matches(source_type, target_type, service)
            });
        if !factory_accepts {
            return false;
        }

        // Let the factory refine acceptance per concrete target.
        match self.factory.converter(&target_type.object_type()) {
            Some(converter) => converter.as_conditional().map_or(true, |condition| {
                condition.matches(source_type, target_type, service)
            }),
            None => false,
        }
    }
}
