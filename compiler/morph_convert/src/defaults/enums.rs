//! Enum variants by name.

use std::sync::Arc;

use morph_types::{RawType, Value};

use super::unexpected;
use crate::{ConversionError, ConversionService, Converter, ConverterFactory};

pub(super) fn register(service: &ConversionService) {
    service.add_converter_factory_for(&RawType::string(), &RawType::enum_base(), StringToEnumFactory);
    service.add_converter_for(RawType::enum_base(), RawType::string(), EnumToString);
}

/// String → the variant of the exact target enum with that name.
pub(crate) struct StringToEnumFactory;

impl ConverterFactory for StringToEnumFactory {
    fn converter(&self, target: &RawType) -> Option<Arc<dyn Converter>> {
        if !target.is_enum() {
            return None;
        }
        Some(Arc::new(StringToEnum { ty: target.clone() }))
    }
}

struct StringToEnum {
    ty: RawType,
}

impl Converter for StringToEnum {
    fn convert(&self, source: &Value) -> Result<Value, ConversionError> {
        let text = source.as_str().ok_or_else(|| unexpected(source, "a string"))?;
        if text.is_empty() {
            return Ok(Value::Null);
        }
        let name = text.trim();
        self.ty
            .variants()
            .iter()
            .find(|variant| ***variant == *name)
            .map(|variant| Value::enum_variant(&self.ty, Arc::clone(variant)))
            .ok_or_else(|| {
                ConversionError::custom(format!("`{}` has no variant `{name}`", self.ty))
            })
    }
}

/// Enum variant → its name.
pub(crate) struct EnumToString;

impl Converter for EnumToString {
    fn convert(&self, source: &Value) -> Result<Value, ConversionError> {
        match source {
            Value::Enum { variant, .. } => Ok(Value::Str(Arc::clone(variant))),
            _ => Err(unexpected(source, "an enum")),
        }
    }
}
