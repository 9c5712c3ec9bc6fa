//! String parsing and scalar formatting.

use morph_types::{RawType, TypeDescriptor, Value};

use super::unexpected;
use crate::{ConversionError, ConversionService, Converter, ConvertiblePair, GenericConverter};

pub(super) fn register(service: &ConversionService) {
    service.add_converter_for(RawType::string(), RawType::boolean(), StringToBool);
    service.add_converter_for(RawType::string(), RawType::character(), StringToChar);
    service.install(ObjectToString);
}

const TRUE_VALUES: [&str; 4] = ["true", "on", "yes", "1"];
const FALSE_VALUES: [&str; 4] = ["false", "off", "no", "0"];

/// `true/on/yes/1` and `false/off/no/0`, any case. Blank is null.
pub(crate) struct StringToBool;

impl Converter for StringToBool {
    fn convert(&self, source: &Value) -> Result<Value, ConversionError> {
        let text = source
            .as_str()
            .ok_or_else(|| unexpected(source, "a string"))?
            .trim();
        if text.is_empty() {
            return Ok(Value::Null);
        }
        let lower = text.to_ascii_lowercase();
        if TRUE_VALUES.contains(&lower.as_str()) {
            Ok(Value::Bool(true))
        } else if FALSE_VALUES.contains(&lower.as_str()) {
            Ok(Value::Bool(false))
        } else {
            Err(ConversionError::custom(format!(
                "invalid boolean value `{text}`"
            )))
        }
    }
}

/// Single-character strings. Empty is null.
pub(crate) struct StringToChar;

impl Converter for StringToChar {
    fn convert(&self, source: &Value) -> Result<Value, ConversionError> {
        let text = source.as_str().ok_or_else(|| unexpected(source, "a string"))?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(Value::Null),
            (Some(c), None) => Ok(Value::Char(c)),
            (Some(_), Some(_)) => Err(ConversionError::custom(format!(
                "can only convert a string of length 1 to a char, got `{text}`"
            ))),
        }
    }
}

/// Numbers, booleans and chars rendered with their display form.
pub(crate) struct ObjectToString;

impl GenericConverter for ObjectToString {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        let string = RawType::string();
        let sources = [RawType::number(), RawType::boolean(), RawType::character()];
        Some(
            sources
                .into_iter()
                .map(|source| ConvertiblePair::new(source, string.clone()))
                .collect(),
        )
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
        Ok(Value::str(source.to_string()))
    }
}
