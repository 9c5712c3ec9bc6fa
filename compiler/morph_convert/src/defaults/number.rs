//! Numeric conversions: number to number, string to number, and the
//! char/number pair.
//!
//! Narrowing is checked: a value outside the target's range is a fault,
//! never a silent wrap. Floats convert to integers by truncation toward
//! zero.

use std::sync::Arc;

use morph_types::{RawType, TypeDescriptor, Value};

use super::unexpected;
use crate::{
    ConditionalConverter, ConversionError, ConversionService, Converter, ConverterFactory,
};

pub(super) fn register(service: &ConversionService) {
    let number = RawType::number();
    service.add_converter_factory_for(&number, &number, NumberToNumberFactory);
    service.add_converter_factory_for(&RawType::string(), &number, StringToNumberFactory);
    service.add_converter_factory_for(&RawType::character(), &number, CharToNumberFactory);
    service.add_converter_for(number, RawType::character(), NumberToChar);
}

/// The boxed numeric types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NumericKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl NumericKind {
    /// The kind of `ty`, primitive or boxed. `None` for `Number` itself and
    /// for non-numeric types.
    pub(crate) fn of(ty: &RawType) -> Option<Self> {
        let ty = ty.object_type();
        [
            (RawType::int8(), NumericKind::Int8),
            (RawType::int16(), NumericKind::Int16),
            (RawType::int32(), NumericKind::Int32),
            (RawType::int64(), NumericKind::Int64),
            (RawType::float32(), NumericKind::Float32),
            (RawType::float64(), NumericKind::Float64),
        ]
        .into_iter()
        .find_map(|(raw, kind)| (raw == ty).then_some(kind))
    }

    fn raw_type(self) -> RawType {
        match self {
            NumericKind::Int8 => RawType::int8(),
            NumericKind::Int16 => RawType::int16(),
            NumericKind::Int32 => RawType::int32(),
            NumericKind::Int64 => RawType::int64(),
            NumericKind::Float32 => RawType::float32(),
            NumericKind::Float64 => RawType::float64(),
        }
    }

    /// `n` as a value of this kind.
    pub(crate) fn convert_i64(self, n: i64) -> Result<Value, ConversionError> {
        let overflow = |_| self.overflow(n);
        match self {
            NumericKind::Int8 => i8::try_from(n).map(Value::Int8).map_err(overflow),
            NumericKind::Int16 => i16::try_from(n).map(Value::Int16).map_err(overflow),
            NumericKind::Int32 => i32::try_from(n).map(Value::Int32).map_err(overflow),
            NumericKind::Int64 => Ok(Value::Int64(n)),
            NumericKind::Float32 => Ok(Value::Float32(widen_to_f32(n))),
            NumericKind::Float64 => Ok(Value::Float64(widen_to_f64(n))),
        }
    }

    /// `n` as a value of this kind, truncating toward zero for integers.
    pub(crate) fn convert_f64(self, n: f64) -> Result<Value, ConversionError> {
        match self {
            NumericKind::Float32 => Ok(Value::Float32(narrow_to_f32(n))),
            NumericKind::Float64 => Ok(Value::Float64(n)),
            _ => self.convert_i64(truncate(n).ok_or_else(|| self.overflow(n))?),
        }
    }

    fn overflow(self, n: impl std::fmt::Display) -> ConversionError {
        ConversionError::custom(format!("{n} is out of range for `{}`", self.raw_type()))
    }
}

#[expect(clippy::cast_precision_loss, reason = "float targets accept rounding")]
fn widen_to_f32(n: i64) -> f32 {
    n as f32
}

#[expect(clippy::cast_precision_loss, reason = "float targets accept rounding")]
fn widen_to_f64(n: i64) -> f64 {
    n as f64
}

#[expect(clippy::cast_possible_truncation, reason = "float targets accept rounding")]
fn narrow_to_f32(n: f64) -> f32 {
    n as f32
}

/// `n` truncated toward zero, or `None` when it has no `i64` value.
#[expect(clippy::cast_possible_truncation, reason = "range checked before the cast")]
fn truncate(n: f64) -> Option<i64> {
    // 2^63, the first value past i64::MAX.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let n = n.trunc();
    (n.is_finite() && (-LIMIT..LIMIT).contains(&n)).then_some(n as i64)
}

/// Parse a decimal or `0x`/`#`-prefixed hex integer with optional sign.
fn parse_integer(text: &str) -> Result<i64, ConversionError> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (radix, digits) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
        .or_else(|| unsigned.strip_prefix('#'))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };
    if digits.starts_with(['+', '-']) {
        return Err(ConversionError::custom(format!("`{text}` is not a number")));
    }

    let parsed = if negative {
        i64::from_str_radix(&format!("-{digits}"), radix)
    } else {
        i64::from_str_radix(digits, radix)
    };
    parsed.map_err(ConversionError::other)
}

/// Number → any boxed numeric type.
pub(crate) struct NumberToNumberFactory;

impl ConverterFactory for NumberToNumberFactory {
    fn converter(&self, target: &RawType) -> Option<Arc<dyn Converter>> {
        let kind = NumericKind::of(target)?;
        Some(Arc::new(NumberToNumber { kind }))
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        Some(self)
    }
}

impl ConditionalConverter for NumberToNumberFactory {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        _service: &ConversionService,
    ) -> bool {
        // Same type is left to the identity fallback.
        source_type.object_type() != target_type.object_type()
    }
}

struct NumberToNumber {
    kind: NumericKind,
}

impl Converter for NumberToNumber {
    fn convert(&self, source: &Value) -> Result<Value, ConversionError> {
        if let Some(n) = source.as_i64() {
            return self.kind.convert_i64(n);
        }
        match source.as_f64() {
            Some(n) => self.kind.convert_f64(n),
            None => Err(unexpected(source, "a numeric")),
        }
    }
}

/// String → any boxed numeric type.
pub(crate) struct StringToNumberFactory;

impl ConverterFactory for StringToNumberFactory {
    fn converter(&self, target: &RawType) -> Option<Arc<dyn Converter>> {
        let kind = NumericKind::of(target)?;
        Some(Arc::new(StringToNumber { kind }))
    }
}

struct StringToNumber {
    kind: NumericKind,
}

impl Converter for StringToNumber {
    fn convert(&self, source: &Value) -> Result<Value, ConversionError> {
        let text = source
            .as_str()
            .ok_or_else(|| unexpected(source, "a string"))?
            .trim();
        if text.is_empty() {
            return Ok(Value::Null);
        }
        match self.kind {
            NumericKind::Float32 => text
                .parse::<f32>()
                .map(Value::Float32)
                .map_err(ConversionError::other),
            NumericKind::Float64 => text
                .parse::<f64>()
                .map(Value::Float64)
                .map_err(ConversionError::other),
            kind => kind.convert_i64(parse_integer(text)?),
        }
    }
}

/// Char → any boxed numeric type, by code point.
pub(crate) struct CharToNumberFactory;

impl ConverterFactory for CharToNumberFactory {
    fn converter(&self, target: &RawType) -> Option<Arc<dyn Converter>> {
        let kind = NumericKind::of(target)?;
        Some(Arc::new(CharToNumber { kind }))
    }
}

struct CharToNumber {
    kind: NumericKind,
}

impl Converter for CharToNumber {
    fn convert(&self, source: &Value) -> Result<Value, ConversionError> {
        let c = source.as_char().ok_or_else(|| unexpected(source, "a char"))?;
        self.kind.convert_i64(i64::from(u32::from(c)))
    }
}

/// Integral number → char, by code point.
pub(crate) struct NumberToChar;

impl Converter for NumberToChar {
    fn convert(&self, source: &Value) -> Result<Value, ConversionError> {
        let n = source
            .as_i64()
            .ok_or_else(|| unexpected(source, "an integral"))?;
        u32::try_from(n)
            .ok()
            .and_then(char::from_u32)
            .map(Value::Char)
            .ok_or_else(|| ConversionError::custom(format!("{n} is not a valid char code point")))
    }
}
