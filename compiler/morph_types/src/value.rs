//! Runtime values moved through the conversion engine.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::RawType;

/// A dynamically typed value.
///
/// Scalars carry their boxed runtime type (`Int32`, `String`, ...).
/// Primitive raw types only ever describe declarations, never values.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Str(Arc<str>),

    /// A variant of an enumeration type.
    Enum { ty: RawType, variant: Arc<str> },

    /// A typed array. `element` fixes the runtime array type.
    Array { element: RawType, items: Vec<Value> },

    List(Vec<Value>),
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),

    /// An opaque value of a caller-declared type.
    Object(ObjectValue),
}

/// Opaque payload tagged with its declared type.
///
/// Two object values are equal only when they share the same payload
/// allocation.
#[derive(Clone)]
pub struct ObjectValue {
    ty: RawType,
    data: Arc<dyn Any + Send + Sync>,
}

impl ObjectValue {
    #[inline]
    pub fn raw_type(&self) -> &RawType {
        &self.ty
    }

    /// Borrow the payload as `T`, if it is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && Arc::ptr_eq(&self.data, &other.data)
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectValue")
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}

impl Value {
    /// A string value.
    pub fn str(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// A variant of the enumeration `ty`.
    pub fn enum_variant(ty: &RawType, variant: impl Into<Arc<str>>) -> Self {
        Value::Enum {
            ty: ty.clone(),
            variant: variant.into(),
        }
    }

    /// An array of `element` values.
    pub fn array(element: &RawType, items: Vec<Value>) -> Self {
        Value::Array {
            element: element.clone(),
            items,
        }
    }

    /// Wrap an opaque payload as a value of type `ty`.
    pub fn object<T: Any + Send + Sync>(ty: &RawType, data: T) -> Self {
        Value::Object(ObjectValue {
            ty: ty.clone(),
            data: Arc::new(data),
        })
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The runtime type of this value; `None` for null.
    pub fn runtime_type(&self) -> Option<RawType> {
        let ty = match self {
            Value::Null => return None,
            Value::Bool(_) => RawType::boolean(),
            Value::Char(_) => RawType::character(),
            Value::Int8(_) => RawType::int8(),
            Value::Int16(_) => RawType::int16(),
            Value::Int32(_) => RawType::int32(),
            Value::Int64(_) => RawType::int64(),
            Value::Float32(_) => RawType::float32(),
            Value::Float64(_) => RawType::float64(),
            Value::Str(_) => RawType::string(),
            Value::Enum { ty, .. } => ty.clone(),
            Value::Array { element, .. } => element.array_type(),
            Value::List(_) => RawType::list(),
            Value::Set(_) => RawType::set(),
            Value::Map(_) => RawType::map(),
            Value::Object(object) => object.ty.clone(),
        };
        Some(ty)
    }

    /// Whether this value can be stored where `ty` is expected. Null is an
    /// instance of nothing.
    pub fn is_instance_of(&self, ty: &RawType) -> bool {
        self.runtime_type()
            .is_some_and(|runtime| runtime.is_assignable_to(ty))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(&**s),
            _ => None,
        }
    }

    /// Integer payloads widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int8(n) => Some(i64::from(*n)),
            Value::Int16(n) => Some(i64::from(*n)),
            Value::Int32(n) => Some(i64::from(*n)),
            Value::Int64(n) => Some(*n),
            _ => None,
        }
    }

    /// Floating-point payloads widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float32(n) => Some(f64::from(*n)),
            Value::Float64(n) => Some(*n),
            _ => None,
        }
    }

    /// Items of an array, list, or set.
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Value::Array { items, .. } | Value::List(items) | Value::Set(items) => {
                Some(items.as_slice())
            }
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::Int8(n) => write!(f, "{n}"),
            Value::Int16(n) => write!(f, "{n}"),
            Value::Int32(n) => write!(f, "{n}"),
            Value::Int64(n) => write!(f, "{n}"),
            Value::Float32(n) => write!(f, "{n}"),
            Value::Float64(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Enum { variant, .. } => f.write_str(variant),
            Value::Array { items, .. } | Value::List(items) | Value::Set(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}={value}")?;
                }
                f.write_str("}")
            }
            Value::Object(object) => write!(f, "<{} object>", object.ty),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<i8> for Value {
    fn from(n: i8) -> Self {
        Value::Int8(n)
    }
}

impl From<i16> for Value {
    fn from(n: i16) -> Self {
        Value::Int16(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int32(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int64(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float32(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float64(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s.into())
    }
}

#[cfg(test)]
mod tests;
