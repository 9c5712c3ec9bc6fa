//! Type descriptors: a raw type plus its resolved generic shape.
//!
//! Descriptors are built by callers from whatever reflective source they
//! have (a field declaration, a configuration schema) and arrive here
//! already resolved. Equality and hashing include the shape, so
//! `List<Int32>` and `List<String>` are distinct lookup keys.

use std::fmt;
use std::sync::Arc;

use crate::{RawType, Value};

/// Immutable description of a type to convert from or to.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    raw: RawType,
    shape: TypeShape,
}

/// Resolved generic shape of a descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// No generic information.
    Plain,

    /// Element type of an array or collection.
    Element(Arc<TypeDescriptor>),

    /// Key and value types of a map.
    Entry {
        key: Arc<TypeDescriptor>,
        value: Arc<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    /// Describe `raw`. Array types get their element shape filled in.
    pub fn of(raw: RawType) -> Self {
        let shape = match raw.element_type() {
            Some(element) => TypeShape::Element(Arc::new(Self::of(element.clone()))),
            None => TypeShape::Plain,
        };
        TypeDescriptor { raw, shape }
    }

    /// An array whose elements are described by `element`.
    pub fn array_of(element: TypeDescriptor) -> Self {
        TypeDescriptor {
            raw: element.raw.array_type(),
            shape: TypeShape::Element(Arc::new(element)),
        }
    }

    /// A collection type (`raw` should be assignable to `Collection`) with
    /// the given element type.
    pub fn collection(raw: RawType, element: TypeDescriptor) -> Self {
        TypeDescriptor {
            raw,
            shape: TypeShape::Element(Arc::new(element)),
        }
    }

    /// A map type with the given key and value types.
    pub fn map(raw: RawType, key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor {
            raw,
            shape: TypeShape::Entry {
                key: Arc::new(key),
                value: Arc::new(value),
            },
        }
    }

    /// Describe the runtime type of `value`, or `None` for null.
    ///
    /// Collections and maps carry no element shape: their contents are
    /// heterogeneous until a converter looks at each entry.
    pub fn for_value(value: &Value) -> Option<Self> {
        value.runtime_type().map(Self::of)
    }

    #[inline]
    pub fn raw(&self) -> &RawType {
        &self.raw
    }

    #[inline]
    pub fn shape(&self) -> &TypeShape {
        &self.shape
    }

    /// The nullable object type of the raw type.
    #[inline]
    pub fn object_type(&self) -> RawType {
        self.raw.object_type()
    }

    #[inline]
    pub fn is_primitive(&self) -> bool {
        self.raw.is_primitive()
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        self.raw.is_array()
    }

    pub fn is_collection(&self) -> bool {
        !self.raw.is_array() && self.raw.is_assignable_to(&RawType::collection())
    }

    pub fn is_map(&self) -> bool {
        self.raw.is_assignable_to(&RawType::map())
    }

    /// Whether this descriptor carries generic shape beyond its raw type.
    #[inline]
    pub fn has_generics(&self) -> bool {
        !matches!(self.shape, TypeShape::Plain)
    }

    /// Element type of an array or collection, when resolved.
    pub fn element_descriptor(&self) -> Option<&TypeDescriptor> {
        match &self.shape {
            TypeShape::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Key type of a map, when resolved.
    pub fn map_key_descriptor(&self) -> Option<&TypeDescriptor> {
        match &self.shape {
            TypeShape::Entry { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Value type of a map, when resolved.
    pub fn map_value_descriptor(&self) -> Option<&TypeDescriptor> {
        match &self.shape {
            TypeShape::Entry { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Whether a value described by `self` can be stored where `target`
    /// is expected.
    ///
    /// Raw types are compared through their object types. When both sides
    /// are arrays, collections, or maps, resolved element, key, and value
    /// types must be assignable too; an unresolved side accepts anything.
    pub fn is_assignable_to(&self, target: &TypeDescriptor) -> bool {
        if !self.object_type().is_assignable_to(&target.object_type()) {
            return false;
        }
        if (self.is_array() && target.is_array())
            || (self.is_collection() && target.is_collection())
        {
            return nested_assignable(self.element_descriptor(), target.element_descriptor());
        }
        if self.is_map() && target.is_map() {
            return nested_assignable(self.map_key_descriptor(), target.map_key_descriptor())
                && nested_assignable(
                    self.map_value_descriptor(),
                    target.map_value_descriptor(),
                );
        }
        true
    }
}

fn nested_assignable(from: Option<&TypeDescriptor>, to: Option<&TypeDescriptor>) -> bool {
    match (from, to) {
        (Some(from), Some(to)) => from.is_assignable_to(to),
        _ => true,
    }
}

impl From<RawType> for TypeDescriptor {
    fn from(raw: RawType) -> Self {
        Self::of(raw)
    }
}

impl From<&RawType> for TypeDescriptor {
    fn from(raw: &RawType) -> Self {
        Self::of(raw.clone())
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.shape {
            TypeShape::Element(element) if self.is_array() => write!(f, "{element}[]"),
            TypeShape::Element(element) => write!(f, "{}<{element}>", self.raw),
            TypeShape::Entry { key, value } => write!(f, "{}<{key}, {value}>", self.raw),
            TypeShape::Plain => write!(f, "{}", self.raw),
        }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
