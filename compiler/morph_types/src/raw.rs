//! Raw type handles and their declarations.
//!
//! A `RawType` is the runtime identity of a type, stripped of any generic
//! shape. Each handle points at an immutable `TypeInfo` declaration that
//! lists the type's kind, superclass, and directly implemented capabilities.
//!
//! # Identity
//!
//! - Array types compare structurally: two arrays are equal when their
//!   element types are equal, no matter where the handles were built.
//! - Every other type compares by a process-unique id assigned when the
//!   declaration is built. Two declarations with the same name are distinct.

use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use rustc_hash::FxHashSet;

/// Source of declaration ids.
static NEXT_TYPE_ID: AtomicU32 = AtomicU32::new(0);

/// Cheap-to-clone handle to a type declaration.
#[derive(Clone)]
pub struct RawType(Arc<TypeInfo>);

/// An immutable type declaration.
#[derive(Debug)]
struct TypeInfo {
    id: u32,
    name: Arc<str>,
    kind: TypeKind,
    superclass: Option<RawType>,
    interfaces: Vec<RawType>,
}

/// The kind of a declared type.
#[derive(Clone, Debug)]
pub enum TypeKind {
    /// A concrete or abstract class with at most one superclass.
    Class,

    /// A capability set. Its `interfaces` are the capabilities it extends.
    Interface,

    /// An enumeration. Every enum implicitly extends the enum base.
    Enum {
        /// Variant names in declaration order.
        variants: Vec<Arc<str>>,
    },

    /// A non-nullable primitive with a nullable boxed counterpart.
    Primitive {
        /// The boxed object type for this primitive.
        boxed: RawType,
    },

    /// An array of `element`.
    Array {
        /// The component type.
        element: RawType,
    },
}

/// Builder for class, interface, and enum declarations.
#[derive(Debug)]
#[must_use]
pub struct TypeBuilder {
    name: Arc<str>,
    kind: TypeKind,
    superclass: Option<RawType>,
    interfaces: Vec<RawType>,
}

impl TypeBuilder {
    /// Set the superclass.
    pub fn extends(mut self, superclass: &RawType) -> Self {
        self.superclass = Some(superclass.clone());
        self
    }

    /// Add a directly implemented capability.
    pub fn implements(mut self, interface: &RawType) -> Self {
        self.interfaces.push(interface.clone());
        self
    }

    /// Finish the declaration and assign it a fresh identity.
    pub fn build(self) -> RawType {
        RawType::from_info(TypeInfo {
            id: NEXT_TYPE_ID.fetch_add(1, Ordering::Relaxed),
            name: self.name,
            kind: self.kind,
            superclass: self.superclass,
            interfaces: self.interfaces,
        })
    }
}

impl RawType {
    fn from_info(info: TypeInfo) -> Self {
        RawType(Arc::new(info))
    }

    fn builder(name: impl Into<Arc<str>>, kind: TypeKind) -> TypeBuilder {
        TypeBuilder {
            name: name.into(),
            kind,
            superclass: None,
            interfaces: Vec::new(),
        }
    }

    /// Start declaring a class.
    pub fn class(name: impl Into<Arc<str>>) -> TypeBuilder {
        Self::builder(name, TypeKind::Class)
    }

    /// Start declaring a capability set.
    pub fn interface(name: impl Into<Arc<str>>) -> TypeBuilder {
        Self::builder(name, TypeKind::Interface)
    }

    /// Start declaring an enumeration with the given variants.
    pub fn enumeration<I, S>(name: impl Into<Arc<str>>, variants: I) -> TypeBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let variants = variants.into_iter().map(Into::into).collect();
        Self::builder(name, TypeKind::Enum { variants })
    }

    /// Declare a primitive backed by `boxed`. Only the well-known table
    /// declares primitives.
    pub(crate) fn primitive(name: &str, boxed: &RawType) -> RawType {
        Self::builder(
            name,
            TypeKind::Primitive {
                boxed: boxed.clone(),
            },
        )
        .build()
    }

    /// The array type whose elements are `element`.
    pub fn array_of(element: &RawType) -> RawType {
        let name: Arc<str> = format!("{}[]", element.name()).into();
        Self::builder(
            name,
            TypeKind::Array {
                element: element.clone(),
            },
        )
        .build()
    }

    /// The array type whose elements are `self`.
    #[inline]
    pub fn array_type(&self) -> RawType {
        Self::array_of(self)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    #[inline]
    pub fn kind(&self) -> &TypeKind {
        &self.0.kind
    }

    /// The declared superclass, if any.
    #[inline]
    pub fn superclass(&self) -> Option<&RawType> {
        self.0.superclass.as_ref()
    }

    /// Directly implemented capabilities, in declaration order.
    #[inline]
    pub fn interfaces(&self) -> &[RawType] {
        &self.0.interfaces
    }

    #[inline]
    pub fn is_primitive(&self) -> bool {
        matches!(self.0.kind, TypeKind::Primitive { .. })
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self.0.kind, TypeKind::Array { .. })
    }

    #[inline]
    pub fn is_enum(&self) -> bool {
        matches!(self.0.kind, TypeKind::Enum { .. })
    }

    #[inline]
    pub fn is_interface(&self) -> bool {
        matches!(self.0.kind, TypeKind::Interface)
    }

    /// Component type for arrays.
    pub fn element_type(&self) -> Option<&RawType> {
        match &self.0.kind {
            TypeKind::Array { element } => Some(element),
            _ => None,
        }
    }

    /// Variant names for enums; empty for every other kind.
    pub fn variants(&self) -> &[Arc<str>] {
        match &self.0.kind {
            TypeKind::Enum { variants } => variants,
            _ => &[],
        }
    }

    /// The nullable object type: the boxed type for primitives, `self`
    /// otherwise.
    pub fn object_type(&self) -> RawType {
        match &self.0.kind {
            TypeKind::Primitive { boxed } => boxed.clone(),
            _ => self.clone(),
        }
    }

    /// Direct supertypes: superclass, capabilities, and the enum base for
    /// enumerations.
    fn direct_supertypes(&self) -> impl Iterator<Item = RawType> + '_ {
        let enum_base = self.is_enum().then(RawType::enum_base);
        self.superclass()
            .cloned()
            .into_iter()
            .chain(self.interfaces().iter().cloned())
            .chain(enum_base)
    }

    /// Whether a value of type `self` can be stored where `target` is
    /// expected.
    ///
    /// Primitives are compared through their boxed types. Arrays are
    /// covariant in their element type unless either element is primitive.
    /// Every non-primitive type is assignable to the universal root.
    pub fn is_assignable_to(&self, target: &RawType) -> bool {
        if self == target {
            return true;
        }
        if self.is_primitive() || target.is_primitive() {
            return self
                .object_type()
                .is_assignable_to(&target.object_type());
        }
        if *target == RawType::any() {
            return true;
        }
        match (self.element_type(), target.element_type()) {
            (Some(from), Some(to)) => {
                !from.is_primitive() && !to.is_primitive() && from.is_assignable_to(to)
            }
            (Some(_), None) | (None, Some(_)) => false,
            (None, None) => self.is_subtype_of(target),
        }
    }

    /// Walk the supertype DAG breadth-first looking for `target`.
    fn is_subtype_of(&self, target: &RawType) -> bool {
        let mut visited = FxHashSet::default();
        let mut queue: VecDeque<RawType> = self.direct_supertypes().collect();

        while let Some(ty) = queue.pop_front() {
            if ty == *target {
                return true;
            }
            if visited.insert(ty.clone()) {
                queue.extend(ty.direct_supertypes());
            }
        }
        false
    }
}

impl PartialEq for RawType {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0.kind, &other.0.kind) {
            (TypeKind::Array { element: a }, TypeKind::Array { element: b }) => a == b,
            _ => self.0.id == other.0.id,
        }
    }
}

impl Eq for RawType {}

impl Hash for RawType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.0.kind {
            TypeKind::Array { element } => {
                1u8.hash(state);
                element.hash(state);
            }
            _ => {
                0u8.hash(state);
                self.0.id.hash(state);
            }
        }
    }
}

impl fmt::Debug for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
