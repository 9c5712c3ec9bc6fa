//! Runtime type model for the morph conversion engine.
//!
//! Rust cannot enumerate the supertypes of an arbitrary runtime type, so
//! the conversion engine works against an explicit model instead:
//!
//! - [`RawType`]: a type identity with its declared superclass and
//!   capabilities. Well-known types (`Any`, `Number`, `String`, the
//!   primitives, the collection capabilities) are built in.
//! - [`TypeDescriptor`]: a raw type plus resolved generic shape.
//! - [`Value`]: a dynamically typed value that always knows its runtime type.
//! - [`type_hierarchy`]: the ordered generalizations of a raw type, the
//!   search order the converter registry walks.
//!
//! # Declaring types
//!
//! ```
//! use morph_types::RawType;
//!
//! let shape = RawType::interface("Shape").build();
//! let circle = RawType::class("Circle").implements(&shape).build();
//!
//! assert!(circle.is_assignable_to(&shape));
//! assert!(circle.is_assignable_to(&RawType::any()));
//! ```

mod descriptor;
mod hierarchy;
mod raw;
mod value;
mod well_known;

pub use descriptor::{TypeDescriptor, TypeShape};
pub use hierarchy::type_hierarchy;
pub use raw::{RawType, TypeBuilder, TypeKind};
pub use value::{ObjectValue, Value};
