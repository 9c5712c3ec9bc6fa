//! Ordered generalization lattice of a raw type.
//!
//! The conversion registry matches converters against every
//! generalization of the source and target types, most specific first.
//! This module produces that order.
//!
//! # Order
//!
//! ```text
//! Int32          → [Int32, Number, Comparable, Serializable, Any]
//! Int32[]        → [Int32[], Number[], Comparable[], Serializable[], Any[], Any]
//! Color (enum)   → [Color, ..capabilities, Enum, Comparable, Serializable, Any]
//! ```
//!
//! - Primitives are replaced by their boxed type before the walk.
//! - A superclass is inserted right after the type that declares it, so
//!   the superclass chain precedes capabilities.
//! - Capabilities are appended in declaration order.
//! - The universal root and the enum base are never added mid-walk; the
//!   enum base (for enums) and the root are appended at the end.
//! - For arrays, the walk runs on the element type and re-wraps each
//!   member as an array.

use rustc_hash::FxHashSet;

use crate::RawType;

/// Collect the generalizations of `ty`, most specific first.
pub fn type_hierarchy(ty: &RawType) -> Vec<RawType> {
    let mut walk = HierarchyWalk::default();
    let array = ty.is_array();

    walk.insert(0, ty.object_type(), false);

    let mut i = 0;
    while i < walk.hierarchy.len() {
        let candidate = if array {
            match walk.hierarchy[i].element_type() {
                Some(element) => element.clone(),
                None => break,
            }
        } else {
            walk.hierarchy[i].object_type()
        };

        if let Some(superclass) = candidate.superclass() {
            if *superclass != RawType::any() && *superclass != RawType::enum_base() {
                walk.insert(i + 1, superclass.clone(), array);
            }
        }
        walk.append_interfaces(&candidate, array);
        i += 1;
    }

    if ty.is_enum() {
        walk.append(RawType::enum_base(), false);
        walk.append_interfaces(&RawType::enum_base(), false);
    }
    walk.append(RawType::any(), array);
    walk.append(RawType::any(), false);

    walk.hierarchy
}

#[derive(Default)]
struct HierarchyWalk {
    hierarchy: Vec<RawType>,
    visited: FxHashSet<RawType>,
}

impl HierarchyWalk {
    fn insert(&mut self, index: usize, ty: RawType, as_array: bool) {
        let ty = if as_array { ty.array_type() } else { ty };
        if self.visited.insert(ty.clone()) {
            self.hierarchy.insert(index, ty);
        }
    }

    fn append(&mut self, ty: RawType, as_array: bool) {
        let index = self.hierarchy.len();
        self.insert(index, ty, as_array);
    }

    fn append_interfaces(&mut self, ty: &RawType, as_array: bool) {
        for interface in ty.interfaces() {
            self.append(interface.clone(), as_array);
        }
    }
}
