//! Converter registry and the hierarchy-walk match.
//!
//! # Design
//!
//! - Global converters (no declared pairs) live in a copy-on-write list:
//!   readers take a snapshot `Arc`, writers replace the whole list.
//! - Every other converter is filed under each pair it declares. Buckets
//!   live in a concurrent map and each bucket is a deque guarded by its own
//!   lock; the newest converter sits at the front.
//! - Predicates can call back into the conversion service, so no lock is
//!   held while one runs: bucket contents are snapshotted first.
//!
//! # Matching
//!
//! ```text
//! for source in type_hierarchy(source)      // most specific first
//!     for target in type_hierarchy(target)
//!         bucket(source, target) front-to-back, first acceptor wins
//!         else global converters in registration order
//! ```
//!
//! Source specificity dominates target specificity.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use morph_types::{type_hierarchy, RawType, TypeDescriptor};
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;

use crate::{ConversionError, ConversionService, ConvertiblePair, GenericConverter};

/// All registered converters.
pub struct ConverterRegistry {
    /// Converters without declared pairs, in registration order.
    global: RwLock<Arc<[Arc<dyn GenericConverter>]>>,

    /// Exact pair → converters declared for it.
    converters: DashMap<ConvertiblePair, Arc<ConvertersForPair>, FxBuildHasher>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        ConverterRegistry {
            global: RwLock::new(Arc::from(Vec::new())),
            converters: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Register `converter` under every pair it declares.
    ///
    /// A converter declaring no pairs must be conditional; it is appended
    /// to the global list and tried for every candidate pair.
    pub fn add(&self, converter: Arc<dyn GenericConverter>) -> Result<(), ConversionError> {
        if converter.convertible_types().is_none() && converter.as_conditional().is_none() {
            return Err(ConversionError::MissingConvertibleTypes {
                converter: converter.name().to_owned(),
            });
        }
        self.insert(converter);
        Ok(())
    }

    /// Register without validating the global-converter rule.
    pub(crate) fn insert(&self, converter: Arc<dyn GenericConverter>) {
        match converter.convertible_types() {
            Some(pairs) => {
                for pair in pairs {
                    tracing::debug!(%pair, converter = converter.name(), "registered converter");
                    self.converters
                        .entry(pair)
                        .or_default()
                        .push_front(Arc::clone(&converter));
                }
            }
            None => {
                tracing::debug!(converter = converter.name(), "registered global converter");
                let mut global = self.global.write();
                let mut next = Vec::with_capacity(global.len() + 1);
                next.extend(global.iter().cloned());
                next.push(converter);
                *global = Arc::from(next);
            }
        }
    }

    /// Drop every converter declared for the exact pair. Returns whether
    /// any were registered. Converters found through the hierarchy for
    /// subtypes of `source` or `target` are unaffected.
    pub fn remove(&self, source: &RawType, target: &RawType) -> bool {
        let pair = ConvertiblePair::new(source.clone(), target.clone());
        let removed = self.converters.remove(&pair).is_some();
        tracing::debug!(%pair, removed, "removed convertible pair");
        removed
    }

    /// Find the converter for `source_type → target_type` by walking both
    /// type hierarchies.
    pub fn find(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &ConversionService,
    ) -> Option<Arc<dyn GenericConverter>> {
        let source_candidates = type_hierarchy(source_type.raw());
        let target_candidates = type_hierarchy(target_type.raw());

        for source_candidate in &source_candidates {
            for target_candidate in &target_candidates {
                let pair = ConvertiblePair::new(source_candidate.clone(), target_candidate.clone());
                let found = self.registered_converter(source_type, target_type, &pair, service);
                if found.is_some() {
                    tracing::trace!(%pair, "matched converter");
                    return found;
                }
            }
        }
        None
    }

    fn registered_converter(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        pair: &ConvertiblePair,
        service: &ConversionService,
    ) -> Option<Arc<dyn GenericConverter>> {
        // Clone the bucket out so the map shard is unlocked before any
        // predicate runs.
        let bucket = self.converters.get(pair).map(|entry| Arc::clone(entry.value()));
        if let Some(bucket) = bucket {
            if let Some(converter) = bucket.converter(source_type, target_type, service) {
                return Some(converter);
            }
        }

        let global = Arc::clone(&self.global.read());
        global
            .iter()
            .find(|converter| {
                converter.as_conditional().is_some_and(|condition| {
                    condition.matches(source_type, target_type, service)
                })
            })
            .cloned()
    }

    /// Number of distinct pairs with registered converters.
    #[cfg(test)]
    pub fn pair_count(&self) -> usize {
        self.converters.len()
    }

    /// Number of global converters.
    #[cfg(test)]
    pub fn global_count(&self) -> usize {
        self.global.read().len()
    }
}

impl fmt::Display for ConverterRegistry {
    /// One line per pair, sorted, listing converters in match order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<String> = self
            .converters
            .iter()
            .map(|entry| format!("{}: {}", entry.key(), entry.value()))
            .collect();
        lines.sort_unstable();

        f.write_str("ConversionService converters =")?;
        for line in &lines {
            write!(f, "\n\t{line}")?;
        }
        for converter in self.global.read().iter() {
            write!(f, "\n\t(global): {}", converter.name())?;
        }
        Ok(())
    }
}

/// Converters registered for one exact pair, newest first.
#[derive(Default)]
struct ConvertersForPair {
    converters: RwLock<VecDeque<Arc<dyn GenericConverter>>>,
}

impl ConvertersForPair {
    fn push_front(&self, converter: Arc<dyn GenericConverter>) {
        self.converters.write().push_front(converter);
    }

    /// First converter, front to back, whose predicate accepts. A converter
    /// without a predicate accepts everything.
    fn converter(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &ConversionService,
    ) -> Option<Arc<dyn GenericConverter>> {
        let snapshot: Vec<_> = self.converters.read().iter().cloned().collect();
        snapshot.into_iter().find(|converter| {
            converter.as_conditional().map_or(true, |condition| {
                condition.matches(source_type, target_type, service)
            })
        })
    }
}

impl fmt::Display for ConvertersForPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converters = self.converters.read();
        for (i, converter) in converters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(converter.name())?;
        }
        Ok(())
    }
}
