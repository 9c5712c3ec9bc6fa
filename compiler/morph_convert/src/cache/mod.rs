//! Lookup cache.
//!
//! Maps a `(source, target)` descriptor pair to its resolved [`Lookup`],
//! including "no match". Every registry mutation bumps the generation and
//! clears the map. Each entry carries the generation it was computed
//! against and a stale entry reads as a miss, so a lookup racing a
//! mutation can never serve a converter the mutation removed.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use morph_types::TypeDescriptor;
use rustc_hash::FxBuildHasher;

use crate::sentinel::Lookup;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    source: TypeDescriptor,
    target: TypeDescriptor,
}

impl CacheKey {
    pub(crate) fn new(source: &TypeDescriptor, target: &TypeDescriptor) -> Self {
        CacheKey {
            source: source.clone(),
            target: target.clone(),
        }
    }
}

pub(crate) struct ConverterCache {
    entries: DashMap<CacheKey, (u64, Lookup), FxBuildHasher>,
    generation: AtomicU64,
    capacity: usize,
}

impl ConverterCache {
    pub(crate) fn new(capacity: usize) -> Self {
        ConverterCache {
            entries: DashMap::with_hasher(FxBuildHasher),
            generation: AtomicU64::new(0),
            capacity,
        }
    }

    /// Current registry generation. Read it before resolving and pass it
    /// back to [`insert`](Self::insert).
    #[inline]
    pub(crate) fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub(crate) fn get(&self, key: &CacheKey) -> Option<Lookup> {
        let generation = self.generation();
        let entry = self.entries.get(key)?;
        let (computed_at, lookup) = entry.value();
        (*computed_at == generation).then(|| lookup.clone())
    }

    /// Store `lookup`, unless it was resolved against an older generation.
    pub(crate) fn insert(&self, key: CacheKey, lookup: Lookup, generation: u64) {
        if self.capacity == 0 || generation != self.generation() {
            return;
        }
        if self.entries.len() >= self.capacity {
            tracing::trace!(capacity = self.capacity, "converter cache full, clearing");
            self.entries.clear();
        }
        self.entries.insert(key, (generation, lookup));
    }

    /// Drop every entry. Called on each registry mutation.
    pub(crate) fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.entries.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests;
