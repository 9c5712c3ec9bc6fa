use morph_types::RawType;

use super::*;

fn key(source: &RawType, target: &RawType) -> CacheKey {
    CacheKey::new(&source.into(), &target.into())
}

#[test]
fn stores_and_returns_lookups() {
    let cache = ConverterCache::new(8);
    let key = key(&RawType::int32(), &RawType::number());

    cache.insert(key.clone(), Lookup::Identity, cache.generation());

    assert!(cache.get(&key).is_some_and(|lookup| lookup.is_identity()));
}

#[test]
fn caches_no_match() {
    let cache = ConverterCache::new(8);
    let key = key(&RawType::string(), &RawType::boolean());

    cache.insert(key.clone(), Lookup::NoMatch, cache.generation());

    assert!(cache.get(&key).is_some_and(|lookup| !lookup.is_match()));
}

#[test]
fn invalidate_clears_entries() {
    let cache = ConverterCache::new(8);
    let key = key(&RawType::int32(), &RawType::number());
    cache.insert(key.clone(), Lookup::Identity, cache.generation());

    cache.invalidate();

    assert!(cache.get(&key).is_none());
    assert_eq!(cache.len(), 0);
}

#[test]
fn result_from_older_generation_is_dropped() {
    let cache = ConverterCache::new(8);
    let key = key(&RawType::int32(), &RawType::number());
    let generation = cache.generation();

    // A registration lands while the lookup is resolving.
    cache.invalidate();
    cache.insert(key.clone(), Lookup::Identity, generation);

    assert!(cache.get(&key).is_none());
}

#[test]
fn overflow_clears_before_inserting() {
    let cache = ConverterCache::new(2);
    let generation = cache.generation();
    cache.insert(key(&RawType::int8(), &RawType::number()), Lookup::Identity, generation);
    cache.insert(key(&RawType::int16(), &RawType::number()), Lookup::Identity, generation);

    let newest = key(&RawType::int32(), &RawType::number());
    cache.insert(newest.clone(), Lookup::Identity, generation);

    assert_eq!(cache.len(), 1);
    assert!(cache.get(&newest).is_some());
}

#[test]
fn zero_capacity_disables_caching() {
    let cache = ConverterCache::new(0);
    let key = key(&RawType::int32(), &RawType::number());

    cache.insert(key.clone(), Lookup::Identity, cache.generation());

    assert!(cache.get(&key).is_none());
}

#[test]
fn keys_distinguish_generic_shape() {
    let cache = ConverterCache::new(8);
    let strings = TypeDescriptor::collection(RawType::list(), RawType::string().into());
    let ints = TypeDescriptor::collection(RawType::list(), RawType::int32().into());
    let source = TypeDescriptor::of(RawType::list());

    cache.insert(CacheKey::new(&source, &strings), Lookup::NoMatch, cache.generation());

    assert!(cache.get(&CacheKey::new(&source, &ints)).is_none());
}
