//! Element-wise conversion between arrays, collections, and maps.
//!
//! Each element goes back through the [`ConversionService`] with its own
//! runtime type as the source, so any registered converter, built-in or
//! not, applies to elements too. When the target carries no element type,
//! elements are copied as they are.

use morph_types::{RawType, TypeDescriptor, Value};

use super::unexpected;
use crate::{
    ConditionalConverter, ConversionError, ConversionService, ConvertiblePair, GenericConverter,
};

pub(super) fn register(service: &ConversionService) {
    service.install(ArrayToArray);
    service.install(ArrayToCollection);
    service.install(CollectionToArray);
    service.install(CollectionToCollection);
    service.install(MapToMap);
}

/// Whether elements described by `source_element` can become
/// `target_element`s. An unresolved side is assumed convertible.
pub(crate) fn can_convert_elements(
    source_element: Option<&TypeDescriptor>,
    target_element: Option<&TypeDescriptor>,
    service: &ConversionService,
) -> bool {
    match (source_element, target_element) {
        (Some(source), Some(target)) => {
            service.can_convert_types(Some(source), target)
                || source.raw().is_assignable_to(target.raw())
        }
        _ => true,
    }
}

fn convert_element(
    item: &Value,
    target_element: &TypeDescriptor,
    service: &ConversionService,
) -> Result<Value, ConversionError> {
    let source_element = TypeDescriptor::for_value(item);
    service.convert_with(item, source_element.as_ref(), target_element)
}

fn convert_elements(
    items: &[Value],
    target_element: Option<&TypeDescriptor>,
    service: &ConversionService,
) -> Result<Vec<Value>, ConversionError> {
    let Some(target_element) = target_element else {
        return Ok(items.to_vec());
    };
    items
        .iter()
        .map(|item| convert_element(item, target_element, service))
        .collect()
}

/// Builds a set for set targets, a list for every other collection.
fn collection_value(target: &RawType, items: Vec<Value>) -> Value {
    if !target.is_assignable_to(&RawType::set()) {
        return Value::List(items);
    }
    // `Value` has no `Hash`: quadratic dedup, first-seen order kept.
    let mut unique: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    Value::Set(unique)
}

fn target_array_element(target_type: &TypeDescriptor) -> Result<TypeDescriptor, ConversionError> {
    if let Some(element) = target_type.element_descriptor() {
        return Ok(element.clone());
    }
    target_type
        .raw()
        .element_type()
        .map(TypeDescriptor::from)
        .ok_or_else(|| ConversionError::custom(format!("`{target_type}` is not an array type")))
}

fn elements_match(
    source_type: &TypeDescriptor,
    target_type: &TypeDescriptor,
    service: &ConversionService,
) -> bool {
    can_convert_elements(
        source_type.element_descriptor(),
        target_type.element_descriptor(),
        service,
    )
}

fn single_pair(source: RawType, target: RawType) -> Option<Vec<ConvertiblePair>> {
    Some(vec![ConvertiblePair::new(source, target)])
}

fn any_array() -> RawType {
    RawType::any().array_type()
}

/// Array → array of another element type.
pub(crate) struct ArrayToArray;

impl GenericConverter for ArrayToArray {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        single_pair(any_array(), any_array())
    }

    fn convert(
        &self,
        source: &Value,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &ConversionService,
    ) -> Result<Value, ConversionError> {
        if source.is_null() {
            return Ok(Value::Null);
        }
        let items = source.items().ok_or_else(|| unexpected(source, "an array"))?;
        let target_element = target_array_element(target_type)?;

        if source.is_instance_of(target_type.raw())
            && service.can_bypass_convert(source_type.element_descriptor(), &target_element)
        {
            return Ok(source.clone());
        }

        let items = convert_elements(items, Some(&target_element), service)?;
        Ok(Value::array(target_element.raw(), items))
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        Some(self)
    }
}

impl ConditionalConverter for ArrayToArray {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &ConversionService,
    ) -> bool {
        elements_match(source_type, target_type, service)
    }
}

/// Array → list or set.
pub(crate) struct ArrayToCollection;

impl GenericConverter for ArrayToCollection {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        single_pair(any_array(), RawType::collection())
    }

    fn convert(
        &self,
        source: &Value,
        _source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &ConversionService,
    ) -> Result<Value, ConversionError> {
        if source.is_null() {
            return Ok(Value::Null);
        }
        let items = source.items().ok_or_else(|| unexpected(source, "an array"))?;
        let items = convert_elements(items, target_type.element_descriptor(), service)?;
        Ok(collection_value(target_type.raw(), items))
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        Some(self)
    }
}

impl ConditionalConverter for ArrayToCollection {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &ConversionService,
    ) -> bool {
        elements_match(source_type, target_type, service)
    }
}

/// List or set → array.
pub(crate) struct CollectionToArray;

impl GenericConverter for CollectionToArray {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        single_pair(RawType::collection(), any_array())
    }

    fn convert(
        &self,
        source: &Value,
        _source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &ConversionService,
    ) -> Result<Value, ConversionError> {
        if source.is_null() {
            return Ok(Value::Null);
        }
        let items = source
            .items()
            .ok_or_else(|| unexpected(source, "a collection"))?;
        let target_element = target_array_element(target_type)?;
        let items = convert_elements(items, Some(&target_element), service)?;
        Ok(Value::array(target_element.raw(), items))
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        Some(self)
    }
}

impl ConditionalConverter for CollectionToArray {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &ConversionService,
    ) -> bool {
        elements_match(source_type, target_type, service)
    }
}

/// List or set → list or set of another element type.
pub(crate) struct CollectionToCollection;

impl GenericConverter for CollectionToCollection {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        single_pair(RawType::collection(), RawType::collection())
    }

    fn convert(
        &self,
        source: &Value,
        _source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &ConversionService,
    ) -> Result<Value, ConversionError> {
        if source.is_null() {
            return Ok(Value::Null);
        }
        let items = source
            .items()
            .ok_or_else(|| unexpected(source, "a collection"))?;
        let target_element = target_type.element_descriptor();
        if target_element.is_none() && source.is_instance_of(target_type.raw()) {
            return Ok(source.clone());
        }
        let items = convert_elements(items, target_element, service)?;
        Ok(collection_value(target_type.raw(), items))
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        Some(self)
    }
}

impl ConditionalConverter for CollectionToCollection {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &ConversionService,
    ) -> bool {
        elements_match(source_type, target_type, service)
    }
}

/// Map → map with keys and values converted.
pub(crate) struct MapToMap;

impl GenericConverter for MapToMap {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        single_pair(RawType::map(), RawType::map())
    }

    fn convert(
        &self,
        source: &Value,
        _source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &ConversionService,
    ) -> Result<Value, ConversionError> {
        let entries = match source {
            Value::Null => return Ok(Value::Null),
            Value::Map(entries) => entries,
            _ => return Err(unexpected(source, "a map")),
        };
        let key_type = target_type.map_key_descriptor();
        let value_type = target_type.map_value_descriptor();
        if key_type.is_none() && value_type.is_none() {
            return Ok(source.clone());
        }

        let convert = |item: &Value, target: Option<&TypeDescriptor>| match target {
            Some(target) => convert_element(item, target, service),
            None => Ok(item.clone()),
        };
        let entries = entries
            .iter()
            .map(|(key, value)| -> Result<(Value, Value), ConversionError> {
                Ok((convert(key, key_type)?, convert(value, value_type)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Map(entries))
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        Some(self)
    }
}

impl ConditionalConverter for MapToMap {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &ConversionService,
    ) -> bool {
        can_convert_elements(
            source_type.map_key_descriptor(),
            target_type.map_key_descriptor(),
            service,
        ) && can_convert_elements(
            source_type.map_value_descriptor(),
            target_type.map_value_descriptor(),
            service,
        )
    }
}
