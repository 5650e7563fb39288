// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Element handler strategies.
//!
//! A handler knows how to read, write, create and remove one named child of
//! one kind of container: [`MapHandler`] for mappings, [`ListHandler`] for
//! sequences (segments are zero-based indices). Handlers are stateless and
//! composable: [`CompositeHandler`] tries each concrete handler by container
//! kind and is the handler actually bound to providers, so one provider
//! transparently serves mixed mapping/sequence trees.
//!
//! Handlers also carry the provider's pre/post-processing hooks. The default
//! is identity; a backend-specific handler overrides them to convert between
//! the transport-level representation and its internal one (for example
//! stripping bookkeeping fields a database backend adds to every node).

use crate::error::{ProviderError, ProviderResult};
use crate::value::Value;

// =============================================================================
// ElementHandler Trait
// =============================================================================

/// Strategy for accessing the named children of one container kind.
///
/// # Contract
///
/// - `set_property` requires the child to exist already and fails with
///   `ResourceNotFound` otherwise.
/// - `create_property` only creates: an occupied segment fails with
///   `ResourceAlreadyExists` unless the existing child is a container, in
///   which case the call is forwarded to [`append`](Self::append) on that
///   child (collection semantics). The cross-kind forward lives in
///   [`CompositeHandler`].
/// - `remove_matching` operates on the container itself and removes the
///   first child equal to the probe value (sequence-valued properties acting
///   as simple tables).
pub trait ElementHandler: Send + Sync {
    /// Returns `true` if this handler can serve the given container.
    fn handles(&self, container: &Value) -> bool;

    /// Resolves a named child, or `None` if it is absent.
    fn property_of<'a>(&self, container: &'a Value, segment: &str) -> Option<&'a Value>;

    /// Resolves a named child mutably, or `None` if it is absent.
    fn property_of_mut<'a>(&self, container: &'a mut Value, segment: &str)
        -> Option<&'a mut Value>;

    /// Replaces an existing child.
    fn set_property(&self, container: &mut Value, segment: &str, value: Value)
        -> ProviderResult<()>;

    /// Creates a child that must not exist yet.
    fn create_property(&self, container: &mut Value, segment: &str, value: Value)
        -> ProviderResult<()>;

    /// Appends a value into the container (collection semantics).
    fn append(&self, container: &mut Value, value: Value) -> ProviderResult<()>;

    /// Removes a named child.
    fn delete_property(&self, container: &mut Value, segment: &str) -> ProviderResult<()>;

    /// Removes the first child of the container equal to `value`.
    fn remove_matching(&self, container: &mut Value, value: &Value) -> ProviderResult<()>;

    /// Converts an incoming value to the internal representation.
    fn preprocess(&self, value: Value) -> Value {
        value
    }

    /// Converts an internal value to the outgoing representation.
    fn postprocess(&self, value: Value) -> Value {
        value
    }
}

// =============================================================================
// MapHandler
// =============================================================================

/// Handler for insertion-ordered mapping nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapHandler;

impl ElementHandler for MapHandler {
    fn handles(&self, container: &Value) -> bool {
        matches!(container, Value::Map(_))
    }

    fn property_of<'a>(&self, container: &'a Value, segment: &str) -> Option<&'a Value> {
        match container {
            Value::Map(map) => map.get(segment),
            _ => None,
        }
    }

    fn property_of_mut<'a>(
        &self,
        container: &'a mut Value,
        segment: &str,
    ) -> Option<&'a mut Value> {
        match container {
            Value::Map(map) => map.get_mut(segment),
            _ => None,
        }
    }

    fn set_property(
        &self,
        container: &mut Value,
        segment: &str,
        value: Value,
    ) -> ProviderResult<()> {
        match container {
            Value::Map(map) if map.contains_key(segment) => {
                map.insert(segment.to_string(), value);
                Ok(())
            }
            Value::Map(_) => Err(ProviderError::not_found(format!(
                "property '{segment}' does not exist"
            ))),
            other => Err(not_a(other, "mapping")),
        }
    }

    fn create_property(
        &self,
        container: &mut Value,
        segment: &str,
        value: Value,
    ) -> ProviderResult<()> {
        match container {
            Value::Map(map) if map.contains_key(segment) => Err(ProviderError::already_exists(
                format!("property '{segment}' already exists"),
            )),
            Value::Map(map) => {
                map.insert(segment.to_string(), value);
                Ok(())
            }
            other => Err(not_a(other, "mapping")),
        }
    }

    fn append(&self, container: &mut Value, _value: Value) -> ProviderResult<()> {
        match container {
            // Appending into a mapping has no meaningful target key.
            Value::Map(_) => Err(ProviderError::already_exists(
                "cannot append into a mapping".to_string(),
            )),
            other => Err(not_a(other, "mapping")),
        }
    }

    fn delete_property(&self, container: &mut Value, segment: &str) -> ProviderResult<()> {
        match container {
            Value::Map(map) => map
                .shift_remove(segment)
                .map(|_| ())
                .ok_or_else(|| {
                    ProviderError::not_found(format!("property '{segment}' does not exist"))
                }),
            other => Err(not_a(other, "mapping")),
        }
    }

    fn remove_matching(&self, container: &mut Value, _value: &Value) -> ProviderResult<()> {
        match container {
            Value::Map(_) => Err(ProviderError::malformed(
                "delete by value requires a sequence-valued property".to_string(),
            )),
            other => Err(not_a(other, "mapping")),
        }
    }
}

// =============================================================================
// ListHandler
// =============================================================================

/// Handler for sequence nodes; segments are zero-based indices.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListHandler;

impl ListHandler {
    fn index(segment: &str) -> Option<usize> {
        segment.parse().ok()
    }
}

impl ElementHandler for ListHandler {
    fn handles(&self, container: &Value) -> bool {
        matches!(container, Value::Array(_))
    }

    fn property_of<'a>(&self, container: &'a Value, segment: &str) -> Option<&'a Value> {
        match container {
            Value::Array(items) => Self::index(segment).and_then(|i| items.get(i)),
            _ => None,
        }
    }

    fn property_of_mut<'a>(
        &self,
        container: &'a mut Value,
        segment: &str,
    ) -> Option<&'a mut Value> {
        match container {
            Value::Array(items) => Self::index(segment).and_then(|i| items.get_mut(i)),
            _ => None,
        }
    }

    fn set_property(
        &self,
        container: &mut Value,
        segment: &str,
        value: Value,
    ) -> ProviderResult<()> {
        let index = Self::index(segment)
            .ok_or_else(|| ProviderError::malformed(format!("invalid sequence index '{segment}'")))?;
        match container {
            Value::Array(items) => match items.get_mut(index) {
                Some(slot) => {
                    *slot = value;
                    Ok(())
                }
                None => Err(ProviderError::not_found(format!(
                    "sequence index {index} is out of bounds"
                ))),
            },
            other => Err(not_a(other, "sequence")),
        }
    }

    fn create_property(
        &self,
        container: &mut Value,
        segment: &str,
        value: Value,
    ) -> ProviderResult<()> {
        let index = Self::index(segment)
            .ok_or_else(|| ProviderError::malformed(format!("invalid sequence index '{segment}'")))?;
        match container {
            Value::Array(items) if index == items.len() => {
                items.push(value);
                Ok(())
            }
            Value::Array(items) if index < items.len() => Err(ProviderError::already_exists(
                format!("sequence index {index} is already occupied"),
            )),
            Value::Array(items) => Err(ProviderError::not_found(format!(
                "sequence index {index} is past the end (len {})",
                items.len()
            ))),
            other => Err(not_a(other, "sequence")),
        }
    }

    fn append(&self, container: &mut Value, value: Value) -> ProviderResult<()> {
        match container {
            Value::Array(items) => {
                items.push(value);
                Ok(())
            }
            other => Err(not_a(other, "sequence")),
        }
    }

    fn delete_property(&self, container: &mut Value, segment: &str) -> ProviderResult<()> {
        let index = Self::index(segment)
            .ok_or_else(|| ProviderError::malformed(format!("invalid sequence index '{segment}'")))?;
        match container {
            Value::Array(items) if index < items.len() => {
                items.remove(index);
                Ok(())
            }
            Value::Array(_) => Err(ProviderError::not_found(format!(
                "sequence index {index} is out of bounds"
            ))),
            other => Err(not_a(other, "sequence")),
        }
    }

    fn remove_matching(&self, container: &mut Value, value: &Value) -> ProviderResult<()> {
        match container {
            Value::Array(items) => match items.iter().position(|item| item == value) {
                Some(index) => {
                    items.remove(index);
                    Ok(())
                }
                None => Err(ProviderError::not_found(
                    "no element equal to the given value".to_string(),
                )),
            },
            other => Err(not_a(other, "sequence")),
        }
    }
}

// =============================================================================
// CompositeHandler
// =============================================================================

/// Tries each concrete handler in turn by container kind.
///
/// The composite owns the cross-kind create forwarding: creating over an
/// occupied segment whose child is a container appends into that child using
/// the child's own handler.
pub struct CompositeHandler {
    handlers: Vec<Box<dyn ElementHandler>>,
}

impl CompositeHandler {
    /// Creates a composite over the default mapping and sequence handlers.
    pub fn new() -> Self {
        Self {
            handlers: vec![Box::new(MapHandler), Box::new(ListHandler)],
        }
    }

    /// Creates a composite over explicit handlers, tried in order.
    pub fn with_handlers(handlers: Vec<Box<dyn ElementHandler>>) -> Self {
        Self { handlers }
    }

    fn pick(&self, container: &Value) -> Option<&dyn ElementHandler> {
        self.handlers
            .iter()
            .find(|h| h.handles(container))
            .map(|h| h.as_ref())
    }

    fn require(&self, container: &Value) -> ProviderResult<&dyn ElementHandler> {
        self.pick(container).ok_or_else(|| {
            ProviderError::malformed(format!(
                "value of type {} is not a container",
                container.type_name()
            ))
        })
    }
}

impl Default for CompositeHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementHandler for CompositeHandler {
    fn handles(&self, container: &Value) -> bool {
        self.pick(container).is_some()
    }

    fn property_of<'a>(&self, container: &'a Value, segment: &str) -> Option<&'a Value> {
        self.pick(container)?.property_of(container, segment)
    }

    fn property_of_mut<'a>(
        &self,
        container: &'a mut Value,
        segment: &str,
    ) -> Option<&'a mut Value> {
        let handler = self.pick(container)?;
        handler.property_of_mut(container, segment)
    }

    fn set_property(
        &self,
        container: &mut Value,
        segment: &str,
        value: Value,
    ) -> ProviderResult<()> {
        self.require(container)?.set_property(container, segment, value)
    }

    fn create_property(
        &self,
        container: &mut Value,
        segment: &str,
        value: Value,
    ) -> ProviderResult<()> {
        let handler = self.require(container)?;
        if let Some(child) = handler.property_of_mut(container, segment) {
            if child.is_container() {
                return self.require(child)?.append(child, value);
            }
        }
        handler.create_property(container, segment, value)
    }

    fn append(&self, container: &mut Value, value: Value) -> ProviderResult<()> {
        self.require(container)?.append(container, value)
    }

    fn delete_property(&self, container: &mut Value, segment: &str) -> ProviderResult<()> {
        self.require(container)?.delete_property(container, segment)
    }

    fn remove_matching(&self, container: &mut Value, value: &Value) -> ProviderResult<()> {
        self.require(container)?.remove_matching(container, value)
    }
}

fn not_a(container: &Value, expected: &str) -> ProviderError {
    ProviderError::malformed(format!(
        "expected a {expected}, got {}",
        container.type_name()
    ))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_map;

    #[test]
    fn test_map_handler_basic() {
        let handler = MapHandler;
        let mut container = value_map! { "a" => 1i64 };

        assert_eq!(handler.property_of(&container, "a"), Some(&Value::Int(1)));
        assert_eq!(handler.property_of(&container, "b"), None);

        handler.set_property(&mut container, "a", Value::Int(2)).unwrap();
        assert_eq!(handler.property_of(&container, "a"), Some(&Value::Int(2)));

        let err = handler
            .set_property(&mut container, "missing", Value::Null)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_map_handler_create_and_delete() {
        let handler = MapHandler;
        let mut container = value_map! {};

        handler.create_property(&mut container, "x", Value::Int(1)).unwrap();
        let err = handler
            .create_property(&mut container, "x", Value::Int(2))
            .unwrap_err();
        assert_eq!(err.error_type(), "resource_already_exists");

        handler.delete_property(&mut container, "x").unwrap();
        assert!(handler.delete_property(&mut container, "x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_handler_index_access() {
        let handler = ListHandler;
        let mut container = Value::Array(vec![Value::Int(10), Value::Int(20)]);

        assert_eq!(handler.property_of(&container, "1"), Some(&Value::Int(20)));
        assert_eq!(handler.property_of(&container, "2"), None);
        assert_eq!(handler.property_of(&container, "not-an-index"), None);

        handler.set_property(&mut container, "0", Value::Int(11)).unwrap();
        assert_eq!(handler.property_of(&container, "0"), Some(&Value::Int(11)));
    }

    #[test]
    fn test_list_handler_remove_matching_removes_first_equal() {
        let handler = ListHandler;
        let mut container = Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(1)]);

        handler.remove_matching(&mut container, &Value::Int(1)).unwrap();
        assert_eq!(
            container,
            Value::Array(vec![Value::Int(2), Value::Int(1)])
        );

        let err = handler.remove_matching(&mut container, &Value::Int(9)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_composite_dispatches_by_kind() {
        let handler = CompositeHandler::new();
        let map = value_map! { "a" => 1i64 };
        let list = Value::Array(vec![Value::Int(5)]);

        assert_eq!(handler.property_of(&map, "a"), Some(&Value::Int(1)));
        assert_eq!(handler.property_of(&list, "0"), Some(&Value::Int(5)));
        assert_eq!(handler.property_of(&Value::Int(3), "x"), None);
    }

    #[test]
    fn test_composite_create_forwards_into_collection() {
        let handler = CompositeHandler::new();
        let mut container = value_map! { "rows" => Value::Array(vec![Value::Int(1)]) };

        // Creating over an existing sequence-valued property appends.
        handler
            .create_property(&mut container, "rows", Value::Int(2))
            .unwrap();
        assert_eq!(
            handler.property_of(&container, "rows"),
            Some(&Value::Array(vec![Value::Int(1), Value::Int(2)]))
        );
    }

    #[test]
    fn test_composite_create_on_occupied_scalar_fails() {
        let handler = CompositeHandler::new();
        let mut container = value_map! { "x" => 1i64 };

        let err = handler
            .create_property(&mut container, "x", Value::Int(2))
            .unwrap_err();
        assert_eq!(err.error_type(), "resource_already_exists");
    }

    #[test]
    fn test_composite_create_into_nested_map_fails() {
        let handler = CompositeHandler::new();
        let mut container = value_map! { "child" => value_map! { "y" => 1i64 } };

        // A mapping child is a container but not appendable.
        let err = handler
            .create_property(&mut container, "child", Value::Int(2))
            .unwrap_err();
        assert_eq!(err.error_type(), "resource_already_exists");
    }
}
