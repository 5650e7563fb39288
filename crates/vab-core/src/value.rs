// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The model tree value type.
//!
//! A model tree is a [`Value`]: scalars at the leaves, insertion-ordered
//! mappings and sequences as containers, and invokable operations where the
//! tree exposes behavior instead of data. Containers nest arbitrarily; one
//! root value is the whole tree served by a provider.
//!
//! The wire shape is plain JSON. Mappings keep their insertion order because
//! iteration-based endpoints observe it. Invokable values are server-local:
//! they serialize as an opaque marker string and never deserialize back —
//! a remote client sees the marker, not the function.
//!
//! # Typed-value wrapper
//!
//! Some peers carry a value as a wrapper mapping holding both `value` and
//! `valueType` keys. [`Value::unwrap_typed`] collapses that wrapper to its
//! inner value; components unwrapping arguments apply it before use.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ProviderResult;

/// Serialized stand-in for invokable values.
pub const INVOKABLE_MARKER: &str = "<<invokable>>";

/// Conventional key under which a container exposes its invokable child.
pub const INVOKABLE_KEY: &str = "invokable";

// =============================================================================
// Operation
// =============================================================================

type OperationFn = dyn Fn(&[Value]) -> ProviderResult<Value> + Send + Sync;

/// An invokable operation stored inside a model tree.
///
/// Operations are opaque callables; two operations compare equal only when
/// they are the same instance.
#[derive(Clone)]
pub struct Operation {
    inner: Arc<OperationFn>,
}

impl Operation {
    /// Wraps a function as a tree-resident operation.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> ProviderResult<Value> + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Applies the operation to the given arguments.
    pub fn call(&self, args: &[Value]) -> ProviderResult<Value> {
        (self.inner)(args)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Operation(..)")
    }
}

impl PartialEq for Operation {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

// =============================================================================
// Value
// =============================================================================

/// A node of a model tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null/absent value.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Signed integer.
    Int(i64),

    /// 64-bit floating point.
    Float(f64),

    /// UTF-8 string.
    Str(String),

    /// Raw byte blob.
    Bytes(Vec<u8>),

    /// Ordered sequence of values.
    Array(Vec<Value>),

    /// Insertion-ordered mapping of unique string keys to values.
    Map(IndexMap<String, Value>),

    /// An invokable operation.
    Invokable(Operation),
}

impl Value {
    /// Returns the type name of this value.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Invokable(_) => "invokable",
        }
    }

    /// Returns `true` if this is a null value.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this is a container (mapping or sequence).
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Map(_))
    }

    /// Returns `true` if this value can be applied to arguments.
    #[inline]
    pub fn is_invokable(&self) -> bool {
        matches!(self, Value::Invokable(_))
    }

    /// Attempts to read this value as a boolean.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to read this value as an i64.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to read this value as an f64; integers widen.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to read this value as a string slice.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to read this value as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to read this value as a sequence.
    #[inline]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to read this value as a mapping.
    #[inline]
    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to read this value as a mutable mapping.
    #[inline]
    pub fn as_map_mut(&mut self) -> Option<&mut IndexMap<String, Value>> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to read this value as an operation.
    #[inline]
    pub fn as_invokable(&self) -> Option<&Operation> {
        match self {
            Value::Invokable(op) => Some(op),
            _ => None,
        }
    }

    /// Collapses a typed-value wrapper into its inner value.
    ///
    /// A mapping carrying both `value` and `valueType` keys is replaced by
    /// its `value` entry; every other value passes through unchanged.
    pub fn unwrap_typed(self) -> Value {
        match self {
            Value::Map(mut map) if map.contains_key("value") && map.contains_key("valueType") => {
                map.shift_remove("value").unwrap_or(Value::Null)
            }
            other => other,
        }
    }

    /// Converts this value into a `serde_json::Value`.
    ///
    /// Non-finite floats become null, byte blobs become integer arrays and
    /// invokables become the opaque marker string.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(v) => serde_json::Value::Bool(*v),
            Value::Int(v) => serde_json::json!(*v),
            Value::Float(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(v) => serde_json::Value::String(v.clone()),
            Value::Bytes(v) => serde_json::Value::Array(
                v.iter().map(|b| serde_json::json!(*b)).collect(),
            ),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Value::Invokable(_) => serde_json::Value::String(INVOKABLE_MARKER.to_string()),
        }
    }

    /// Builds a value from a `serde_json::Value`.
    pub fn from_json(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(v) => Value::Bool(v),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or_default())
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter().map(|(k, v)| (k, Value::from_json(v))).collect(),
            ),
        }
    }

    /// Wraps a function as an invokable value.
    pub fn invokable<F>(f: F) -> Value
    where
        F: Fn(&[Value]) -> ProviderResult<Value> + Send + Sync + 'static,
    {
        Value::Invokable(Operation::new(f))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{}", v),
            Value::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            Value::Array(v) => write!(f, "[{} elements]", v.len()),
            Value::Map(v) => write!(f, "{{{} entries}}", v.len()),
            Value::Invokable(_) => write!(f, "{}", INVOKABLE_MARKER),
        }
    }
}

// Conversions for common scalar types
macro_rules! impl_from_for_value {
    ($variant:ident, $type:ty) => {
        impl From<$type> for Value {
            fn from(v: $type) -> Self {
                Value::$variant(v)
            }
        }
    };
}

impl_from_for_value!(Bool, bool);
impl_from_for_value!(Int, i64);
impl_from_for_value!(Float, f64);
impl_from_for_value!(Str, String);
impl_from_for_value!(Bytes, Vec<u8>);
impl_from_for_value!(Array, Vec<Value>);
impl_from_for_value!(Invokable, Operation);

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(v: IndexMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

/// Builds a `Value::Map` from key/value pairs, preserving the given order.
#[macro_export]
macro_rules! value_map {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut map = $crate::indexmap::IndexMap::new();
        $(map.insert(String::from($key), $crate::value::Value::from($value));)*
        $crate::value::Value::Map(map)
    }};
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Str(v) => serializer.serialize_str(v),
            Value::Bytes(v) => v.serialize(serializer),
            Value::Array(v) => v.serialize(serializer),
            Value::Map(v) => serializer.collect_map(v.iter()),
            Value::Invokable(_) => serializer.serialize_str(INVOKABLE_MARKER),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON-shaped model tree value")
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }

    fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(i64::try_from(v).map(Value::Int).unwrap_or(Value::Float(v as f64)))
    }

    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Str(v.to_string()))
    }

    fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Str(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = IndexMap::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Unwraps typed-value wrappers in an argument list.
pub fn unwrap_arguments(args: Vec<Value>) -> Vec<Value> {
    args.into_iter().map(Value::unwrap_typed).collect()
}

// =============================================================================
// Tests
// =============================================================================
