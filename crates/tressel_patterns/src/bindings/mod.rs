//! Binding environment for a single match attempt.
//!
//! One `Bindings` is created per top-level attempt (not per pattern). It is
//! visible to the guard and, on success, handed to the action; on failure it
//! is dropped. Partial contents after a failed match carry no meaning.

use rustc_hash::FxHashMap;

use crate::value::Value;
use crate::Name;

/// Reserved binding under which regex patterns publish their captures.
///
/// The value is a list holding the whole match followed by each group
/// (`Nil` for groups that did not participate).
pub const MATCH_DATA: &str = "__match__";

/// Name → value mapping filled in while patterns match.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bindings {
    values: FxHashMap<Name, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any earlier binding (last write wins).
    ///
    /// Returns the previous value, if any.
    #[inline]
    pub fn bind(&mut self, name: impl Into<Name>, value: Value) -> Option<Value> {
        self.values.insert(name.into(), value)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Mutable access for actions that rewrite a binding in place.
    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.values.get_mut(name)
    }

    /// Remove a binding, returning its value.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Bound value, or `Nil` when unbound.
    pub fn value(&self, name: &str) -> Value {
        self.get(name).cloned().unwrap_or(Value::Nil)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Captures published by the most recent successful regex pattern.
    pub fn match_data(&self) -> Option<&[Value]> {
        self.get(MATCH_DATA).and_then(Value::as_list)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate bindings in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Value)> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests;
