//! The destructuring protocol.
//!
//! A destructuring pattern asks its subject to split itself into exactly as
//! many parts as the pattern has sub-patterns, then matches the parts
//! pairwise.
//!
//! - Lists and tuples yield their first `arity - 1` elements followed by one
//!   value holding the remainder (same sequence kind as the subject).
//! - Scalars yield themselves as a single part, whatever the arity.
//! - Objects defer to their type's decomposition.
//! - `Nil` and opaque objects do not participate.

use crate::value::Value;

/// Capability to decompose a subject for destructuring patterns.
pub trait Destructure {
    /// Split into parts for a pattern with `arity` sub-patterns.
    ///
    /// Returns `None` when the subject does not support destructuring, which
    /// callers treat as an ordinary non-match. The returned length may differ
    /// from `arity` for fixed-shape subjects; the arity check happens in the
    /// pattern list.
    fn decompose(&self, arity: usize) -> Option<Vec<Value>>;
}

impl Destructure for Value {
    fn decompose(&self, arity: usize) -> Option<Vec<Value>> {
        match self {
            Value::List(items) => split_sequence(items, arity, Value::list),
            Value::Tuple(items) => split_sequence(items, arity, Value::tuple),
            Value::Bool(_)
            | Value::Int(_)
            | Value::Float(_)
            | Value::Char(_)
            | Value::Str(_)
            | Value::Symbol(_) => Some(vec![self.clone()]),
            Value::Nil => None,
            Value::Object(obj) => obj.ty().decompose(obj.fields(), arity),
        }
    }
}

/// Heads plus remainder; a zero-arity request only fits an empty sequence.
fn split_sequence(
    items: &[Value],
    arity: usize,
    rebuild: fn(Vec<Value>) -> Value,
) -> Option<Vec<Value>> {
    let Some(heads) = arity.checked_sub(1) else {
        return items.is_empty().then(Vec::new);
    };
    if items.len() < heads {
        return None;
    }
    let (head, rest) = items.split_at(heads);
    let mut parts = Vec::with_capacity(arity);
    parts.extend_from_slice(head);
    parts.push(rebuild(rest.to_vec()));
    Some(parts)
}

#[cfg(test)]
mod tests;
