//! Runtime values matched by patterns.
//!
//! # Heap Enforcement
//!
//! Every heap payload goes through a factory method on `Value`. `Heap<T>` has
//! a crate-private constructor, so external code cannot build heap variants
//! directly:
//!
//! ```text
//! let s = Value::string("hello");               // OK
//! let xs = Value::list(vec![Value::int(1)]);    // OK
//! let s = Value::Str(Heap::new(...));           // ERROR: Heap::new is private
//! ```
//!
//! Values are immutable once built and cheap to clone.

mod heap;

use std::fmt;
use std::hash::{Hash, Hasher};

pub use heap::Heap;

use crate::types::{BuiltinType, TypeTag, UserType};
use crate::Name;

/// A dynamically typed runtime value.
#[derive(Clone)]
pub enum Value {
    /// Absent value. Also marks a gap in a node's child list.
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Str(Heap<String>),
    /// Interned-by-content identifier, printed as `:name`.
    Symbol(Name),
    List(Heap<Vec<Value>>),
    Tuple(Heap<Vec<Value>>),
    /// Instance of a user-declared type.
    Object(ObjectValue),
}

/// Instance of a [`UserType`] with ordered fields.
#[derive(Clone)]
pub struct ObjectValue {
    ty: Heap<UserType>,
    fields: Heap<Vec<Value>>,
}

impl ObjectValue {
    pub fn ty(&self) -> &Heap<UserType> {
        &self.ty
    }

    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&Value> {
        self.fields.get(index)
    }
}

// Tearing down a deep tree recursively would exhaust the stack. Uniquely
// owned descendants are unlinked onto a work list and dropped one at a time.
impl Drop for ObjectValue {
    fn drop(&mut self) {
        let Some(fields) = Heap::get_mut(&mut self.fields) else {
            return;
        };
        let mut pending = std::mem::take(fields);
        while let Some(value) = pending.pop() {
            match value {
                Value::Object(mut obj) => {
                    if let Some(fields) = Heap::get_mut(&mut obj.fields) {
                        pending.append(fields);
                    }
                }
                Value::List(mut items) | Value::Tuple(mut items) => {
                    if let Some(items) = Heap::get_mut(&mut items) {
                        pending.append(items);
                    }
                }
                _ => {}
            }
        }
    }
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn symbol(name: impl Into<Name>) -> Self {
        Value::Symbol(name.into())
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    #[inline]
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Heap::new(items))
    }

    /// Create an instance of a user type.
    #[inline]
    pub fn object(ty: &Heap<UserType>, fields: Vec<Value>) -> Self {
        Value::Object(ObjectValue {
            ty: ty.clone(),
            fields: Heap::new(fields),
        })
    }
}

// Value Methods

impl Value {
    /// The runtime type of this value.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Nil => TypeTag::Builtin(BuiltinType::Nil),
            Value::Bool(_) => TypeTag::Builtin(BuiltinType::Bool),
            Value::Int(_) => TypeTag::Builtin(BuiltinType::Int),
            Value::Float(_) => TypeTag::Builtin(BuiltinType::Float),
            Value::Char(_) => TypeTag::Builtin(BuiltinType::Char),
            Value::Str(_) => TypeTag::Builtin(BuiltinType::Str),
            Value::Symbol(_) => TypeTag::Builtin(BuiltinType::Symbol),
            Value::List(_) => TypeTag::Builtin(BuiltinType::List),
            Value::Tuple(_) => TypeTag::Builtin(BuiltinType::Tuple),
            Value::Object(obj) => obj.ty.tag(),
        }
    }

    /// Whether this value's type is `tag` or a subtype of it.
    pub fn is_a(&self, tag: &TypeTag) -> bool {
        self.type_tag().is_subtype_of(tag)
    }

    /// `Nil` and `false` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Name> {
        match self {
            Value::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Elements of a list or tuple.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Child nodes for tree traversal, with `Nil` gaps removed.
    ///
    /// Only user types declaring a child projection have children.
    pub fn children(&self) -> Vec<Value> {
        match self {
            Value::Object(obj) => obj
                .ty
                .children_of(&obj.fields)
                .into_iter()
                .filter(|child| !child.is_nil())
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Value::Object(obj) => obj.ty.name().as_str(),
            _ => match self.type_tag() {
                TypeTag::Builtin(b) => b.name(),
                TypeTag::User(_) => "Object",
            },
        }
    }
}

// Conversions

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

// Trait Implementations

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                Heap::ptr_eq(&a.ty, &b.ty) && a.fields == b.fields
            }
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Nil => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(n) => n.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Char(c) => c.hash(state),
            Value::Str(s) => s.hash(state),
            Value::Symbol(name) => name.hash(state),
            Value::List(items) | Value::Tuple(items) => items.hash(state),
            Value::Object(obj) => {
                Heap::addr(&obj.ty).hash(state);
                obj.fields.hash(state);
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Char(c) => write!(f, "Char({c:?})"),
            Value::Str(s) => write!(f, "Str({:?})", &***s),
            Value::Symbol(name) => write!(f, "Symbol({})", name.as_str()),
            Value::List(items) => write!(f, "List({:?})", &**items),
            Value::Tuple(items) => write!(f, "Tuple({:?})", &**items),
            Value::Object(obj) => {
                write!(f, "Object({}, {:?})", obj.ty.name(), &**obj.fields)
            }
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Char(c) => write!(f, "'{c}'"),
            Value::Str(s) => write!(f, "\"{}\"", &***s),
            Value::Symbol(name) => write!(f, ":{name}"),
            Value::List(items) => {
                write!(f, "[")?;
                write_seq(f, items)?;
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                write_seq(f, items)?;
                write!(f, ")")
            }
            Value::Object(obj) => {
                write!(f, "{}(", obj.ty.name())?;
                write_seq(f, &obj.fields)?;
                write!(f, ")")
            }
        }
    }
}
