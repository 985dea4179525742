//! Runtime type tags and the subtype relation.
//!
//! Built-in types form a fixed hierarchy rooted at `Any`. User-declared types
//! name a parent tag (built-in or user) and optionally describe how their
//! instances destructure and which fields hold child nodes.
//!
//! ```text
//! Any
//! ├── Nil, Bool, Char, Str, Symbol
//! ├── Numeric ── Int, Float
//! ├── Sequence ── List, Tuple
//! └── Object ── (user types by default)
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::value::{Heap, Value};
use crate::Name;

/// Built-in runtime types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    Any,
    Nil,
    Bool,
    Numeric,
    Int,
    Float,
    Char,
    Str,
    Symbol,
    Sequence,
    List,
    Tuple,
    /// Default parent of user-declared types.
    Object,
}

impl BuiltinType {
    /// The direct supertype, or `None` for `Any`.
    pub const fn parent(self) -> Option<BuiltinType> {
        match self {
            BuiltinType::Any => None,
            BuiltinType::Int | BuiltinType::Float => Some(BuiltinType::Numeric),
            BuiltinType::List | BuiltinType::Tuple => Some(BuiltinType::Sequence),
            BuiltinType::Nil
            | BuiltinType::Bool
            | BuiltinType::Numeric
            | BuiltinType::Char
            | BuiltinType::Str
            | BuiltinType::Symbol
            | BuiltinType::Sequence
            | BuiltinType::Object => Some(BuiltinType::Any),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BuiltinType::Any => "Any",
            BuiltinType::Nil => "Nil",
            BuiltinType::Bool => "Bool",
            BuiltinType::Numeric => "Numeric",
            BuiltinType::Int => "Int",
            BuiltinType::Float => "Float",
            BuiltinType::Char => "Char",
            BuiltinType::Str => "Str",
            BuiltinType::Symbol => "Symbol",
            BuiltinType::Sequence => "Sequence",
            BuiltinType::List => "List",
            BuiltinType::Tuple => "Tuple",
            BuiltinType::Object => "Object",
        }
    }
}

/// User-supplied decomposition: receives the instance fields and the
/// requested arity.
pub type DestructureFn = Arc<dyn Fn(&[Value], usize) -> Vec<Value> + Send + Sync>;

/// User-supplied child projection for tree traversal.
pub type ChildrenFn = Arc<dyn Fn(&[Value]) -> Vec<Value> + Send + Sync>;

#[derive(Clone)]
enum Decomposition {
    /// Instances decompose into their fields, in declaration order.
    Fields,
    Custom(DestructureFn),
    /// Instances cannot be destructured.
    Opaque,
}

#[derive(Clone)]
enum ChildSource {
    Leaf,
    Fields(Vec<usize>),
    Custom(ChildrenFn),
}

/// A user-declared type.
///
/// Identity is by declaration: two separately built types with the same name
/// are different types.
pub struct UserType {
    name: Name,
    parent: TypeTag,
    decomposition: Decomposition,
    children: ChildSource,
}

impl UserType {
    /// Start declaring a type named `name`, deriving from `Object`.
    pub fn builder(name: impl Into<Name>) -> UserTypeBuilder {
        UserTypeBuilder {
            name: name.into(),
            parent: TypeTag::Builtin(BuiltinType::Object),
            decomposition: Decomposition::Fields,
            children: ChildSource::Leaf,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn parent(&self) -> &TypeTag {
        &self.parent
    }

    /// Whether instances support the destructuring protocol.
    pub fn is_destructurable(&self) -> bool {
        !matches!(self.decomposition, Decomposition::Opaque)
    }

    pub(crate) fn decompose(&self, fields: &[Value], arity: usize) -> Option<Vec<Value>> {
        match &self.decomposition {
            Decomposition::Fields => Some(fields.to_vec()),
            Decomposition::Custom(f) => Some(f(fields, arity)),
            Decomposition::Opaque => None,
        }
    }

    pub(crate) fn children_of(&self, fields: &[Value]) -> Vec<Value> {
        match &self.children {
            ChildSource::Leaf => Vec::new(),
            ChildSource::Fields(indices) => indices
                .iter()
                .map(|&i| fields.get(i).cloned().unwrap_or(Value::Nil))
                .collect(),
            ChildSource::Custom(f) => f(fields),
        }
    }
}

impl fmt::Debug for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserType")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("destructurable", &self.is_destructurable())
            .finish_non_exhaustive()
    }
}

/// Builder for [`UserType`].
pub struct UserTypeBuilder {
    name: Name,
    parent: TypeTag,
    decomposition: Decomposition,
    children: ChildSource,
}

impl UserTypeBuilder {
    /// Derive from `parent` instead of `Object`.
    #[must_use]
    pub fn parent(mut self, parent: impl Into<TypeTag>) -> Self {
        self.parent = parent.into();
        self
    }

    /// Decompose instances with a custom function.
    #[must_use]
    pub fn destructure_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Value], usize) -> Vec<Value> + Send + Sync + 'static,
    {
        self.decomposition = Decomposition::Custom(Arc::new(f));
        self
    }

    /// Instances do not support destructuring.
    #[must_use]
    pub fn opaque(mut self) -> Self {
        self.decomposition = Decomposition::Opaque;
        self
    }

    /// Children are the fields at `indices`; `Nil` fields are gaps.
    #[must_use]
    pub fn children_fields(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.children = ChildSource::Fields(indices.into_iter().collect());
        self
    }

    /// Children are computed from the fields by `f`.
    #[must_use]
    pub fn children_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Value]) -> Vec<Value> + Send + Sync + 'static,
    {
        self.children = ChildSource::Custom(Arc::new(f));
        self
    }

    pub fn build(self) -> Heap<UserType> {
        Heap::new(UserType {
            name: self.name,
            parent: self.parent,
            decomposition: self.decomposition,
            children: self.children,
        })
    }
}

impl Heap<UserType> {
    /// The tag naming this type.
    pub fn tag(&self) -> TypeTag {
        TypeTag::User(self.clone())
    }

    /// Create an instance of this type.
    pub fn instance(&self, fields: Vec<Value>) -> Value {
        Value::object(self, fields)
    }
}

/// Runtime type of a value, as used by instance and destructuring patterns.
#[derive(Clone, Debug)]
pub enum TypeTag {
    Builtin(BuiltinType),
    User(Heap<UserType>),
}

impl TypeTag {
    /// Direct supertype, or `None` at the root.
    pub fn parent(&self) -> Option<TypeTag> {
        match self {
            TypeTag::Builtin(b) => b.parent().map(TypeTag::Builtin),
            TypeTag::User(u) => Some(u.parent.clone()),
        }
    }

    /// Reflexive subtype test: walks the parent chain of `self`.
    pub fn is_subtype_of(&self, other: &TypeTag) -> bool {
        let mut current = Some(self.clone());
        while let Some(tag) = current {
            if tag == *other {
                return true;
            }
            current = tag.parent();
        }
        false
    }

    /// Strict subtype test.
    pub fn is_proper_subtype_of(&self, other: &TypeTag) -> bool {
        self != other && self.is_subtype_of(other)
    }

    pub fn name(&self) -> &str {
        match self {
            TypeTag::Builtin(b) => b.name(),
            TypeTag::User(u) => u.name.as_str(),
        }
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeTag::Builtin(a), TypeTag::Builtin(b)) => a == b,
            (TypeTag::User(a), TypeTag::User(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            TypeTag::Builtin(b) => b.hash(state),
            TypeTag::User(u) => Heap::addr(u).hash(state),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<BuiltinType> for TypeTag {
    fn from(b: BuiltinType) -> Self {
        TypeTag::Builtin(b)
    }
}

impl From<&Heap<UserType>> for TypeTag {
    fn from(u: &Heap<UserType>) -> Self {
        u.tag()
    }
}

impl From<Heap<UserType>> for TypeTag {
    fn from(u: Heap<UserType>) -> Self {
        TypeTag::User(u)
    }
}
