#![deny(clippy::arithmetic_side_effects)]
//! Tressel Patterns - structural patterns over dynamically typed values.
//!
//! This crate provides:
//! - Runtime values (`Value`, `Heap`, `ObjectValue`)
//! - Type tags and the subtype relation (`TypeTag`, `BuiltinType`, `UserType`)
//! - The destructuring protocol (`Destructure`)
//! - Binding environments (`Bindings`)
//! - The closed `Pattern` sum type, `PatternList`, and specificity ordering
//!
//! # Architecture
//!
//! Patterns are built once when a rule set is declared and are read-only
//! afterwards. Each top-level match attempt gets a fresh `Bindings`; a
//! successful match leaves every binding made during traversal in it.
//!
//! The rule engine and visitor dispatcher that consume these patterns live in
//! `tressel_eval`.

mod bindings;
mod destructure;
mod name;
pub mod pat;
mod pattern;
mod stack;
mod types;
mod value;

pub use bindings::{Bindings, MATCH_DATA};
pub use destructure::Destructure;
pub use name::Name;
pub use pattern::{Pattern, PatternList, RegexPattern};
pub use types::{BuiltinType, ChildrenFn, DestructureFn, TypeTag, UserType, UserTypeBuilder};
pub use value::{Heap, ObjectValue, Value};
