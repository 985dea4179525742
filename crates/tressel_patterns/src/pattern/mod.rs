//! Structural patterns.
//!
//! `Pattern` is a closed sum type; every variant answers the same question:
//! does this subject match, and if so, which names does it bind?
//!
//! `PatternList` is the multi-subject form shared by top-level rules and
//! destructuring patterns. Its arity rule: a list matches `L` subjects iff it
//! holds `L` patterns, except that a list consisting of a single `Wildcard`
//! matches any number of subjects.
//!
//! # Matching contract
//!
//! `matches` returns `true` and commits every binding made during traversal
//! into the environment, or returns `false`, after which the environment must
//! be discarded (partial bindings may remain).

mod regex_pattern;
mod specificity;

use std::fmt;
use std::ops::Deref;

use smallvec::SmallVec;

pub use regex_pattern::RegexPattern;

use crate::bindings::Bindings;
use crate::destructure::Destructure;
use crate::stack::ensure_sufficient_stack;
use crate::types::{BuiltinType, TypeTag, UserType};
use crate::value::{Heap, Value};
use crate::Name;

/// A single structural test against one subject.
#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    /// Matches anything, binds nothing.
    Wildcard,
    /// Matches by value equality.
    Literal(Value),
    /// Matches when the subject's type is the tag or a subtype of it.
    Instance(TypeTag),
    /// Matches text subjects the regex finds a match in.
    Regex(RegexPattern),
    /// Matches when `inner` matches, then binds the subject to `name`.
    Binding { name: Name, inner: Box<Pattern> },
    /// Matches instances of `tag` whose decomposition matches `parts`.
    Destructuring { tag: TypeTag, parts: Box<PatternList> },
}

impl Pattern {
    /// Bind the subject to `name` whenever this pattern matches.
    #[must_use]
    pub fn bind_as(self, name: impl Into<Name>) -> Pattern {
        Pattern::Binding {
            name: name.into(),
            inner: Box::new(self),
        }
    }

    /// Test one subject, recording bindings into `env`.
    pub fn matches(&self, subject: &Value, env: &mut Bindings) -> bool {
        match self {
            Pattern::Wildcard => true,
            Pattern::Literal(expected) => expected == subject,
            Pattern::Instance(tag) => subject.is_a(tag),
            Pattern::Regex(re) => re.matches(subject, env),
            Pattern::Binding { name, inner } => {
                if !inner.matches(subject, env) {
                    return false;
                }
                env.bind(name.clone(), subject.clone());
                true
            }
            Pattern::Destructuring { tag, parts } => {
                if !subject.is_a(tag) {
                    return false;
                }
                match subject.decompose(parts.len()) {
                    Some(values) => ensure_sufficient_stack(|| parts.matches(&values, env)),
                    None => {
                        tracing::trace!(%subject, "subject does not support destructuring");
                        false
                    }
                }
            }
        }
    }

    /// Whether this is the bare wildcard.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Pattern::Wildcard)
    }

    /// Names this pattern binds on success, in left-to-right order.
    ///
    /// Regex captures are not included; they live under the reserved
    /// match-data name.
    pub fn binding_names(&self) -> Vec<Name> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names(&self, names: &mut Vec<Name>) {
        match self {
            Pattern::Wildcard | Pattern::Literal(_) | Pattern::Instance(_) | Pattern::Regex(_) => {}
            Pattern::Binding { name, inner } => {
                inner.collect_names(names);
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
            Pattern::Destructuring { parts, .. } => {
                for part in parts.iter() {
                    part.collect_names(names);
                }
            }
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Wildcard => write!(f, "_"),
            Pattern::Literal(value) => write!(f, "{value}"),
            Pattern::Instance(tag) => write!(f, "{tag}"),
            Pattern::Regex(re) => write!(f, "/{}/", re.as_str()),
            Pattern::Binding { name, inner } => match **inner {
                Pattern::Wildcard => write!(f, "{name}"),
                _ => write!(f, "{inner} as {name}"),
            },
            Pattern::Destructuring { tag, parts } => write!(f, "{tag}.({parts})"),
        }
    }
}

/// Ordered sub-patterns matched pairwise against a sequence of subjects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatternList(SmallVec<[Pattern; 4]>);

impl PatternList {
    pub fn new<I>(patterns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Pattern>,
    {
        PatternList(patterns.into_iter().map(Into::into).collect())
    }

    /// A single wildcard accepts subject sequences of any length.
    pub fn is_arity_agnostic(&self) -> bool {
        matches!(self.0.as_slice(), [Pattern::Wildcard])
    }

    /// Test a subject sequence, short-circuiting left to right.
    ///
    /// An arity mismatch is a plain non-match, never an error.
    pub fn matches(&self, subjects: &[Value], env: &mut Bindings) -> bool {
        if subjects.len() != self.0.len() {
            return self.is_arity_agnostic();
        }
        self.0
            .iter()
            .zip(subjects)
            .all(|(pattern, subject)| pattern.matches(subject, env))
    }

    /// Names bound by all sub-patterns, in order, without duplicates.
    pub fn binding_names(&self) -> Vec<Name> {
        let mut names = Vec::new();
        for pattern in &self.0 {
            pattern.collect_names(&mut names);
        }
        names
    }
}

impl Deref for PatternList {
    type Target = [Pattern];

    fn deref(&self) -> &[Pattern] {
        &self.0
    }
}

impl<P: Into<Pattern>> FromIterator<P> for PatternList {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        PatternList::new(iter)
    }
}

impl fmt::Display for PatternList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pattern) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{pattern}")?;
        }
        Ok(())
    }
}

// Pattern element conversions: raw values become literals, type tags become
// instance patterns, compiled regexes become regex patterns.

impl From<Value> for Pattern {
    fn from(value: Value) -> Self {
        Pattern::Literal(value)
    }
}

impl From<i64> for Pattern {
    fn from(n: i64) -> Self {
        Pattern::Literal(Value::from(n))
    }
}

impl From<i32> for Pattern {
    fn from(n: i32) -> Self {
        Pattern::Literal(Value::from(n))
    }
}

impl From<f64> for Pattern {
    fn from(f: f64) -> Self {
        Pattern::Literal(Value::from(f))
    }
}

impl From<bool> for Pattern {
    fn from(b: bool) -> Self {
        Pattern::Literal(Value::from(b))
    }
}

impl From<char> for Pattern {
    fn from(c: char) -> Self {
        Pattern::Literal(Value::from(c))
    }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern::Literal(Value::from(s))
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Pattern::Literal(Value::from(s))
    }
}

impl From<TypeTag> for Pattern {
    fn from(tag: TypeTag) -> Self {
        Pattern::Instance(tag)
    }
}

impl From<BuiltinType> for Pattern {
    fn from(b: BuiltinType) -> Self {
        Pattern::Instance(TypeTag::Builtin(b))
    }
}

impl From<&Heap<UserType>> for Pattern {
    fn from(ty: &Heap<UserType>) -> Self {
        Pattern::Instance(ty.tag())
    }
}

impl From<regex::Regex> for Pattern {
    fn from(re: regex::Regex) -> Self {
        Pattern::Regex(RegexPattern::new(re))
    }
}

impl From<RegexPattern> for Pattern {
    fn from(re: RegexPattern) -> Self {
        Pattern::Regex(re)
    }
}
