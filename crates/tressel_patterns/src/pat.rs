//! Constructors for pattern elements.
//!
//! ```text
//! use tressel_patterns::{pat, BuiltinType};
//!
//! pat::wildcard()                                   // _
//! pat::bind("n")                                    // n
//! pat::lit(1)                                       // 1
//! pat::instance(BuiltinType::Int).bind_as("a")      // Int as a
//! pat::destructure(BuiltinType::List, [pat::bind("head"), pat::bind("tail")])
//! ```

use crate::pattern::{Pattern, PatternList, RegexPattern};
use crate::types::TypeTag;
use crate::value::Value;
use crate::Name;

/// Match anything; as the only element of a rule, match any arity.
pub fn wildcard() -> Pattern {
    Pattern::Wildcard
}

/// Match anything and bind it to `name`.
pub fn bind(name: impl Into<Name>) -> Pattern {
    Pattern::Wildcard.bind_as(name)
}

/// Force a literal comparison.
pub fn lit(value: impl Into<Value>) -> Pattern {
    Pattern::Literal(value.into())
}

/// Literal symbol, as in `:name`.
pub fn sym(name: impl Into<Name>) -> Pattern {
    Pattern::Literal(Value::symbol(name))
}

/// Match values of `tag` or any subtype.
pub fn instance(tag: impl Into<TypeTag>) -> Pattern {
    Pattern::Instance(tag.into())
}

/// Compile a regex pattern.
pub fn regex(source: &str) -> Result<Pattern, regex::Error> {
    RegexPattern::compile(source).map(Pattern::Regex)
}

/// Match instances of `tag` whose decomposition matches `parts`.
pub fn destructure<I>(tag: impl Into<TypeTag>, parts: I) -> Pattern
where
    I: IntoIterator,
    I::Item: Into<Pattern>,
{
    Pattern::Destructuring {
        tag: tag.into(),
        parts: Box::new(PatternList::new(parts)),
    }
}
