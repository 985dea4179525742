//! Error types for rule declaration and dispatch.
//!
//! Guard and action failures are not represented here: they live in the
//! caller's result type `R` and pass through the engine untouched.

use tressel_patterns::Value;

/// Failure to select a rule for a subject sequence.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MatchError {
    /// No declared rule matched, or every structural match was rejected by
    /// its guard.
    #[error("no rule matches {} subject(s): {}", .arity, render(.subjects))]
    NoMatchFound { arity: usize, subjects: Vec<Value> },

    /// The rule set could not be built.
    #[error(transparent)]
    Declaration(#[from] DeclarationError),
}

impl MatchError {
    pub fn is_no_match(&self) -> bool {
        matches!(self, MatchError::NoMatchFound { .. })
    }
}

/// Build a `NoMatchFound` for the given subjects.
#[cold]
pub fn no_match(subjects: &[Value]) -> MatchError {
    MatchError::NoMatchFound {
        arity: subjects.len(),
        subjects: subjects.to_vec(),
    }
}

/// Structural problems found while declaring rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeclarationError {
    /// Fallthrough declarations were never followed by a rule with an action.
    #[error("{count} fallthrough declaration(s) never received an action")]
    DanglingFallthrough { count: usize },
}

fn render(subjects: &[Value]) -> String {
    subjects
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
