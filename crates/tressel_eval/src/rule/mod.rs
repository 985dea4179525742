//! Rules: a pattern list, an optional guard, and an action.
//!
//! A rule runs in two phases. [`Rule::try_match`] performs the structural
//! match into a fresh [`Bindings`] and then consults the guard, which sees the
//! bindings through a read-only [`Candidate`]. When both succeed the caller
//! hands the bindings to [`Rule::fire`], which runs the action with a
//! [`Matched`] context that can read and overwrite bindings and mutate the
//! caller's state.
//!
//! Actions are reference counted so that fallthrough declarations can share
//! one body.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use tressel_patterns::{Bindings, PatternList, Value};

use crate::errors::DeclarationError;

/// Side condition evaluated after a successful structural match.
pub type Guard<C> = Rc<dyn Fn(&Candidate<'_, C>) -> bool>;

/// Rule body.
pub type Action<R, C> = Rc<dyn Fn(&mut Matched<'_, C>) -> R>;

/// Wrap a guard closure.
pub fn guard<C, F>(f: F) -> Guard<C>
where
    F: Fn(&Candidate<'_, C>) -> bool + 'static,
{
    Rc::new(f)
}

/// Wrap an action closure.
pub fn action<R, C, F>(f: F) -> Action<R, C>
where
    F: Fn(&mut Matched<'_, C>) -> R + 'static,
{
    Rc::new(f)
}

/// What a guard sees: the bindings of a structural match, the subjects and
/// the caller's state.
pub struct Candidate<'a, C> {
    state: &'a C,
    bindings: &'a Bindings,
    subjects: &'a [Value],
}

impl<'a, C> Candidate<'a, C> {
    pub fn state(&self) -> &'a C {
        self.state
    }

    pub fn bindings(&self) -> &'a Bindings {
        self.bindings
    }

    pub fn subjects(&self) -> &'a [Value] {
        self.subjects
    }
}

impl<C> Deref for Candidate<'_, C> {
    type Target = Bindings;

    fn deref(&self) -> &Bindings {
        self.bindings
    }
}

/// What an action sees: the committed bindings, the subjects and mutable
/// access to the caller's state.
///
/// The bindings live only for the duration of the action call.
pub struct Matched<'a, C> {
    state: &'a mut C,
    bindings: Bindings,
    subjects: &'a [Value],
}

impl<'a, C> Matched<'a, C> {
    pub fn state(&self) -> &C {
        &*self.state
    }

    pub fn state_mut(&mut self) -> &mut C {
        &mut *self.state
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn subjects(&self) -> &'a [Value] {
        self.subjects
    }

    /// The `index`th subject, or `Nil` past the end.
    pub fn subject(&self, index: usize) -> Value {
        self.subjects.get(index).cloned().unwrap_or(Value::Nil)
    }
}

impl<C> Deref for Matched<'_, C> {
    type Target = Bindings;

    fn deref(&self) -> &Bindings {
        &self.bindings
    }
}

impl<C> DerefMut for Matched<'_, C> {
    fn deref_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }
}

/// A declared rule.
pub struct Rule<R, C = ()> {
    patterns: PatternList,
    guard: Option<Guard<C>>,
    action: Action<R, C>,
}

impl<R, C> Rule<R, C> {
    pub fn new(patterns: PatternList, guard: Option<Guard<C>>, action: Action<R, C>) -> Self {
        Rule {
            patterns,
            guard,
            action,
        }
    }

    pub fn patterns(&self) -> &PatternList {
        &self.patterns
    }

    pub fn has_guard(&self) -> bool {
        self.guard.is_some()
    }

    /// Structural match followed by the guard.
    ///
    /// Returns the bindings on success. On failure the partial environment
    /// is dropped here.
    pub fn try_match(&self, state: &C, subjects: &[Value]) -> Option<Bindings> {
        let mut bindings = Bindings::new();
        if !self.patterns.matches(subjects, &mut bindings) {
            return None;
        }
        if let Some(guard) = &self.guard {
            let candidate = Candidate {
                state,
                bindings: &bindings,
                subjects,
            };
            if !guard(&candidate) {
                tracing::trace!(patterns = %self.patterns, "guard rejected match");
                return None;
            }
        }
        Some(bindings)
    }

    /// Run the action with bindings produced by [`Rule::try_match`].
    pub fn fire(&self, state: &mut C, bindings: Bindings, subjects: &[Value]) -> R {
        let mut matched = Matched {
            state,
            bindings,
            subjects,
        };
        (self.action)(&mut matched)
    }
}

// Manual impl: `R` and `C` need not be `Clone`.
impl<R, C> Clone for Rule<R, C> {
    fn clone(&self) -> Self {
        Rule {
            patterns: self.patterns.clone(),
            guard: self.guard.clone(),
            action: Rc::clone(&self.action),
        }
    }
}

impl<R, C> fmt::Debug for Rule<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("patterns", &self.patterns)
            .field("guarded", &self.guard.is_some())
            .finish_non_exhaustive()
    }
}

/// Declaration bookkeeping shared by rule-set and dispatcher builders.
///
/// Declarations without an action wait here until the next declaration that
/// has one; they then all receive that action, in declaration order.
pub(crate) struct Declarations<C> {
    deferred: Vec<(PatternList, Option<Guard<C>>)>,
}

impl<C> Declarations<C> {
    pub(crate) fn new() -> Self {
        Declarations {
            deferred: Vec::new(),
        }
    }

    pub(crate) fn defer(&mut self, patterns: PatternList, guard: Option<Guard<C>>) {
        self.deferred.push((patterns, guard));
    }

    /// Every pending declaration followed by the new one, all sharing `action`.
    pub(crate) fn resolve<R>(
        &mut self,
        patterns: PatternList,
        guard: Option<Guard<C>>,
        action: Action<R, C>,
    ) -> Vec<Rule<R, C>> {
        let mut rules: Vec<Rule<R, C>> = self
            .deferred
            .drain(..)
            .map(|(patterns, guard)| Rule::new(patterns, guard, Rc::clone(&action)))
            .collect();
        rules.push(Rule::new(patterns, guard, action));
        rules
    }

    /// Fails if fallthrough declarations are still waiting for an action.
    pub(crate) fn finish(&self) -> Result<(), DeclarationError> {
        match self.deferred.len() {
            0 => Ok(()),
            count => Err(DeclarationError::DanglingFallthrough { count }),
        }
    }
}
