//! Specificity-ordered rule dispatch for visitors.
//!
//! A dispatcher keeps its rules sorted most-specific-first. New rules are
//! placed by a linear scan: before the first rule that is strictly less
//! specific, or equally specific but declared by a shallower ancestor. Among
//! equally specific rules of the same dispatcher, declaration order holds.
//!
//! Inheritance copies the parent's current rule list; the child's own
//! declarations are then inserted on top of it. Later changes to the parent
//! do not reach the child.

use std::cmp::Ordering;

use tressel_patterns::{Pattern, PatternList, Value};

use crate::errors::{no_match, DeclarationError, MatchError};
use crate::rule::{action, guard, Action, Candidate, Declarations, Guard, Matched, Rule};

/// What an unmatched dispatch does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DispatchPolicy {
    /// Return `Ok(None)`.
    #[default]
    Lenient,
    /// Return `Err(MatchError::NoMatchFound)`.
    Strict,
}

struct Entry<S, R> {
    rule: Rule<R, S>,
    /// Inheritance depth of the dispatcher that declared the rule.
    depth: usize,
}

impl<S, R> Clone for Entry<S, R> {
    fn clone(&self) -> Self {
        Entry {
            rule: self.rule.clone(),
            depth: self.depth,
        }
    }
}

/// Ordered, inheritable rules over visitor state `S` producing `R`.
pub struct Dispatcher<S, R> {
    entries: Vec<Entry<S, R>>,
    policy: DispatchPolicy,
    depth: usize,
}

impl<S, R> Dispatcher<S, R> {
    /// An empty lenient dispatcher.
    pub fn new() -> Self {
        Dispatcher {
            entries: Vec::new(),
            policy: DispatchPolicy::Lenient,
            depth: 0,
        }
    }

    pub fn builder() -> DispatcherBuilder<S, R> {
        DispatcherBuilder::new()
    }

    /// Snapshot of `parent` one level deeper, keeping its policy.
    pub fn inherit_from(parent: &Dispatcher<S, R>) -> Self {
        Dispatcher {
            entries: parent.entries.clone(),
            policy: parent.policy,
            depth: parent.depth.saturating_add(1),
        }
    }

    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: DispatchPolicy) {
        self.policy = policy;
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rules in dispatch order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule<R, S>> {
        self.entries.iter().map(|entry| &entry.rule)
    }

    /// Insert `rule` at its specificity position.
    pub fn install_rule(&mut self, rule: Rule<R, S>) {
        let depth = self.depth;
        let position = self
            .entries
            .iter()
            .position(|existing| {
                match rule.patterns().specificity_cmp(existing.rule.patterns()) {
                    Ordering::Less => true,
                    Ordering::Equal => existing.depth < depth,
                    Ordering::Greater => false,
                }
            })
            .unwrap_or(self.entries.len());
        tracing::debug!(position, depth, patterns = %rule.patterns(), "installing rule");
        self.entries.insert(position, Entry { rule, depth });
    }

    /// Fire the first rule accepting `subjects`.
    ///
    /// An unmatched dispatch yields `Ok(None)` under the lenient policy and
    /// `NoMatchFound` under the strict one.
    #[tracing::instrument(level = "trace", skip_all, fields(arity = subjects.len()))]
    pub fn dispatch(&self, state: &mut S, subjects: &[Value]) -> Result<Option<R>, MatchError> {
        for entry in &self.entries {
            if let Some(bindings) = entry.rule.try_match(state, subjects) {
                tracing::trace!(patterns = %entry.rule.patterns(), "rule matched");
                return Ok(Some(entry.rule.fire(state, bindings, subjects)));
            }
        }
        tracing::debug!(policy = ?self.policy, "no rule matched");
        match self.policy {
            DispatchPolicy::Lenient => Ok(None),
            DispatchPolicy::Strict => Err(no_match(subjects)),
        }
    }
}

impl<S, R> Default for Dispatcher<S, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, R> Clone for Dispatcher<S, R> {
    fn clone(&self) -> Self {
        Dispatcher {
            entries: self.entries.clone(),
            policy: self.policy,
            depth: self.depth,
        }
    }
}

impl<S, R> std::fmt::Debug for Dispatcher<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("rules", &self.entries.iter().map(|e| &e.rule).collect::<Vec<_>>())
            .field("policy", &self.policy)
            .field("depth", &self.depth)
            .finish()
    }
}

/// Declares the `on` rules of a dispatcher.
pub struct DispatcherBuilder<S, R> {
    dispatcher: Dispatcher<S, R>,
    decls: Declarations<S>,
}

impl<S, R> DispatcherBuilder<S, R> {
    pub fn new() -> Self {
        DispatcherBuilder {
            dispatcher: Dispatcher::new(),
            decls: Declarations::new(),
        }
    }

    /// Start from a copy of `parent`'s rules.
    pub fn inherit_from(parent: &Dispatcher<S, R>) -> Self {
        DispatcherBuilder {
            dispatcher: Dispatcher::inherit_from(parent),
            decls: Declarations::new(),
        }
    }

    #[must_use]
    pub fn strict(mut self) -> Self {
        self.dispatcher.policy = DispatchPolicy::Strict;
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: DispatchPolicy) -> Self {
        self.dispatcher.policy = policy;
        self
    }

    #[must_use]
    pub fn on<P, A>(self, patterns: P, body: A) -> Self
    where
        P: IntoIterator,
        P::Item: Into<Pattern>,
        A: Fn(&mut Matched<'_, S>) -> R + 'static,
    {
        self.declare(PatternList::new(patterns), None, Some(action(body)))
    }

    #[must_use]
    pub fn on_guard<P, G, A>(self, patterns: P, when: G, body: A) -> Self
    where
        P: IntoIterator,
        P::Item: Into<Pattern>,
        G: Fn(&Candidate<'_, S>) -> bool + 'static,
        A: Fn(&mut Matched<'_, S>) -> R + 'static,
    {
        self.declare(PatternList::new(patterns), Some(guard(when)), Some(action(body)))
    }

    /// Declare patterns that share the next `on` body.
    #[must_use]
    pub fn fallthrough<P>(self, patterns: P) -> Self
    where
        P: IntoIterator,
        P::Item: Into<Pattern>,
    {
        self.declare(PatternList::new(patterns), None, None)
    }

    #[must_use]
    pub fn fallthrough_guard<P, G>(self, patterns: P, when: G) -> Self
    where
        P: IntoIterator,
        P::Item: Into<Pattern>,
        G: Fn(&Candidate<'_, S>) -> bool + 'static,
    {
        self.declare(PatternList::new(patterns), Some(guard(when)), None)
    }

    fn declare(
        mut self,
        patterns: PatternList,
        when: Option<Guard<S>>,
        body: Option<Action<R, S>>,
    ) -> Self {
        match body {
            Some(body) => {
                for rule in self.decls.resolve(patterns, when, body) {
                    self.dispatcher.install_rule(rule);
                }
            }
            None => self.decls.defer(patterns, when),
        }
        self
    }

    pub fn build(self) -> Result<Dispatcher<S, R>, DeclarationError> {
        self.decls.finish()?;
        Ok(self.dispatcher)
    }
}

impl<S, R> Default for DispatcherBuilder<S, R> {
    fn default() -> Self {
        Self::new()
    }
}
