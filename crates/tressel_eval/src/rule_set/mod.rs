//! Ordered rule sets and the first-match engine.
//!
//! Rules are tried in declaration order; the first whose patterns and guard
//! both accept the subjects fires, and its action's result is returned
//! immediately.
//!
//! ```ignore
//! let mut rules = build_rule_set();
//! rules
//!     .with([1], |_| "one")
//!     .fallthrough([2])
//!     .with([3], |_| "two or three");
//! let rules = rules.finalize()?;
//! assert_eq!(rules.evaluate(&[Value::int(2)])?, "two or three");
//! ```

use tressel_patterns::{Pattern, PatternList, Value};

use crate::errors::{no_match, DeclarationError, MatchError};
use crate::rule::{action, guard, Action, Candidate, Declarations, Guard, Matched, Rule};

/// Start declaring a stateless rule set.
///
/// Use [`RuleSetBuilder::new`] for rules that thread caller state.
pub fn build_rule_set<R>() -> RuleSetBuilder<R> {
    RuleSetBuilder::new()
}

/// Declare rules and evaluate them against `subjects` in one call.
///
/// Declaration errors surface as [`MatchError::Declaration`].
pub fn match_values<R, F>(subjects: &[Value], declare: F) -> Result<R, MatchError>
where
    F: FnOnce(&mut RuleSetBuilder<R>),
{
    let mut builder = RuleSetBuilder::new();
    declare(&mut builder);
    builder.finalize()?.evaluate(subjects)
}

/// Incremental rule declaration.
///
/// Declarations without an action fall through to the next declaration that
/// has one.
pub struct RuleSetBuilder<R, C = ()> {
    rules: Vec<Rule<R, C>>,
    decls: Declarations<C>,
}

impl<R, C> RuleSetBuilder<R, C> {
    pub fn new() -> Self {
        RuleSetBuilder {
            rules: Vec::new(),
            decls: Declarations::new(),
        }
    }

    /// Declare a rule. Without an action the rule is deferred.
    pub fn add_rule(
        &mut self,
        patterns: PatternList,
        guard: Option<Guard<C>>,
        action: Option<Action<R, C>>,
    ) -> &mut Self {
        match action {
            Some(action) => {
                let resolved = self.decls.resolve(patterns, guard, action);
                self.rules.extend(resolved);
            }
            None => self.decls.defer(patterns, guard),
        }
        self
    }

    pub fn with<P, A>(&mut self, patterns: P, body: A) -> &mut Self
    where
        P: IntoIterator,
        P::Item: Into<Pattern>,
        A: Fn(&mut Matched<'_, C>) -> R + 'static,
    {
        self.add_rule(PatternList::new(patterns), None, Some(action(body)))
    }

    pub fn with_guard<P, G, A>(&mut self, patterns: P, when: G, body: A) -> &mut Self
    where
        P: IntoIterator,
        P::Item: Into<Pattern>,
        G: Fn(&Candidate<'_, C>) -> bool + 'static,
        A: Fn(&mut Matched<'_, C>) -> R + 'static,
    {
        self.add_rule(PatternList::new(patterns), Some(guard(when)), Some(action(body)))
    }

    /// Declare patterns that share the next declared action.
    pub fn fallthrough<P>(&mut self, patterns: P) -> &mut Self
    where
        P: IntoIterator,
        P::Item: Into<Pattern>,
    {
        self.add_rule(PatternList::new(patterns), None, None)
    }

    pub fn fallthrough_guard<P, G>(&mut self, patterns: P, when: G) -> &mut Self
    where
        P: IntoIterator,
        P::Item: Into<Pattern>,
        G: Fn(&Candidate<'_, C>) -> bool + 'static,
    {
        self.add_rule(PatternList::new(patterns), Some(guard(when)), None)
    }

    /// Freeze the declarations.
    pub fn finalize(self) -> Result<RuleSet<R, C>, DeclarationError> {
        self.decls.finish()?;
        Ok(RuleSet { rules: self.rules })
    }
}

impl<R, C> Default for RuleSetBuilder<R, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// An immutable, ordered rule list.
pub struct RuleSet<R, C = ()> {
    rules: Vec<Rule<R, C>>,
}

impl<R, C> RuleSet<R, C> {
    pub fn rules(&self) -> &[Rule<R, C>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Fire the first rule accepting `subjects`, threading `state` through
    /// guards and the action.
    #[tracing::instrument(level = "debug", skip_all, fields(arity = subjects.len()))]
    pub fn evaluate_with(&self, state: &mut C, subjects: &[Value]) -> Result<R, MatchError> {
        for (index, rule) in self.rules.iter().enumerate() {
            if let Some(bindings) = rule.try_match(state, subjects) {
                tracing::trace!(index, patterns = %rule.patterns(), "rule matched");
                return Ok(rule.fire(state, bindings, subjects));
            }
        }
        tracing::debug!(rules = self.rules.len(), "no rule matched");
        Err(no_match(subjects))
    }
}

impl<R> RuleSet<R> {
    /// Stateless evaluation.
    pub fn evaluate(&self, subjects: &[Value]) -> Result<R, MatchError> {
        self.evaluate_with(&mut (), subjects)
    }
}

impl<R, C> Clone for RuleSet<R, C> {
    fn clone(&self) -> Self {
        RuleSet {
            rules: self.rules.clone(),
        }
    }
}

impl<R, C> std::fmt::Debug for RuleSet<R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.rules).finish()
    }
}
