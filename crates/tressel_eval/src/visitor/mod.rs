//! Visitors: a dispatcher paired with per-instance state.
//!
//! A [`Dispatcher`] plays the role of a visitor class and is shared between
//! instances through `Rc`; each [`Visitor`] owns the state its actions read
//! and update. [`TourGuide`] feeds one subject to several visitors so a
//! single traversal can serve all of them.

use std::rc::Rc;

use tressel_patterns::Value;

use crate::dispatcher::Dispatcher;
use crate::errors::MatchError;

/// Anything a traversal can feed nodes to.
pub trait Visit {
    /// Visit a single node. Lenient non-matches are `Ok(())`.
    fn visit_node(&mut self, node: &Value) -> Result<(), MatchError>;
}

/// A visitor instance.
pub struct Visitor<S, R> {
    dispatcher: Rc<Dispatcher<S, R>>,
    state: S,
}

impl<S, R> Visitor<S, R> {
    pub fn new(dispatcher: Rc<Dispatcher<S, R>>, state: S) -> Self {
        Visitor { dispatcher, state }
    }

    /// Dispatch `subjects` against this visitor's rules.
    pub fn visit(&mut self, subjects: &[Value]) -> Result<Option<R>, MatchError> {
        self.dispatcher.dispatch(&mut self.state, subjects)
    }

    pub fn dispatcher(&self) -> &Rc<Dispatcher<S, R>> {
        &self.dispatcher
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    pub fn into_state(self) -> S {
        self.state
    }
}

impl<S: Default, R> Visitor<S, R> {
    pub fn with_default(dispatcher: Rc<Dispatcher<S, R>>) -> Self {
        Visitor::new(dispatcher, S::default())
    }
}

impl<S, R> Visit for Visitor<S, R> {
    fn visit_node(&mut self, node: &Value) -> Result<(), MatchError> {
        self.visit(std::slice::from_ref(node)).map(drop)
    }
}

impl<S: std::fmt::Debug, R> std::fmt::Debug for Visitor<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Visitor")
            .field("state", &self.state)
            .field("rules", &self.dispatcher.len())
            .finish()
    }
}

/// Calls each visitor in turn on the same node.
///
/// The first error stops the remaining visitors for that node.
#[derive(Default)]
pub struct TourGuide<'a> {
    visitors: Vec<&'a mut dyn Visit>,
}

impl<'a> TourGuide<'a> {
    pub fn new() -> Self {
        TourGuide {
            visitors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, visitor: &'a mut dyn Visit) -> Self {
        self.visitors.push(visitor);
        self
    }

    pub fn push(&mut self, visitor: &'a mut dyn Visit) {
        self.visitors.push(visitor);
    }

    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }
}

impl Visit for TourGuide<'_> {
    fn visit_node(&mut self, node: &Value) -> Result<(), MatchError> {
        for visitor in &mut self.visitors {
            visitor.visit_node(node)?;
        }
        Ok(())
    }
}
