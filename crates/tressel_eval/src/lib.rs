#![deny(clippy::arithmetic_side_effects)]
//! Tressel Eval - rule engine, visitor dispatcher and tree traversal.
//!
//! This crate runs the patterns defined in `tressel_patterns`:
//!
//! - [`RuleSet`]: ordered rules tried in declaration order (first match wins)
//! - [`Dispatcher`]: rules kept most-specific-first, inheritable, with a
//!   lenient or strict policy for unmatched input
//! - [`Visitor`] / [`TourGuide`]: per-instance visitor state over a shared
//!   dispatcher
//! - [`traverse`] / [`walk`]: preorder, postorder, level-order and down-up
//!   tree walks
//!
//! # Re-exports
//!
//! The pattern vocabulary (`Value`, `Pattern`, `pat`, `Bindings`, ...) is
//! re-exported so callers need only this crate.

use std::sync::Once;

mod dispatcher;
pub mod errors;
mod rule;
mod rule_set;
mod traversal;
mod visitor;

pub use tressel_patterns::{
    pat, Bindings, BuiltinType, Destructure, Heap, Name, ObjectValue, Pattern, PatternList,
    RegexPattern, TypeTag, UserType, UserTypeBuilder, Value, MATCH_DATA,
};

pub use dispatcher::{DispatchPolicy, Dispatcher, DispatcherBuilder};
pub use errors::{DeclarationError, MatchError};
pub use rule::{action, guard, Action, Candidate, Guard, Matched, Rule};
pub use rule_set::{build_rule_set, match_values, RuleSet, RuleSetBuilder};
pub use traversal::{traverse, walk, Order};
pub use visitor::{TourGuide, Visit, Visitor};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set; safe to call repeatedly.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
