//! Specificity ordering between patterns.
//!
//! `Ordering::Less` means "more specific". Across variants:
//!
//! ```text
//! Literal < Destructuring < Regex < Instance < Wildcard
//! ```
//!
//! A binding ranks as its inner pattern. Types compare by the length of their
//! supertype chain, deeper first, then by name. A proper subtype is always
//! deeper than its supertypes, so subtypes sort ahead of them. Two
//! destructuring patterns compare by type first, then their sub-pattern lists.
//! Lists compare element by element, and when every shared position ties the
//! longer list is more specific.
//!
//! The relation is a total preorder: `Equal` means equally specific, never
//! incomparable, so a rule list kept in this order stays sorted under
//! insertion.

use std::cmp::Ordering;

use super::{Pattern, PatternList};
use crate::types::TypeTag;

impl Pattern {
    fn rank(&self) -> u8 {
        match self {
            Pattern::Literal(_) => 0,
            Pattern::Destructuring { .. } => 1,
            Pattern::Regex(_) => 2,
            Pattern::Instance(_) => 3,
            Pattern::Wildcard => 4,
            Pattern::Binding { inner, .. } => inner.rank(),
        }
    }

    /// Strip binding wrappers.
    fn core(&self) -> &Pattern {
        let mut current = self;
        while let Pattern::Binding { inner, .. } = current {
            current = &**inner;
        }
        current
    }

    /// Compare specificity; `Less` means `self` is more specific.
    pub fn specificity_cmp(&self, other: &Pattern) -> Ordering {
        match (self.core(), other.core()) {
            (Pattern::Instance(a), Pattern::Instance(b)) => type_cmp(a, b),
            (
                Pattern::Destructuring { tag: a, parts: pa },
                Pattern::Destructuring { tag: b, parts: pb },
            ) => type_cmp(a, b).then_with(|| pa.specificity_cmp(pb)),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl PatternList {
    /// Compare specificity; `Less` means `self` is more specific.
    pub fn specificity_cmp(&self, other: &PatternList) -> Ordering {
        self.iter()
            .zip(other.iter())
            .map(|(a, b)| a.specificity_cmp(b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| other.len().cmp(&self.len()))
    }
}

fn type_cmp(a: &TypeTag, b: &TypeTag) -> Ordering {
    ancestry(b)
        .cmp(&ancestry(a))
        .then_with(|| a.name().cmp(b.name()))
}

/// Number of proper supertypes.
fn ancestry(tag: &TypeTag) -> usize {
    std::iter::successors(tag.parent(), TypeTag::parent).count()
}
