//! Severity ordering of assessment categories
//!
//! The kernel never hard-codes a category ladder. Callers supply a
//! [`CategoryOrder`] describing how severe each category is, which category
//! means "not relevant" and which categories mean "no judgement made".
//! [`RankedCategoryOrder`] covers the common case of a fixed lookup table.

use std::cmp::Ordering;

/// Total order over an assessment category enumeration
pub trait CategoryOrder<C> {
    /// Compare two categories by severity (`Greater` is more severe)
    fn compare(&self, a: &C, b: &C) -> Ordering;

    /// The least severe category, used when nothing else applies
    fn not_relevant(&self) -> C;

    /// Check whether a category means no judgement has been made yet
    fn is_no_result(&self, category: &C) -> bool;

    /// The more severe of two categories; `a` wins ties
    fn most_severe<'a>(&self, a: &'a C, b: &'a C) -> &'a C {
        match self.compare(b, a) {
            Ordering::Greater => b,
            _ => a,
        }
    }
}

/// Category order backed by a ladder from least to most severe
///
/// Categories missing from the ladder rank below every listed category.
#[derive(Debug, Clone)]
pub struct RankedCategoryOrder<C> {
    ladder: Vec<C>,
    not_relevant: C,
    no_result: Vec<C>,
}

impl<C: PartialEq + Clone> RankedCategoryOrder<C> {
    /// Create an order from a ladder, the not-relevant category and the no-result sentinels
    pub fn new(ladder: Vec<C>, not_relevant: C, no_result: Vec<C>) -> Self {
        Self {
            ladder,
            not_relevant,
            no_result,
        }
    }

    /// Position of a category on the ladder
    pub fn rank(&self, category: &C) -> Option<usize> {
        self.ladder.iter().position(|c| c == category)
    }
}

impl<C: PartialEq + Clone> CategoryOrder<C> for RankedCategoryOrder<C> {
    fn compare(&self, a: &C, b: &C) -> Ordering {
        self.rank(a).cmp(&self.rank(b))
    }

    fn not_relevant(&self) -> C {
        self.not_relevant.clone()
    }

    fn is_no_result(&self, category: &C) -> bool {
        self.no_result.contains(category)
    }
}
