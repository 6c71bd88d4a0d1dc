//! Three-valued goal filters and their composition.
//!
//! A filter inspects one goal and answers `Match`, `Pass` or `Reject`.
//! `Pass` means "indifferent, ask the next filter"; `Reject` is a hard
//! veto that wins over any `Match` in a composite. The third value lets a
//! narrow protection rule veto broad matchers without either rule knowing
//! about the other.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::FilterError;
use crate::goal::Goal;
use crate::key::GoalKey;
use crate::registry::GoalRegistry;

// ── Verdict ───────────────────────────────────────────────────────────────

/// Outcome of testing a single filter against a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterVerdict {
    /// The filter's criterion is satisfied.
    Match,
    /// The filter is indifferent to this goal.
    Pass,
    /// Hard veto: no action on this goal, whatever other filters say.
    Reject,
}

impl FilterVerdict {
    /// Boolean view for callers that only need match/no-match.
    pub fn matched(self) -> bool {
        self == FilterVerdict::Match
    }

    /// Lift a boolean predicate result into the three-valued domain.
    pub fn from_bool(matched: bool) -> Self {
        if matched {
            FilterVerdict::Match
        } else {
            FilterVerdict::Pass
        }
    }

    /// Swap `Match` and `Reject`; `Pass` stays indifferent.
    ///
    /// A leaf filter only ever returns `Match`/`Pass`, so its negation is
    /// exactly a veto filter: "never touch goals matching this".
    pub fn negate(self) -> Self {
        match self {
            FilterVerdict::Match => FilterVerdict::Reject,
            FilterVerdict::Pass => FilterVerdict::Pass,
            FilterVerdict::Reject => FilterVerdict::Match,
        }
    }
}

// ── Trait ─────────────────────────────────────────────────────────────────

/// A stateless predicate over goals.
///
/// Implementations must not mutate anything and must not block; they run
/// on the tick path, potentially thousands of times per second.
pub trait GoalFilter: Send + Sync {
    fn test(&self, goal: &dyn Goal) -> FilterVerdict;
}

impl GoalFilter for Box<dyn GoalFilter> {
    #[inline]
    fn test(&self, goal: &dyn Goal) -> FilterVerdict {
        (**self).test(goal)
    }
}

impl GoalFilter for Arc<dyn GoalFilter> {
    #[inline]
    fn test(&self, goal: &dyn Goal) -> FilterVerdict {
        (**self).test(goal)
    }
}

// ── Composites ────────────────────────────────────────────────────────────

/// Conjunction. `Reject` from either side vetoes; `Pass` delegates.
pub struct And<A, B> {
    first: A,
    second: B,
}

impl<A: GoalFilter, B: GoalFilter> GoalFilter for And<A, B> {
    fn test(&self, goal: &dyn Goal) -> FilterVerdict {
        match self.first.test(goal) {
            FilterVerdict::Reject => FilterVerdict::Reject,
            FilterVerdict::Pass => self.second.test(goal),
            FilterVerdict::Match => match self.second.test(goal) {
                FilterVerdict::Reject => FilterVerdict::Reject,
                _ => FilterVerdict::Match,
            },
        }
    }
}

/// Disjunction. `Match` and `Reject` both short-circuit; the second
/// filter is only consulted when the first passes.
pub struct Or<A, B> {
    first: A,
    second: B,
}

impl<A: GoalFilter, B: GoalFilter> GoalFilter for Or<A, B> {
    fn test(&self, goal: &dyn Goal) -> FilterVerdict {
        match self.first.test(goal) {
            FilterVerdict::Match => FilterVerdict::Match,
            FilterVerdict::Reject => FilterVerdict::Reject,
            FilterVerdict::Pass => self.second.test(goal),
        }
    }
}

/// Negation of the inner filter's verdict.
pub struct Not<F> {
    inner: F,
}

impl<F: GoalFilter> GoalFilter for Not<F> {
    fn test(&self, goal: &dyn Goal) -> FilterVerdict {
        self.inner.test(goal).negate()
    }
}

/// Combine two filters with AND semantics.
pub fn and<A: GoalFilter, B: GoalFilter>(first: A, second: B) -> And<A, B> {
    And { first, second }
}

/// Combine two filters with OR semantics.
pub fn or<A: GoalFilter, B: GoalFilter>(first: A, second: B) -> Or<A, B> {
    Or { first, second }
}

/// Negate a filter, turning a matcher into a veto.
pub fn negate<F: GoalFilter>(inner: F) -> Not<F> {
    Not { inner }
}

/// Extension trait that adds builder-style composition to any filter.
pub trait GoalFilterExt: GoalFilter + Sized {
    fn and<B: GoalFilter>(self, other: B) -> And<Self, B> {
        and(self, other)
    }

    fn or<B: GoalFilter>(self, other: B) -> Or<Self, B> {
        or(self, other)
    }

    fn negate(self) -> Not<Self> {
        negate(self)
    }
}

impl<F: GoalFilter + Sized> GoalFilterExt for F {}

// ── Kind filters ──────────────────────────────────────────────────────────

/// Matches goals by their registered kind.
pub struct KindFilter {
    keys: HashSet<GoalKey>,
}

impl KindFilter {
    /// Match exactly one kind (registry-key identity).
    pub fn exact(key: GoalKey) -> Self {
        Self {
            keys: HashSet::from([key]),
        }
    }

    /// Match a kind and every registered kind descending from it.
    ///
    /// The descendant set is computed once here, so pack-provided kinds
    /// registered later are not picked up; build filters after packs load.
    pub fn hierarchy(registry: &GoalRegistry, root: &GoalKey) -> Result<Self, FilterError> {
        if !registry.contains(root) {
            return Err(FilterError::UnknownGoalKind(root.clone()));
        }
        Ok(Self {
            keys: registry.descendants(root),
        })
    }
}

impl GoalFilter for KindFilter {
    fn test(&self, goal: &dyn Goal) -> FilterVerdict {
        FilterVerdict::from_bool(self.keys.contains(goal.key()))
    }
}

// ── Name filters ──────────────────────────────────────────────────────────

/// Matches goals by implementation type name.
///
/// The substring form is the fallback for goals whose kind is not
/// registered and whose only stable handle is a name fragment.
pub struct NameFilter {
    pattern: String,
    substring: bool,
}

impl NameFilter {
    /// Match the full type name.
    pub fn exact(name: &str) -> Result<Self, FilterError> {
        if name.is_empty() {
            return Err(FilterError::EmptyPattern);
        }
        Ok(Self {
            pattern: name.to_string(),
            substring: false,
        })
    }

    /// Match any type name containing `pattern`.
    pub fn contains(pattern: &str) -> Result<Self, FilterError> {
        if pattern.is_empty() {
            return Err(FilterError::EmptyPattern);
        }
        Ok(Self {
            pattern: pattern.to_string(),
            substring: true,
        })
    }
}

impl GoalFilter for NameFilter {
    fn test(&self, goal: &dyn Goal) -> FilterVerdict {
        let name = goal.name();
        let hit = if self.substring {
            name.contains(&self.pattern)
        } else {
            name == self.pattern
        };
        FilterVerdict::from_bool(hit)
    }
}
