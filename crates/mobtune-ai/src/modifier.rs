//! Goal modifiers: keep, replace or remove a single goal.
//!
//! A modifier never touches the mob or the goal set itself; it only
//! returns a verdict. The orchestrator owns applying verdicts to the
//! collection, so a faulty modifier can be skipped without half-applied
//! state.

use std::sync::Arc;

use crate::filter::GoalFilter;
use crate::goal::{Goal, MobContext};

// ── Verdict ───────────────────────────────────────────────────────────────

/// What should happen to the goal that was inspected.
#[derive(Debug)]
pub enum GoalVerdict {
    /// Leave the goal as it is.
    Keep,
    /// Swap the goal for this replacement.
    Replace(Box<dyn Goal>),
    /// Drop the goal from the mob's set.
    Remove,
}

// ── Trait ─────────────────────────────────────────────────────────────────

/// Decides the fate of one goal on one mob.
///
/// # Contract
///
/// - Side-effect-free apart from the returned verdict.
/// - Must not block; runs on the tick path.
/// - `Send + Sync`: rule sets are shared across sessions.
pub trait GoalModifier: Send + Sync {
    fn modify(&self, mob: &MobContext, goal: &dyn Goal) -> GoalVerdict;
}

impl GoalModifier for Box<dyn GoalModifier> {
    #[inline]
    fn modify(&self, mob: &MobContext, goal: &dyn Goal) -> GoalVerdict {
        (**self).modify(mob, goal)
    }
}

impl GoalModifier for Arc<dyn GoalModifier> {
    #[inline]
    fn modify(&self, mob: &MobContext, goal: &dyn Goal) -> GoalVerdict {
        (**self).modify(mob, goal)
    }
}

// ── Sequencing ────────────────────────────────────────────────────────────

/// Applies two modifiers in sequence.
///
/// If the first removes the goal, the second never runs. If the first
/// replaces it, the second sees the replacement. Construct with
/// `modifier_a.then(modifier_b)`.
pub struct Then<A, B> {
    first: A,
    second: B,
}

impl<A: GoalModifier, B: GoalModifier> GoalModifier for Then<A, B> {
    fn modify(&self, mob: &MobContext, goal: &dyn Goal) -> GoalVerdict {
        match self.first.modify(mob, goal) {
            GoalVerdict::Remove => GoalVerdict::Remove,
            GoalVerdict::Keep => self.second.modify(mob, goal),
            GoalVerdict::Replace(replacement) => {
                match self.second.modify(mob, replacement.as_ref()) {
                    GoalVerdict::Keep => GoalVerdict::Replace(replacement),
                    verdict => verdict,
                }
            }
        }
    }
}

/// Extension trait that adds `.then(other)` to any `GoalModifier`.
pub trait GoalModifierExt: GoalModifier + Sized {
    fn then<B: GoalModifier>(self, other: B) -> Then<Self, B> {
        Then {
            first: self,
            second: other,
        }
    }
}

impl<M: GoalModifier + Sized> GoalModifierExt for M {}

// ── Filter adapters ───────────────────────────────────────────────────────

/// Removes every goal the filter matches.
pub struct RemoveIf<F> {
    filter: F,
}

impl<F: GoalFilter> RemoveIf<F> {
    pub fn new(filter: F) -> Self {
        Self { filter }
    }
}

impl<F: GoalFilter> GoalModifier for RemoveIf<F> {
    fn modify(&self, _mob: &MobContext, goal: &dyn Goal) -> GoalVerdict {
        if self.filter.test(goal).matched() {
            GoalVerdict::Remove
        } else {
            GoalVerdict::Keep
        }
    }
}

/// Gates an inner modifier behind a filter: the inner modifier only runs
/// on goals the filter matches; everything else is kept untouched.
pub struct ApplyIf<F, M> {
    filter: F,
    inner: M,
}

impl<F: GoalFilter, M: GoalModifier> ApplyIf<F, M> {
    pub fn new(filter: F, inner: M) -> Self {
        Self { filter, inner }
    }
}

impl<F: GoalFilter, M: GoalModifier> GoalModifier for ApplyIf<F, M> {
    fn modify(&self, mob: &MobContext, goal: &dyn Goal) -> GoalVerdict {
        if self.filter.test(goal).matched() {
            self.inner.modify(mob, goal)
        } else {
            GoalVerdict::Keep
        }
    }
}
