//! Ordered modifier chains.

use std::fmt;
use std::sync::Arc;

use crate::goal::{Goal, MobContext};
use crate::modifier::{GoalModifier, GoalVerdict};

const DEFAULT_PRIORITY: u32 = 100;

struct ChainEntry {
    /// Lower runs earlier after [`GoalChain::sort_by_priority`].
    priority: u32,
    modifier: Arc<dyn GoalModifier>,
}

/// An ordered sequence of modifiers, itself usable as a modifier.
///
/// Evaluation order is list order; the first `Remove` verdict stops the
/// chain, and replacements are threaded into later modifiers. Chains are
/// built and sorted at setup time — the tick loop only ever reads them,
/// so there is no interior locking.
pub struct GoalChain {
    entries: Vec<ChainEntry>,
}

impl Default for GoalChain {
    fn default() -> Self {
        Self::new()
    }
}

impl GoalChain {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a modifier with the default priority.
    pub fn push<M: GoalModifier + 'static>(&mut self, modifier: M) {
        self.push_with_priority(modifier, DEFAULT_PRIORITY);
    }

    /// Append a modifier with an explicit priority (lower runs earlier
    /// once sorted). Priorities are assigned here, once; the chain never
    /// reorders itself at runtime.
    pub fn push_with_priority<M: GoalModifier + 'static>(&mut self, modifier: M, priority: u32) {
        self.entries.push(ChainEntry {
            priority,
            modifier: Arc::new(modifier),
        });
    }

    /// Append every modifier from another chain.
    ///
    /// The receiving chain owns an independent list: pushing to or
    /// re-sorting `other` afterwards does not affect this chain.
    pub fn extend_from(&mut self, other: &GoalChain) {
        self.entries.extend(other.entries.iter().map(|e| ChainEntry {
            priority: e.priority,
            modifier: e.modifier.clone(),
        }));
    }

    /// Stable sort by the priorities assigned at push time. Intended for
    /// one-time setup after all rules are registered.
    pub fn sort_by_priority(&mut self) {
        self.entries.sort_by_key(|e| e.priority);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl GoalModifier for GoalChain {
    fn modify(&self, mob: &MobContext, goal: &dyn Goal) -> GoalVerdict {
        let mut replacement: Option<Box<dyn Goal>> = None;
        for entry in &self.entries {
            let current: &dyn Goal = match &replacement {
                Some(g) => g.as_ref(),
                None => goal,
            };
            match entry.modifier.modify(mob, current) {
                GoalVerdict::Keep => {}
                GoalVerdict::Replace(g) => replacement = Some(g),
                GoalVerdict::Remove => return GoalVerdict::Remove,
            }
        }
        match replacement {
            Some(g) => GoalVerdict::Replace(g),
            None => GoalVerdict::Keep,
        }
    }
}

impl fmt::Debug for GoalChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoalChain")
            .field("modifier_count", &self.entries.len())
            .finish()
    }
}
