//! The goal abstraction that filters and modifiers operate on.

use std::fmt;

use crate::key::GoalKey;

/// One attachable unit of mob behavior.
///
/// Goals are owned by a mob's goal set and are moved, never cloned. The
/// pipeline only needs two things from a goal: its registered kind (for
/// key and hierarchy matching) and its implementation type name (the
/// fallback for goals whose kind is not registered, e.g. scripted
/// one-offs).
pub trait Goal: Send + Sync + fmt::Debug {
    /// Registered kind of this goal, e.g. `minecraft:random_stroll`.
    fn key(&self) -> &GoalKey;

    /// Implementation type name used for substring matching.
    fn name(&self) -> &str;
}

impl Goal for Box<dyn Goal> {
    fn key(&self) -> &GoalKey {
        (**self).key()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Read-only snapshot of the mob a goal belongs to.
///
/// Modifiers decide verdicts from this snapshot; they never touch the
/// world. The orchestrator builds one per mob per pass.
#[derive(Debug, Clone)]
pub struct MobContext {
    /// The mob's type identifier string, e.g. `"minecraft:zombie"`.
    pub mob_type: String,
    /// Current game tick.
    pub current_tick: u64,
}
