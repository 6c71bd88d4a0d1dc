//! GoalSet ECS component — holds a mob's AI goals.

use std::sync::atomic::{AtomicU64, Ordering};

use bevy_ecs::prelude::*;

use mobtune_ai::Goal;

/// Stable identity of one goal within the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GoalId(pub u64);

/// Thread-safe goal ID allocator (world resource).
#[derive(Resource, Default)]
pub struct GoalIdAllocator {
    next: AtomicU64,
}

impl GoalIdAllocator {
    /// Allocate the next unique goal ID.
    pub fn allocate(&self) -> GoalId {
        GoalId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

/// One goal and its identity.
pub struct GoalEntry {
    pub id: GoalId,
    pub goal: Box<dyn Goal>,
}

/// Holds a mob's goals in a stable order.
///
/// Only the tuning pass mutates this, and only between iterations — the
/// pass snapshots verdicts first and applies them afterwards.
#[derive(Component, Default)]
pub struct GoalSet {
    entries: Vec<GoalEntry>,
}

impl GoalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a goal and return its freshly allocated identity.
    pub fn add(&mut self, goal: Box<dyn Goal>, alloc: &GoalIdAllocator) -> GoalId {
        let id = alloc.allocate();
        self.entries.push(GoalEntry { id, goal });
        id
    }

    /// Remove a goal by identity, preserving the order of the rest.
    pub fn remove(&mut self, id: GoalId) -> Option<Box<dyn Goal>> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx).goal)
    }

    /// Swap the goal with identity `id` for `goal` under a new identity,
    /// keeping its position. Returns the old goal.
    pub fn replace(
        &mut self,
        id: GoalId,
        new_id: GoalId,
        goal: Box<dyn Goal>,
    ) -> Option<Box<dyn Goal>> {
        let entry = self.entries.iter_mut().find(|e| e.id == id)?;
        let old = std::mem::replace(entry, GoalEntry { id: new_id, goal });
        Some(old.goal)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GoalEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Kind identifiers in list order (diagnostics and tests).
    pub fn kinds(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.goal.key().to_string())
            .collect()
    }
}

impl std::fmt::Debug for GoalSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoalSet")
            .field("goal_count", &self.entries.len())
            .field("kinds", &self.kinds())
            .finish()
    }
}
