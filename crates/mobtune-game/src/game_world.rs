//! ECS game world: bevy_ecs World, entity management, tick systems, and event bus.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use bevy_ecs::prelude::*;

use crate::ai::goal_set::{GoalIdAllocator, GoalSet};
use crate::ai::goals;
use crate::ai::rules::TuneState;
use crate::ai::system::system_goal_tune;
use crate::cleanup::{self, CleanupConfig};
use crate::components::*;
use crate::maintenance::{self, MaintenanceConfig};

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Outgoing events queued by ECS operations for the host layer to consume.
#[derive(Resource, Default)]
pub struct OutgoingEvents {
    pub events: Vec<GameEvent>,
}

/// Global tick counter (incremented every 50 ms).
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

/// Thread-safe entity ID allocator.
#[derive(Resource)]
pub struct EntityIdAllocator {
    next: AtomicI64,
}

impl EntityIdAllocator {
    pub fn new(start: i64) -> Self {
        Self {
            next: AtomicI64::new(start),
        }
    }

    /// Allocate the next unique entity ID.
    pub fn allocate(&self) -> i64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Game events (ECS → host layer)
// ---------------------------------------------------------------------------

/// Events produced by the tuning and cleanup systems, consumed by the host.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A goal was removed from a mob's set.
    GoalRemoved { runtime_id: u64, kind: String },
    /// A goal was swapped for a replacement.
    GoalReplaced {
        runtime_id: u64,
        old_kind: String,
        new_kind: String,
    },
    /// A scheduled expiry removed an entity.
    EntityExpired { unique_id: i64, runtime_id: u64 },
    /// Maintenance purged a dead entity.
    EntityRemoved { unique_id: i64 },
}

// ---------------------------------------------------------------------------
// GameWorld
// ---------------------------------------------------------------------------

/// The ECS game world.
pub struct GameWorld {
    pub world: World,
    tune: Arc<TuneState>,
    cleanup: CleanupConfig,
    maintenance: MaintenanceConfig,
}

impl GameWorld {
    /// Create a world with the given tuning state and default schedules.
    pub fn new(tune: TuneState) -> Self {
        Self::with_configs(tune, CleanupConfig::default(), MaintenanceConfig::default())
    }

    pub fn with_configs(
        tune: TuneState,
        cleanup: CleanupConfig,
        maintenance: MaintenanceConfig,
    ) -> Self {
        let mut world = World::new();
        world.insert_resource(OutgoingEvents::default());
        world.insert_resource(TickCounter::default());
        world.insert_resource(EntityIdAllocator::new(1));
        world.insert_resource(GoalIdAllocator::default());
        Self {
            world,
            tune: Arc::new(tune),
            cleanup,
            maintenance,
        }
    }

    /// Advance the world by one tick.
    pub fn tick(&mut self) {
        self.world.resource_mut::<TickCounter>().0 += 1;
        system_goal_tune(&mut self.world, &self.tune);
        cleanup::system_scheduled_cleanup(&mut self.world, &self.cleanup);
        maintenance::system_world_maintenance(&mut self.world, &self.maintenance);
    }

    /// Drain all pending outgoing events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.world.resource_mut::<OutgoingEvents>().events)
    }

    /// Return the current tick count.
    pub fn current_tick(&self) -> u64 {
        self.world.resource::<TickCounter>().0
    }

    /// The active tuning state.
    pub fn tune_state(&self) -> Arc<TuneState> {
        self.tune.clone()
    }

    /// Swap the tuning state; takes effect on the next tick.
    pub fn set_tune_state(&mut self, tune: Arc<TuneState>) {
        self.tune = tune;
    }

    /// Spawn a mob with its default goal list.
    /// Returns `(unique_id, runtime_id)`.
    pub fn spawn_mob(&mut self, type_id: &str) -> (i64, u64) {
        self.spawn_mob_with_goals(type_id, goals::default_goals(type_id))
    }

    /// Spawn a mob with an explicit goal list.
    pub fn spawn_mob_with_goals(
        &mut self,
        type_id: &str,
        goal_list: Vec<Box<dyn mobtune_ai::Goal>>,
    ) -> (i64, u64) {
        let unique_id = self.world.resource::<EntityIdAllocator>().allocate();
        let runtime_id = unique_id as u64;

        let mut set = GoalSet::new();
        {
            let alloc = self.world.resource::<GoalIdAllocator>();
            for goal in goal_list {
                set.add(goal, alloc);
            }
        }

        self.world.spawn((
            EntityId {
                unique_id,
                runtime_id,
            },
            MobType(type_id.to_string()),
            Mob,
            set,
        ));
        (unique_id, runtime_id)
    }

    fn find_mob(&mut self, runtime_id: u64) -> Option<Entity> {
        let mut q = self.world.query::<(Entity, &EntityId)>();
        q.iter(&self.world)
            .find(|(_, id)| id.runtime_id == runtime_id)
            .map(|(e, _)| e)
    }

    /// Goal kind identifiers of a mob, in set order.
    pub fn mob_goal_kinds(&mut self, runtime_id: u64) -> Option<Vec<String>> {
        let entity = self.find_mob(runtime_id)?;
        self.world.get::<GoalSet>(entity).map(|s| s.kinds())
    }

    /// Mark a mob dead; maintenance purges it later.
    pub fn mark_dead(&mut self, runtime_id: u64) -> bool {
        match self.find_mob(runtime_id) {
            Some(entity) => {
                self.world.entity_mut(entity).insert(Dead);
                true
            }
            None => false,
        }
    }

    /// Schedule a mob for expiry-based cleanup.
    pub fn schedule_mob_expiry(&mut self, runtime_id: u64, delay_ticks: u64) -> bool {
        match self.find_mob(runtime_id) {
            Some(entity) => {
                cleanup::schedule_expiry(&mut self.world, entity, delay_ticks, &self.cleanup);
                true
            }
            None => false,
        }
    }

    /// The tick an entity is scheduled to expire at, if any.
    pub fn mob_expire_at(&mut self, runtime_id: u64) -> Option<u64> {
        let entity = self.find_mob(runtime_id)?;
        self.world.get::<ExpireAt>(entity).map(|e| e.0)
    }

    /// `(mob count, total goal count)` across the world.
    pub fn population(&mut self) -> (usize, usize) {
        let mut q = self
            .world
            .query_filtered::<Option<&GoalSet>, With<Mob>>();
        let mut mobs = 0usize;
        let mut goals = 0usize;
        for set in q.iter(&self.world) {
            mobs += 1;
            goals += set.map(|s| s.len()).unwrap_or(0);
        }
        (mobs, goals)
    }
}
