//! Periodic world-state maintenance.

use bevy_ecs::prelude::*;
use tracing::debug;

use crate::ai::goal_set::GoalSet;
use crate::components::*;
use crate::game_world::{GameEvent, OutgoingEvents, TickCounter};

/// Configuration for the maintenance pass.
pub struct MaintenanceConfig {
    /// Ticks between maintenance passes.
    pub maintenance_interval: u64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            maintenance_interval: 600, // every 30 seconds
        }
    }
}

/// Periodic housekeeping: purge dead entities, drop empty goal sets, and
/// log a population summary.
pub fn system_world_maintenance(world: &mut World, config: &MaintenanceConfig) {
    let tick = world.resource::<TickCounter>().0;
    if !tick.is_multiple_of(config.maintenance_interval) || tick == 0 {
        return;
    }

    // Purge entities marked dead since the last pass.
    let dead: Vec<(Entity, i64)> = {
        let mut q = world.query_filtered::<(Entity, &EntityId), With<Dead>>();
        q.iter(world).map(|(e, id)| (e, id.unique_id)).collect()
    };
    let purged = dead.len();
    for (entity, unique_id) in dead {
        world.despawn(entity);
        world
            .resource_mut::<OutgoingEvents>()
            .events
            .push(GameEvent::EntityRemoved { unique_id });
    }

    // A mob whose goals were all removed no longer needs a goal set; the
    // tuning pass stops visiting it once the component is gone.
    let empty: Vec<Entity> = {
        let mut q = world.query::<(Entity, &GoalSet)>();
        q.iter(world)
            .filter(|(_, set)| set.is_empty())
            .map(|(e, _)| e)
            .collect()
    };
    let dropped = empty.len();
    for entity in empty {
        world.entity_mut(entity).remove::<GoalSet>();
    }

    let (mobs, goals) = {
        let mut q = world.query_filtered::<Option<&GoalSet>, With<Mob>>();
        let mut mobs = 0usize;
        let mut goals = 0usize;
        for set in q.iter(world) {
            mobs += 1;
            goals += set.map(|s| s.len()).unwrap_or(0);
        }
        (mobs, goals)
    };

    debug!(
        "maintenance at tick {tick}: {mobs} mobs, {goals} goals, \
         purged {purged} dead, dropped {dropped} empty goal sets"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::rules::{build_state, TuneConfig, TuneState};
    use crate::cleanup::CleanupConfig;
    use crate::game_world::GameWorld;
    use mobtune_ai::GoalRegistry;

    fn world_with_interval(interval: u64) -> GameWorld {
        GameWorld::with_configs(
            TuneState::disabled(),
            CleanupConfig::default(),
            MaintenanceConfig {
                maintenance_interval: interval,
            },
        )
    }

    #[test]
    fn dead_mob_purged_on_interval() {
        let mut gw = world_with_interval(10);
        let (_, rid) = gw.spawn_mob("minecraft:cow");
        gw.mark_dead(rid);

        for _ in 0..9 {
            gw.tick();
        }
        assert!(gw.mob_goal_kinds(rid).is_some());

        gw.tick();
        assert!(gw.mob_goal_kinds(rid).is_none());

        let events = gw.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::EntityRemoved { .. })));
    }

    #[test]
    fn emptied_goal_set_dropped() {
        // Remove every goal a cow has, then let maintenance drop the set.
        let state = build_state(
            &TuneConfig {
                remove_name_fragments: vec!["Goal".into()],
                ..Default::default()
            },
            &GoalRegistry::new(),
        )
        .unwrap();
        let mut gw = GameWorld::with_configs(
            state,
            CleanupConfig::default(),
            MaintenanceConfig {
                maintenance_interval: 5,
            },
        );
        let (_, rid) = gw.spawn_mob("minecraft:cow");

        gw.tick();
        assert_eq!(gw.mob_goal_kinds(rid).unwrap().len(), 0);

        for _ in 0..4 {
            gw.tick();
        }
        // The component is gone entirely now.
        assert!(gw.mob_goal_kinds(rid).is_none());
        // But the mob itself is still alive.
        assert_eq!(gw.population().0, 1);
    }

    #[test]
    fn live_mobs_untouched() {
        let mut gw = world_with_interval(5);
        gw.spawn_mob("minecraft:cow");
        gw.spawn_mob("minecraft:zombie");
        for _ in 0..20 {
            gw.tick();
        }
        assert_eq!(gw.population().0, 2);
    }
}
