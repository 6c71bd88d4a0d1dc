//! Scheduled entity cleanup.
//!
//! Entities tagged with [`ExpireAt`] are removed by a periodic sweep.
//! Expiry ticks carry random jitter so a batch scheduled together does not
//! despawn in one spike.

use bevy_ecs::prelude::*;
use rand::Rng;
use tracing::debug;

use crate::components::*;
use crate::game_world::{GameEvent, OutgoingEvents, TickCounter};

/// Configuration for the cleanup sweep.
pub struct CleanupConfig {
    /// Ticks between expiry sweeps.
    pub sweep_interval: u64,
    /// Fraction of an expiry delay applied as ± jitter.
    pub expiry_jitter: f32,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            sweep_interval: 100, // every 5 seconds
            expiry_jitter: 0.1,
        }
    }
}

/// Tag a live entity for removal roughly `delay_ticks` from now.
pub fn schedule_expiry(
    world: &mut World,
    entity: Entity,
    delay_ticks: u64,
    config: &CleanupConfig,
) {
    let tick = world.resource::<TickCounter>().0;
    let spread = (delay_ticks as f32 * config.expiry_jitter) as i64;
    let offset = if spread > 0 {
        rand::thread_rng().gen_range(-spread..=spread)
    } else {
        0
    };
    let expire_at = (tick + delay_ticks).saturating_add_signed(offset);
    world.entity_mut(entity).insert(ExpireAt(expire_at));
}

/// Periodically despawn entities whose expiry tick has passed.
pub fn system_scheduled_cleanup(world: &mut World, config: &CleanupConfig) {
    let tick = world.resource::<TickCounter>().0;
    if !tick.is_multiple_of(config.sweep_interval) || tick == 0 {
        return;
    }

    let expired: Vec<(Entity, i64, u64)> = {
        let mut q = world.query::<(Entity, &EntityId, &ExpireAt)>();
        q.iter(world)
            .filter(|(_, _, exp)| exp.0 <= tick)
            .map(|(e, id, _)| (e, id.unique_id, id.runtime_id))
            .collect()
    };

    if expired.is_empty() {
        return;
    }

    let count = expired.len();
    for (entity, unique_id, runtime_id) in expired {
        world.despawn(entity);
        world
            .resource_mut::<OutgoingEvents>()
            .events
            .push(GameEvent::EntityExpired {
                unique_id,
                runtime_id,
            });
    }
    debug!("cleanup sweep at tick {tick}: removed {count} expired entities");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::rules::TuneState;
    use crate::game_world::GameWorld;

    fn world_with_sweep(sweep_interval: u64, expiry_jitter: f32) -> GameWorld {
        GameWorld::with_configs(
            TuneState::disabled(),
            CleanupConfig {
                sweep_interval,
                expiry_jitter,
            },
            Default::default(),
        )
    }

    #[test]
    fn expired_entity_removed_on_sweep_tick() {
        let mut gw = world_with_sweep(10, 0.0);
        let (_, rid) = gw.spawn_mob("minecraft:cow");
        gw.schedule_mob_expiry(rid, 5);

        // Ticks 1..=9: no sweep yet even though the entity is expired.
        for _ in 0..9 {
            gw.tick();
        }
        assert!(gw.mob_goal_kinds(rid).is_some());

        // Tick 10 sweeps.
        gw.tick();
        assert!(gw.mob_goal_kinds(rid).is_none());

        let events = gw.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::EntityExpired { runtime_id, .. } if *runtime_id == rid)));
    }

    #[test]
    fn unexpired_entity_survives_sweep() {
        let mut gw = world_with_sweep(10, 0.0);
        let (_, rid) = gw.spawn_mob("minecraft:cow");
        gw.schedule_mob_expiry(rid, 1000);

        for _ in 0..20 {
            gw.tick();
        }
        assert!(gw.mob_goal_kinds(rid).is_some());
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let mut gw = world_with_sweep(10, 0.2);
        let delay = 100u64;
        let spread = 20u64;
        for _ in 0..50 {
            let (_, rid) = gw.spawn_mob("minecraft:cow");
            gw.schedule_mob_expiry(rid, delay);
            let expire_at = gw.mob_expire_at(rid).unwrap();
            let tick = gw.current_tick();
            assert!(expire_at >= tick + delay - spread);
            assert!(expire_at <= tick + delay + spread);
        }
    }

    #[test]
    fn zero_jitter_is_exact() {
        let mut gw = world_with_sweep(10, 0.0);
        let (_, rid) = gw.spawn_mob("minecraft:cow");
        gw.schedule_mob_expiry(rid, 42);
        assert_eq!(gw.mob_expire_at(rid).unwrap(), gw.current_tick() + 42);
    }
}
