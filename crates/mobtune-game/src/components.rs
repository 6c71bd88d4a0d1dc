//! ECS components for mobs subject to tuning.

use bevy_ecs::prelude::*;

/// Identity for an entity.
#[derive(Component, Debug, Clone)]
pub struct EntityId {
    pub unique_id: i64,
    pub runtime_id: u64,
}

/// The mob type identifier string, e.g. `"minecraft:zombie"`.
#[derive(Component, Debug, Clone)]
pub struct MobType(pub String);

/// Marker: this entity is a mob.
#[derive(Component, Debug)]
pub struct Mob;

/// Marker: this entity is dead (pending cleanup).
#[derive(Component, Debug)]
pub struct Dead;

/// Tick at which this entity is removed by the cleanup sweep.
#[derive(Component, Debug, Clone, Copy)]
pub struct ExpireAt(pub u64);
