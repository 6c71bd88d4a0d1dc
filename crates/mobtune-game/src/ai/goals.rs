//! Goal implementations attached to mobs.
//!
//! The tuning layer never runs these; it only needs their identity. The
//! parameters mirror what the host simulation reads when executing them.

use std::sync::OnceLock;

use mobtune_ai::{Goal, GoalKey};

fn builtin(cell: &'static OnceLock<GoalKey>, id: &'static str) -> &'static GoalKey {
    cell.get_or_init(|| GoalKey::parse(id).unwrap_or_else(|e| panic!("builtin goal key: {e}")))
}

// ---------------------------------------------------------------------------
// Float — swim up when submerged
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FloatGoal;

impl Goal for FloatGoal {
    fn key(&self) -> &GoalKey {
        static KEY: OnceLock<GoalKey> = OnceLock::new();
        builtin(&KEY, "minecraft:float")
    }

    fn name(&self) -> &str {
        "FloatGoal"
    }
}

// ---------------------------------------------------------------------------
// Panic — flee after taking damage
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct PanicGoal {
    pub speed_multiplier: f32,
}

impl Default for PanicGoal {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.25,
        }
    }
}

impl Goal for PanicGoal {
    fn key(&self) -> &GoalKey {
        static KEY: OnceLock<GoalKey> = OnceLock::new();
        builtin(&KEY, "minecraft:panic")
    }

    fn name(&self) -> &str {
        "PanicGoal"
    }
}

// ---------------------------------------------------------------------------
// Random stroll family
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct RandomStrollGoal {
    /// Maximum wander distance from the current position (blocks).
    pub range: f32,
}

impl Default for RandomStrollGoal {
    fn default() -> Self {
        Self { range: 10.0 }
    }
}

impl Goal for RandomStrollGoal {
    fn key(&self) -> &GoalKey {
        static KEY: OnceLock<GoalKey> = OnceLock::new();
        builtin(&KEY, "minecraft:random_stroll")
    }

    fn name(&self) -> &str {
        "RandomStrollGoal"
    }
}

/// Stroll variant that keeps land mobs out of water.
#[derive(Debug)]
pub struct WaterAvoidingRandomStrollGoal {
    pub range: f32,
}

impl Default for WaterAvoidingRandomStrollGoal {
    fn default() -> Self {
        Self { range: 10.0 }
    }
}

impl Goal for WaterAvoidingRandomStrollGoal {
    fn key(&self) -> &GoalKey {
        static KEY: OnceLock<GoalKey> = OnceLock::new();
        builtin(&KEY, "minecraft:water_avoiding_random_stroll")
    }

    fn name(&self) -> &str {
        "WaterAvoidingRandomStrollGoal"
    }
}

// ---------------------------------------------------------------------------
// Look / idle goals
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct LookAtPlayerGoal {
    pub range: f32,
}

impl Default for LookAtPlayerGoal {
    fn default() -> Self {
        Self { range: 8.0 }
    }
}

impl Goal for LookAtPlayerGoal {
    fn key(&self) -> &GoalKey {
        static KEY: OnceLock<GoalKey> = OnceLock::new();
        builtin(&KEY, "minecraft:look_at_player")
    }

    fn name(&self) -> &str {
        "LookAtPlayerGoal"
    }
}

#[derive(Debug, Default)]
pub struct RandomLookAroundGoal;

impl Goal for RandomLookAroundGoal {
    fn key(&self) -> &GoalKey {
        static KEY: OnceLock<GoalKey> = OnceLock::new();
        builtin(&KEY, "minecraft:random_look_around")
    }

    fn name(&self) -> &str {
        "RandomLookAroundGoal"
    }
}

// ---------------------------------------------------------------------------
// Combat goals
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct MeleeAttackGoal {
    pub cooldown_ticks: u64,
}

impl Default for MeleeAttackGoal {
    fn default() -> Self {
        Self { cooldown_ticks: 20 }
    }
}

impl Goal for MeleeAttackGoal {
    fn key(&self) -> &GoalKey {
        static KEY: OnceLock<GoalKey> = OnceLock::new();
        builtin(&KEY, "minecraft:melee_attack")
    }

    fn name(&self) -> &str {
        "MeleeAttackGoal"
    }
}

#[derive(Debug, Default)]
pub struct HurtByTargetGoal;

impl Goal for HurtByTargetGoal {
    fn key(&self) -> &GoalKey {
        static KEY: OnceLock<GoalKey> = OnceLock::new();
        builtin(&KEY, "minecraft:hurt_by_target")
    }

    fn name(&self) -> &str {
        "HurtByTargetGoal"
    }
}

#[derive(Debug)]
pub struct NearestAttackableTargetGoal {
    pub range: f32,
}

impl Default for NearestAttackableTargetGoal {
    fn default() -> Self {
        Self { range: 16.0 }
    }
}

impl Goal for NearestAttackableTargetGoal {
    fn key(&self) -> &GoalKey {
        static KEY: OnceLock<GoalKey> = OnceLock::new();
        builtin(&KEY, "minecraft:nearest_attackable_target")
    }

    fn name(&self) -> &str {
        "NearestAttackableTargetGoal"
    }
}

// ---------------------------------------------------------------------------
// Breeding goals
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TemptGoal;

impl Goal for TemptGoal {
    fn key(&self) -> &GoalKey {
        static KEY: OnceLock<GoalKey> = OnceLock::new();
        builtin(&KEY, "minecraft:tempt")
    }

    fn name(&self) -> &str {
        "TemptGoal"
    }
}

#[derive(Debug, Default)]
pub struct BreedGoal;

impl Goal for BreedGoal {
    fn key(&self) -> &GoalKey {
        static KEY: OnceLock<GoalKey> = OnceLock::new();
        builtin(&KEY, "minecraft:breed")
    }

    fn name(&self) -> &str {
        "BreedGoal"
    }
}

/// Create the default goal list for a given mob type.
pub fn default_goals(type_id: &str) -> Vec<Box<dyn Goal>> {
    match type_id {
        "minecraft:zombie" | "minecraft:skeleton" => vec![
            Box::new(FloatGoal),
            Box::new(HurtByTargetGoal),
            Box::new(NearestAttackableTargetGoal::default()),
            Box::new(MeleeAttackGoal::default()),
            Box::new(WaterAvoidingRandomStrollGoal::default()),
            Box::new(LookAtPlayerGoal::default()),
        ],
        "minecraft:cow" | "minecraft:pig" | "minecraft:chicken" => vec![
            Box::new(FloatGoal),
            Box::new(PanicGoal::default()),
            Box::new(TemptGoal),
            Box::new(BreedGoal),
            Box::new(WaterAvoidingRandomStrollGoal::default()),
            Box::new(LookAtPlayerGoal::default()),
        ],
        _ => vec![
            Box::new(RandomStrollGoal::default()),
            Box::new(RandomLookAroundGoal),
        ],
    }
}
