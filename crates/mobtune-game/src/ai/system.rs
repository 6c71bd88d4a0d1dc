//! Goal tuning tick system — evaluates the rule chain and applies verdicts.

use std::panic::{catch_unwind, AssertUnwindSafe};

use bevy_ecs::prelude::*;
use tracing::warn;

use mobtune_ai::{GoalModifier, GoalVerdict, MobContext};

use crate::components::*;
use crate::game_world::{GameEvent, OutgoingEvents, TickCounter};

use super::goal_set::{GoalId, GoalIdAllocator, GoalSet};
use super::rules::TuneState;

/// Runs one tuning pass over every live mob with a goal set.
///
/// The pass snapshots each mob's goals, collects verdicts without mutating
/// anything, then applies them. A rule that panics is logged and treated
/// as "no change" for that goal; the rest of the pass continues. Verdicts
/// for a mob that died while evaluating are dropped.
pub fn system_goal_tune(world: &mut World, state: &TuneState) {
    if !state.enabled || state.chain.is_empty() {
        return;
    }

    let current_tick = world.resource::<TickCounter>().0;

    // Step 1: snapshot the mobs subject to tuning
    let mobs: Vec<(Entity, String)> = {
        let mut q = world
            .query_filtered::<(Entity, &MobType), (With<Mob>, With<GoalSet>, Without<Dead>)>();
        q.iter(world).map(|(e, t)| (e, t.0.clone())).collect()
    };

    for (entity, mob_type) in mobs {
        let ctx = MobContext {
            mob_type,
            current_tick,
        };

        // Step 2: evaluate the chain once per goal, collecting verdicts
        let verdicts: Vec<(GoalId, GoalVerdict)> = {
            let Some(set) = world.get::<GoalSet>(entity) else {
                continue;
            };
            let mut out = Vec::new();
            for entry in set.iter() {
                let result = catch_unwind(AssertUnwindSafe(|| {
                    state.chain.modify(&ctx, entry.goal.as_ref())
                }));
                match result {
                    Ok(GoalVerdict::Keep) => {}
                    Ok(verdict) => out.push((entry.id, verdict)),
                    Err(_) => {
                        warn!(
                            "goal rule panicked on {} goal {}; goal left untouched",
                            ctx.mob_type,
                            entry.goal.key()
                        );
                    }
                }
            }
            out
        };

        if verdicts.is_empty() {
            continue;
        }

        // Step 3: re-check liveness, then apply verdicts after iteration
        if world.get::<Dead>(entity).is_some() {
            continue;
        }
        let Some(runtime_id) = world.get::<EntityId>(entity).map(|e| e.runtime_id) else {
            continue;
        };

        // Fresh identities for replacements, allocated before the goal set
        // is borrowed mutably.
        let replacement_count = verdicts
            .iter()
            .filter(|(_, v)| matches!(v, GoalVerdict::Replace(_)))
            .count();
        let new_ids: Vec<GoalId> = {
            let alloc = world.resource::<GoalIdAllocator>();
            (0..replacement_count).map(|_| alloc.allocate()).collect()
        };
        let mut new_ids = new_ids.into_iter();

        let mut events = Vec::new();
        {
            let Some(mut set) = world.get_mut::<GoalSet>(entity) else {
                continue;
            };
            for (id, verdict) in verdicts {
                match verdict {
                    GoalVerdict::Keep => {}
                    GoalVerdict::Remove => {
                        if let Some(old) = set.remove(id) {
                            events.push(GameEvent::GoalRemoved {
                                runtime_id,
                                kind: old.key().to_string(),
                            });
                        }
                    }
                    GoalVerdict::Replace(goal) => {
                        let new_kind = goal.key().to_string();
                        // One id was reserved per replacement verdict.
                        let Some(new_id) = new_ids.next() else {
                            continue;
                        };
                        if let Some(old) = set.replace(id, new_id, goal) {
                            events.push(GameEvent::GoalReplaced {
                                runtime_id,
                                old_kind: old.key().to_string(),
                                new_kind,
                            });
                        }
                    }
                }
            }
        }

        world
            .resource_mut::<OutgoingEvents>()
            .events
            .extend(events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::rules::{build_state, TuneConfig};
    use crate::game_world::GameWorld;
    use mobtune_ai::{Goal, GoalRegistry};

    fn tuned(config: TuneConfig) -> GameWorld {
        let state = build_state(&config, &GoalRegistry::new()).unwrap();
        GameWorld::new(state)
    }

    #[test]
    fn removes_matching_goals_keeps_order() {
        let mut gw = tuned(TuneConfig {
            remove_kinds: vec!["minecraft:random_stroll".into()],
            ..Default::default()
        });
        // cow goals: float, panic, tempt, breed, water_avoiding_random_stroll,
        // look_at_player — the stroll subtype is removed by hierarchy match.
        let (_, rid) = gw.spawn_mob("minecraft:cow");
        gw.tick();

        let kinds = gw.mob_goal_kinds(rid).unwrap();
        assert_eq!(
            kinds,
            vec![
                "minecraft:float",
                "minecraft:panic",
                "minecraft:tempt",
                "minecraft:breed",
                "minecraft:look_at_player"
            ]
        );
    }

    #[test]
    fn stroll_panic_stroll_leaves_panic() {
        use crate::ai::goals::{PanicGoal, RandomStrollGoal};

        let mut gw = tuned(TuneConfig {
            remove_kinds: vec!["minecraft:random_stroll".into()],
            ..Default::default()
        });
        let (_, rid) = gw.spawn_mob_with_goals(
            "minecraft:cow",
            vec![
                Box::new(RandomStrollGoal::default()),
                Box::new(PanicGoal::default()),
                Box::new(RandomStrollGoal::default()),
            ],
        );
        gw.tick();

        assert_eq!(gw.mob_goal_kinds(rid).unwrap(), vec!["minecraft:panic"]);
    }

    #[test]
    fn emits_goal_removed_events() {
        let mut gw = tuned(TuneConfig {
            remove_kinds: vec!["minecraft:look_at_player".into()],
            ..Default::default()
        });
        let (_, rid) = gw.spawn_mob("minecraft:cow");
        gw.tick();

        let events = gw.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::GoalRemoved { runtime_id, kind }
                if *runtime_id == rid && kind == "minecraft:look_at_player"
        )));
    }

    #[test]
    fn disabled_state_changes_nothing() {
        let state = TuneState::disabled();
        let mut gw = GameWorld::new(state);
        let (_, rid) = gw.spawn_mob("minecraft:cow");
        let before = gw.mob_goal_kinds(rid).unwrap();
        gw.tick();
        assert_eq!(gw.mob_goal_kinds(rid).unwrap(), before);
    }

    #[test]
    fn dead_mob_is_skipped() {
        let mut gw = tuned(TuneConfig {
            remove_kinds: vec!["minecraft:random_stroll".into()],
            ..Default::default()
        });
        let (_, rid) = gw.spawn_mob("minecraft:cow");
        let before = gw.mob_goal_kinds(rid).unwrap();
        gw.mark_dead(rid);
        gw.tick();
        assert_eq!(gw.mob_goal_kinds(rid).unwrap(), before);
    }

    #[test]
    fn panicking_rule_leaves_goal_and_pass_continues() {
        struct Bomb;
        impl GoalModifier for Bomb {
            fn modify(&self, _mob: &MobContext, goal: &dyn Goal) -> GoalVerdict {
                if goal.key().to_string() == "minecraft:panic" {
                    panic!("rule bug");
                }
                GoalVerdict::Keep
            }
        }

        let mut chain = mobtune_ai::GoalChain::new();
        chain.push(Bomb);
        chain.push(mobtune_ai::RemoveIf::new(mobtune_ai::KindFilter::exact(
            mobtune_ai::GoalKey::parse("minecraft:tempt").unwrap(),
        )));
        let state = TuneState {
            enabled: true,
            chain,
        };

        let mut gw = GameWorld::new(state);
        let (_, rid) = gw.spawn_mob("minecraft:cow");
        gw.tick();

        let kinds = gw.mob_goal_kinds(rid).unwrap();
        // The panicking rule fired on the panic goal, which is kept; the
        // tempt goal is still removed by the healthy rule later in the pass.
        assert!(kinds.contains(&"minecraft:panic".to_string()));
        assert!(!kinds.contains(&"minecraft:tempt".to_string()));
    }

    #[test]
    fn single_remover_only_hits_first_match() {
        // A modifier that removes only the first goal it ever sees.
        use std::sync::atomic::{AtomicBool, Ordering};
        struct OneShot {
            fired: AtomicBool,
        }
        impl GoalModifier for OneShot {
            fn modify(&self, _mob: &MobContext, _goal: &dyn Goal) -> GoalVerdict {
                if self.fired.swap(true, Ordering::Relaxed) {
                    GoalVerdict::Keep
                } else {
                    GoalVerdict::Remove
                }
            }
        }

        let mut chain = mobtune_ai::GoalChain::new();
        chain.push(OneShot {
            fired: AtomicBool::new(false),
        });
        let mut gw = GameWorld::new(TuneState {
            enabled: true,
            chain,
        });
        let (_, rid) = gw.spawn_mob("minecraft:cow");
        let before = gw.mob_goal_kinds(rid).unwrap();
        gw.tick();

        let after = gw.mob_goal_kinds(rid).unwrap();
        assert_eq!(after, before[1..].to_vec());
    }
}
