//! Goal kind definitions.
//!
//! Provides a registry of known goal kinds with their parent links.
//! Supports both vanilla goals (hardcoded) and custom goals from definition
//! packs. Parent links form the kind hierarchy that hierarchy filters match
//! against, replacing runtime type inspection.

use std::collections::HashSet;

use crate::key::GoalKey;

/// Definition of a goal kind.
#[derive(Debug, Clone)]
pub struct GoalDefinition {
    /// Identifier, e.g. `minecraft:random_stroll`.
    pub key: GoalKey,
    /// Display name, e.g. `"Random Stroll"`.
    pub display_name: String,
    /// Parent kind, if this kind specializes another.
    pub parent: Option<GoalKey>,
}

/// Registry of supported goal kinds.
pub struct GoalRegistry {
    goals: Vec<GoalDefinition>,
}

impl Default for GoalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn key(s: &str) -> GoalKey {
    // Builtin identifiers are compile-time constants; a parse failure here
    // is a programming error, so tests cover every builtin.
    GoalKey::parse(s).unwrap_or_else(|e| panic!("builtin goal key: {e}"))
}

impl GoalRegistry {
    /// Build the registry with all known vanilla goal kinds.
    pub fn new() -> Self {
        let def = |k: &str, name: &str, parent: Option<&str>| GoalDefinition {
            key: key(k),
            display_name: name.into(),
            parent: parent.map(key),
        };
        Self {
            goals: vec![
                def("minecraft:float", "Float", None),
                def("minecraft:panic", "Panic", None),
                def("minecraft:random_stroll", "Random Stroll", None),
                def(
                    "minecraft:water_avoiding_random_stroll",
                    "Water Avoiding Random Stroll",
                    Some("minecraft:random_stroll"),
                ),
                def(
                    "minecraft:random_swim",
                    "Random Swim",
                    Some("minecraft:random_stroll"),
                ),
                def("minecraft:look_at_player", "Look At Player", None),
                def("minecraft:random_look_around", "Random Look Around", None),
                def("minecraft:melee_attack", "Melee Attack", None),
                def("minecraft:target", "Target", None),
                def(
                    "minecraft:hurt_by_target",
                    "Hurt By Target",
                    Some("minecraft:target"),
                ),
                def(
                    "minecraft:nearest_attackable_target",
                    "Nearest Attackable Target",
                    Some("minecraft:target"),
                ),
                def("minecraft:tempt", "Tempt", None),
                def("minecraft:breed", "Breed", None),
            ],
        }
    }

    /// Look up a goal definition by its identifier.
    pub fn get(&self, k: &GoalKey) -> Option<&GoalDefinition> {
        self.goals.iter().find(|g| &g.key == k)
    }

    /// Whether a kind is registered.
    pub fn contains(&self, k: &GoalKey) -> bool {
        self.get(k).is_some()
    }

    /// All known goal definitions.
    pub fn all(&self) -> &[GoalDefinition] {
        &self.goals
    }

    /// Register a custom goal kind (e.g. from a definition pack).
    /// A re-registration of an existing key replaces the old definition.
    pub fn register(&mut self, def: GoalDefinition) {
        if let Some(existing) = self.goals.iter_mut().find(|g| g.key == def.key) {
            *existing = def;
        } else {
            self.goals.push(def);
        }
    }

    /// Walk the parent chain of a kind, nearest parent first.
    /// Stops on unregistered parents and on cycles.
    pub fn ancestors(&self, k: &GoalKey) -> Vec<GoalKey> {
        let mut out = Vec::new();
        let mut seen: HashSet<&GoalKey> = HashSet::new();
        let mut current = self.get(k);
        while let Some(def) = current {
            if !seen.insert(&def.key) {
                break;
            }
            match &def.parent {
                Some(parent) => {
                    out.push(parent.clone());
                    current = self.get(parent);
                }
                None => break,
            }
        }
        out
    }

    /// Whether `child` is `ancestor` itself or a transitive specialization
    /// of it.
    pub fn is_descendant(&self, child: &GoalKey, ancestor: &GoalKey) -> bool {
        child == ancestor || self.ancestors(child).contains(ancestor)
    }

    /// The set containing `root` and every registered kind that descends
    /// from it.
    pub fn descendants(&self, root: &GoalKey) -> HashSet<GoalKey> {
        self.goals
            .iter()
            .filter(|g| self.is_descendant(&g.key, root))
            .map(|g| g.key.clone())
            .chain(std::iter::once(root.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_keys_parse() {
        // `key()` panics on a malformed builtin; constructing is the test.
        let reg = GoalRegistry::new();
        assert!(reg.all().len() >= 13);
    }

    #[test]
    fn get_known_kind() {
        let reg = GoalRegistry::new();
        let k = key("minecraft:panic");
        assert_eq!(reg.get(&k).unwrap().display_name, "Panic");
    }

    #[test]
    fn get_unknown_none() {
        let reg = GoalRegistry::new();
        assert!(reg.get(&key("minecraft:levitate")).is_none());
    }

    #[test]
    fn ancestors_walk_parent_chain() {
        let reg = GoalRegistry::new();
        let anc = reg.ancestors(&key("minecraft:water_avoiding_random_stroll"));
        assert_eq!(anc, vec![key("minecraft:random_stroll")]);
    }

    #[test]
    fn is_descendant_includes_self() {
        let reg = GoalRegistry::new();
        let k = key("minecraft:random_stroll");
        assert!(reg.is_descendant(&k, &k));
    }

    #[test]
    fn descendants_of_stroll() {
        let reg = GoalRegistry::new();
        let set = reg.descendants(&key("minecraft:random_stroll"));
        assert!(set.contains(&key("minecraft:random_stroll")));
        assert!(set.contains(&key("minecraft:water_avoiding_random_stroll")));
        assert!(set.contains(&key("minecraft:random_swim")));
        assert!(!set.contains(&key("minecraft:panic")));
    }

    #[test]
    fn register_custom_kind() {
        let mut reg = GoalRegistry::new();
        reg.register(GoalDefinition {
            key: key("mobtune:guard_post"),
            display_name: "Guard Post".into(),
            parent: Some(key("minecraft:random_stroll")),
        });
        assert!(reg.is_descendant(
            &key("mobtune:guard_post"),
            &key("minecraft:random_stroll")
        ));
    }

    #[test]
    fn register_replaces_existing() {
        let mut reg = GoalRegistry::new();
        let n = reg.all().len();
        reg.register(GoalDefinition {
            key: key("minecraft:panic"),
            display_name: "Panic (tuned)".into(),
            parent: None,
        });
        assert_eq!(reg.all().len(), n);
        assert_eq!(
            reg.get(&key("minecraft:panic")).unwrap().display_name,
            "Panic (tuned)"
        );
    }

    #[test]
    fn ancestors_tolerate_cycle() {
        let mut reg = GoalRegistry::new();
        reg.register(GoalDefinition {
            key: key("mobtune:a"),
            display_name: "A".into(),
            parent: Some(key("mobtune:b")),
        });
        reg.register(GoalDefinition {
            key: key("mobtune:b"),
            display_name: "B".into(),
            parent: Some(key("mobtune:a")),
        });
        // Must terminate and include both sides of the loop once.
        let anc = reg.ancestors(&key("mobtune:a"));
        assert!(anc.contains(&key("mobtune:b")));
    }
}
