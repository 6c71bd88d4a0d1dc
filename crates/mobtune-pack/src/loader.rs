//! Goal pack loader — scans a pack directory and loads all definitions.

use std::path::Path;

use tracing::{info, warn};

use mobtune_ai::{GoalDefinition, GoalRegistry};

use crate::definition::{GoalFile, PackError};

/// Load every goal definition under `<pack>/goals/*.json`.
///
/// A file that fails to parse or validate is logged and skipped; one bad
/// definition must not take the rest of the pack down. A missing `goals/`
/// directory yields an empty list. Only reading the directory itself can
/// fail.
pub fn load_definitions(pack_dir: &Path) -> Result<Vec<GoalDefinition>, PackError> {
    let goals_dir = pack_dir.join("goals");
    if !goals_dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(&goals_dir).map_err(|source| PackError::Io {
        path: goals_dir.display().to_string(),
        source,
    })?;

    let mut defs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let json = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to read {}: {e}", path.display());
                continue;
            }
        };
        match GoalFile::parse_json(&json).and_then(|f| f.extract()) {
            Ok(def) => defs.push(def),
            Err(e) => warn!("Skipping {}: {e}", path.display()),
        }
    }

    info!(
        "Loaded goal pack '{}' ({} definitions)",
        pack_dir.display(),
        defs.len()
    );
    Ok(defs)
}

/// Load a pack and merge its definitions into the registry.
/// Returns the number of definitions registered.
pub fn load_into(pack_dir: &Path, registry: &mut GoalRegistry) -> Result<usize, PackError> {
    let defs = load_definitions(pack_dir)?;
    let count = defs.len();
    for def in defs {
        registry.register(def);
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use mobtune_ai::GoalKey;

    fn temp_pack() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mobtune_pack_{}", rand::random::<u64>()));
        std::fs::create_dir_all(dir.join("goals")).unwrap();
        dir
    }

    #[test]
    fn missing_goals_dir_is_empty() {
        let dir = std::env::temp_dir().join(format!("mobtune_pack_{}", rand::random::<u64>()));
        std::fs::create_dir_all(&dir).unwrap();
        assert!(load_definitions(&dir).unwrap().is_empty());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn loads_valid_and_skips_invalid() {
        let dir = temp_pack();
        std::fs::write(
            dir.join("goals/guard_post.json"),
            r#"{
                "format_version": "1.0.0",
                "mobtune:goal": {
                    "description": { "identifier": "mobtune:guard_post" },
                    "parent": "minecraft:random_stroll"
                }
            }"#,
        )
        .unwrap();
        std::fs::write(dir.join("goals/broken.json"), "{ not json").unwrap();
        std::fs::write(dir.join("goals/notes.txt"), "ignored").unwrap();

        let defs = load_definitions(&dir).unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].key.to_string(), "mobtune:guard_post");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_into_registers_hierarchy() {
        let dir = temp_pack();
        std::fs::write(
            dir.join("goals/patrol.json"),
            r#"{
                "format_version": "1.0.0",
                "mobtune:goal": {
                    "description": { "identifier": "mobtune:patrol" },
                    "parent": "minecraft:random_stroll"
                }
            }"#,
        )
        .unwrap();

        let mut registry = GoalRegistry::new();
        let n = load_into(&dir, &mut registry).unwrap();
        assert_eq!(n, 1);
        assert!(registry.is_descendant(
            &GoalKey::parse("mobtune:patrol").unwrap(),
            &GoalKey::parse("minecraft:random_stroll").unwrap()
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
