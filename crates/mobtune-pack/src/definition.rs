//! Goal definition JSON parsing (goals/*.json).

use serde::Deserialize;
use thiserror::Error;

use mobtune_ai::{GoalDefinition, GoalKey, KeyError};

#[derive(Debug, Error)]
pub enum PackError {
    #[error("read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid goal JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bad goal key: {0}")]
    BadKey(#[from] KeyError),
}

/// Raw goal definition file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct GoalFile {
    pub format_version: String,
    #[serde(rename = "mobtune:goal")]
    pub goal: GoalBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoalBody {
    pub description: GoalDescription,
    /// Parent kind identifier, for hierarchy matching.
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoalDescription {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl GoalFile {
    /// Parse from a JSON string.
    pub fn parse_json(json: &str) -> Result<Self, PackError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate identifiers and produce a registry definition.
    pub fn extract(&self) -> Result<GoalDefinition, PackError> {
        let key = GoalKey::parse(&self.goal.description.identifier)?;
        let parent = match &self.goal.parent {
            Some(p) => Some(GoalKey::parse(p)?),
            None => None,
        };
        let display_name = self
            .goal
            .description
            .display_name
            .clone()
            .unwrap_or_else(|| key.path().to_string());
        Ok(GoalDefinition {
            key,
            display_name,
            parent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_goal() {
        let json = r#"{
            "format_version": "1.0.0",
            "mobtune:goal": {
                "description": {
                    "identifier": "mobtune:guard_post",
                    "display_name": "Guard Post"
                },
                "parent": "minecraft:random_stroll"
            }
        }"#;
        let file = GoalFile::parse_json(json).unwrap();
        assert_eq!(file.format_version, "1.0.0");
        let def = file.extract().unwrap();
        assert_eq!(def.key.to_string(), "mobtune:guard_post");
        assert_eq!(def.display_name, "Guard Post");
        assert_eq!(def.parent.unwrap().to_string(), "minecraft:random_stroll");
    }

    #[test]
    fn parse_goal_defaults() {
        let json = r#"{
            "format_version": "1.0.0",
            "mobtune:goal": {
                "description": { "identifier": "mobtune:patrol" }
            }
        }"#;
        let def = GoalFile::parse_json(json).unwrap().extract().unwrap();
        assert_eq!(def.display_name, "patrol");
        assert!(def.parent.is_none());
    }

    #[test]
    fn extract_rejects_bad_identifier() {
        let json = r#"{
            "format_version": "1.0.0",
            "mobtune:goal": {
                "description": { "identifier": "no-namespace" }
            }
        }"#;
        let file = GoalFile::parse_json(json).unwrap();
        assert!(matches!(file.extract(), Err(PackError::BadKey(_))));
    }

    #[test]
    fn parse_rejects_missing_envelope() {
        let json = r#"{ "format_version": "1.0.0" }"#;
        assert!(matches!(
            GoalFile::parse_json(json),
            Err(PackError::Json(_))
        ));
    }
}
