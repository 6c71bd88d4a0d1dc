//! Namespaced goal-kind identifiers, e.g. `"minecraft:random_stroll"`.

use std::fmt;
use std::str::FromStr;

use crate::error::KeyError;

/// A `namespace:path` identifier naming a goal kind.
///
/// Keys follow the Bedrock identifier convention: lowercase ASCII letters,
/// digits, `_`, `.` and `-` on both sides of a single `:`. Parsing rejects
/// anything else so that a typo in a config file surfaces at load time,
/// not during a tick pass.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GoalKey {
    namespace: String,
    path: String,
}

impl GoalKey {
    /// Parse a `namespace:path` string.
    pub fn parse(s: &str) -> Result<Self, KeyError> {
        let (namespace, path) = s
            .split_once(':')
            .ok_or_else(|| KeyError::MissingSeparator(s.to_string()))?;
        if namespace.is_empty() {
            return Err(KeyError::EmptyNamespace(s.to_string()));
        }
        if path.is_empty() {
            return Err(KeyError::EmptyPath(s.to_string()));
        }
        for part in [namespace, path] {
            if let Some(ch) = part
                .chars()
                .find(|c| !matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-'))
            {
                return Err(KeyError::InvalidCharacter {
                    key: s.to_string(),
                    ch,
                });
            }
        }
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl FromStr for GoalKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GoalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl fmt::Debug for GoalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GoalKey({}:{})", self.namespace, self.path)
    }
}
