//! Rule-construction errors.
//!
//! Everything here is produced while rules are being built or reloaded.
//! Once a filter or modifier exists it does not fail; tick-time faults are
//! handled at the orchestrator boundary instead.

use thiserror::Error;

use crate::key::GoalKey;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("missing ':' separator in goal key {0:?}")]
    MissingSeparator(String),

    #[error("empty namespace in goal key {0:?}")]
    EmptyNamespace(String),

    #[error("empty path in goal key {0:?}")]
    EmptyPath(String),

    #[error("invalid character {ch:?} in goal key {key:?}")]
    InvalidCharacter { key: String, ch: char },
}

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("name filter pattern is empty")]
    EmptyPattern,

    #[error("goal kind {0} is not registered")]
    UnknownGoalKind(GoalKey),

    #[error("bad goal key: {0}")]
    BadKey(#[from] KeyError),
}
