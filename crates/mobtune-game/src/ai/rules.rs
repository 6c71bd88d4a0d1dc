//! Builds the goal modifier chain from tuning configuration.
//!
//! Rule construction is the fail-fast boundary: a malformed key or an
//! unknown goal kind errors here, at startup or reload, so the tick pass
//! only ever sees a valid chain.

use std::sync::Arc;

use thiserror::Error;

use mobtune_ai::filter::and;
use mobtune_ai::{
    FilterError, GoalChain, GoalFilter, GoalFilterExt, GoalKey, GoalRegistry, KeyError, KindFilter,
    NameFilter, RemoveIf,
};

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("bad goal key in tuning config: {0}")]
    BadKey(#[from] KeyError),

    #[error("bad filter in tuning config: {0}")]
    BadFilter(#[from] FilterError),
}

/// Which goal rewrites are active.
///
/// Mirrors the `[tuning]` section of the server config; plain data so the
/// server crate can map TOML onto it and tests can build it directly.
#[derive(Debug, Clone)]
pub struct TuneConfig {
    pub enabled: bool,
    /// Goal kinds removed from every mob, including registered subtypes.
    pub remove_kinds: Vec<String>,
    /// Goal kinds shielded from all removal rules, including subtypes.
    pub protect_kinds: Vec<String>,
    /// Type-name fragments removed — the fallback for goals whose kind is
    /// not registered.
    pub remove_name_fragments: Vec<String>,
}

impl Default for TuneConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            remove_kinds: Vec::new(),
            protect_kinds: Vec::new(),
            remove_name_fragments: Vec::new(),
        }
    }
}

/// The cached per-pass tuning state: flags plus the built chain.
///
/// Built once at startup and rebuilt on explicit reload; the tick pass
/// only reads it.
pub struct TuneState {
    pub enabled: bool,
    pub chain: GoalChain,
}

impl TuneState {
    /// A state that leaves every goal set untouched.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            chain: GoalChain::new(),
        }
    }
}

/// Build the tuning state from config against the loaded registry.
pub fn build_state(config: &TuneConfig, registry: &GoalRegistry) -> Result<TuneState, RuleError> {
    let mut chain = GoalChain::new();

    // Protection filters veto every removal rule in the chain.
    let mut veto: Option<Arc<dyn GoalFilter>> = None;
    for kind in &config.protect_kinds {
        let key = GoalKey::parse(kind)?;
        let shield = KindFilter::hierarchy(registry, &key)?.negate();
        veto = Some(match veto {
            Some(v) => Arc::new(and(v, shield)),
            None => Arc::new(shield),
        });
    }

    for kind in &config.remove_kinds {
        let key = GoalKey::parse(kind)?;
        let matcher = KindFilter::hierarchy(registry, &key)?;
        match &veto {
            Some(v) => chain.push(RemoveIf::new(matcher.and(v.clone()))),
            None => chain.push(RemoveIf::new(matcher)),
        }
    }

    for fragment in &config.remove_name_fragments {
        let matcher = NameFilter::contains(fragment)?;
        match &veto {
            Some(v) => chain.push(RemoveIf::new(matcher.and(v.clone()))),
            None => chain.push(RemoveIf::new(matcher)),
        }
    }

    Ok(TuneState {
        enabled: config.enabled,
        chain,
    })
}
