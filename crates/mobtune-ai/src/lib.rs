//! Goal filtering and rewriting: the rule pipeline applied to mob AI goal sets.

pub mod chain;
pub mod error;
pub mod filter;
pub mod goal;
pub mod key;
pub mod modifier;
pub mod registry;

pub use chain::GoalChain;
pub use error::{FilterError, KeyError};
pub use filter::{FilterVerdict, GoalFilter, GoalFilterExt, KindFilter, NameFilter};
pub use goal::{Goal, MobContext};
pub use key::GoalKey;
pub use modifier::{ApplyIf, GoalModifier, GoalModifierExt, GoalVerdict, RemoveIf};
pub use registry::{GoalDefinition, GoalRegistry};
