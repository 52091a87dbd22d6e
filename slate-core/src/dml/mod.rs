mod delete;
mod insert;
mod query;
mod update;

pub use delete::*;
pub use insert::*;
pub use query::*;
pub use update::*;

use crate::Condition;

/// Top level filter, an empty group is no filter at all.
pub(crate) fn effective_condition(condition: &Option<Condition>) -> Option<&Condition> {
    condition.as_ref().filter(|v| !v.is_empty())
}

pub(crate) fn merge_condition(current: Option<Condition>, condition: Condition) -> Option<Condition> {
    Some(match current {
        Some(current) => current.and(condition),
        None => condition,
    })
}
