//! Condition evaluation: decides whether a file is produced.

use crate::domain::entities::scaffold::{Condition, File, Operator, VariableStore};

/// `true` when every condition on `file` holds. No conditions means always.
pub fn passes(file: &File, vars: &VariableStore) -> bool {
    file.conditions.iter().all(|c| holds(c, vars))
}

/// Evaluate one condition. Unknown variables read as `""`; unknown operators never match.
pub fn holds(condition: &Condition, vars: &VariableStore) -> bool {
    let stored = vars.value_of(&condition.field);
    match condition.operator {
        Operator::Equal => stored == condition.value,
        Operator::NotEqual => stored != condition.value,
        Operator::Unknown(_) | Operator::Missing => false,
    }
}
