pub mod common;
pub mod plan;
pub mod scaffold;

pub use crate::domain::DomainError;
pub use plan::{PlannedFile, ScaffoldPlan};
pub use scaffold::{Scaffold, Variable, VariableStore};
