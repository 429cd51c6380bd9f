//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a project" or "resolve variables".

pub mod scaffold_service;
pub mod variable_service;

pub use scaffold_service::{
    FileOutcome, FileReport, RunOptions, RunReport, RunSummary, ScaffoldService,
};
pub use variable_service::resolve_variables;
