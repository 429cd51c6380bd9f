// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Pitch.
//!
//! This module contains the scaffold resolution engine as pure functions.
//! Loading documents, prompting and writing files are handled via ports
//! (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Stateless functions**: conditions, tags, planner and conflict take
//!   explicit inputs and share no mutable context
//!
// Public API - what the world sees
pub mod conditions;
pub mod conflict;
pub mod entities;
pub mod error;
pub mod planner;
pub mod tags;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    common::FileMode,
    plan::{PlannedFile, ScaffoldPlan},
    scaffold::{Condition, File, Operator, Scaffold, TemplateTags, Variable, VariableStore},
};

pub use conflict::should_write;
pub use error::{DomainError, ErrorCategory, Violation};
pub use planner::{build_plan, normalize_dir};
pub use validation::DomainValidator;
