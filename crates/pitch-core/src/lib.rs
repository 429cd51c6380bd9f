//! Pitch Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Pitch
//! project scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pitch-cli (CLI)              │
//! │   (Drives services, provides Prompt)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService, resolve_variables)   │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: ScaffoldLoader, FileWriter,    │
//! │          Prompt)                        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     pitch-adapters (Infrastructure)     │
//! │ (YamlFileLoader, UrlLoader, LocalWriter)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (conditions, tags, planner, conflict)  │
//! │             No I/O, no state            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! The CLI wires adapters into [`ScaffoldService`](application::ScaffoldService).
//! The resolution engine underneath is usable on its own:
//!
//! ```rust
//! use pitch_core::domain::build_plan;
//! use pitch_core::prelude::*;
//!
//! let scaffold = Scaffold {
//!     user_input: VariableStore::new()
//!         .with("name", Variable::new("Project name?").with_value("demo")),
//!     files: [(
//!         "%name%/README.md".to_string(),
//!         File::new("# %name%", FileMode::new(0o644)),
//!     )]
//!     .into(),
//! };
//!
//! let plan = build_plan(&scaffold, &scaffold.user_input, "out");
//! assert_eq!(plan.files()[0].path, "out/demo/README.md");
//! assert_eq!(plan.files()[0].content, "# demo");
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, FileOutcome, FileReport, RunOptions, RunReport, RunSummary,
        ScaffoldService,
        ports::{FileWriter, Prompt, ScaffoldLoader},
    };
    pub use crate::domain::{
        Condition, File, FileMode, Operator, PlannedFile, Scaffold, ScaffoldPlan, TemplateTags,
        Variable, VariableStore,
    };
    pub use crate::error::{PitchError, PitchResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
