//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `pitch-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ScaffoldLoader`: Fetch and parse a scaffold document
//!   - `FileWriter`: Persist planned files
//!   - `Prompt`: Ask the user for values and confirmations
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{FileWriter, Prompt, ScaffoldLoader};

#[cfg(test)]
pub use output::{MockFileWriter, MockPrompt, MockScaffoldLoader};
