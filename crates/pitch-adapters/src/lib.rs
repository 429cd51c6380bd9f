//! Infrastructure adapters for Pitch.
//!
//! This crate implements the ports defined in `pitch-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod loader;

// Re-export commonly used adapters
pub use filesystem::{LocalWriter, MemoryWriter};
pub use loader::{SourceLoader, UrlLoader, YamlFileLoader};
