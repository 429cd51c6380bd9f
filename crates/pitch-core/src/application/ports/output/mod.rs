//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `pitch-adapters` crate and the CLI provide implementations.

use crate::domain::{PlannedFile, Scaffold};
use crate::error::PitchResult;

/// Port for fetching and parsing a scaffold document.
///
/// Implemented by:
/// - `pitch_adapters::loader::YamlFileLoader` (local path)
/// - `pitch_adapters::loader::UrlLoader` (http/https)
/// - `pitch_adapters::loader::SourceLoader` (picks one of the above per source)
#[cfg_attr(test, mockall::automock)]
pub trait ScaffoldLoader: Send + Sync {
    /// Load the scaffold named by `source`. The result is not yet validated.
    fn get(&self, source: &str) -> PitchResult<Scaffold>;
}

/// Port for persisting planned files.
///
/// Implemented by:
/// - `pitch_adapters::filesystem::LocalWriter` (production)
/// - `pitch_adapters::filesystem::MemoryWriter` (testing)
///
/// ## Design Notes
///
/// - `write` overwrites unconditionally; conflict checks belong to the caller
/// - Missing parent directories are created with `file.dir_permissions`
#[cfg_attr(test, mockall::automock)]
pub trait FileWriter: Send + Sync {
    /// Check if something already exists at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Write `file.content` to `file.path` with exactly `file.permissions`.
    fn write(&self, file: &PlannedFile) -> PitchResult<()>;
}

/// Port for asking the user questions.
///
/// Implemented by:
/// - `pitch_cli::prompt::TerminalPrompt` (dialoguer)
#[cfg_attr(test, mockall::automock)]
pub trait Prompt {
    /// Free-text question. May return an empty string.
    fn ask(&self, label: &str) -> PitchResult<String>;

    /// Pick one of `options`; returns the chosen index.
    fn select(&self, label: &str, options: &[String], default: usize) -> PitchResult<usize>;

    /// Yes/no question.
    fn confirm(&self, label: &str) -> PitchResult<bool>;
}
