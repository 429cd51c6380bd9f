//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The scaffold document does not exist at a local path.
    #[error("Scaffold source not found: {location}")]
    NotFound { location: String },

    /// The scaffold document could not be read, fetched or parsed.
    #[error("Failed to load scaffold from {location}: {reason}")]
    LoadFailed { location: String, reason: String },

    /// A variable ended up with no value and nothing could supply one.
    #[error("Variable '{name}' could not be resolved: {reason}")]
    UnresolvedVariable { name: String, reason: String },

    /// Writing one file failed. Reported per file, never aborts a run.
    #[error("Error writing file \"{path}\": {reason}")]
    WriteFailed { path: String, reason: String },

    /// The interactive prompt could not produce an answer.
    #[error("Prompt failed: {reason}")]
    Prompt { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotFound { location } => vec![
                format!("No file exists at: {location}"),
                "Check the path, or pass an http(s):// URL".into(),
            ],
            Self::LoadFailed { location, .. } => vec![
                format!("Could not load: {location}"),
                "Check that the source is reachable and is valid YAML".into(),
                "Remote sources time out after loader.timeout_secs seconds".into(),
            ],
            Self::UnresolvedVariable { name, .. } => vec![
                format!("Supply a value with: --var {name}=<value>"),
                "Or run interactively so the value can be prompted for".into(),
            ],
            Self::WriteFailed { path, .. } => vec![
                format!("Failed to write: {path}"),
                "Check that you have write permissions".into(),
            ],
            Self::Prompt { .. } => vec![
                "The terminal did not return an answer".into(),
                "Use --non-interactive with --var to run without prompts".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::LoadFailed { .. } => ErrorCategory::Load,
            Self::UnresolvedVariable { .. } | Self::Prompt { .. } => ErrorCategory::Input,
            Self::WriteFailed { .. } => ErrorCategory::Io,
        }
    }
}
