// ============================================================================
// domain/error.rs - SCAFFOLD DEFINITION ERRORS
// ============================================================================

use std::fmt;

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (the CLI renders them more than once)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// The scaffold document failed validation. Carries every violation found.
    #[error("Invalid scaffold: {}", join_violations(.violations))]
    InvalidScaffold { violations: Vec<Violation> },

    #[error("Two files resolve to the same path: {path}")]
    DuplicatePath { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidScaffold { violations } => {
                let mut out: Vec<String> = violations.iter().map(|v| format!("  • {v}")).collect();
                out.insert(0, format!("{} problem(s) found in the scaffold:", violations.len()));
                out.push("Fix the scaffold document and run again".into());
                out
            }
            Self::DuplicatePath { path } => vec![
                format!("More than one file entry resolves to '{path}'"),
                "Make the file name patterns or their conditions mutually exclusive".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidScaffold { .. } => ErrorCategory::Validation,
            Self::DuplicatePath { .. } => ErrorCategory::Conflict,
        }
    }
}

/// One problem found while validating a scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Where in the document, e.g. `files["a.txt"].conditions[0].operator`.
    pub location: String,
    pub message: String,
}

impl Violation {
    pub fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
}
