use std::collections::HashSet;

use serde::Serialize;

use crate::domain::{entities::common::FileMode, error::DomainError};

/// Final plan ready for materialization.
///
/// This is the output of the plan builder. It contains no business logic,
/// only data, and is discarded after the writer has consumed it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScaffoldPlan {
    pub(crate) dir: String,
    pub(crate) files: Vec<PlannedFile>,
    /// File-name patterns dropped because a condition failed.
    pub(crate) excluded: Vec<String>,
}

impl ScaffoldPlan {
    pub fn new(dir: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            files: Vec::new(),
            excluded: Vec::new(),
        }
    }

    pub fn add_file(&mut self, file: PlannedFile) {
        self.files.push(file);
    }

    pub fn add_excluded(&mut self, pattern: impl Into<String>) {
        self.excluded.push(pattern.into());
    }

    /// Reject two planned files resolving to the same path.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert(file.path.as_str()) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.clone(),
                });
            }
        }
        Ok(())
    }

    /// Normalized target root, always ending in one `/`.
    pub fn dir(&self) -> &str {
        &self.dir
    }

    pub fn files(&self) -> &[PlannedFile] {
        &self.files
    }

    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl IntoIterator for ScaffoldPlan {
    type Item = PlannedFile;
    type IntoIter = std::vec::IntoIter<PlannedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

/// One file with its final path and content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    /// Resolved output name relative to the target root (`current_file`).
    pub name: String,
    /// `dir` + `name` (`current_file_path`).
    pub path: String,
    pub content: String,
    pub permissions: FileMode,
    /// Never unset: the builder substitutes `0755`.
    pub dir_permissions: FileMode,
}
