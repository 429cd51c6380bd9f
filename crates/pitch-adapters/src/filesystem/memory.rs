//! In-memory writer for testing.

use std::{
    collections::{BTreeMap, HashSet},
    path::Path,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use pitch_core::{
    application::{ApplicationError, ports::FileWriter},
    domain::{FileMode, PlannedFile},
    error::PitchResult,
};

/// A file as recorded by [`MemoryWriter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub content: String,
    pub mode: FileMode,
}

/// In-memory writer for testing.
///
/// Clones share state, so a test can hand one clone to the service and
/// inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    inner: Arc<RwLock<MemoryWriterInner>>,
}

#[derive(Debug, Default)]
struct MemoryWriterInner {
    files: BTreeMap<String, StoredFile>,
    directories: BTreeMap<String, FileMode>,
    failing: HashSet<String>,
    writes: usize,
}

impl MemoryWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing file, e.g. to exercise overwrite handling.
    pub fn with_file(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.write_lock().files.insert(
            path.into(),
            StoredFile {
                content: content.into(),
                mode: FileMode::new(0o644),
            },
        );
        self
    }

    /// Make every write to `path` fail.
    pub fn fail_on(self, path: impl Into<String>) -> Self {
        self.write_lock().failing.insert(path.into());
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &str) -> Option<String> {
        self.read_lock().files.get(path).map(|f| f.content.clone())
    }

    pub fn file(&self, path: &str) -> Option<StoredFile> {
        self.read_lock().files.get(path).cloned()
    }

    /// Mode recorded for a directory created by a write.
    pub fn dir_mode(&self, dir: &str) -> Option<FileMode> {
        self.read_lock().directories.get(dir).copied()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<String> {
        self.read_lock().files.keys().cloned().collect()
    }

    /// Number of successful `write` calls.
    pub fn write_count(&self) -> usize {
        self.read_lock().writes
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, MemoryWriterInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, MemoryWriterInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FileWriter for MemoryWriter {
    fn exists(&self, path: &str) -> bool {
        let inner = self.read_lock();
        inner.files.contains_key(path) || inner.directories.contains_key(path)
    }

    fn write(&self, file: &PlannedFile) -> PitchResult<()> {
        let mut inner = self.write_lock();

        if inner.failing.contains(&file.path) {
            return Err(ApplicationError::WriteFailed {
                path: file.path.clone(),
                reason: "simulated failure".into(),
            }
            .into());
        }

        for ancestor in Path::new(&file.path).ancestors().skip(1) {
            let Some(dir) = ancestor.to_str().filter(|d| !d.is_empty()) else {
                continue;
            };
            inner
                .directories
                .entry(dir.to_string())
                .or_insert(file.dir_permissions);
        }

        inner.files.insert(
            file.path.clone(),
            StoredFile {
                content: file.content.clone(),
                mode: file.permissions,
            },
        );
        inner.writes += 1;
        Ok(())
    }
}
