//! Local filesystem writer using std::fs.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, instrument};

use pitch_core::{
    application::{ApplicationError, ports::FileWriter},
    domain::{FileMode, PlannedFile},
    error::{PitchError, PitchResult},
};

/// Production writer backed by `std::fs`.
///
/// Permission bits are applied on unix and ignored elsewhere.
#[derive(Debug, Clone, Copy)]
pub struct LocalWriter;

impl LocalWriter {
    /// Create a new local filesystem writer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl FileWriter for LocalWriter {
    fn exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    #[instrument(skip_all, fields(path = %file.path, mode = %file.permissions))]
    fn write(&self, file: &PlannedFile) -> PitchResult<()> {
        let path = Path::new(&file.path);

        let missing_parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty() && !p.exists());
        if let Some(parent) = missing_parent {
            debug!(dir = %parent.display(), mode = %file.dir_permissions, "creating parent directories");
            create_dir_all(parent, file.dir_permissions)
                .map_err(|e| map_io_error(&file.path, e, "create directory"))?;
        }

        fs::write(path, &file.content).map_err(|e| map_io_error(&file.path, e, "write file"))?;
        set_mode(path, file.permissions).map_err(|e| map_io_error(&file.path, e, "set permissions"))?;

        Ok(())
    }
}

#[cfg(unix)]
fn create_dir_all(dir: &Path, mode: FileMode) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new()
        .recursive(true)
        .mode(mode.bits())
        .create(dir)
}

#[cfg(not(unix))]
fn create_dir_all(dir: &Path, _mode: FileMode) -> io::Result<()> {
    fs::create_dir_all(dir)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: FileMode) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode.bits()))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: FileMode) -> io::Result<()> {
    Ok(())
}

fn map_io_error(path: &str, e: io::Error, operation: &str) -> PitchError {
    ApplicationError::WriteFailed {
        path: path.to_string(),
        reason: format!("failed to {operation}: {e}"),
    }
    .into()
}
