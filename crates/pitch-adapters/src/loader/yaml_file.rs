//! Local YAML file loader.

use std::{fs, path::Path};

use tracing::{debug, instrument};

use pitch_core::{
    application::{ApplicationError, ports::ScaffoldLoader},
    domain::Scaffold,
    error::PitchResult,
};

use super::parse_document;

/// Loads a scaffold document from a path on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFileLoader;

impl YamlFileLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ScaffoldLoader for YamlFileLoader {
    #[instrument(skip(self))]
    fn get(&self, source: &str) -> PitchResult<Scaffold> {
        let path = Path::new(source);
        if !path.exists() {
            return Err(ApplicationError::NotFound {
                location: source.to_string(),
            }
            .into());
        }

        let raw = fs::read_to_string(path).map_err(|e| ApplicationError::LoadFailed {
            location: source.to_string(),
            reason: format!("failed to read file: {e}"),
        })?;
        debug!(bytes = raw.len(), "read scaffold document");

        parse_document(source, &raw)
    }
}
