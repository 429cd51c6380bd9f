//! Scaffold document loaders.
//!
//! A source is either a local path to a YAML document or an `http(s)://`
//! URL serving one. [`SourceLoader`] picks the right loader per source.

mod source;
mod url;
mod yaml_file;

pub use source::{SourceLoader, is_remote};
pub use url::{DEFAULT_TIMEOUT, UrlLoader};
pub use yaml_file::YamlFileLoader;

use pitch_core::{application::ApplicationError, domain::Scaffold, error::PitchResult};

/// Parse a YAML scaffold document. `location` is only used in errors.
pub(crate) fn parse_document(location: &str, raw: &str) -> PitchResult<Scaffold> {
    serde_yaml::from_str(raw).map_err(|e| {
        ApplicationError::LoadFailed {
            location: location.to_string(),
            reason: format!("invalid scaffold document: {e}"),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitch_core::error::PitchError;

    #[test]
    fn parses_minimal_document() {
        let scaffold = parse_document(
            "inline",
            "files:\n  a.txt:\n    mode: 0644\n    template: hi\n",
        )
        .unwrap();
        assert_eq!(scaffold.files["a.txt"].template, "hi");
        assert!(scaffold.user_input.is_empty());
    }

    #[test]
    fn malformed_yaml_is_a_load_error() {
        let err = parse_document("broken.yaml", "files: [unclosed").unwrap_err();
        match err {
            PitchError::Application(ApplicationError::LoadFailed { location, reason }) => {
                assert_eq!(location, "broken.yaml");
                assert!(reason.starts_with("invalid scaffold document"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn wrong_shape_is_a_load_error() {
        assert!(parse_document("list.yaml", "- a\n- b\n").is_err());
    }
}
