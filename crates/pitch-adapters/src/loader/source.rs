//! Picks a loader based on what the source looks like.

use reqwest::Url;
use tracing::debug;

use pitch_core::{application::ports::ScaffoldLoader, domain::Scaffold, error::PitchResult};

use super::{UrlLoader, YamlFileLoader};

/// `true` when `source` is an absolute `http` or `https` URL.
pub fn is_remote(source: &str) -> bool {
    Url::parse(source).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Dispatches to [`UrlLoader`] for URLs and [`YamlFileLoader`] for everything else.
#[derive(Debug, Clone)]
pub struct SourceLoader {
    file: YamlFileLoader,
    url: UrlLoader,
}

impl SourceLoader {
    pub fn new(url: UrlLoader) -> Self {
        Self {
            file: YamlFileLoader::new(),
            url,
        }
    }
}

impl ScaffoldLoader for SourceLoader {
    fn get(&self, source: &str) -> PitchResult<Scaffold> {
        if is_remote(source) {
            debug!(source, "loading remote scaffold");
            self.url.get(source)
        } else {
            debug!(source, "loading local scaffold");
            self.file.get(source)
        }
    }
}
