//! Placeholder substitution for file names and bodies.
//!
//! A placeholder is `<open><name><close>`. There is no nesting and no
//! escaping. Names are looked up in order:
//!
//! 1. the variable store (an existing variable wins even when its value is empty),
//! 2. the contextual names of the current pass (`dir` for names; `dir`,
//!    `current_file` and `current_file_path` for bodies),
//! 3. otherwise the bare name is emitted without its delimiters.
//!
//! An opening delimiter with no matching close is copied through unchanged.

use crate::domain::entities::scaffold::{TemplateTags, VariableStore};

pub const DIR: &str = "dir";
pub const CURRENT_FILE: &str = "current_file";
pub const CURRENT_FILE_PATH: &str = "current_file_path";

/// Substitution sources for one resolution pass, in precedence order.
#[derive(Debug, Clone, Copy)]
pub struct TagSources<'a> {
    variables: &'a VariableStore,
    dir: &'a str,
    current_file: Option<&'a str>,
    current_file_path: Option<&'a str>,
}

impl<'a> TagSources<'a> {
    /// Sources for resolving a file-name pattern: variables and `dir`.
    pub fn for_path(variables: &'a VariableStore, dir: &'a str) -> Self {
        Self {
            variables,
            dir,
            current_file: None,
            current_file_path: None,
        }
    }

    /// Sources for resolving a file body.
    pub fn for_body(
        variables: &'a VariableStore,
        dir: &'a str,
        current_file: &'a str,
        current_file_path: &'a str,
    ) -> Self {
        Self {
            variables,
            dir,
            current_file: Some(current_file),
            current_file_path: Some(current_file_path),
        }
    }

    /// Replacement text for `name`, or `None` when nothing matches.
    pub fn lookup(&self, name: &str) -> Option<&'a str> {
        if let Some(variable) = self.variables.get(name) {
            return Some(variable.value.as_str());
        }
        match name {
            DIR => Some(self.dir),
            CURRENT_FILE => self.current_file,
            CURRENT_FILE_PATH => self.current_file_path,
            _ => None,
        }
    }
}

/// Substitute every placeholder in `template`.
pub fn resolve(template: &str, tags: &TemplateTags, sources: &TagSources<'_>) -> String {
    let (open, close) = tags.effective();
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(open) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + open.len()..];

        let Some(end) = after_open.find(close) else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after_open[..end];
        out.push_str(sources.lookup(name).unwrap_or(name));
        rest = &after_open[end + close.len()..];
    }

    out.push_str(rest);
    out
}
