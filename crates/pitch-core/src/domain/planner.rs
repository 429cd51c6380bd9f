//! Turns a resolved scaffold into an ordered list of files to write.
//!
//! The builder is pure: it never touches the filesystem.

use tracing::{debug, trace};

use crate::domain::{
    conditions,
    entities::{
        PlannedFile, ScaffoldPlan,
        common::FileMode,
        scaffold::{Scaffold, TemplateTags, VariableStore},
    },
    tags::{self, TagSources},
};

/// Normalize a target root so it ends with exactly one `/`.
///
/// An empty root means the current directory (`./`).
pub fn normalize_dir(dir: &str) -> String {
    if dir.is_empty() {
        return "./".to_string();
    }
    let trimmed = dir.trim_end_matches('/');
    format!("{trimmed}/")
}

/// Build the plan for `scaffold` under `dir`, reading values from `vars`.
///
/// Files are visited in name order. A file whose conditions fail is recorded
/// in [`ScaffoldPlan::excluded`] and produces nothing.
pub fn build_plan(scaffold: &Scaffold, vars: &VariableStore, dir: &str) -> ScaffoldPlan {
    let dir = normalize_dir(dir);
    let mut plan = ScaffoldPlan::new(dir.clone());
    let name_tags = TemplateTags::default_pair();

    for (pattern, file) in &scaffold.files {
        if !conditions::passes(file, vars) {
            debug!(pattern = %pattern, "Excluded by conditions");
            plan.add_excluded(pattern.clone());
            continue;
        }

        let resolved = tags::resolve(pattern, &name_tags, &TagSources::for_path(vars, &dir));
        let name = resolved
            .strip_prefix('/')
            .map(str::to_string)
            .unwrap_or(resolved);
        let path = format!("{dir}{name}");

        let content = if file.disable_templating {
            file.template.clone()
        } else {
            let sources = TagSources::for_body(vars, &dir, &name, &path);
            tags::resolve(&file.template, &file.template_tags, &sources)
        };

        trace!(pattern = %pattern, path = %path, bytes = content.len(), "Planned file");

        plan.add_file(PlannedFile {
            name,
            path,
            content,
            permissions: file.permissions,
            dir_permissions: file.dir_permissions.or(FileMode::DEFAULT_DIR),
        });
    }

    plan
}
