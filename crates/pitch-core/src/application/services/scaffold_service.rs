//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Load the scaffold document
//! 2. Validate it
//! 3. Resolve its variables
//! 4. Build the plan
//! 5. Check each planned file for conflicts and write it
//!
//! Steps 1 to 4 are fatal on error. A failure in step 5 is recorded for that
//! file and the run moves on to the next one.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{FileWriter, Prompt, ScaffoldLoader},
        services::variable_service::resolve_variables,
    },
    domain::{DomainValidator, PlannedFile, ScaffoldPlan, build_plan, should_write},
    error::{PitchError, PitchResult},
};

/// Knobs for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Overwrite existing files without asking.
    pub overwrite: bool,
    /// Plan and report, but never write or ask for confirmation.
    pub dry_run: bool,
    /// Whether the prompt may be used at all.
    pub interactive: bool,
    /// `--var NAME=VALUE` pairs.
    pub overrides: BTreeMap<String, String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            overwrite: false,
            dry_run: false,
            interactive: true,
            overrides: BTreeMap::new(),
        }
    }
}

/// What happened to one planned file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcome {
    Created,
    Overwritten,
    /// The target existed and overwriting was declined.
    Skipped,
    Failed { reason: String },
    WouldCreate,
    WouldOverwrite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: String,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Per-outcome totals, used for the closing summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub created: usize,
    pub overwritten: usize,
    pub skipped: usize,
    pub failed: usize,
    pub would_create: usize,
    pub would_overwrite: usize,
    pub excluded: usize,
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub dir: String,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
    /// File-name patterns whose conditions did not pass.
    pub excluded: Vec<String>,
}

impl RunReport {
    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            excluded: self.excluded.len(),
            ..RunSummary::default()
        };
        for file in &self.files {
            match file.outcome {
                FileOutcome::Created => summary.created += 1,
                FileOutcome::Overwritten => summary.overwritten += 1,
                FileOutcome::Skipped => summary.skipped += 1,
                FileOutcome::Failed { .. } => summary.failed += 1,
                FileOutcome::WouldCreate => summary.would_create += 1,
                FileOutcome::WouldOverwrite => summary.would_overwrite += 1,
            }
        }
        summary
    }

    pub fn has_failures(&self) -> bool {
        self.files
            .iter()
            .any(|f| matches!(f.outcome, FileOutcome::Failed { .. }))
    }
}

/// Main scaffolding service.
///
/// Orchestrates the load, resolve, plan and write workflow.
pub struct ScaffoldService {
    loader: Box<dyn ScaffoldLoader>,
    writer: Box<dyn FileWriter>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use pitch_core::application::{ScaffoldService, ports::*};
    ///
    /// let service = ScaffoldService::new(
    ///     loader, // impl ScaffoldLoader
    ///     writer, // impl FileWriter
    /// );
    /// ```
    pub fn new(loader: Box<dyn ScaffoldLoader>, writer: Box<dyn FileWriter>) -> Self {
        Self { loader, writer }
    }

    /// Scaffold `source` into `dir`.
    ///
    /// Returns an error only for fatal failures. Per-file write errors are
    /// reported in the [`RunReport`].
    #[instrument(
        skip_all,
        fields(
            source = %source,
            dir = %dir,
            dry_run = options.dry_run,
            overwrite = options.overwrite
        )
    )]
    pub fn run(
        &self,
        source: &str,
        dir: &str,
        options: &RunOptions,
        prompt: &dyn Prompt,
    ) -> PitchResult<RunReport> {
        info!("Loading scaffold");

        // 1. Load
        let mut scaffold = self.loader.get(source)?;

        // 2. Validate
        DomainValidator::validate_scaffold(&scaffold).map_err(PitchError::Domain)?;
        debug!(
            variables = scaffold.user_input.len(),
            files = scaffold.files.len(),
            "Scaffold validated"
        );

        // 3. Resolve variables
        resolve_variables(
            &mut scaffold.user_input,
            prompt,
            &options.overrides,
            options.interactive,
        )?;

        // 4. Plan
        let plan = build_plan(&scaffold, &scaffold.user_input, dir);
        if let Err(e) = DomainValidator::validate_plan(&plan) {
            warn!(error = %e, "Two files resolve to the same path; the later one is conflict-checked");
        }
        for pattern in plan.excluded() {
            info!(pattern = %pattern, "Skipping file, conditions not met");
        }
        info!(
            planned = plan.len(),
            excluded = plan.excluded().len(),
            dir = %plan.dir(),
            "Plan built"
        );

        // 5. Write
        let report = self.apply(plan, options, prompt);
        info!(summary = ?report.summary(), "Scaffold finished");
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn apply(&self, plan: ScaffoldPlan, options: &RunOptions, prompt: &dyn Prompt) -> RunReport {
        let dir = plan.dir().to_string();
        let excluded = plan.excluded().to_vec();

        let files = plan
            .into_iter()
            .map(|file| {
                let outcome = self.process(&file, options, prompt);
                FileReport {
                    path: file.path,
                    outcome,
                }
            })
            .collect();

        RunReport {
            dir,
            dry_run: options.dry_run,
            files,
            excluded,
        }
    }

    /// Conflict-check and write one file.
    fn process(&self, file: &PlannedFile, options: &RunOptions, prompt: &dyn Prompt) -> FileOutcome {
        let exists = self.writer.exists(&file.path);

        if options.dry_run {
            return if exists {
                FileOutcome::WouldOverwrite
            } else {
                FileOutcome::WouldCreate
            };
        }

        let allowed = should_write(&file.path, exists, options.overwrite, |path| {
            options.interactive && confirm_overwrite(prompt, path)
        });
        if !allowed {
            info!(path = %file.path, "Skipped existing file");
            return FileOutcome::Skipped;
        }

        match self.writer.write(file) {
            Ok(()) if exists => {
                info!(path = %file.path, "Overwrote file");
                FileOutcome::Overwritten
            }
            Ok(()) => {
                info!(path = %file.path, mode = %file.permissions, "Created file");
                FileOutcome::Created
            }
            Err(e) => {
                warn!(path = %file.path, error = %e, "Write failed");
                FileOutcome::Failed {
                    reason: failure_reason(e),
                }
            }
        }
    }
}

fn confirm_overwrite(prompt: &dyn Prompt, path: &str) -> bool {
    match prompt.confirm(&format!("File \"{path}\" already exists. Overwrite?")) {
        Ok(answer) => answer,
        Err(e) => {
            warn!(path = %path, error = %e, "Overwrite confirmation failed, skipping");
            false
        }
    }
}

fn failure_reason(error: PitchError) -> String {
    match error {
        PitchError::Application(ApplicationError::WriteFailed { reason, .. }) => reason,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::{always, eq};

    use super::*;
    use crate::{
        application::ports::{MockFileWriter, MockPrompt, MockScaffoldLoader},
        domain::{Condition, File, FileMode, Scaffold, Variable, VariableStore},
    };

    fn scaffold() -> Scaffold {
        Scaffold {
            user_input: VariableStore::new()
                .with("name", Variable::new("Name?").with_value("demo"))
                .with("confirm", Variable::new("Confirm?").with_value("n")),
            files: [
                (
                    "%name%/README.md".to_string(),
                    File::new("# %name%", FileMode::new(0o644)),
                ),
                (
                    "%name%/extra.txt".to_string(),
                    File::new("extra", FileMode::new(0o600))
                        .with_condition(Condition::equal("confirm", "y")),
                ),
            ]
            .into(),
        }
    }

    fn loader_returning(scaffold: Scaffold) -> Box<MockScaffoldLoader> {
        let mut loader = MockScaffoldLoader::new();
        loader
            .expect_get()
            .with(eq("scaffold.yaml"))
            .times(1)
            .returning(move |_| Ok(scaffold.clone()));
        Box::new(loader)
    }

    /// An interactive prompt whose free-text answers are empty, so every
    /// variable keeps its default.
    fn prompt_keeping_defaults() -> MockPrompt {
        let mut prompt = MockPrompt::new();
        for label in ["Confirm?", "Name?"] {
            prompt
                .expect_ask()
                .with(eq(label))
                .times(1)
                .returning(|_| Ok(String::new()));
        }
        prompt
    }

    fn non_interactive() -> RunOptions {
        RunOptions {
            interactive: false,
            ..RunOptions::default()
        }
    }

    #[test]
    fn creates_planned_files() {
        let mut writer = MockFileWriter::new();
        writer.expect_exists().returning(|_| false);
        writer
            .expect_write()
            .withf(|f| f.path == "out/demo/README.md" && f.content == "# demo")
            .times(1)
            .returning(|_| Ok(()));

        let service = ScaffoldService::new(loader_returning(scaffold()), Box::new(writer));
        let report = service
            .run("scaffold.yaml", "out", &non_interactive(), &MockPrompt::new())
            .unwrap();

        assert_eq!(report.dir, "out/");
        assert_eq!(
            report.files,
            vec![FileReport {
                path: "out/demo/README.md".into(),
                outcome: FileOutcome::Created,
            }]
        );
        assert_eq!(report.excluded, vec!["%name%/extra.txt"]);
        assert_eq!(report.summary().created, 1);
        assert_eq!(report.summary().excluded, 1);
    }

    #[test]
    fn override_includes_conditional_file() {
        let mut writer = MockFileWriter::new();
        writer.expect_exists().returning(|_| false);
        writer.expect_write().times(2).returning(|_| Ok(()));

        let options = RunOptions {
            overrides: [("confirm".to_string(), "y".to_string())].into(),
            ..non_interactive()
        };
        let service = ScaffoldService::new(loader_returning(scaffold()), Box::new(writer));
        let report = service
            .run("scaffold.yaml", "out", &options, &MockPrompt::new())
            .unwrap();

        assert_eq!(report.files.len(), 2);
        assert!(report.excluded.is_empty());
    }

    #[test]
    fn load_failure_is_fatal() {
        let mut loader = MockScaffoldLoader::new();
        loader.expect_get().returning(|s| {
            Err(ApplicationError::NotFound {
                location: s.to_string(),
            }
            .into())
        });
        let mut writer = MockFileWriter::new();
        writer.expect_write().never();

        let service = ScaffoldService::new(Box::new(loader), Box::new(writer));
        let err = service
            .run("missing.yaml", "out", &non_interactive(), &MockPrompt::new())
            .unwrap_err();
        assert!(matches!(
            err,
            PitchError::Application(ApplicationError::NotFound { .. })
        ));
    }

    #[test]
    fn invalid_scaffold_touches_nothing() {
        let mut writer = MockFileWriter::new();
        writer.expect_exists().never();
        writer.expect_write().never();

        let service = ScaffoldService::new(loader_returning(Scaffold::default()), Box::new(writer));
        let err = service
            .run("scaffold.yaml", "out", &non_interactive(), &MockPrompt::new())
            .unwrap_err();
        assert!(matches!(err, PitchError::Domain(_)));
    }

    #[test]
    fn existing_file_asks_and_skips_on_no() {
        let mut writer = MockFileWriter::new();
        writer.expect_exists().returning(|_| true);
        writer.expect_write().never();

        let mut prompt = prompt_keeping_defaults();
        prompt
            .expect_confirm()
            .with(eq("File \"out/demo/README.md\" already exists. Overwrite?"))
            .times(1)
            .returning(|_| Ok(false));

        let service = ScaffoldService::new(loader_returning(scaffold()), Box::new(writer));
        let report = service
            .run("scaffold.yaml", "out", &RunOptions::default(), &prompt)
            .unwrap();
        assert_eq!(report.files[0].outcome, FileOutcome::Skipped);
    }

    #[test]
    fn existing_file_overwritten_on_yes() {
        let mut writer = MockFileWriter::new();
        writer.expect_exists().returning(|_| true);
        writer.expect_write().times(1).returning(|_| Ok(()));

        let mut prompt = prompt_keeping_defaults();
        prompt.expect_confirm().times(1).returning(|_| Ok(true));

        let service = ScaffoldService::new(loader_returning(scaffold()), Box::new(writer));
        let report = service
            .run("scaffold.yaml", "out", &RunOptions::default(), &prompt)
            .unwrap();
        assert_eq!(report.files[0].outcome, FileOutcome::Overwritten);
    }

    #[test]
    fn overwrite_flag_never_asks() {
        let mut writer = MockFileWriter::new();
        writer.expect_exists().returning(|_| true);
        writer.expect_write().times(1).returning(|_| Ok(()));

        let mut prompt = prompt_keeping_defaults();
        prompt.expect_confirm().never();

        let options = RunOptions {
            overwrite: true,
            ..RunOptions::default()
        };
        let service = ScaffoldService::new(loader_returning(scaffold()), Box::new(writer));
        let report = service.run("scaffold.yaml", "out", &options, &prompt).unwrap();
        assert_eq!(report.files[0].outcome, FileOutcome::Overwritten);
    }

    #[test]
    fn prompt_error_counts_as_no() {
        let mut writer = MockFileWriter::new();
        writer.expect_exists().returning(|_| true);
        writer.expect_write().never();

        let mut prompt = prompt_keeping_defaults();
        prompt.expect_confirm().returning(|_| {
            Err(ApplicationError::Prompt {
                reason: "interrupted".into(),
            }
            .into())
        });

        let service = ScaffoldService::new(loader_returning(scaffold()), Box::new(writer));
        let report = service
            .run("scaffold.yaml", "out", &RunOptions::default(), &prompt)
            .unwrap();
        assert_eq!(report.files[0].outcome, FileOutcome::Skipped);
    }

    #[test]
    fn non_interactive_existing_file_is_skipped_without_prompt() {
        let mut writer = MockFileWriter::new();
        writer.expect_exists().returning(|_| true);
        writer.expect_write().never();

        let mut prompt = MockPrompt::new();
        prompt.expect_confirm().never();

        let service = ScaffoldService::new(loader_returning(scaffold()), Box::new(writer));
        let report = service
            .run("scaffold.yaml", "out", &non_interactive(), &prompt)
            .unwrap();
        assert_eq!(report.files[0].outcome, FileOutcome::Skipped);
    }

    #[test]
    fn dry_run_never_writes_or_asks() {
        let mut writer = MockFileWriter::new();
        writer
            .expect_exists()
            .with(eq("out/demo/README.md"))
            .returning(|_| true);
        writer.expect_write().never();

        let mut prompt = prompt_keeping_defaults();
        prompt.expect_confirm().never();

        let options = RunOptions {
            dry_run: true,
            ..RunOptions::default()
        };
        let service = ScaffoldService::new(loader_returning(scaffold()), Box::new(writer));
        let report = service.run("scaffold.yaml", "out", &options, &prompt).unwrap();
        assert!(report.dry_run);
        assert_eq!(report.files[0].outcome, FileOutcome::WouldOverwrite);
        assert_eq!(report.summary().would_overwrite, 1);
    }

    #[test]
    fn write_failure_does_not_abort_the_batch() {
        let mut doc = scaffold();
        doc.files.insert(
            "%name%/z.txt".into(),
            File::new("z", FileMode::new(0o644)),
        );

        let mut writer = MockFileWriter::new();
        writer.expect_exists().with(always()).returning(|_| false);
        writer
            .expect_write()
            .withf(|f| f.path == "out/demo/README.md")
            .returning(|f| {
                Err(ApplicationError::WriteFailed {
                    path: f.path.clone(),
                    reason: "permission denied".into(),
                }
                .into())
            });
        writer
            .expect_write()
            .withf(|f| f.path == "out/demo/z.txt")
            .times(1)
            .returning(|_| Ok(()));

        let service = ScaffoldService::new(loader_returning(doc), Box::new(writer));
        let report = service
            .run("scaffold.yaml", "out", &non_interactive(), &MockPrompt::new())
            .unwrap();

        assert_eq!(
            report.files[0].outcome,
            FileOutcome::Failed {
                reason: "permission denied".into()
            }
        );
        assert_eq!(report.files[1].outcome, FileOutcome::Created);
        assert!(report.has_failures());
    }

    #[test]
    fn report_serializes_with_outcome_tag() {
        let report = RunReport {
            dir: "out/".into(),
            dry_run: false,
            files: vec![FileReport {
                path: "out/a".into(),
                outcome: FileOutcome::Failed {
                    reason: "disk full".into(),
                },
            }],
            excluded: vec![],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["files"][0]["outcome"], "failed");
        assert_eq!(json["files"][0]["reason"], "disk full");
        assert_eq!(json["files"][0]["path"], "out/a");
    }
}
