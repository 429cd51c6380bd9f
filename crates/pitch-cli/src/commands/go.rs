//! Implementation of the `pitch go` command.
//!
//! Responsibility: turn CLI arguments into a run of the core scaffold
//! service, wire the production adapters, and report each file's outcome.

use std::io::{self, IsTerminal};

use tracing::{debug, info, instrument};

use pitch_adapters::{LocalWriter, SourceLoader, UrlLoader};
use pitch_core::{
    application::{
        FileOutcome, FileReport, RunOptions, RunReport, RunSummary, ScaffoldService,
        ports::Prompt,
    },
    domain::normalize_dir,
};

use crate::{
    cli::GoArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt::TerminalPrompt,
};

const DIRECTORY_LABEL: &str = "Please enter a directory name (use ./ for current path):";
const CURRENT_DIR: &str = "./";

/// Execute the `pitch go` command.
///
/// Dispatch sequence:
/// 1. Require a source
/// 2. Settle the target directory, asking for it when omitted
/// 3. Run the scaffold service with the local adapters
/// 4. Print per-file outcomes and a summary (or the JSON report)
#[instrument(skip_all, fields(source = args.source.as_deref().unwrap_or("")))]
pub fn execute(args: GoArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let source = args.source.ok_or(CliError::MissingSource)?;

    let interactive =
        !args.non_interactive && config.prompt.interactive && io::stdin().is_terminal();
    debug!(interactive, "Prompt mode resolved");

    let prompt = TerminalPrompt::new();
    let dir = resolve_directory(args.directory, interactive, &prompt)?;

    let loader = SourceLoader::new(UrlLoader::new(config.loader.timeout())?);
    let service = ScaffoldService::new(Box::new(loader), Box::new(LocalWriter::new()));

    let options = RunOptions {
        overwrite: args.overwrite,
        dry_run: args.dry_run,
        interactive,
        overrides: args.vars.into_iter().collect(),
    };

    if !output.is_json() {
        output.header(&format!("Scaffolding {source} into {}", normalize_dir(&dir)))?;
    }

    let report = service.run(&source, &dir, &options, &prompt)?;
    info!(summary = ?report.summary(), "Run finished");

    if output.is_json() {
        return output.json(&report);
    }
    print_report(&report, &output)
}

/// The directory argument, or the prompt's answer. An empty answer and a
/// non-interactive run both mean the current directory.
fn resolve_directory(
    directory: Option<String>,
    interactive: bool,
    prompt: &dyn Prompt,
) -> CliResult<String> {
    if let Some(dir) = directory {
        return Ok(dir);
    }
    if !interactive {
        debug!("No directory given, using the current one");
        return Ok(CURRENT_DIR.to_string());
    }

    let answer = prompt.ask(DIRECTORY_LABEL)?;
    let answer = answer.trim();
    Ok(if answer.is_empty() {
        CURRENT_DIR.to_string()
    } else {
        answer.to_string()
    })
}

fn print_report(report: &RunReport, output: &OutputManager) -> CliResult<()> {
    for file in &report.files {
        let line = file_message(file);
        match file.outcome {
            FileOutcome::Created | FileOutcome::Overwritten => output.success(&line)?,
            FileOutcome::Skipped => output.warning(&line)?,
            FileOutcome::Failed { .. } => output.error(&line)?,
            FileOutcome::WouldCreate | FileOutcome::WouldOverwrite => output.info(&line)?,
        }
    }

    if report.dry_run {
        for pattern in &report.excluded {
            output.info(&format!("Excluded \"{pattern}\" (conditions not met)."))?;
        }
    }

    output.print(&summary_line(&report.summary(), report.dry_run))?;
    Ok(())
}

/// One line per file, in the wording users already know.
fn file_message(file: &FileReport) -> String {
    let path = &file.path;
    match &file.outcome {
        FileOutcome::Created => format!("Created file \"{path}\"."),
        FileOutcome::Overwritten => format!("Overwrote file \"{path}\"."),
        FileOutcome::Skipped => format!("Skipped file \"{path}\"."),
        FileOutcome::Failed { reason } => format!("Error writing file \"{path}\": {reason}"),
        FileOutcome::WouldCreate => format!("Would create file \"{path}\"."),
        FileOutcome::WouldOverwrite => format!("Would overwrite file \"{path}\"."),
    }
}

fn summary_line(summary: &RunSummary, dry_run: bool) -> String {
    let mut line = if dry_run {
        format!(
            "Dry run: {} to create, {} to overwrite",
            summary.would_create, summary.would_overwrite
        )
    } else {
        format!(
            "Done: {} created, {} overwritten, {} skipped, {} failed",
            summary.created, summary.overwritten, summary.skipped, summary.failed
        )
    };
    if summary.excluded > 0 {
        line.push_str(&format!(", {} excluded", summary.excluded));
    }
    line.push('.');
    line
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pitch_core::{application::ApplicationError, error::PitchResult};

    use super::*;

    /// Answers `ask` from a fixed script and records the labels it saw.
    struct ScriptedPrompt {
        answers: RefCell<Vec<PitchResult<String>>>,
        labels: RefCell<Vec<String>>,
    }

    impl ScriptedPrompt {
        fn new(answers: Vec<PitchResult<String>>) -> Self {
            Self {
                answers: RefCell::new(answers),
                labels: RefCell::new(Vec::new()),
            }
        }
    }

    impl Prompt for ScriptedPrompt {
        fn ask(&self, label: &str) -> PitchResult<String> {
            self.labels.borrow_mut().push(label.to_string());
            self.answers.borrow_mut().remove(0)
        }

        fn select(&self, _label: &str, _options: &[String], default: usize) -> PitchResult<usize> {
            Ok(default)
        }

        fn confirm(&self, _label: &str) -> PitchResult<bool> {
            Ok(false)
        }
    }

    fn report(path: &str, outcome: FileOutcome) -> FileReport {
        FileReport {
            path: path.to_string(),
            outcome,
        }
    }

    #[test]
    fn explicit_directory_skips_the_prompt() {
        let prompt = ScriptedPrompt::new(vec![]);
        let dir = resolve_directory(Some("out".into()), true, &prompt).unwrap();
        assert_eq!(dir, "out");
        assert!(prompt.labels.borrow().is_empty());
    }

    #[test]
    fn missing_directory_is_asked_for() {
        let prompt = ScriptedPrompt::new(vec![Ok(" my-app ".into())]);
        let dir = resolve_directory(None, true, &prompt).unwrap();
        assert_eq!(dir, "my-app");
        assert_eq!(*prompt.labels.borrow(), vec![DIRECTORY_LABEL.to_string()]);
    }

    #[test]
    fn empty_answer_means_current_directory() {
        let prompt = ScriptedPrompt::new(vec![Ok(String::new())]);
        assert_eq!(resolve_directory(None, true, &prompt).unwrap(), "./");
    }

    #[test]
    fn non_interactive_uses_current_directory() {
        let prompt = ScriptedPrompt::new(vec![]);
        assert_eq!(resolve_directory(None, false, &prompt).unwrap(), "./");
        assert!(prompt.labels.borrow().is_empty());
    }

    #[test]
    fn directory_prompt_failure_is_fatal() {
        let prompt = ScriptedPrompt::new(vec![Err(ApplicationError::Prompt {
            reason: "stdin closed".into(),
        }
        .into())]);
        assert!(matches!(
            resolve_directory(None, true, &prompt),
            Err(CliError::Core(_))
        ));
    }

    #[test]
    fn file_messages() {
        assert_eq!(
            file_message(&report("out/a", FileOutcome::Created)),
            "Created file \"out/a\"."
        );
        assert_eq!(
            file_message(&report("out/a", FileOutcome::Overwritten)),
            "Overwrote file \"out/a\"."
        );
        assert_eq!(
            file_message(&report("out/a", FileOutcome::Skipped)),
            "Skipped file \"out/a\"."
        );
        assert_eq!(
            file_message(&report(
                "out/a",
                FileOutcome::Failed {
                    reason: "permission denied".into()
                }
            )),
            "Error writing file \"out/a\": permission denied"
        );
        assert_eq!(
            file_message(&report("out/a", FileOutcome::WouldCreate)),
            "Would create file \"out/a\"."
        );
        assert_eq!(
            file_message(&report("out/a", FileOutcome::WouldOverwrite)),
            "Would overwrite file \"out/a\"."
        );
    }

    #[test]
    fn summary_lines() {
        let summary = RunSummary {
            created: 2,
            overwritten: 1,
            failed: 1,
            ..RunSummary::default()
        };
        assert_eq!(
            summary_line(&summary, false),
            "Done: 2 created, 1 overwritten, 0 skipped, 1 failed."
        );

        let dry = RunSummary {
            would_create: 3,
            excluded: 1,
            ..RunSummary::default()
        };
        assert_eq!(
            summary_line(&dry, true),
            "Dry run: 3 to create, 0 to overwrite, 1 excluded."
        );
    }
}
