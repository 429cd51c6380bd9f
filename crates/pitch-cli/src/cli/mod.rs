//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "pitch",
    bin_name = "pitch",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Declarative project scaffolding from YAML templates",
    long_about = "Pitch reads a scaffold document (a local YAML file or an \
                  http(s) URL), asks for the variables it declares and writes \
                  the resulting files into a directory.",
    after_help = "EXAMPLES:\n\
        \x20 pitch go ./service.yaml my-service\n\
        \x20 pitch go https://example.com/scaffolds/lib.yaml . --var name=demo\n\
        \x20 pitch go ./service.yaml out --dry-run --output-format json\n\
        \x20 pitch completions bash > /usr/share/bash-completion/completions/pitch",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate files from a scaffold document.
    #[command(
        about = "Generate files from a scaffold",
        after_help = "EXAMPLES:\n\
            \x20 pitch go ./service.yaml my-service\n\
            \x20 pitch go ./service.yaml my-service --overwrite\n\
            \x20 pitch go ./service.yaml . --non-interactive --var name=api --var lang=go"
    )]
    Go(GoArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 pitch completions bash > ~/.local/share/bash-completion/completions/pitch\n\
            \x20 pitch completions zsh  > ~/.zfunc/_pitch\n\
            \x20 pitch completions fish > ~/.config/fish/completions/pitch.fish"
    )]
    Completions(CompletionsArgs),
}

// ── go ────────────────────────────────────────────────────────────────────────

/// Arguments for `pitch go`.
#[derive(Debug, Args)]
pub struct GoArgs {
    /// Scaffold document: a file path or an http(s) URL.
    ///
    /// Optional at the parser level so that a missing source is reported
    /// with pitch's own message and exit code.
    #[arg(value_name = "SOURCE", help = "Scaffold file path or http(s) URL")]
    pub source: Option<String>,

    /// Output directory. Asked for interactively when omitted.
    #[arg(value_name = "DIRECTORY", help = "Directory to generate into")]
    pub directory: Option<String>,

    /// Replace existing files without asking.
    #[arg(long = "overwrite", help = "Overwrite existing files without asking")]
    pub overwrite: bool,

    /// Preview what would be written without touching the filesystem.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,

    /// Pre-set a variable, skipping its prompt.
    #[arg(
        long = "var",
        value_name = "NAME=VALUE",
        value_parser = parse_var,
        help = "Set a variable (repeatable)"
    )]
    pub vars: Vec<(String, String)>,

    /// Never prompt; use overrides and defaults only.
    #[arg(long = "non-interactive", help = "Never prompt; use defaults")]
    pub non_interactive: bool,
}

/// Parse a `NAME=VALUE` pair. The value may itself contain `=`.
fn parse_var(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("variable name is empty in `{raw}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `pitch completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_go_command() {
        let cli = Cli::parse_from([
            "pitch",
            "go",
            "scaffold.yaml",
            "out",
            "--overwrite",
            "--var",
            "name=api",
            "--var",
            "query=a=b",
        ]);
        let Commands::Go(args) = cli.command else {
            panic!("expected Go command");
        };
        assert_eq!(args.source.as_deref(), Some("scaffold.yaml"));
        assert_eq!(args.directory.as_deref(), Some("out"));
        assert!(args.overwrite);
        assert!(!args.dry_run);
        assert_eq!(
            args.vars,
            vec![
                ("name".to_string(), "api".to_string()),
                ("query".to_string(), "a=b".to_string()),
            ]
        );
    }

    #[test]
    fn source_and_directory_are_optional() {
        let cli = Cli::parse_from(["pitch", "go"]);
        let Commands::Go(args) = cli.command else {
            panic!("expected Go command");
        };
        assert!(args.source.is_none());
        assert!(args.directory.is_none());
    }

    #[test]
    fn malformed_var_is_rejected() {
        assert!(Cli::try_parse_from(["pitch", "go", "s.yaml", "--var", "novalue"]).is_err());
        assert!(Cli::try_parse_from(["pitch", "go", "s.yaml", "--var", "=x"]).is_err());
    }

    #[test]
    fn empty_var_value_is_allowed() {
        assert_eq!(parse_var("name=").unwrap(), ("name".into(), String::new()));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["pitch", "go", "s.yaml", "-vv", "--output-format", "json"]);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.output_format, OutputFormat::Json);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["pitch", "--quiet", "--verbose", "go", "s.yaml"]);
        assert!(result.is_err());
    }
}
