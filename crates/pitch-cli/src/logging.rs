//! Tracing subscriber initialisation.
//!
//! Only the CLI crate calls [`init_logging`]; `pitch-core` and
//! `pitch-adapters` only emit spans and events.
//!
//! # Verbosity mapping
//!
//! | Flag(s)  | Filter level | Extras                                  |
//! |----------|--------------|-----------------------------------------|
//! | (none)   | WARN         |                                         |
//! | `-v`     | INFO         |                                         |
//! | `-vv`    | DEBUG        |                                         |
//! | `-vvv`   | TRACE        | targets, source lines, span close times |
//! | `--quiet`| ERROR        |                                         |
//!
//! `RUST_LOG` replaces the filter if set; the extras still follow `-v`.

use std::io::IsTerminal as _;

use tracing_subscriber::{
    EnvFilter, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Crates whose events reach the terminal under the default filter.
const PITCH_CRATES: [&str; 3] = ["pitch", "pitch_core", "pitch_adapters"];

/// What the subscriber shows, derived from the global flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LogSettings {
    level: &'static str,
    /// Event targets, file:line and span close timings.
    detailed: bool,
    ansi: bool,
}

impl LogSettings {
    fn from_args(args: &GlobalArgs, stderr_is_terminal: bool) -> Self {
        let level = derive_level(args);
        Self {
            level,
            detailed: level == "trace",
            ansi: !args.no_color && stderr_is_terminal,
        }
    }

    fn directives(&self) -> String {
        PITCH_CRATES
            .iter()
            .map(|krate| format!("{krate}={}", self.level))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Initialise the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros fire.
/// Returns an error if a subscriber was already registered.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let settings = LogSettings::from_args(args, std::io::stderr().is_terminal());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.directives()));

    let span_events = if settings.detailed {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(settings.detailed)
        .with_file(settings.detailed)
        .with_line_number(settings.detailed)
        .with_thread_ids(false)
        .with_span_events(span_events)
        .with_ansi(settings.ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

/// Translate the verbosity counter + quiet flag to a level string.
fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
