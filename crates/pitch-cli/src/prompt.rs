//! Terminal implementation of the [`Prompt`] port.

use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

use pitch_core::{
    application::{ApplicationError, ports::Prompt},
    error::{PitchError, PitchResult},
};

/// Asks questions on the controlling terminal via `dialoguer`.
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TerminalPrompt {
    fn ask(&self, label: &str) -> PitchResult<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)
    }

    fn select(&self, label: &str, options: &[String], default: usize) -> PitchResult<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(label)
            .items(options)
            .default(default.min(options.len().saturating_sub(1)))
            .interact()
            .map_err(prompt_error)
    }

    fn confirm(&self, label: &str) -> PitchResult<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(label)
            .default(false)
            .interact()
            .map_err(prompt_error)
    }
}

fn prompt_error(e: dialoguer::Error) -> PitchError {
    ApplicationError::Prompt {
        reason: e.to_string(),
    }
    .into()
}
