//! Variable resolution - fills every `user_input` value before planning.
//!
//! Precedence per variable: `--var` override, then the interactive prompt,
//! then the document default. Variables are visited in name order so the
//! prompt sequence is stable.

use std::collections::BTreeMap;

use tracing::{debug, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Prompt},
    domain::{Variable, VariableStore},
    error::PitchResult,
};

/// Resolve every variable in `store` in place.
#[instrument(skip_all, fields(variables = store.len(), overrides = overrides.len(), interactive = interactive))]
pub fn resolve_variables(
    store: &mut VariableStore,
    prompt: &dyn Prompt,
    overrides: &BTreeMap<String, String>,
    interactive: bool,
) -> PitchResult<()> {
    for name in overrides.keys().filter(|name| !store.contains(name)) {
        warn!(variable = %name, "Ignoring override for unknown variable");
    }

    for (name, variable) in store.iter_mut() {
        // An empty override means unset, like an empty value anywhere else.
        let value = match overrides.get(name).filter(|value| !value.is_empty()) {
            Some(value) => from_override(name, variable, value)?,
            None if !interactive => from_default(name, variable)?,
            None if variable.has_options() => select_option(name, variable, prompt)?,
            None => ask_until_answered(name, variable, prompt)?,
        };
        debug!(variable = %name, value = %value, "Resolved variable");
        variable.value = value;
    }

    Ok(())
}

fn from_override(name: &str, variable: &Variable, value: &str) -> PitchResult<String> {
    if variable.has_options() && !variable.options.iter().any(|o| o == value) {
        return Err(unresolved(
            name,
            format!(
                "'{value}' is not one of the options [{}]",
                variable.options.join(", ")
            ),
        ));
    }
    Ok(value.to_string())
}

fn from_default(name: &str, variable: &Variable) -> PitchResult<String> {
    if variable.value.is_empty() {
        return Err(unresolved(name, "no default value and prompting is disabled"));
    }
    Ok(variable.value.clone())
}

fn select_option(name: &str, variable: &Variable, prompt: &dyn Prompt) -> PitchResult<String> {
    let default = variable.selected_index().unwrap_or(0);
    let index = prompt
        .select(&variable.description, &variable.options, default)
        .map_err(|e| unresolved(name, e.to_string()))?;

    variable
        .options
        .get(index)
        .cloned()
        .ok_or_else(|| unresolved(name, format!("selection {index} is out of range")))
}

fn ask_until_answered(name: &str, variable: &Variable, prompt: &dyn Prompt) -> PitchResult<String> {
    loop {
        let answer = prompt
            .ask(&variable.description)
            .map_err(|e| unresolved(name, e.to_string()))?;

        if !answer.is_empty() {
            return Ok(answer);
        }
        if !variable.value.is_empty() {
            return Ok(variable.value.clone());
        }
        debug!(variable = %name, "Empty answer, asking again");
    }
}

fn unresolved(name: &str, reason: impl Into<String>) -> crate::error::PitchError {
    ApplicationError::UnresolvedVariable {
        name: name.to_string(),
        reason: reason.into(),
    }
    .into()
}
