use crate::domain::{
    entities::{ScaffoldPlan, scaffold::Operator, scaffold::Scaffold},
    error::{DomainError, Violation},
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// Check a freshly loaded scaffold, reporting every violation at once.
    pub fn validate_scaffold(scaffold: &Scaffold) -> Result<(), DomainError> {
        let violations = collect_violations(scaffold);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(DomainError::InvalidScaffold { violations })
        }
    }

    pub fn validate_plan(plan: &ScaffoldPlan) -> Result<(), DomainError> {
        plan.validate()
    }
}

fn collect_violations(scaffold: &Scaffold) -> Vec<Violation> {
    let mut out = Vec::new();

    for (name, variable) in scaffold.user_input.iter() {
        let at = format!("user_input[\"{name}\"]");
        if variable.description.trim().is_empty() {
            out.push(Violation::new(format!("{at}.description"), "is required"));
        }
        if variable.has_options()
            && !variable.value.is_empty()
            && variable.selected_index().is_none()
        {
            out.push(Violation::new(
                format!("{at}.value"),
                format!(
                    "default '{}' is not one of the options [{}]",
                    variable.value,
                    variable.options.join(", ")
                ),
            ));
        }
    }

    if scaffold.files.is_empty() {
        out.push(Violation::new("files", "at least one file is required"));
    }

    for (name, file) in &scaffold.files {
        let at = format!("files[\"{name}\"]");
        if file.template.is_empty() {
            out.push(Violation::new(format!("{at}.template"), "is required"));
        }
        if file.permissions.is_unset() {
            out.push(Violation::new(format!("{at}.mode"), "is required"));
        }
        if file.template_tags.is_mismatched() {
            out.push(Violation::new(
                format!("{at}.template_tags"),
                "open and close must be set together",
            ));
        }

        for (i, condition) in file.conditions.iter().enumerate() {
            let at = format!("{at}.conditions[{i}]");
            if condition.field.is_empty() {
                out.push(Violation::new(format!("{at}.field"), "is required"));
            }
            if condition.value.is_empty() {
                out.push(Violation::new(format!("{at}.value"), "is required"));
            }
            match &condition.operator {
                Operator::Equal | Operator::NotEqual => {}
                Operator::Missing => {
                    out.push(Violation::new(format!("{at}.operator"), "is required"));
                }
                Operator::Unknown(raw) => out.push(Violation::new(
                    format!("{at}.operator"),
                    format!("'{raw}' must be one of: equal, not_equal"),
                )),
            }
        }
    }

    out
}
