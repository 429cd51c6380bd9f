//! The scaffold document model.
//!
//! A [`Scaffold`] is parsed once from a source document, validated, has its
//! variables resolved in place, and is then turned into a plan. Every field
//! defaults when absent so that validation can report all missing fields at
//! once instead of failing on the first one during parsing.
//!
//! ```yaml
//! user_input:
//!   project:
//!     description: Project name?
//!     value: demo
//! files:
//!   "%project%/README.md":
//!     mode: 0644
//!     template: "# %project%"
//!     conditions:
//!       - field: project
//!         operator: not_equal
//!         value: skip
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::common::FileMode;

/// Root template definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Scaffold {
    #[serde(default)]
    pub user_input: VariableStore,
    #[serde(default)]
    pub files: BTreeMap<String, File>,
}

/// A user-supplied value used during tag substitution and condition checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Variable {
    /// Prompt text shown to the user.
    #[serde(default)]
    pub description: String,
    /// Default until the user answers, then the resolved value. Empty means unset.
    #[serde(default)]
    pub value: String,
    /// Allowed values; when present the prompt is a selection.
    #[serde(default)]
    pub options: Vec<String>,
}

impl Variable {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Index of the current value within `options`, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.value)
    }
}

/// Variables keyed by name, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct VariableStore(BTreeMap<String, Variable>);

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, variable: Variable) -> Self {
        self.insert(name, variable);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, variable: Variable) {
        self.0.insert(name.into(), variable);
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.0.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.0.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Current value of `name`; unknown names read as the empty string.
    pub fn value_of(&self, name: &str) -> &str {
        self.0.get(name).map_or("", |v| v.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Variable)> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Variable)> {
        self.0.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Variable)> for VariableStore {
    fn from_iter<T: IntoIterator<Item = (K, Variable)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// One file template.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct File {
    #[serde(rename = "mode", default)]
    pub permissions: FileMode,
    /// `0` derives the default `0755`.
    #[serde(rename = "dir_mode", default)]
    pub dir_permissions: FileMode,
    #[serde(default)]
    pub template: String,
    /// All must pass for the file to be produced.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub template_tags: TemplateTags,
    #[serde(default)]
    pub disable_templating: bool,
}

impl File {
    pub fn new(template: impl Into<String>, permissions: FileMode) -> Self {
        Self {
            permissions,
            template: template.into(),
            ..Self::default()
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_tags(mut self, tags: TemplateTags) -> Self {
        self.template_tags = tags;
        self
    }

    pub fn with_dir_permissions(mut self, mode: FileMode) -> Self {
        self.dir_permissions = mode;
        self
    }

    pub fn without_templating(mut self) -> Self {
        self.disable_templating = true;
        self
    }
}

/// Inclusion rule comparing a variable's value with a literal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub operator: Operator,
}

impl Condition {
    pub fn equal(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            operator: Operator::Equal,
        }
    }

    pub fn not_equal(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            operator: Operator::NotEqual,
        }
    }
}

/// Comparison used by a [`Condition`].
///
/// Unrecognised strings are preserved so validation can name them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum Operator {
    Equal,
    NotEqual,
    Unknown(String),
    #[default]
    Missing,
}

impl Operator {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Equal => "equal",
            Self::NotEqual => "not_equal",
            Self::Unknown(raw) => raw,
            Self::Missing => "",
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Equal | Self::NotEqual)
    }
}

impl From<String> for Operator {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "equal" => Self::Equal,
            "not_equal" => Self::NotEqual,
            "" => Self::Missing,
            _ => Self::Unknown(raw),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delimiter pair marking a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateTags {
    #[serde(default)]
    pub open: String,
    #[serde(default)]
    pub close: String,
}

impl TemplateTags {
    pub const DEFAULT_OPEN: &'static str = "%";
    pub const DEFAULT_CLOSE: &'static str = "%";

    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// The `%`/`%` pair.
    pub fn default_pair() -> Self {
        Self::new(Self::DEFAULT_OPEN, Self::DEFAULT_CLOSE)
    }

    /// Exactly one side set.
    pub fn is_mismatched(&self) -> bool {
        self.open.is_empty() != self.close.is_empty()
    }

    /// The pair to scan with: `self` when both sides are set, the default otherwise.
    pub fn effective(&self) -> (&str, &str) {
        if self.open.is_empty() || self.close.is_empty() {
            (Self::DEFAULT_OPEN, Self::DEFAULT_CLOSE)
        } else {
            (&self.open, &self.close)
        }
    }
}
