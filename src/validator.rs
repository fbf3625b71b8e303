use crate::definition::WorkflowDefinition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One reason a draft cannot be saved.
///
/// User-correctable and never fatal; a form surfaces the message and the
/// save is aborted client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationFailure {
    /// The workflow name is missing or blank.
    NameRequired,
    /// No target package was selected.
    PackageRequired,
    /// The step sequence is empty.
    AtLeastOneStepRequired,
}

impl ValidationFailure {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationFailure::NameRequired => "NameRequired",
            ValidationFailure::PackageRequired => "PackageRequired",
            ValidationFailure::AtLeastOneStepRequired => "AtLeastOneStepRequired",
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFailure::NameRequired => write!(f, "Workflow name is required"),
            ValidationFailure::PackageRequired => write!(f, "Package selection is required"),
            ValidationFailure::AtLeastOneStepRequired => {
                write!(f, "At least one step is required")
            }
        }
    }
}

/// Checks a draft is complete enough to persist.
///
/// Accumulates every failure instead of short-circuiting, in a fixed
/// order (name, package, steps), so a form can show all errors at once.
/// An empty result means the draft is valid.
///
/// # Examples
///
/// ```
/// use nagare::{validate, StepType, ValidationFailure, WorkflowDefinition};
///
/// let mut draft = WorkflowDefinition::draft();
/// assert_eq!(
///     validate(&draft),
///     vec![
///         ValidationFailure::NameRequired,
///         ValidationFailure::PackageRequired,
///         ValidationFailure::AtLeastOneStepRequired,
///     ]
/// );
///
/// draft.name = "Welcome".to_string();
/// draft.package_name = "Premium Package".to_string();
/// draft.add_step(StepType::Email);
/// assert!(validate(&draft).is_empty());
/// ```
pub fn validate(definition: &WorkflowDefinition) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();
    if definition.name.trim().is_empty() {
        failures.push(ValidationFailure::NameRequired);
    }
    if definition.package_name.trim().is_empty() {
        failures.push(ValidationFailure::PackageRequired);
    }
    if definition.steps.is_empty() {
        failures.push(ValidationFailure::AtLeastOneStepRequired);
    }
    failures
}
