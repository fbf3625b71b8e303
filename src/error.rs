use crate::definition::WorkflowId;
use crate::validator::ValidationFailure;
use thiserror::Error;

fn failure_codes(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(|f| f.code())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur while building, editing, or persisting workflows.
///
/// Each variant represents one failure class with its own recovery story:
/// validation failures are user-correctable and resolved before any
/// repository call, `NotFound` means a stale reference (reload the list),
/// and `TransientFetch` is retryable.
///
/// # Non-Exhaustive
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code. When matching
/// on this error, always include a wildcard pattern:
///
/// ```
/// use nagare::WorkflowError;
///
/// fn describe(error: &WorkflowError) -> String {
///     match error {
///         WorkflowError::NotFound(id) => format!("workflow {} is gone", id),
///         WorkflowError::TransientFetch { details } => format!("retry: {}", details),
///         WorkflowError::Invalid(failures) => format!("{} problems", failures.len()),
///         other => other.to_string(),
///     }
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum WorkflowError {
    /// A step type string was not one of the closed set.
    ///
    /// Returned by [`crate::StepType`]'s `FromStr` implementation; the
    /// in-crate API uses the enum directly, so this only surfaces when
    /// parsing external input.
    #[error("Unknown step type: {0}")]
    UnknownStepType(String),

    /// A step index was outside the definition's step sequence.
    ///
    /// The sequence is left unchanged when this is returned.
    #[error("Step index {index} is out of range (steps: {len})")]
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// The number of steps at the time of the call
        len: usize,
    },

    /// A repository call referenced a workflow id that no longer exists.
    ///
    /// Typically a stale reference to a deleted definition. Recoverable
    /// by reloading the list.
    #[error("Workflow not found: {0}")]
    NotFound(WorkflowId),

    /// A read from the repository failed transiently.
    ///
    /// The only retryable variant; see [`crate::RetryPolicy`].
    #[error("Transient fetch failure: {details}")]
    TransientFetch {
        /// Details about the failure
        details: String,
    },

    /// The draft failed save-time validation.
    ///
    /// Carries every failure at once so a form can show all of them.
    /// No repository call is made when validation fails.
    #[error("Draft failed validation: {}", failure_codes(.0))]
    Invalid(Vec<ValidationFailure>),

    /// A save was requested while a previous save was still in flight.
    ///
    /// The outstanding request is not cancelled; the duplicate is rejected.
    #[error("A save is already in flight")]
    SaveInFlight,
}

impl WorkflowError {
    /// Returns true for failures worth retrying automatically.
    ///
    /// Only transient fetch failures qualify; mutations are never
    /// retried without user action.
    pub fn is_transient(&self) -> bool {
        matches!(self, WorkflowError::TransientFetch { .. })
    }
}
