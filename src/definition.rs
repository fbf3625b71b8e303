use crate::error::WorkflowError;
use crate::step::{StepId, StepType, WorkflowStep};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime};

/// Type-safe workflow identifier.
///
/// Assigned by the repository on create; a draft has none. Opaque to the
/// core model.
///
/// # Examples
///
/// ```
/// use nagare::WorkflowId;
///
/// let id = WorkflowId::new("42");
/// assert_eq!(id.as_str(), "42");
///
/// // From trait for ergonomic conversion
/// let id: WorkflowId = "7".into();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowId(String);

impl WorkflowId {
    /// Creates a new WorkflowId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for WorkflowId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for WorkflowId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for WorkflowId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The configured package names a workflow can target.
pub const PACKAGE_NAMES: [&str; 4] = [
    "Basic Package",
    "Premium Package",
    "Enterprise Package",
    "Custom Package",
];

/// Whether `name` is one of the configured package names.
pub fn is_known_package(name: &str) -> bool {
    PACKAGE_NAMES.contains(&name)
}

/// Aggregate statistics reported by the repository.
///
/// Read-only from the model's point of view; the core never computes
/// these. Zeroed on create.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStats {
    /// How many times the workflow has been triggered.
    pub trigger_count: u64,
    /// How many triggered runs completed.
    pub completed_count: u64,
    /// Completion percentage (0-100).
    pub completion_rate: f64,
    /// Average time from trigger to completion.
    pub average_time: Duration,
}

/// Partial metadata update merged into a draft.
///
/// Fields left as `None` keep their current value. No validation happens
/// on merge; that is deferred to save time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataUpdate {
    /// New workflow name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New target package.
    pub package_name: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// A named, ordered sequence of automation steps.
///
/// The central model of this crate: top-level metadata plus the step
/// sequence, where order is execution/display order and is preserved
/// across edits and persistence. Created as an empty draft, populated
/// interactively, validated on save, then handed whole to the repository
/// (full replacement, no partial patch).
///
/// # Examples
///
/// ```
/// use nagare::{MetadataUpdate, StepType, WorkflowDefinition};
///
/// let mut draft = WorkflowDefinition::draft();
/// draft.set_metadata(MetadataUpdate {
///     name: Some("Welcome New Customers".to_string()),
///     package_name: Some("Premium Package".to_string()),
///     ..Default::default()
/// });
/// draft.add_step(StepType::Email);
/// draft.add_step(StepType::Delay);
///
/// assert_eq!(draft.steps.len(), 2);
/// assert!(draft.id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    /// Repository-assigned identifier; `None` on a draft.
    pub id: Option<WorkflowId>,
    /// Display name; required before save.
    pub name: String,
    /// Optional free-text description.
    pub description: String,
    /// Target package; must be set before save.
    pub package_name: String,
    /// Ordered step sequence.
    pub steps: Vec<WorkflowStep>,
    /// Whether the workflow is eligible to run.
    pub is_active: bool,
    /// Set by the repository on create.
    pub created_at: Option<SystemTime>,
    /// Refreshed by the repository on every mutation.
    pub updated_at: Option<SystemTime>,
    /// Repository-reported aggregates.
    pub stats: WorkflowStats,
}

impl Default for WorkflowDefinition {
    fn default() -> Self {
        Self::draft()
    }
}

impl WorkflowDefinition {
    /// Creates an empty draft: no id, blank metadata, no steps, active.
    pub fn draft() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            package_name: String::new(),
            steps: Vec::new(),
            is_active: true,
            created_at: None,
            updated_at: None,
            stats: WorkflowStats::default(),
        }
    }

    fn fresh_step_id(&self) -> StepId {
        StepId(
            self.steps
                .iter()
                .map(|s| s.id.0)
                .max()
                .map_or(0, |max| max + 1),
        )
    }

    /// Appends a new step of the given type with its default config.
    ///
    /// Always succeeds; returns the new step's id.
    pub fn add_step(&mut self, step_type: StepType) -> StepId {
        let id = self.fresh_step_id();
        self.steps.push(WorkflowStep::new(id, step_type));
        id
    }

    /// Removes the step at `index`.
    ///
    /// Fails with [`WorkflowError::IndexOutOfRange`] and leaves the
    /// sequence unchanged if `index` is out of bounds.
    pub fn remove_step(&mut self, index: usize) -> Result<WorkflowStep, WorkflowError> {
        if index >= self.steps.len() {
            return Err(WorkflowError::IndexOutOfRange {
                index,
                len: self.steps.len(),
            });
        }
        Ok(self.steps.remove(index))
    }

    /// Relocates the step at `from` to position `to`, shifting the steps
    /// in between.
    ///
    /// The general splice is supported, though editors only exercise
    /// adjacent swaps (move up/down). No-op when `from == to`. Fails with
    /// [`WorkflowError::IndexOutOfRange`] if either index is out of bounds.
    pub fn move_step(&mut self, from: usize, to: usize) -> Result<(), WorkflowError> {
        let len = self.steps.len();
        for index in [from, to] {
            if index >= len {
                return Err(WorkflowError::IndexOutOfRange { index, len });
            }
        }
        if from != to {
            let step = self.steps.remove(from);
            self.steps.insert(to, step);
        }
        Ok(())
    }

    /// Merges metadata updates into the draft.
    ///
    /// No validation is performed here; blank names and unknown packages
    /// are caught by the validator at save time.
    pub fn set_metadata(&mut self, update: MetadataUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(package_name) = update.package_name {
            self.package_name = package_name;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
    }

    /// Step at `index`, if any.
    pub fn step(&self, index: usize) -> Option<&WorkflowStep> {
        self.steps.get(index)
    }

    /// Mutable step at `index`, if any.
    pub fn step_mut(&mut self, index: usize) -> Option<&mut WorkflowStep> {
        self.steps.get_mut(index)
    }
}
