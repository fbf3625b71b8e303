use crate::error::WorkflowError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of step types a workflow can contain.
///
/// Drives which configuration shape applies and which label the UI shows.
/// Parsing from a string fails with [`WorkflowError::UnknownStepType`] for
/// anything outside the set.
///
/// # Examples
///
/// ```
/// use nagare::StepType;
///
/// let step_type: StepType = "email".parse()?;
/// assert_eq!(step_type, StepType::Email);
/// assert_eq!(step_type.label(), "Send Email");
///
/// assert!("fax".parse::<StepType>().is_err());
/// # Ok::<(), nagare::WorkflowError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    /// Wait for a specified time before the next step.
    Delay,
    /// Send automated email to the customer.
    Email,
    /// Send WhatsApp message to the customer.
    Whatsapp,
    /// Create a follow-up task for staff.
    Task,
}

impl StepType {
    /// All step types, in the order a picker should offer them.
    pub const ALL: [StepType; 4] = [
        StepType::Delay,
        StepType::Email,
        StepType::Whatsapp,
        StepType::Task,
    ];

    /// The lowercase wire identifier for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Delay => "delay",
            StepType::Email => "email",
            StepType::Whatsapp => "whatsapp",
            StepType::Task => "task",
        }
    }

    /// Human label used as the default step name.
    pub fn label(&self) -> &'static str {
        match self {
            StepType::Delay => "Wait/Delay",
            StepType::Email => "Send Email",
            StepType::Whatsapp => "WhatsApp Message",
            StepType::Task => "Create Task",
        }
    }

    /// One-line description for a step picker.
    pub fn description(&self) -> &'static str {
        match self {
            StepType::Delay => "Wait for a specified time before next step",
            StepType::Email => "Send automated email to customer",
            StepType::Whatsapp => "Send WhatsApp message to customer",
            StepType::Task => "Create follow-up task for staff",
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StepType {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delay" => Ok(StepType::Delay),
            "email" => Ok(StepType::Email),
            "whatsapp" => Ok(StepType::Whatsapp),
            "task" => Ok(StepType::Task),
            other => Err(WorkflowError::UnknownStepType(other.to_string())),
        }
    }
}

/// Time unit for a delay step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelayUnit {
    /// Minutes.
    Minutes,
    /// Hours.
    Hours,
    /// Days (default).
    #[default]
    Days,
}

impl fmt::Display for DelayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelayUnit::Minutes => write!(f, "minutes"),
            DelayUnit::Hours => write!(f, "hours"),
            DelayUnit::Days => write!(f, "days"),
        }
    }
}

/// Who a task step is assigned to.
///
/// `Auto` is the sentinel for automatic assignment; anything else names a
/// staff member. Serialized as a plain string ("auto" or the name).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Assignee {
    /// Let the system pick an assignee.
    #[default]
    Auto,
    /// A specific staff member.
    Staff(String),
}

impl From<String> for Assignee {
    fn from(s: String) -> Self {
        if s == "auto" {
            Assignee::Auto
        } else {
            Assignee::Staff(s)
        }
    }
}

impl From<Assignee> for String {
    fn from(a: Assignee) -> Self {
        match a {
            Assignee::Auto => "auto".to_string(),
            Assignee::Staff(name) => name,
        }
    }
}

/// Per-type configuration payload of a workflow step.
///
/// A tagged union keyed by the step type, so the config shape always
/// matches the type by construction; switching a step's type means
/// replacing the whole payload with the new type's default.
///
/// # Examples
///
/// ```
/// use nagare::{DelayUnit, StepConfig, StepType};
///
/// let config = StepConfig::default_for(StepType::Delay);
/// assert_eq!(
///     config,
///     StepConfig::Delay { duration: 1, unit: DelayUnit::Days }
/// );
/// assert_eq!(config.step_type(), StepType::Delay);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StepConfig {
    /// Wait before the next step.
    Delay {
        /// How long to wait, in `unit`s. Always positive.
        duration: u32,
        /// Unit of the duration.
        unit: DelayUnit,
    },
    /// Automated email.
    Email {
        /// Subject line.
        subject: String,
        /// Template identifier or body.
        template: String,
        /// Template variables, in substitution order.
        variables: Vec<String>,
    },
    /// WhatsApp message.
    Whatsapp {
        /// Template identifier or body.
        template: String,
        /// Template variables, in substitution order.
        variables: Vec<String>,
    },
    /// Follow-up task for staff.
    #[serde(rename_all = "camelCase")]
    Task {
        /// Task title.
        title: String,
        /// Longer description.
        description: String,
        /// Assignment target.
        assign_to: Assignee,
    },
}

impl StepConfig {
    /// Canonical default configuration for a step type.
    ///
    /// Delay steps default to one day; email/whatsapp fields start empty;
    /// task steps start empty with automatic assignment.
    pub fn default_for(step_type: StepType) -> Self {
        match step_type {
            StepType::Delay => StepConfig::Delay {
                duration: 1,
                unit: DelayUnit::Days,
            },
            StepType::Email => StepConfig::Email {
                subject: String::new(),
                template: String::new(),
                variables: Vec::new(),
            },
            StepType::Whatsapp => StepConfig::Whatsapp {
                template: String::new(),
                variables: Vec::new(),
            },
            StepType::Task => StepConfig::Task {
                title: String::new(),
                description: String::new(),
                assign_to: Assignee::Auto,
            },
        }
    }

    /// The step type this payload belongs to.
    pub fn step_type(&self) -> StepType {
        match self {
            StepConfig::Delay { .. } => StepType::Delay,
            StepConfig::Email { .. } => StepType::Email,
            StepConfig::Whatsapp { .. } => StepType::Whatsapp,
            StepConfig::Task { .. } => StepType::Task,
        }
    }
}

/// How a form should render one config field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Positive integer input.
    Number,
    /// Choice among fixed options.
    Select,
    /// Single-line text.
    Text,
    /// Multi-line text.
    TextArea,
    /// Editable list of strings.
    StringList,
}

/// Descriptor for one editable config field.
///
/// Purely presentational; carries no validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Config field key.
    pub key: &'static str,
    /// Label a form should show.
    pub label: &'static str,
    /// Input widget kind.
    pub input: InputKind,
}

/// Ordered field descriptors for a step type's config form.
pub fn fields_for(step_type: StepType) -> Vec<FieldSpec> {
    match step_type {
        StepType::Delay => vec![
            FieldSpec {
                key: "duration",
                label: "Duration",
                input: InputKind::Number,
            },
            FieldSpec {
                key: "unit",
                label: "Unit",
                input: InputKind::Select,
            },
        ],
        StepType::Email => vec![
            FieldSpec {
                key: "subject",
                label: "Subject",
                input: InputKind::Text,
            },
            FieldSpec {
                key: "template",
                label: "Template",
                input: InputKind::TextArea,
            },
            FieldSpec {
                key: "variables",
                label: "Variables",
                input: InputKind::StringList,
            },
        ],
        StepType::Whatsapp => vec![
            FieldSpec {
                key: "template",
                label: "Template",
                input: InputKind::TextArea,
            },
            FieldSpec {
                key: "variables",
                label: "Variables",
                input: InputKind::StringList,
            },
        ],
        StepType::Task => vec![
            FieldSpec {
                key: "title",
                label: "Title",
                input: InputKind::Text,
            },
            FieldSpec {
                key: "description",
                label: "Description",
                input: InputKind::TextArea,
            },
            FieldSpec {
                key: "assignTo",
                label: "Assign To",
                input: InputKind::Select,
            },
        ],
    }
}

/// Identifier of a step, unique within one definition.
///
/// Identity is separate from position: reordering steps never changes ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepId(pub u64);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One ordered step in a workflow definition.
///
/// Steps exist only inside a [`crate::WorkflowDefinition`]'s step sequence
/// and are created through [`crate::WorkflowDefinition::add_step`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    /// Identifier, unique within the definition.
    pub id: StepId,
    /// Display label, initialized from the type's human label.
    pub name: String,
    /// Type-specific configuration payload.
    pub config: StepConfig,
}

impl WorkflowStep {
    pub(crate) fn new(id: StepId, step_type: StepType) -> Self {
        Self {
            id,
            name: step_type.label().to_string(),
            config: StepConfig::default_for(step_type),
        }
    }

    /// The step's type, derived from its config payload.
    pub fn step_type(&self) -> StepType {
        self.config.step_type()
    }

    /// Replaces the configuration payload.
    ///
    /// Field contents are not validated here; save-time checks are the
    /// validator's job and most per-step fields are optional.
    pub fn update_config(&mut self, config: StepConfig) {
        self.config = config;
    }

    /// One-line preview of the configuration, as a step card shows it.
    pub fn summary(&self) -> String {
        match &self.config {
            StepConfig::Delay { duration, unit } => {
                format!("Wait for {} {}", duration, unit)
            }
            StepConfig::Email { subject, .. } => {
                if subject.is_empty() {
                    "Subject: Not configured".to_string()
                } else {
                    format!("Subject: {}", subject)
                }
            }
            StepConfig::Whatsapp { template, .. } => {
                if template.is_empty() {
                    "Message template not configured".to_string()
                } else {
                    "Message template configured".to_string()
                }
            }
            StepConfig::Task { title, .. } => {
                if title.is_empty() {
                    "Task: Not configured".to_string()
                } else {
                    format!("Task: {}", title)
                }
            }
        }
    }
}
