//! Commonly used types and traits

pub use crate::definition::{MetadataUpdate, WorkflowDefinition, WorkflowId};
pub use crate::editor::WorkflowEditor;
pub use crate::error::WorkflowError;
pub use crate::memory::InMemoryRepository;
pub use crate::repository::WorkflowRepository;
pub use crate::retry::{retry_with_policy, RetryPolicy};
pub use crate::step::{StepConfig, StepType};
pub use crate::validator::{validate, ValidationFailure};
