//! # Nagare (流れ)
//!
//! A lightweight workflow definition and validation library for Rust.
//!
//! The name "Nagare" (流れ) means "flow" in Japanese, representing the
//! customer journeys this library models: ordered sequences of automation
//! steps assembled, validated, and handed to a persistence boundary.
//!
//! This crate covers the *definition* side of workflow automation - it
//! does not schedule or execute steps. A definition is built
//! interactively (append, reorder, edit steps), checked by a validator
//! that reports every problem at once, and saved whole through an async
//! repository trait.
//!
//! ## Features
//!
//! - **Type-safe configs**: per-step configuration is a tagged union
//!   ([`StepConfig`]), so a step's config shape always matches its type
//! - **Save-time validation**: [`validate`] accumulates all failures in a
//!   fixed order instead of stopping at the first
//! - **Async repository boundary**: [`WorkflowRepository`] with a
//!   swappable in-memory implementation ([`InMemoryRepository`]) that
//!   simulates latency and transient failures
//! - **Bounded retries**: [`RetryPolicy`] drives read-path retries with a
//!   plain loop, never recursive scheduling; mutations are never retried
//! - **Guarded saves**: [`WorkflowEditor`] rejects duplicate submits
//!   while a save is in flight
//! - **Error Handling**: structured errors with `thiserror`
//!
//! ## Quick Start
//!
//! ```rust
//! use nagare::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), WorkflowError> {
//! let repo = InMemoryRepository::new();
//! let mut editor = WorkflowEditor::create();
//!
//! editor.draft_mut().set_metadata(MetadataUpdate {
//!     name: Some("Welcome New Customers".to_string()),
//!     description: Some("Automated welcome sequence".to_string()),
//!     package_name: Some("Premium Package".to_string()),
//!     ..Default::default()
//! });
//! editor.draft_mut().add_step(StepType::Email);
//! editor.draft_mut().add_step(StepType::Delay);
//! editor.draft_mut().add_step(StepType::Task);
//!
//! let saved = editor.save(&repo).await?;
//! assert!(saved.id.is_some());
//! assert_eq!(saved.steps.len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Editing Steps
//!
//! ```rust
//! use nagare::{StepConfig, StepType, WorkflowDefinition};
//!
//! let mut draft = WorkflowDefinition::draft();
//! draft.add_step(StepType::Delay);
//! draft.add_step(StepType::Email);
//!
//! // move up / move down controls swap adjacent steps
//! draft.move_step(1, 0)?;
//! assert_eq!(draft.steps[0].step_type(), StepType::Email);
//!
//! // editing replaces the whole typed payload
//! if let Some(step) = draft.step_mut(0) {
//!     step.update_config(StepConfig::Email {
//!         subject: "Welcome!".to_string(),
//!         template: "welcome_email".to_string(),
//!         variables: vec!["first_name".to_string()],
//!     });
//! }
//! # Ok::<(), nagare::WorkflowError>(())
//! ```
//!
//! ## Validation
//!
//! ```rust
//! use nagare::{validate, ValidationFailure, WorkflowDefinition};
//!
//! let draft = WorkflowDefinition::draft();
//! let failures = validate(&draft);
//! assert_eq!(failures.len(), 3);
//! assert_eq!(failures[0], ValidationFailure::NameRequired);
//!
//! for failure in &failures {
//!     eprintln!("{}", failure); // user-facing message
//! }
//! ```
//!
//! ## Retrying Reads
//!
//! Read paths may see transient failures; wrap them in a bounded policy.
//! Mutations (create/update/delete) are never retried automatically.
//!
//! ```rust
//! use nagare::{retry_with_policy, InMemoryRepository, RetryPolicy, WorkflowRepository};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), nagare::WorkflowError> {
//! let repo = InMemoryRepository::new();
//! let policy = RetryPolicy::linear(3, Duration::from_millis(10));
//!
//! let workflows = retry_with_policy(&policy, || repo.list()).await?;
//! assert!(workflows.is_empty());
//! # Ok(())
//! # }
//! ```

mod definition;
mod editor;
mod error;
mod memory;
mod repository;
mod retry;
mod step;
mod validator;

pub mod prelude;

pub use definition::{
    is_known_package, MetadataUpdate, WorkflowDefinition, WorkflowId, WorkflowStats,
    PACKAGE_NAMES,
};
pub use editor::WorkflowEditor;
pub use error::WorkflowError;
pub use memory::InMemoryRepository;
pub use repository::WorkflowRepository;
pub use retry::{retry_with_policy, RetryPolicy};
pub use step::{
    fields_for, Assignee, DelayUnit, FieldSpec, InputKind, StepConfig, StepId, StepType,
    WorkflowStep,
};
pub use validator::{validate, ValidationFailure};
