use crate::definition::{WorkflowDefinition, WorkflowId, WorkflowStats};
use crate::error::WorkflowError;
use async_trait::async_trait;

/// Persistence boundary for workflow definitions.
///
/// The core model depends on this trait but never implements persistence
/// itself; implementations are swappable (in-memory for tests and
/// development, real storage in production). Every call is a suspension
/// point that may fail: reads may fail with
/// [`WorkflowError::TransientFetch`], and any call that names an id may
/// fail with [`WorkflowError::NotFound`] when the reference is stale.
///
/// Mutations are never retried automatically; the caller surfaces the
/// failure and leaves its draft unchanged.
#[async_trait]
pub trait WorkflowRepository: Send + Sync {
    /// Returns all stored definitions.
    async fn list(&self) -> Result<Vec<WorkflowDefinition>, WorkflowError>;

    /// Returns the definition with the given id.
    async fn get(&self, id: &WorkflowId) -> Result<WorkflowDefinition, WorkflowError>;

    /// Persists a draft, assigning an id, timestamps, and zeroed stats.
    ///
    /// Returns the persisted value, which replaces the draft on the
    /// caller's side.
    async fn create(&self, draft: WorkflowDefinition)
        -> Result<WorkflowDefinition, WorkflowError>;

    /// Replaces the definition with the given id and refreshes its
    /// `updated_at`. Full-replacement semantics, no partial patch.
    async fn update(
        &self,
        id: &WorkflowId,
        definition: WorkflowDefinition,
    ) -> Result<WorkflowDefinition, WorkflowError>;

    /// Removes the definition with the given id.
    async fn delete(&self, id: &WorkflowId) -> Result<(), WorkflowError>;

    /// Toggles the active flag and refreshes `updated_at`.
    async fn set_active(
        &self,
        id: &WorkflowId,
        is_active: bool,
    ) -> Result<WorkflowDefinition, WorkflowError>;

    /// Returns the repository-reported statistics for one workflow.
    async fn stats(&self, id: &WorkflowId) -> Result<WorkflowStats, WorkflowError>;
}
