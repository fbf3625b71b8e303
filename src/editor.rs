use crate::definition::WorkflowDefinition;
use crate::error::WorkflowError;
use crate::repository::WorkflowRepository;
use crate::validator::validate;
use tracing::{info, warn};

/// Editing session for one workflow draft.
///
/// Owns the single in-memory draft a user session mutates (there is
/// exactly one mutator, the active editor). Gates saves: a draft must
/// pass validation before any repository call, and a second save while
/// one is outstanding is rejected rather than fired concurrently.
///
/// # Examples
///
/// ```
/// use nagare::{InMemoryRepository, MetadataUpdate, StepType, WorkflowEditor};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), nagare::WorkflowError> {
/// let repo = InMemoryRepository::new();
/// let mut editor = WorkflowEditor::create();
///
/// editor.draft_mut().set_metadata(MetadataUpdate {
///     name: Some("Welcome".to_string()),
///     package_name: Some("Premium Package".to_string()),
///     ..Default::default()
/// });
/// editor.draft_mut().add_step(StepType::Email);
///
/// let saved = editor.save(&repo).await?;
/// assert!(saved.id.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WorkflowEditor {
    draft: WorkflowDefinition,
    saving: bool,
}

impl Default for WorkflowEditor {
    fn default() -> Self {
        Self::create()
    }
}

impl WorkflowEditor {
    /// Starts a session on a fresh empty draft ("create" flow).
    pub fn create() -> Self {
        Self {
            draft: WorkflowDefinition::draft(),
            saving: false,
        }
    }

    /// Starts a session on an existing definition ("edit" flow).
    ///
    /// The persisted value is loaded whole into the draft; on save the
    /// full value is submitted as a replacement.
    pub fn edit(existing: WorkflowDefinition) -> Self {
        Self {
            draft: existing,
            saving: false,
        }
    }

    /// The draft being edited.
    pub fn draft(&self) -> &WorkflowDefinition {
        &self.draft
    }

    /// Mutable access to the draft for interactive edits.
    pub fn draft_mut(&mut self) -> &mut WorkflowDefinition {
        &mut self.draft
    }

    /// True while a save is outstanding.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Validates the draft and persists it through the repository.
    ///
    /// Order of gates:
    /// 1. [`WorkflowError::SaveInFlight`] if a save is already running.
    /// 2. [`WorkflowError::Invalid`] with every failure if validation
    ///    fails; no repository call is made.
    /// 3. One `create` or `update` call depending on whether the draft
    ///    already has an id.
    ///
    /// On success the persisted value replaces the draft and is also
    /// returned. On repository failure the draft is left unchanged, so
    /// nothing is lost and the user can retry.
    pub async fn save(
        &mut self,
        repo: &dyn WorkflowRepository,
    ) -> Result<WorkflowDefinition, WorkflowError> {
        if self.saving {
            warn!("Rejected save for '{}': already in flight", self.draft.name);
            return Err(WorkflowError::SaveInFlight);
        }

        let failures = validate(&self.draft);
        if !failures.is_empty() {
            return Err(WorkflowError::Invalid(failures));
        }

        self.saving = true;
        let result = match self.draft.id.clone() {
            Some(id) => repo.update(&id, self.draft.clone()).await,
            None => repo.create(self.draft.clone()).await,
        };
        self.saving = false;

        match result {
            Ok(persisted) => {
                info!("Saved workflow '{}'", persisted.name);
                self.draft = persisted.clone();
                Ok(persisted)
            }
            Err(error) => {
                warn!("Save failed for '{}': {}", self.draft.name, error);
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::MetadataUpdate;
    use crate::memory::InMemoryRepository;
    use crate::step::StepType;
    use crate::validator::ValidationFailure;
    use crate::WorkflowId;

    fn filled_editor() -> WorkflowEditor {
        let mut editor = WorkflowEditor::create();
        editor.draft_mut().set_metadata(MetadataUpdate {
            name: Some("Welcome".to_string()),
            package_name: Some("Premium Package".to_string()),
            ..Default::default()
        });
        editor.draft_mut().add_step(StepType::Email);
        editor
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_draft() {
        let repo = InMemoryRepository::new();
        let mut editor = WorkflowEditor::create();

        let result = editor.save(&repo).await;
        assert_eq!(
            result,
            Err(WorkflowError::Invalid(vec![
                ValidationFailure::NameRequired,
                ValidationFailure::PackageRequired,
                ValidationFailure::AtLeastOneStepRequired,
            ]))
        );
        // nothing reached the repository
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_creates_then_updates() {
        let repo = InMemoryRepository::new();
        let mut editor = filled_editor();

        let created = editor.save(&repo).await.unwrap();
        assert!(created.id.is_some());
        assert_eq!(created.steps.len(), 1);
        assert_eq!(editor.draft().id, created.id);

        editor.draft_mut().name = "Welcome v2".to_string();
        let updated = editor.save(&repo).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(repo.list().await.unwrap().len(), 1);
        assert_eq!(repo.list().await.unwrap()[0].name, "Welcome v2");
    }

    #[tokio::test]
    async fn test_repository_failure_leaves_draft_unchanged() {
        let repo = InMemoryRepository::new();
        let mut editor = filled_editor();
        // stale reference to a definition that was never persisted
        editor.draft_mut().id = Some(WorkflowId::new("999"));
        let before = editor.draft().clone();

        let result = editor.save(&repo).await;
        assert_eq!(result, Err(WorkflowError::NotFound(WorkflowId::new("999"))));
        assert_eq!(editor.draft(), &before);
        assert!(!editor.is_saving());
    }

    #[tokio::test]
    async fn test_duplicate_save_rejected_while_in_flight() {
        let mut editor = filled_editor();
        editor.saving = true;

        let repo = InMemoryRepository::new();
        let result = editor.save(&repo).await;
        assert_eq!(result, Err(WorkflowError::SaveInFlight));
    }

    #[tokio::test]
    async fn test_edit_session_loads_persisted_value() {
        let repo = InMemoryRepository::new();
        let mut editor = filled_editor();
        let saved = editor.save(&repo).await.unwrap();

        let mut session = WorkflowEditor::edit(saved.clone());
        assert_eq!(session.draft(), &saved);

        session.draft_mut().add_step(StepType::Delay);
        let updated = session.save(&repo).await.unwrap();
        assert_eq!(updated.steps.len(), 2);
    }
}
