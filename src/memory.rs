use crate::definition::{WorkflowDefinition, WorkflowId, WorkflowStats};
use crate::error::WorkflowError;
use crate::repository::WorkflowRepository;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, SystemTime};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// In-memory [`WorkflowRepository`] for development and tests.
///
/// Owns its storage behind an async mutex; never a process-wide
/// singleton. Supports simulated network latency and deterministic
/// transient-failure injection so callers can exercise their retry and
/// error paths without flaky randomness.
///
/// # Examples
///
/// ```
/// use nagare::{InMemoryRepository, StepType, WorkflowDefinition, WorkflowRepository};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), nagare::WorkflowError> {
/// let repo = InMemoryRepository::new();
///
/// let mut draft = WorkflowDefinition::draft();
/// draft.name = "Welcome".to_string();
/// draft.package_name = "Premium Package".to_string();
/// draft.add_step(StepType::Email);
///
/// let saved = repo.create(draft).await?;
/// assert!(saved.id.is_some());
/// assert_eq!(repo.list().await?.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct InMemoryRepository {
    workflows: Mutex<Vec<WorkflowDefinition>>,
    next_id: AtomicU64,
    latency: Duration,
    fail_next_list: AtomicBool,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates an empty repository with no simulated latency.
    pub fn new() -> Self {
        Self {
            workflows: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            latency: Duration::ZERO,
            fail_next_list: AtomicBool::new(false),
        }
    }

    /// Adds a fixed simulated latency to every operation.
    ///
    /// The reference data source slept 400-1000ms per call; tests keep
    /// this at zero.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Makes the next [`WorkflowRepository::list`] call fail with a
    /// transient error, then clears the flag.
    pub fn inject_list_failure(&self) {
        self.fail_next_list.store(true, Ordering::SeqCst);
    }

    /// Pre-populates the repository, assigning ids and timestamps as
    /// `create` would.
    pub async fn seed(&self, drafts: Vec<WorkflowDefinition>) {
        let mut workflows = self.workflows.lock().await;
        let now = SystemTime::now();
        for mut draft in drafts {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            draft.id = Some(WorkflowId::new(id.to_string()));
            draft.created_at = Some(now);
            draft.updated_at = Some(now);
            workflows.push(draft);
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl WorkflowRepository for InMemoryRepository {
    async fn list(&self) -> Result<Vec<WorkflowDefinition>, WorkflowError> {
        self.simulate_latency().await;
        if self.fail_next_list.swap(false, Ordering::SeqCst) {
            warn!("Injected transient failure on list");
            return Err(WorkflowError::TransientFetch {
                details: "simulated network failure".to_string(),
            });
        }
        let workflows = self.workflows.lock().await;
        debug!("Listing {} workflows", workflows.len());
        Ok(workflows.clone())
    }

    async fn get(&self, id: &WorkflowId) -> Result<WorkflowDefinition, WorkflowError> {
        self.simulate_latency().await;
        let workflows = self.workflows.lock().await;
        workflows
            .iter()
            .find(|w| w.id.as_ref() == Some(id))
            .cloned()
            .ok_or_else(|| WorkflowError::NotFound(id.clone()))
    }

    async fn create(
        &self,
        draft: WorkflowDefinition,
    ) -> Result<WorkflowDefinition, WorkflowError> {
        self.simulate_latency().await;
        let mut workflows = self.workflows.lock().await;
        let id = WorkflowId::new(self.next_id.fetch_add(1, Ordering::SeqCst).to_string());
        let now = SystemTime::now();

        let mut persisted = draft;
        persisted.id = Some(id.clone());
        persisted.created_at = Some(now);
        persisted.updated_at = Some(now);
        persisted.stats = WorkflowStats::default();

        workflows.push(persisted.clone());
        info!("Created workflow '{}' ({})", persisted.name, id);
        Ok(persisted)
    }

    async fn update(
        &self,
        id: &WorkflowId,
        definition: WorkflowDefinition,
    ) -> Result<WorkflowDefinition, WorkflowError> {
        self.simulate_latency().await;
        let mut workflows = self.workflows.lock().await;
        let existing = workflows
            .iter_mut()
            .find(|w| w.id.as_ref() == Some(id))
            .ok_or_else(|| WorkflowError::NotFound(id.clone()))?;

        let mut persisted = definition;
        persisted.id = Some(id.clone());
        persisted.created_at = existing.created_at;
        persisted.updated_at = Some(SystemTime::now());
        // stats stay repository-owned; an incoming draft never overwrites them
        persisted.stats = existing.stats.clone();

        *existing = persisted.clone();
        info!("Updated workflow '{}' ({})", persisted.name, id);
        Ok(persisted)
    }

    async fn delete(&self, id: &WorkflowId) -> Result<(), WorkflowError> {
        self.simulate_latency().await;
        let mut workflows = self.workflows.lock().await;
        let index = workflows
            .iter()
            .position(|w| w.id.as_ref() == Some(id))
            .ok_or_else(|| WorkflowError::NotFound(id.clone()))?;
        workflows.remove(index);
        info!("Deleted workflow {}", id);
        Ok(())
    }

    async fn set_active(
        &self,
        id: &WorkflowId,
        is_active: bool,
    ) -> Result<WorkflowDefinition, WorkflowError> {
        self.simulate_latency().await;
        let mut workflows = self.workflows.lock().await;
        let existing = workflows
            .iter_mut()
            .find(|w| w.id.as_ref() == Some(id))
            .ok_or_else(|| WorkflowError::NotFound(id.clone()))?;
        existing.is_active = is_active;
        existing.updated_at = Some(SystemTime::now());
        debug!("Workflow {} is now {}", id, if is_active { "active" } else { "paused" });
        Ok(existing.clone())
    }

    async fn stats(&self, id: &WorkflowId) -> Result<WorkflowStats, WorkflowError> {
        self.simulate_latency().await;
        let workflows = self.workflows.lock().await;
        workflows
            .iter()
            .find(|w| w.id.as_ref() == Some(id))
            .map(|w| w.stats.clone())
            .ok_or_else(|| WorkflowError::NotFound(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::MetadataUpdate;
    use crate::step::StepType;

    fn draft(name: &str) -> WorkflowDefinition {
        let mut draft = WorkflowDefinition::draft();
        draft.set_metadata(MetadataUpdate {
            name: Some(name.to_string()),
            package_name: Some("Basic Package".to_string()),
            ..Default::default()
        });
        draft.add_step(StepType::Email);
        draft
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let repo = InMemoryRepository::new();
        let saved = repo.create(draft("Welcome")).await.unwrap();

        assert!(saved.id.is_some());
        assert!(saved.created_at.is_some());
        assert_eq!(saved.created_at, saved.updated_at);
        assert_eq!(saved.stats, WorkflowStats::default());
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_unique() {
        let repo = InMemoryRepository::new();
        let first = repo.create(draft("A")).await.unwrap();
        let second = repo.create(draft("B")).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_update_preserves_created_at_and_stats() {
        let repo = InMemoryRepository::new();
        let saved = repo.create(draft("Welcome")).await.unwrap();
        let id = saved.id.clone().unwrap();

        let mut edited = saved.clone();
        edited.name = "Welcome v2".to_string();
        edited.stats.trigger_count = 999; // must not stick

        let updated = repo.update(&id, edited).await.unwrap();
        assert_eq!(updated.name, "Welcome v2");
        assert_eq!(updated.created_at, saved.created_at);
        assert_eq!(updated.stats.trigger_count, 0);
    }

    #[tokio::test]
    async fn test_update_unknown_id_not_found() {
        let repo = InMemoryRepository::new();
        let missing = WorkflowId::new("999");
        let result = repo.update(&missing, draft("Ghost")).await;
        assert_eq!(result, Err(WorkflowError::NotFound(missing)));
    }

    #[tokio::test]
    async fn test_delete_then_get_not_found() {
        let repo = InMemoryRepository::new();
        let saved = repo.create(draft("Welcome")).await.unwrap();
        let id = saved.id.clone().unwrap();

        repo.delete(&id).await.unwrap();
        assert_eq!(repo.get(&id).await, Err(WorkflowError::NotFound(id.clone())));
        assert_eq!(repo.delete(&id).await, Err(WorkflowError::NotFound(id)));
    }

    #[tokio::test]
    async fn test_set_active_toggles_flag() {
        let repo = InMemoryRepository::new();
        let saved = repo.create(draft("Welcome")).await.unwrap();
        let id = saved.id.clone().unwrap();
        assert!(saved.is_active);

        let paused = repo.set_active(&id, false).await.unwrap();
        assert!(!paused.is_active);
        assert!(!repo.get(&id).await.unwrap().is_active);
    }

    #[tokio::test]
    async fn test_injected_list_failure_clears() {
        let repo = InMemoryRepository::new();
        repo.inject_list_failure();

        assert!(matches!(
            repo.list().await,
            Err(WorkflowError::TransientFetch { .. })
        ));
        // flag is one-shot
        assert!(repo.list().await.is_ok());
    }

    #[tokio::test]
    async fn test_seed_assigns_ids() {
        let repo = InMemoryRepository::new();
        repo.seed(vec![draft("A"), draft("B")]).await;

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|w| w.id.is_some() && w.created_at.is_some()));
    }

    #[tokio::test]
    async fn test_list_preserves_step_order() {
        let repo = InMemoryRepository::new();
        let mut d = draft("Ordered");
        d.add_step(StepType::Delay);
        d.add_step(StepType::Task);
        let saved = repo.create(d).await.unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(listed[0].steps, saved.steps);
    }
}
