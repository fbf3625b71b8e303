use nagare::prelude::*;
use nagare::{DelayUnit, RetryPolicy, StepConfig, StepType};
use std::time::Duration;

fn welcome_draft() -> WorkflowDefinition {
    let mut draft = WorkflowDefinition::draft();
    draft.set_metadata(MetadataUpdate {
        name: Some("Welcome".to_string()),
        package_name: Some("Premium Package".to_string()),
        ..Default::default()
    });
    draft.add_step(StepType::Email);
    draft
}

#[tokio::test]
async fn test_create_validate_save_round_trip() {
    let repo = InMemoryRepository::new();
    let mut editor = WorkflowEditor::create();

    editor.draft_mut().set_metadata(MetadataUpdate {
        name: Some("Welcome".to_string()),
        package_name: Some("Premium Package".to_string()),
        ..Default::default()
    });
    editor.draft_mut().add_step(StepType::Email);
    assert!(validate(editor.draft()).is_empty());

    let saved = editor.save(&repo).await.unwrap();
    assert!(saved.id.as_ref().is_some_and(|id| !id.as_str().is_empty()));
    assert_eq!(saved.steps.len(), 1);
}

#[tokio::test]
async fn test_empty_draft_reports_all_failures_in_order() {
    let codes: Vec<_> = validate(&WorkflowDefinition::draft())
        .iter()
        .map(|f| f.code())
        .collect();
    assert_eq!(
        codes,
        vec!["NameRequired", "PackageRequired", "AtLeastOneStepRequired"]
    );
}

#[tokio::test]
async fn test_delay_step_default_config() {
    let mut draft = WorkflowDefinition::draft();
    draft.add_step(StepType::Delay);
    assert_eq!(
        draft.steps[0].config,
        StepConfig::Delay {
            duration: 1,
            unit: DelayUnit::Days
        }
    );
}

#[tokio::test]
async fn test_update_with_stale_id_leaves_draft_in_editor() {
    let repo = InMemoryRepository::new();
    let saved = repo.create(welcome_draft()).await.unwrap();
    let id = saved.id.clone().unwrap();
    repo.delete(&id).await.unwrap();

    // the editor still holds the now-stale definition
    let mut editor = WorkflowEditor::edit(saved.clone());
    editor.draft_mut().name = "Edited after delete".to_string();
    let before = editor.draft().clone();

    let result = editor.save(&repo).await;
    assert_eq!(result, Err(WorkflowError::NotFound(id)));
    assert_eq!(editor.draft(), &before);

    // recoverable by reloading the list
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_full_editing_session() {
    let repo = InMemoryRepository::new();
    let mut editor = WorkflowEditor::create();
    let draft = editor.draft_mut();

    draft.set_metadata(MetadataUpdate {
        name: Some("Package Renewal Reminder".to_string()),
        description: Some("Remind customers about upcoming renewals".to_string()),
        package_name: Some("Basic Package".to_string()),
        ..Default::default()
    });
    draft.add_step(StepType::Email);
    draft.add_step(StepType::Delay);
    draft.add_step(StepType::Task);

    // move the delay ahead of the email, then change its duration
    draft.move_step(1, 0).unwrap();
    if let Some(step) = draft.step_mut(0) {
        step.update_config(StepConfig::Delay {
            duration: 7,
            unit: DelayUnit::Days,
        });
    }
    draft.remove_step(2).unwrap();

    let saved = editor.save(&repo).await.unwrap();
    assert_eq!(saved.steps.len(), 2);
    assert_eq!(saved.steps[0].step_type(), StepType::Delay);
    assert_eq!(saved.steps[0].summary(), "Wait for 7 days");
    assert_eq!(saved.steps[1].step_type(), StepType::Email);

    // toggling activity goes through the repository, not the editor
    let id = saved.id.clone().unwrap();
    let paused = repo.set_active(&id, false).await.unwrap();
    assert!(!paused.is_active);
}

#[tokio::test]
async fn test_list_retry_recovers_from_transient_failure() {
    let repo = InMemoryRepository::new();
    repo.seed(vec![welcome_draft()]).await;
    repo.inject_list_failure();

    let policy = RetryPolicy::linear(3, Duration::from_millis(1));
    let workflows = retry_with_policy(&policy, || repo.list()).await.unwrap();
    assert_eq!(workflows.len(), 1);
}

#[tokio::test]
async fn test_list_without_retry_surfaces_transient_failure() {
    let repo = InMemoryRepository::new();
    repo.inject_list_failure();

    // no automatic retry for this path; the user triggers the next attempt
    let result = repo.list().await;
    assert!(matches!(result, Err(WorkflowError::TransientFetch { .. })));
    assert!(repo.list().await.is_ok());
}

#[tokio::test]
async fn test_latency_simulation_still_completes() {
    let repo = InMemoryRepository::new().with_latency(Duration::from_millis(5));
    let saved = repo.create(welcome_draft()).await.unwrap();
    assert!(saved.id.is_some());
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_stats_are_repository_reported() {
    let repo = InMemoryRepository::new();
    let saved = repo.create(welcome_draft()).await.unwrap();
    let id = saved.id.clone().unwrap();

    let stats = repo.stats(&id).await.unwrap();
    assert_eq!(stats.trigger_count, 0);
    assert_eq!(stats.completion_rate, 0.0);

    repo.delete(&id).await.unwrap();
    assert_eq!(repo.stats(&id).await, Err(WorkflowError::NotFound(id)));
}

#[tokio::test]
async fn test_serialized_step_carries_type_tag() {
    let mut draft = welcome_draft();
    draft.steps[0].update_config(StepConfig::Email {
        subject: "Welcome!".to_string(),
        template: "welcome_email".to_string(),
        variables: vec!["first_name".to_string()],
    });

    let json = serde_json::to_value(&draft.steps[0]).unwrap();
    assert_eq!(json["config"]["type"], "email");
    assert_eq!(json["config"]["subject"], "Welcome!");
}
