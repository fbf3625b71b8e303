//! Builds, saves, and lists a couple of workflows against the in-memory
//! repository, with simulated latency, the way a builder screen would.
//!
//! Run with: `cargo run --example workflow_builder`

use nagare::prelude::*;
use nagare::StepType;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), WorkflowError> {
    tracing_subscriber::fmt::init();

    let repo = InMemoryRepository::new().with_latency(Duration::from_millis(200));

    let mut editor = WorkflowEditor::create();
    editor.draft_mut().set_metadata(MetadataUpdate {
        name: Some("Welcome New Customers".to_string()),
        description: Some("Automated welcome sequence for new customer onboarding".to_string()),
        package_name: Some("Premium Package".to_string()),
        ..Default::default()
    });
    editor.draft_mut().add_step(StepType::Email);
    editor.draft_mut().add_step(StepType::Delay);
    editor.draft_mut().add_step(StepType::Task);

    let saved = editor.save(&repo).await?;
    println!("Saved '{}' with {} steps", saved.name, saved.steps.len());
    for (index, step) in saved.steps.iter().enumerate() {
        println!("  {}. {} - {}", index + 1, step.name, step.summary());
    }

    // a second editing session on the persisted value
    let id = saved.id.clone().ok_or_else(|| WorkflowError::TransientFetch {
        details: "repository returned a definition without an id".to_string(),
    })?;
    let mut session = WorkflowEditor::edit(repo.get(&id).await?);
    session.draft_mut().move_step(1, 0)?;
    session.save(&repo).await?;

    // dashboard-style listing with bounded retry
    let policy = RetryPolicy::dashboard_default();
    let workflows = retry_with_policy(&policy, || repo.list()).await?;
    println!("{} workflow(s) stored:", workflows.len());
    for workflow in &workflows {
        println!(
            "  [{}] {} ({})",
            if workflow.is_active { "active" } else { "paused" },
            workflow.name,
            workflow.package_name
        );
    }

    Ok(())
}
