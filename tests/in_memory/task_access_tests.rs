//! In-memory integration tests for task access across owners and roles.

use super::helpers::{Harness, performed_at};
use rstest::rstest;
use serde_json::json;
use workday::error::AccessErrorKind;
use workday::task::{
    domain::{TaskId, TaskSummary},
    services::TaskRequest,
};

fn pump_repair() -> TaskRequest {
    TaskRequest::new("Pump repair", "Replaced the pump seal", performed_at())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owner_creates_peer_is_refused_manager_reads_plaintext() -> Result<(), eyre::Report> {
    let harness = Harness::new().await?;
    let alice = harness
        .enrol("Alice", "alice@example.com", harness.technician_role)
        .await?;
    let bob = harness
        .enrol("Bob", "bob@example.com", harness.technician_role)
        .await?;
    let boss = harness
        .enrol("Boss", "boss@example.com", harness.manager_role)
        .await?;
    let tasks = harness.services.tasks();

    let created = tasks.create(pump_repair(), &alice).await?;
    eyre::ensure!(created.owner_id == alice.id(), "owner must be the caller");

    let denied = tasks
        .get(created.id, &bob)
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("peer read should fail"))?;
    eyre::ensure!(denied.kind() == AccessErrorKind::Forbidden, "got {denied:?}");

    let seen = tasks.get(created.id, &boss).await?;
    eyre::ensure!(
        seen.summary == TaskSummary::Revealed("Replaced the pump seal".to_owned()),
        "manager should see the decrypted summary, got {:?}",
        seen.summary
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creating_a_task_publishes_one_event() -> Result<(), eyre::Report> {
    let harness = Harness::new().await?;
    let alice = harness
        .enrol("Alice", "alice@example.com", harness.technician_role)
        .await?;

    let created = harness.services.tasks().create(pump_repair(), &alice).await?;

    let published = harness.publisher.published();
    eyre::ensure!(published.len() == 1, "expected one event, got {}", published.len());
    let message = published
        .first()
        .ok_or_else(|| eyre::eyre!("missing event"))?;
    eyre::ensure!(message.queue == "tasks", "wrong queue {}", message.queue);

    let body = message.json()?;
    eyre::ensure!(
        body.get("event") == Some(&json!("task_created")),
        "wrong event name: {body}"
    );
    eyre::ensure!(
        body.get("task_id") == Some(&json!(created.id.value())),
        "wrong task id: {body}"
    );
    eyre::ensure!(
        body.get("owner_id") == Some(&json!(alice.id().value())),
        "wrong owner: {body}"
    );
    eyre::ensure!(
        body.get("summary").is_none(),
        "event must not carry the summary: {body}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listings_are_scoped_by_role() -> Result<(), eyre::Report> {
    let harness = Harness::new().await?;
    let alice = harness
        .enrol("Alice", "alice@example.com", harness.technician_role)
        .await?;
    let bob = harness
        .enrol("Bob", "bob@example.com", harness.technician_role)
        .await?;
    let boss = harness
        .enrol("Boss", "boss@example.com", harness.manager_role)
        .await?;
    let tasks = harness.services.tasks();

    tasks.create(pump_repair(), &alice).await?;
    tasks
        .create(
            TaskRequest::new("Filter swap", "Swapped intake filter", performed_at()),
            &alice,
        )
        .await?;
    tasks.create(pump_repair(), &bob).await?;

    let own = tasks.list(&alice).await?;
    eyre::ensure!(own.len() == 2, "alice should see two tasks, got {}", own.len());
    eyre::ensure!(
        own.iter().all(|view| view.owner_id == alice.id()),
        "alice must only see her own tasks"
    );
    let all = tasks.list(&boss).await?;
    eyre::ensure!(all.len() == 3, "manager should see every task, got {}", all.len());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manager_deletes_but_cannot_edit_foreign_tasks() -> Result<(), eyre::Report> {
    let harness = Harness::new().await?;
    let alice = harness
        .enrol("Alice", "alice@example.com", harness.technician_role)
        .await?;
    let boss = harness
        .enrol("Boss", "boss@example.com", harness.manager_role)
        .await?;
    let tasks = harness.services.tasks();
    let created = tasks.create(pump_repair(), &alice).await?;

    let edit = tasks
        .update(
            created.id,
            TaskRequest::new("Pump repair", "Rewritten by manager", performed_at()),
            &boss,
        )
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("manager edit should fail"))?;
    eyre::ensure!(edit.kind() == AccessErrorKind::Forbidden, "got {edit:?}");

    tasks.delete(created.id, &boss).await?;

    let gone = tasks
        .get(created.id, &alice)
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("deleted task should be gone"))?;
    eyre::ensure!(gone.kind() == AccessErrorKind::NotFound, "got {gone:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owner_update_is_visible_on_next_read() -> Result<(), eyre::Report> {
    let harness = Harness::new().await?;
    let alice = harness
        .enrol("Alice", "alice@example.com", harness.technician_role)
        .await?;
    let tasks = harness.services.tasks();
    let created = tasks.create(pump_repair(), &alice).await?;

    tasks
        .update(
            created.id,
            TaskRequest::new("Pump overhaul", "Replaced seal and bearings", performed_at()),
            &alice,
        )
        .await?;

    let reread = tasks.get(created.id, &alice).await?;
    eyre::ensure!(reread.title.as_str() == "Pump overhaul", "title not updated");
    eyre::ensure!(
        reread.summary.as_str() == "Replaced seal and bearings",
        "summary not updated"
    );
    eyre::ensure!(reread.created_at == created.created_at, "created_at changed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn views_serialize_with_wire_field_names() -> Result<(), eyre::Report> {
    let harness = Harness::new().await?;
    let alice = harness
        .enrol("Alice", "alice@example.com", harness.technician_role)
        .await?;
    let created = harness.services.tasks().create(pump_repair(), &alice).await?;

    let body = serde_json::to_value(&created)?;
    for key in ["id", "task", "summary", "performed_date", "user_id"] {
        eyre::ensure!(body.get(key).is_some(), "missing {key} in {body}");
    }
    eyre::ensure!(
        body.get("summary") == Some(&json!("Replaced the pump seal")),
        "summary: {body}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_is_not_found_for_managers_too() -> Result<(), eyre::Report> {
    let harness = Harness::new().await?;
    let boss = harness
        .enrol("Boss", "boss@example.com", harness.manager_role)
        .await?;

    let err = harness
        .services
        .tasks()
        .delete(TaskId::new(404), &boss)
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("unknown task should fail"))?;

    eyre::ensure!(err.kind() == AccessErrorKind::NotFound, "got {err:?}");
    Ok(())
}
