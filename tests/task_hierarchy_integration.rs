//! Behavioural integration tests for the task service over the in-memory
//! repository.
//!
//! These tests exercise the full public surface in realistic flows: building
//! up a project's task forest, querying it by scope, and tearing it down
//! leaf-first under the no-children deletion rule.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::cognitive_complexity,
    reason = "Test functions may have higher complexity for full scenario coverage"
)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use taskforest::adapters::memory::InMemoryTaskRepository;
use taskforest::domain::{ProjectId, Task, TaskId};
use taskforest::ports::TaskRepositoryError;
use taskforest::services::{CreateTaskRequest, ReplaceTaskRequest, TaskService, TaskServiceError};
use tokio::runtime::Runtime;

/// Creates a tokio runtime for async operations in tests.
fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

fn service() -> TaskService<InMemoryTaskRepository> {
    TaskService::new(Arc::new(InMemoryTaskRepository::new()))
}

/// Builds a two-project forest, verifies the scoped and root listings, then
/// dismantles one tree leaf-first.
#[test]
fn project_forest_lifecycle_through_the_service() {
    let rt = test_runtime();
    let svc = service();

    // Project 1: a parent with two children. Project 2: a lone root.
    let plan = rt
        .block_on(svc.create(
            CreateTaskRequest::new("release plan", 1, 10)
                .with_parent_flag(true)
                .with_start_date(
                    Utc.with_ymd_and_hms(2024, 9, 2, 9, 30, 0)
                        .single()
                        .expect("valid timestamp"),
                ),
        ))
        .expect("create plan");
    let docs = rt
        .block_on(svc.create(
            CreateTaskRequest::new("write docs", 1, 11).with_parent(plan.id().value()),
        ))
        .expect("create docs");
    let tests = rt
        .block_on(svc.create(
            CreateTaskRequest::new("write tests", 1, 11).with_parent(plan.id().value()),
        ))
        .expect("create tests");
    let audit = rt
        .block_on(svc.create(CreateTaskRequest::new("security audit", 2, 12)))
        .expect("create audit");

    // Names are normalised and the declared schedule kept date-only.
    assert_eq!(plan.name().as_str(), "RELEASE PLAN");
    assert_eq!(
        plan.start_date().map(|date| date.to_string()),
        Some("2024-09-02".to_owned())
    );

    // Scoped listing sees exactly project 1's tasks.
    let project_one = rt
        .block_on(svc.list_by_project(ProjectId::new(1)))
        .expect("scoped listing");
    assert_eq!(project_one.len(), 3);
    assert!(project_one.iter().all(|task| task.project_id() == ProjectId::new(1)));

    // Roots are the parentless subset of the full listing.
    let all = rt.block_on(svc.list_all()).expect("full listing");
    let roots = rt.block_on(svc.list_roots()).expect("root listing");
    let expected_roots: Vec<Task> = all.iter().filter(|task| task.is_root()).cloned().collect();
    assert_eq!(roots, expected_roots);
    assert_eq!(roots.len(), 2);

    // The parent cannot go while children remain.
    let blocked = rt.block_on(svc.delete(plan.id()));
    assert!(matches!(
        blocked,
        Err(TaskServiceError::HasChildren { name, .. }) if name.as_str() == "RELEASE PLAN"
    ));

    // Leaf-first teardown drains project 1.
    rt.block_on(svc.delete(docs.id())).expect("delete docs");
    rt.block_on(svc.delete(tests.id())).expect("delete tests");
    assert!(
        !rt.block_on(svc.has_children(plan.id()))
            .expect("children query")
    );
    rt.block_on(svc.delete(plan.id())).expect("delete plan");

    let remaining = rt.block_on(svc.list_all()).expect("full listing");
    assert_eq!(remaining.len(), 1);
    assert_eq!(
        remaining.first().map(Task::id),
        Some(audit.id()),
        "only the other project's task survives"
    );
}

/// Replacement re-validates the body and enforces the hierarchy guards the
/// same way creation does.
#[test]
fn replacement_revalidates_and_guards_the_hierarchy() {
    let rt = test_runtime();
    let svc = service();

    let root = rt
        .block_on(svc.create(CreateTaskRequest::new("root", 1, 1)))
        .expect("create root");
    let child = rt
        .block_on(svc.create(CreateTaskRequest::new("child", 1, 1).with_parent(root.id().value())))
        .expect("create child");

    // Lowercase replacement names come back uppercase.
    rt.block_on(svc.replace(ReplaceTaskRequest::new(
        child.id().value(),
        CreateTaskRequest::new("renamed child", 1, 1).with_parent(root.id().value()),
    )))
    .expect("replace child");
    let fetched = rt
        .block_on(svc.find_by_id(child.id()))
        .expect("lookup")
        .expect("child exists");
    assert_eq!(fetched.name().as_str(), "RENAMED CHILD");

    // Hanging the root under its own descendant is rejected.
    let cycle = rt.block_on(svc.replace(ReplaceTaskRequest::new(
        root.id().value(),
        CreateTaskRequest::new("root", 1, 1).with_parent(child.id().value()),
    )));
    assert!(matches!(cycle, Err(TaskServiceError::HierarchyCycle(_))));

    // A replacement aimed at a missing id fails without touching the store.
    let missing = rt.block_on(svc.replace(ReplaceTaskRequest::new(
        999,
        CreateTaskRequest::new("ghost", 1, 1),
    )));
    assert!(matches!(
        missing,
        Err(TaskServiceError::Repository(TaskRepositoryError::NotFound(_)))
    ));
    let all = rt.block_on(svc.list_all()).expect("full listing");
    assert_eq!(all.len(), 2);
}

/// Identifier assignment is monotonic across deletions: a deleted id is
/// never handed out again.
#[test]
fn identifiers_survive_deletion_without_reuse() {
    let rt = test_runtime();
    let svc = service();

    let first = rt
        .block_on(svc.create(CreateTaskRequest::new("first", 1, 1)))
        .expect("create first");
    rt.block_on(svc.delete(first.id())).expect("delete first");

    let second = rt
        .block_on(svc.create(CreateTaskRequest::new("second", 1, 1)))
        .expect("create second");
    assert!(second.id().value() > first.id().value());

    let gone = rt.block_on(svc.find_by_id(first.id())).expect("lookup");
    assert_eq!(gone, None);
    let alive = rt
        .block_on(svc.find_by_id(TaskId::new(second.id().value()).expect("valid id")))
        .expect("lookup");
    assert_eq!(alive, Some(second));
}
