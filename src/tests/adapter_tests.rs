//! Repository contract tests against the in-memory adapter.

use crate::adapters::memory::InMemoryTaskRepository;
use crate::domain::{ProjectId, Task, TaskDraft, TaskId, TaskName, UserId};
use crate::ports::{TaskRepository, TaskRepositoryError};
use rstest::{fixture, rstest};

#[fixture]
fn repository() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

fn draft_for_project(name: &str, project: i64) -> TaskDraft {
    TaskDraft::new(
        TaskName::new(name).expect("valid task name"),
        ProjectId::new(project),
        UserId::new(1),
    )
}

fn draft(name: &str) -> TaskDraft {
    draft_for_project(name, 100)
}

fn task_id(value: i64) -> TaskId {
    TaskId::new(value).expect("valid task id")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_assigns_sequential_identifiers_from_one(repository: InMemoryTaskRepository) {
    let first = repository.insert(&draft("first")).await.expect("insert");
    let second = repository.insert(&draft("second")).await.expect("insert");

    assert_eq!(first.id().value(), 1);
    assert_eq!(second.id().value(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn identifiers_are_not_reused_after_delete(repository: InMemoryTaskRepository) {
    let first = repository.insert(&draft("short lived")).await.expect("insert");
    repository.delete(first.id()).await.expect("delete");

    let second = repository.insert(&draft("successor")).await.expect("insert");
    assert!(second.id().value() > first.id().value());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_all_mutable_fields(repository: InMemoryTaskRepository) {
    let created = repository.insert(&draft("original")).await.expect("insert");

    let replacement = Task::from_draft(
        created.id(),
        draft_for_project("renamed", 200).with_priority(1),
    );
    repository.update(&replacement).await.expect("update");

    let fetched = repository
        .find_by_id(created.id())
        .await
        .expect("lookup")
        .expect("task exists");
    assert_eq!(fetched.name().as_str(), "RENAMED");
    assert_eq!(fetched.project_id(), ProjectId::new(200));
    assert_eq!(fetched.priority(), Some(1));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_missing_task_reports_not_found(repository: InMemoryTaskRepository) {
    let phantom = Task::from_draft(task_id(99), draft("phantom"));

    let result = repository.update(&phantom).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::NotFound(id)) if id.value() == 99
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_of_missing_task_reports_not_found(repository: InMemoryTaskRepository) {
    let result = repository.delete(task_id(7)).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::NotFound(id)) if id.value() == 7
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn has_children_sees_direct_children_only(repository: InMemoryTaskRepository) {
    let root = repository.insert(&draft("root")).await.expect("insert");
    let mid = repository
        .insert(&draft("mid").with_parent(root.id()))
        .await
        .expect("insert");
    let leaf = repository
        .insert(&draft("leaf").with_parent(mid.id()))
        .await
        .expect("insert");

    assert!(repository.has_children(root.id()).await.expect("query"));
    assert!(repository.has_children(mid.id()).await.expect("query"));
    assert!(!repository.has_children(leaf.id()).await.expect("query"));

    // Removing the grandchild turns the middle task into a leaf, but the
    // root still has its direct child.
    repository.delete(leaf.id()).await.expect("delete");
    assert!(!repository.has_children(mid.id()).await.expect("query"));
    assert!(repository.has_children(root.id()).await.expect("query"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_by_project_filters_on_project_reference(repository: InMemoryTaskRepository) {
    repository
        .insert(&draft_for_project("alpha", 1))
        .await
        .expect("insert");
    repository
        .insert(&draft_for_project("beta", 2))
        .await
        .expect("insert");
    repository
        .insert(&draft_for_project("gamma", 1))
        .await
        .expect("insert");

    let scoped = repository
        .list_by_project(ProjectId::new(1))
        .await
        .expect("listing");
    let names: Vec<&str> = scoped.iter().map(|task| task.name().as_str()).collect();
    assert_eq!(names, vec!["ALPHA", "GAMMA"]);

    let empty = repository
        .list_by_project(ProjectId::new(3))
        .await
        .expect("listing");
    assert!(empty.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_roots_matches_parentless_subset_of_list_all(repository: InMemoryTaskRepository) {
    let root_a = repository.insert(&draft("root a")).await.expect("insert");
    repository
        .insert(&draft("child").with_parent(root_a.id()))
        .await
        .expect("insert");
    repository.insert(&draft("root b")).await.expect("insert");

    let all = repository.list_all().await.expect("listing");
    let roots = repository.list_roots().await.expect("listing");

    let expected: Vec<Task> = all.into_iter().filter(Task::is_root).collect();
    assert_eq!(roots, expected);
    assert_eq!(roots.len(), 2);
}
