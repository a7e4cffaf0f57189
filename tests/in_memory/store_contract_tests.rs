//! Repository contract tests for [`InMemoryGtdStore`].
//!
//! These exercise the ports directly, below the services.

use chrono::{TimeDelta, Utc};
use gtd_core::workflow::{
    adapters::memory::InMemoryGtdStore,
    domain::{
        ProjectFields, ProjectFieldsInput, ProjectId, ProjectStatus, TagFields, TagId,
        TaskDependency, TaskFields, TaskFieldsInput, TaskId, TaskStatus, UserFields, UserId,
    },
    ports::{
        DependencyInsert, ProjectRepository, RepositoryError, TagRepository,
        TaskDependencyRepository, TaskRepository, TaskTagRepository, UserRepository,
    },
};
use rstest::{fixture, rstest};

#[fixture]
fn store() -> InMemoryGtdStore {
    InMemoryGtdStore::new()
}

fn task_fields(owner: UserId, title: &str) -> TaskFields {
    TaskFields::new(TaskFieldsInput {
        owner_id: owner,
        project_id: None,
        context_id: None,
        title: title.to_owned(),
        notes: None,
        status: TaskStatus::Next,
        priority: None,
        energy: None,
        duration_est_min: None,
        due_at: None,
        defer_until: None,
        waiting_on: None,
        waiting_since: None,
        completed_at: None,
        order_index: None,
    })
    .expect("valid task fields")
}

fn project_fields(owner: UserId, status: ProjectStatus) -> ProjectFields {
    ProjectFields::new(ProjectFieldsInput {
        owner_id: owner,
        area_id: None,
        title: "Plan trip".to_owned(),
        outcome: None,
        notes: None,
        status,
        due_date: None,
    })
    .expect("valid project fields")
}

async fn seed_owner(store: &InMemoryGtdStore) -> UserId {
    let fields = UserFields::new("alice", "alice@example.com", None).expect("valid user");
    store
        .insert_user(&fields, Utc::now())
        .await
        .expect("insert user")
        .id()
}

async fn seed_tasks(store: &InMemoryGtdStore, owner: UserId) -> (TaskId, TaskId) {
    let first = store
        .insert_task(&task_fields(owner, "first"), Utc::now())
        .await
        .expect("insert task")
        .id();
    let second = store
        .insert_task(&task_fields(owner, "second"), Utc::now())
        .await
        .expect("insert task")
        .id();
    (first, second)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn identifiers_are_assigned_in_sequence(store: InMemoryGtdStore) {
    let owner = seed_owner(&store).await;
    let (first, second) = seed_tasks(&store, owner).await;

    assert!(second.value() > first.value());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_username_is_rejected_by_the_store(store: InMemoryGtdStore) {
    seed_owner(&store).await;
    let clash = UserFields::new("alice", "second@example.com", None).expect("valid user");

    let result = store.insert_user(&clash, Utc::now()).await;

    assert!(matches!(result, Err(RepositoryError::Duplicate(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn plain_task_delete_leaves_edges(store: InMemoryGtdStore) {
    let owner = seed_owner(&store).await;
    let (first, second) = seed_tasks(&store, owner).await;
    let edge = TaskDependency::new(second, first).expect("distinct tasks");
    store.insert_dependency(edge).await.expect("insert edge");

    assert!(store.delete_task(first).await.expect("delete task"));

    let edges = store.list_dependencies().await.expect("list edges");
    assert_eq!(edges, [edge]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cascading_delete_reports_removed_edges(store: InMemoryGtdStore) {
    let owner = seed_owner(&store).await;
    let (first, second) = seed_tasks(&store, owner).await;
    store
        .insert_dependency(TaskDependency::new(second, first).expect("distinct tasks"))
        .await
        .expect("insert edge");

    let removed = store
        .delete_task_cascading(first)
        .await
        .expect("cascading delete");
    let missing = store
        .delete_task_cascading(first)
        .await
        .expect("cascading delete");

    assert_eq!(removed, Some(1));
    assert_eq!(missing, None);
    assert!(store.list_dependencies().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_edge_is_rejected_by_the_store(store: InMemoryGtdStore) {
    let owner = seed_owner(&store).await;
    let (first, second) = seed_tasks(&store, owner).await;
    let edge = TaskDependency::new(second, first).expect("distinct tasks");
    store.insert_dependency(edge).await.expect("insert edge");

    let result = store.insert_dependency(edge).await;

    assert!(matches!(result, Err(RepositoryError::Duplicate(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edge_to_removed_task_is_not_stored(store: InMemoryGtdStore) {
    let owner = seed_owner(&store).await;
    let (first, second) = seed_tasks(&store, owner).await;
    assert!(store.delete_task(first).await.expect("delete task"));

    let towards_removed = store
        .insert_dependency(TaskDependency::new(second, first).expect("distinct tasks"))
        .await
        .expect("guarded insert");
    let from_unknown = store
        .insert_dependency(TaskDependency::new(TaskId::new(404), second).expect("distinct tasks"))
        .await
        .expect("guarded insert");

    assert_eq!(towards_removed, DependencyInsert::MissingTask(first));
    assert_eq!(from_unknown, DependencyInsert::MissingTask(TaskId::new(404)));
    assert!(store.list_dependencies().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_update_derives_completion_from_stored_status(store: InMemoryGtdStore) {
    let owner = seed_owner(&store).await;
    let start = Utc::now();
    let at = |secs: i64| start + TimeDelta::seconds(secs);
    let id = store
        .insert_project(&project_fields(owner, ProjectStatus::Active), start, None)
        .await
        .expect("insert project")
        .id();
    let completed = project_fields(owner, ProjectStatus::Completed);
    let active = project_fields(owner, ProjectStatus::Active);

    let mut stamps = Vec::new();
    for (fields, now) in [
        (&completed, at(1)),
        (&completed, at(2)),
        (&active, at(3)),
        (&completed, at(4)),
    ] {
        let project = store
            .update_project(id, fields, now)
            .await
            .expect("update project")
            .expect("project exists");
        stamps.push(project.completed_at());
    }

    assert_eq!(stamps, [Some(at(1)), Some(at(1)), None, Some(at(4))]);
    assert_eq!(
        store
            .update_project(ProjectId::new(404), &completed, at(5))
            .await
            .expect("update project"),
        None
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn linking_requires_both_rows(store: InMemoryGtdStore) {
    let owner = seed_owner(&store).await;
    let (task, _) = seed_tasks(&store, owner).await;
    let tag = store
        .insert_tag(&TagFields::new(owner, "home").expect("valid tag"), Utc::now())
        .await
        .expect("insert tag")
        .id();

    let dangling = store.link_tag(task, TagId::new(999)).await;
    store.link_tag(task, tag).await.expect("link");
    let duplicate = store.link_tag(task, tag).await;

    assert!(matches!(
        dangling,
        Err(RepositoryError::ConstraintViolation(_))
    ));
    assert!(matches!(duplicate, Err(RepositoryError::Duplicate(_))));
    assert!(store.unlink_tag(task, tag).await.expect("unlink"));
    assert!(!store.unlink_tag(task, tag).await.expect("unlink"));
}
