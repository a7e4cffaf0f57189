//! Workflow behaviour over the `PostgreSQL` store.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use gtd_core::workflow::{
    adapters::postgres::PostgresGtdStore,
    domain::{
        ProjectFields, ProjectFieldsInput, ProjectStatus, TaskDependency, TaskId, UserId,
    },
    ports::{DependencyInsert, ProjectRepository, TaskDependencyRepository, TaskRepository},
    services::{
        AreaRequest, CatalogService, DependencyGraphService, ErrorKind, ProjectLifecycleService,
        ProjectRequest, TagAssociationService, TagRequest, TaskLifecycleService, TaskRequest,
        UserRequest, UserService,
    },
};
use mockable::DefaultClock;
use rstest::rstest;
use tokio::runtime::Runtime;

use crate::postgres::helpers::{TestDatabase, database, runtime};

async fn register(store: &Arc<PostgresGtdStore>, username: &str) -> UserId {
    UserService::new(Arc::clone(store), Arc::new(DefaultClock))
        .create(UserRequest::new(username, format!("{username}@example.com")))
        .await
        .expect("user creation")
        .id()
}

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_767_225_600 + secs, 0)
        .single()
        .expect("timestamp in range")
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

#[rstest]
fn renaming_onto_taken_username_is_a_conflict(database: TestDatabase, runtime: Runtime) {
    runtime.block_on(async {
        register(&database.store, "alice").await;
        let bob = register(&database.store, "bob").await;

        let err = UserService::new(Arc::clone(&database.store), Arc::new(DefaultClock))
            .update(bob, UserRequest::new("alice", "bob@example.com"))
            .await
            .expect_err("unique username");

        assert_eq!(err.kind(), ErrorKind::Conflict);
    });
}

#[rstest]
fn project_completion_round_trips(database: TestDatabase, runtime: Runtime) {
    runtime.block_on(async {
        let owner = register(&database.store, "alice").await;
        let projects = ProjectLifecycleService::new(Arc::clone(&database.store), Arc::new(DefaultClock));

        let created = projects
            .create(ProjectRequest::new(owner, "Plan trip", "active"))
            .await
            .expect("create");
        let completed = projects
            .update(created.id(), ProjectRequest::new(owner, "Plan trip", "completed"))
            .await
            .expect("complete");
        let edited = projects
            .update(
                created.id(),
                ProjectRequest::new(owner, "Plan summer trip", "completed"),
            )
            .await
            .expect("edit");
        let reopened = projects
            .update(created.id(), ProjectRequest::new(owner, "Plan summer trip", "active"))
            .await
            .expect("reopen");

        assert_eq!(completed.status(), ProjectStatus::Completed);
        assert!(completed.completed_at().is_some());
        assert_eq!(edited.completed_at(), completed.completed_at());
        assert_eq!(reopened.completed_at(), None);
        assert_eq!(
            projects.find(created.id()).await.expect("find"),
            reopened
        );
    });
}

#[rstest]
fn deleting_area_detaches_project(database: TestDatabase, runtime: Runtime) {
    runtime.block_on(async {
        let owner = register(&database.store, "alice").await;
        let clock = Arc::new(DefaultClock);
        let catalog = CatalogService::new(Arc::clone(&database.store), Arc::clone(&clock));
        let projects = ProjectLifecycleService::new(Arc::clone(&database.store), clock);
        let area = catalog
            .create_area(AreaRequest::new(owner, "Home"))
            .await
            .expect("area");
        let project = projects
            .create(ProjectRequest::new(owner, "Paint fence", "active").with_area(area.id()))
            .await
            .expect("project");

        catalog.delete_area(area.id()).await.expect("delete area");

        let reloaded = projects.find(project.id()).await.expect("find");
        assert_eq!(reloaded.fields().area_id(), None);
    });
}

#[rstest]
fn dependency_edges_follow_graph_rules(database: TestDatabase, runtime: Runtime) {
    runtime.block_on(async {
        let owner = register(&database.store, "alice").await;
        let tasks = TaskLifecycleService::new(Arc::clone(&database.store), Arc::new(DefaultClock));
        let graph = DependencyGraphService::new(Arc::clone(&database.store));
        let draft = tasks
            .create(TaskRequest::new(owner, "Draft", "next"))
            .await
            .expect("task")
            .id();
        let publish = tasks
            .create(TaskRequest::new(owner, "Publish", "next"))
            .await
            .expect("task")
            .id();

        graph.create(publish, draft).await.expect("edge");
        let duplicate = graph.create(publish, draft).await.expect_err("duplicate");
        let self_loop = graph.create(draft, draft).await.expect_err("self loop");
        graph.create(draft, publish).await.expect("cycles are accepted");

        assert_eq!(duplicate.kind(), ErrorKind::Conflict);
        assert_eq!(self_loop.kind(), ErrorKind::InvalidArgument);
        assert_eq!(graph.list_by_depends_on_task_id(draft).await.expect("list").len(), 1);

        let removed = tasks.delete_cascading(draft).await.expect("cascading delete");
        assert_eq!(removed, 2);
        assert!(graph.list().await.expect("list").is_empty());
    });
}

#[rstest]
fn tagging_is_idempotent_and_owner_scoped(database: TestDatabase, runtime: Runtime) {
    runtime.block_on(async {
        let alice = register(&database.store, "alice").await;
        let bob = register(&database.store, "bob").await;
        let clock = Arc::new(DefaultClock);
        let catalog = CatalogService::new(Arc::clone(&database.store), Arc::clone(&clock));
        let tagging = TagAssociationService::new(Arc::clone(&database.store));
        let task = TaskLifecycleService::new(Arc::clone(&database.store), clock)
            .create(TaskRequest::new(alice, "Renew passport", "next"))
            .await
            .expect("task")
            .id();
        let own = catalog
            .create_tag(TagRequest::new(alice, "urgent"))
            .await
            .expect("tag")
            .id();
        let foreign = catalog
            .create_tag(TagRequest::new(bob, "urgent"))
            .await
            .expect("tag")
            .id();

        tagging.add_tag(alice, task, own).await.expect("tag");
        tagging.add_tag(alice, task, own).await.expect("tag again");
        let rejected = tagging
            .add_tag(alice, task, foreign)
            .await
            .expect_err("foreign tag");

        assert_eq!(rejected.kind(), ErrorKind::NotFound);
        assert_eq!(tagging.list_tags(alice, task).await.expect("list").len(), 1);

        catalog.delete_tag(own).await.expect("delete tag");
        assert!(tagging.list_tags(alice, task).await.expect("list").is_empty());
    });
}

#[rstest]
fn task_listing_order_matches_memory_store(database: TestDatabase, runtime: Runtime) {
    runtime.block_on(async {
        let owner = register(&database.store, "alice").await;
        let tasks = TaskLifecycleService::new(Arc::clone(&database.store), Arc::new(DefaultClock));
        for request in [
            TaskRequest::new(owner, "unordered", "next"),
            TaskRequest::new(owner, "second", "next").with_order_index(2),
            TaskRequest::new(owner, "first", "next").with_order_index(1),
        ] {
            tasks.create(request).await.expect("task");
        }

        let listed = tasks.list_by_user(owner).await.expect("list");
        let titles: Vec<&str> = listed.iter().map(|task| task.fields().title()).collect();

        assert_eq!(titles, ["first", "second", "unordered"]);
    });
}

#[rstest]
fn deleting_user_cascades_to_owned_rows(database: TestDatabase, runtime: Runtime) {
    runtime.block_on(async {
        let alice = register(&database.store, "alice").await;
        let clock = Arc::new(DefaultClock);
        let tasks = TaskLifecycleService::new(Arc::clone(&database.store), Arc::clone(&clock));
        tasks
            .create(TaskRequest::new(alice, "Buy milk", "inbox"))
            .await
            .expect("task");

        UserService::new(Arc::clone(&database.store), clock)
            .delete(alice)
            .await
            .expect("delete user");

        assert!(tasks.list().await.expect("list").is_empty());
    });
}

#[rstest]
fn project_update_derives_completion_from_locked_row(database: TestDatabase, runtime: Runtime) {
    runtime.block_on(async {
        let owner = register(&database.store, "alice").await;
        let completed = project_fields(owner, ProjectStatus::Completed);
        let active = project_fields(owner, ProjectStatus::Active);
        let id = database
            .store
            .insert_project(&active, at(0), None)
            .await
            .expect("insert project")
            .id();

        let mut stamps = Vec::new();
        for (fields, now) in [
            (&completed, at(1)),
            (&completed, at(2)),
            (&active, at(3)),
            (&completed, at(4)),
        ] {
            let project = database
                .store
                .update_project(id, fields, now)
                .await
                .expect("update project")
                .expect("project exists");
            stamps.push(project.completed_at());
        }

        assert_eq!(stamps, [Some(at(1)), Some(at(1)), None, Some(at(4))]);
    });
}

#[rstest]
fn edge_to_removed_task_is_not_stored(database: TestDatabase, runtime: Runtime) {
    runtime.block_on(async {
        let owner = register(&database.store, "alice").await;
        let tasks = TaskLifecycleService::new(Arc::clone(&database.store), Arc::new(DefaultClock));
        let draft = tasks
            .create(TaskRequest::new(owner, "Draft", "next"))
            .await
            .expect("task")
            .id();
        let publish = tasks
            .create(TaskRequest::new(owner, "Publish", "next"))
            .await
            .expect("task")
            .id();
        assert!(database.store.delete_task(draft).await.expect("delete task"));

        let towards_removed = database
            .store
            .insert_dependency(TaskDependency::new(publish, draft).expect("distinct tasks"))
            .await
            .expect("guarded insert");
        let from_unknown = database
            .store
            .insert_dependency(TaskDependency::new(TaskId::new(i64::MAX), publish).expect("distinct"))
            .await
            .expect("guarded insert");

        assert_eq!(towards_removed, DependencyInsert::MissingTask(draft));
        assert_eq!(from_unknown, DependencyInsert::MissingTask(TaskId::new(i64::MAX)));
        assert!(database.store.list_dependencies().await.expect("list").is_empty());
    });
}
