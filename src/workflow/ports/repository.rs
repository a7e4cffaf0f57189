//! Repository ports for workflow persistence.
//!
//! Each trait covers one entity family. Stores generate identities on
//! insert, report a missing row on update as `None`, and report deletes as
//! `bool` (or a count for bulk deletes). Every method is one atomic unit of
//! work against the store.

use crate::workflow::domain::{
    Area, AreaFields, AreaId, Context, ContextFields, ContextId, Project, ProjectFields,
    ProjectId, ProjectStatus, Reference, ReferenceFields, ReferenceId, Tag, TagFields, TagId,
    Task, TaskDependency, TaskFields, TaskId, TaskStatus, User, UserFields, UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// User account persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user and returns it with its generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Duplicate`] when the username or email is
    /// already taken.
    async fn insert_user(
        &self,
        fields: &UserFields,
        created_at: DateTime<Utc>,
    ) -> RepositoryResult<User>;

    /// Replaces every mutable field of a user.
    ///
    /// Returns `None` when the user does not exist.
    async fn update_user(&self, id: UserId, fields: &UserFields)
    -> RepositoryResult<Option<User>>;

    /// Deletes a user and everything the user owns.
    async fn delete_user(&self, id: UserId) -> RepositoryResult<bool>;

    /// Finds a user by identifier.
    async fn find_user(&self, id: UserId) -> RepositoryResult<Option<User>>;

    /// Finds a user by exact username.
    async fn find_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;

    /// Finds a user by exact email address.
    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;

    /// Returns every user.
    async fn list_users(&self) -> RepositoryResult<Vec<User>>;
}

/// Area persistence contract.
#[async_trait]
pub trait AreaRepository: Send + Sync {
    /// Stores a new area.
    async fn insert_area(
        &self,
        fields: &AreaFields,
        created_at: DateTime<Utc>,
    ) -> RepositoryResult<Area>;

    /// Replaces every mutable field of an area; `None` when missing.
    async fn update_area(&self, id: AreaId, fields: &AreaFields)
    -> RepositoryResult<Option<Area>>;

    /// Deletes an area, detaching its projects.
    async fn delete_area(&self, id: AreaId) -> RepositoryResult<bool>;

    /// Finds an area by identifier.
    async fn find_area(&self, id: AreaId) -> RepositoryResult<Option<Area>>;

    /// Returns every area.
    async fn list_areas(&self) -> RepositoryResult<Vec<Area>>;

    /// Returns the areas owned by `owner`.
    async fn list_areas_by_user(&self, owner: UserId) -> RepositoryResult<Vec<Area>>;
}

/// Context persistence contract.
#[async_trait]
pub trait ContextRepository: Send + Sync {
    /// Stores a new context.
    async fn insert_context(
        &self,
        fields: &ContextFields,
        created_at: DateTime<Utc>,
    ) -> RepositoryResult<Context>;

    /// Replaces every mutable field of a context; `None` when missing.
    async fn update_context(
        &self,
        id: ContextId,
        fields: &ContextFields,
    ) -> RepositoryResult<Option<Context>>;

    /// Deletes a context, detaching its tasks.
    async fn delete_context(&self, id: ContextId) -> RepositoryResult<bool>;

    /// Finds a context by identifier.
    async fn find_context(&self, id: ContextId) -> RepositoryResult<Option<Context>>;

    /// Returns every context.
    async fn list_contexts(&self) -> RepositoryResult<Vec<Context>>;

    /// Returns the contexts owned by `owner`.
    async fn list_contexts_by_user(&self, owner: UserId) -> RepositoryResult<Vec<Context>>;
}

/// Reference persistence contract.
#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    /// Stores a new reference item.
    async fn insert_reference(
        &self,
        fields: &ReferenceFields,
        created_at: DateTime<Utc>,
    ) -> RepositoryResult<Reference>;

    /// Replaces every mutable field of a reference; `None` when missing.
    async fn update_reference(
        &self,
        id: ReferenceId,
        fields: &ReferenceFields,
    ) -> RepositoryResult<Option<Reference>>;

    /// Deletes a reference item.
    async fn delete_reference(&self, id: ReferenceId) -> RepositoryResult<bool>;

    /// Finds a reference by identifier.
    async fn find_reference(&self, id: ReferenceId) -> RepositoryResult<Option<Reference>>;

    /// Returns every reference.
    async fn list_references(&self) -> RepositoryResult<Vec<Reference>>;

    /// Returns the references owned by `owner`.
    async fn list_references_by_user(&self, owner: UserId) -> RepositoryResult<Vec<Reference>>;
}

/// Tag persistence contract.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Stores a new tag.
    async fn insert_tag(&self, fields: &TagFields, created_at: DateTime<Utc>)
    -> RepositoryResult<Tag>;

    /// Replaces every mutable field of a tag; `None` when missing.
    async fn update_tag(&self, id: TagId, fields: &TagFields) -> RepositoryResult<Option<Tag>>;

    /// Deletes a tag and its task links.
    async fn delete_tag(&self, id: TagId) -> RepositoryResult<bool>;

    /// Finds a tag by identifier.
    async fn find_tag(&self, id: TagId) -> RepositoryResult<Option<Tag>>;

    /// Returns every tag.
    async fn list_tags(&self) -> RepositoryResult<Vec<Tag>>;

    /// Returns the tags owned by `owner`.
    async fn list_tags_by_user(&self, owner: UserId) -> RepositoryResult<Vec<Tag>>;
}

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project with the given completion timestamp.
    async fn insert_project(
        &self,
        fields: &ProjectFields,
        created_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
    ) -> RepositoryResult<Project>;

    /// Replaces every mutable field of a project; `None` when missing.
    ///
    /// The completion timestamp is derived from the stored status within the
    /// same unit of work: it is kept while the project stays completed, set
    /// to `now` on entering completed and cleared on leaving it.
    async fn update_project(
        &self,
        id: ProjectId,
        fields: &ProjectFields,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Option<Project>>;

    /// Deletes a project, detaching its tasks.
    async fn delete_project(&self, id: ProjectId) -> RepositoryResult<bool>;

    /// Finds a project by identifier.
    async fn find_project(&self, id: ProjectId) -> RepositoryResult<Option<Project>>;

    /// Returns every project.
    async fn list_projects(&self) -> RepositoryResult<Vec<Project>>;

    /// Returns the projects owned by `owner`.
    async fn list_projects_by_user(&self, owner: UserId) -> RepositoryResult<Vec<Project>>;

    /// Returns the projects grouped under `area`.
    async fn list_projects_by_area(&self, area: AreaId) -> RepositoryResult<Vec<Project>>;

    /// Returns the projects in `status`.
    async fn list_projects_by_status(
        &self,
        status: ProjectStatus,
    ) -> RepositoryResult<Vec<Project>>;
}

/// Task persistence contract.
///
/// Task lists are ordered by `order_index` (absent last), then `created_at`.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    async fn insert_task(
        &self,
        fields: &TaskFields,
        created_at: DateTime<Utc>,
    ) -> RepositoryResult<Task>;

    /// Replaces every mutable field of a task; `None` when missing.
    async fn update_task(&self, id: TaskId, fields: &TaskFields)
    -> RepositoryResult<Option<Task>>;

    /// Deletes a task and its tag links. Dependency edges are left in place.
    async fn delete_task(&self, id: TaskId) -> RepositoryResult<bool>;

    /// Deletes a task together with every dependency edge naming it, as one
    /// atomic unit.
    ///
    /// Returns the number of edges removed, or `None` when the task does not
    /// exist (in which case nothing is removed).
    async fn delete_task_cascading(&self, id: TaskId) -> RepositoryResult<Option<usize>>;

    /// Finds a task by identifier.
    async fn find_task(&self, id: TaskId) -> RepositoryResult<Option<Task>>;

    /// Returns every task.
    async fn list_tasks(&self) -> RepositoryResult<Vec<Task>>;

    /// Returns the tasks owned by `owner`.
    async fn list_tasks_by_user(&self, owner: UserId) -> RepositoryResult<Vec<Task>>;

    /// Returns the tasks in `project`.
    async fn list_tasks_by_project(&self, project: ProjectId) -> RepositoryResult<Vec<Task>>;

    /// Returns the tasks in `context`.
    async fn list_tasks_by_context(&self, context: ContextId) -> RepositoryResult<Vec<Task>>;

    /// Returns the tasks in `status`.
    async fn list_tasks_by_status(&self, status: TaskStatus) -> RepositoryResult<Vec<Task>>;

    /// Returns the tasks owned by `owner` in `status`.
    async fn list_tasks_by_user_and_status(
        &self,
        owner: UserId,
        status: TaskStatus,
    ) -> RepositoryResult<Vec<Task>>;
}

/// Outcome of a guarded dependency insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyInsert {
    /// The edge was stored.
    Inserted(TaskDependency),
    /// An endpoint task does not exist; nothing was stored.
    MissingTask(TaskId),
}

/// Dependency edge persistence contract.
#[async_trait]
pub trait TaskDependencyRepository: Send + Sync {
    /// Stores a new edge once both endpoint tasks are confirmed to exist.
    ///
    /// The existence check and the insert form one unit of work, so an edge
    /// never outlives a task deleted concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Duplicate`] when the edge already exists.
    async fn insert_dependency(&self, edge: TaskDependency) -> RepositoryResult<DependencyInsert>;

    /// Deletes one exact edge.
    async fn delete_dependency(&self, edge: TaskDependency) -> RepositoryResult<bool>;

    /// Deletes every edge where `task` is either endpoint, returning the
    /// number removed.
    async fn delete_dependencies_of(&self, task: TaskId) -> RepositoryResult<usize>;

    /// Finds one exact edge.
    async fn find_dependency(
        &self,
        task_id: TaskId,
        depends_on_task_id: TaskId,
    ) -> RepositoryResult<Option<TaskDependency>>;

    /// Returns every edge.
    async fn list_dependencies(&self) -> RepositoryResult<Vec<TaskDependency>>;

    /// Returns the edges whose dependent is `task`.
    async fn list_dependencies_by_task(&self, task: TaskId)
    -> RepositoryResult<Vec<TaskDependency>>;

    /// Returns the edges whose prerequisite is `task`.
    async fn list_dependents_of(&self, task: TaskId) -> RepositoryResult<Vec<TaskDependency>>;
}

/// Task-to-tag link persistence contract.
#[async_trait]
pub trait TaskTagRepository: Send + Sync {
    /// Links a tag to a task.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Duplicate`] when the link already exists.
    async fn link_tag(&self, task: TaskId, tag: TagId) -> RepositoryResult<()>;

    /// Removes a link, returning whether one existed.
    async fn unlink_tag(&self, task: TaskId, tag: TagId) -> RepositoryResult<bool>;

    /// Returns the tags linked to `task`.
    async fn list_tags_for_task(&self, task: TaskId) -> RepositoryResult<Vec<Tag>>;
}

/// Every workflow repository behind one store.
pub trait GtdStore:
    UserRepository
    + AreaRepository
    + ContextRepository
    + ReferenceRepository
    + TagRepository
    + ProjectRepository
    + TaskRepository
    + TaskDependencyRepository
    + TaskTagRepository
{
}

impl<T> GtdStore for T where
    T: UserRepository
        + AreaRepository
        + ContextRepository
        + ReferenceRepository
        + TagRepository
        + ProjectRepository
        + TaskRepository
        + TaskDependencyRepository
        + TaskTagRepository
{
}

/// Errors returned by repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint rejected the write.
    #[error("duplicate {0}")]
    Duplicate(String),

    /// A referential constraint rejected the write.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
