//! Service layer for task lifecycle orchestration.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{debug, info, warn};

use super::{
    error::{EntityRef, WorkflowError, WorkflowResult, found},
    require_user,
};
use crate::workflow::{
    domain::{
        ContextId, ProjectId, Task, TaskFields, TaskFieldsInput, TaskId, TaskStatus, UserId,
    },
    ports::{ContextRepository, ProjectRepository, TaskRepository, UserRepository},
};

/// Request payload for creating or replacing a task.
///
/// Every optional field left unset is stored as absent; updates do not merge
/// with the previous row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRequest {
    owner_id: UserId,
    title: String,
    status: String,
    project_id: Option<ProjectId>,
    context_id: Option<ContextId>,
    notes: Option<String>,
    priority: Option<i32>,
    energy: Option<i32>,
    duration_est_min: Option<i32>,
    due_at: Option<DateTime<Utc>>,
    defer_until: Option<DateTime<Utc>>,
    waiting_on: Option<String>,
    waiting_since: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    order_index: Option<i32>,
}

impl TaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(owner_id: UserId, title: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            owner_id,
            title: title.into(),
            status: status.into(),
            project_id: None,
            context_id: None,
            notes: None,
            priority: None,
            energy: None,
            duration_est_min: None,
            due_at: None,
            defer_until: None,
            waiting_on: None,
            waiting_since: None,
            completed_at: None,
            order_index: None,
        }
    }

    /// Sets the project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets the context.
    #[must_use]
    pub const fn with_context(mut self, context_id: ContextId) -> Self {
        self.context_id = Some(context_id);
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the priority (1 or more).
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the energy level (1 to 5).
    #[must_use]
    pub const fn with_energy(mut self, energy: i32) -> Self {
        self.energy = Some(energy);
        self
    }

    /// Sets the duration estimate in minutes.
    #[must_use]
    pub const fn with_duration_est_min(mut self, minutes: i32) -> Self {
        self.duration_est_min = Some(minutes);
        self
    }

    /// Sets the due timestamp.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Sets the defer-until timestamp.
    #[must_use]
    pub const fn with_defer_until(mut self, defer_until: DateTime<Utc>) -> Self {
        self.defer_until = Some(defer_until);
        self
    }

    /// Records who or what the task is waiting on, and since when.
    #[must_use]
    pub fn with_waiting_on(
        mut self,
        waiting_on: impl Into<String>,
        since: Option<DateTime<Utc>>,
    ) -> Self {
        self.waiting_on = Some(waiting_on.into());
        self.waiting_since = since;
        self
    }

    /// Sets the completion timestamp. It is never derived from the status.
    #[must_use]
    pub const fn with_completed_at(mut self, completed_at: DateTime<Utc>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }

    /// Sets the manual ordering key.
    #[must_use]
    pub const fn with_order_index(mut self, order_index: i32) -> Self {
        self.order_index = Some(order_index);
        self
    }

    fn into_fields(self) -> WorkflowResult<TaskFields> {
        let status = self.status.parse::<TaskStatus>()?;
        Ok(TaskFields::new(TaskFieldsInput {
            owner_id: self.owner_id,
            project_id: self.project_id,
            context_id: self.context_id,
            title: self.title,
            notes: self.notes,
            status,
            priority: self.priority,
            energy: self.energy,
            duration_est_min: self.duration_est_min,
            due_at: self.due_at,
            defer_until: self.defer_until,
            waiting_on: self.waiting_on,
            waiting_since: self.waiting_since,
            completed_at: self.completed_at,
            order_index: self.order_index,
        })?)
    }
}

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<S, C>
where
    S: UserRepository + ProjectRepository + ContextRepository + TaskRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> TaskLifecycleService<S, C>
where
    S: UserRepository + ProjectRepository + ContextRepository + TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidArgument`] or
    /// [`WorkflowError::InvalidStatus`] for malformed input and
    /// [`WorkflowError::NotFound`] when the owner, project or context does
    /// not exist.
    pub async fn create(&self, request: TaskRequest) -> WorkflowResult<Task> {
        let fields = request.into_fields()?;
        info!(owner_id = %fields.owner_id(), status = %fields.status(), "creating task");
        self.check_references(&fields).await?;
        let task = self.store.insert_task(&fields, self.clock.utc()).await?;
        info!(task_id = %task.id(), "created task");
        Ok(task)
    }

    /// Replaces every field of a task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the task, its owner, project
    /// or context does not exist.
    pub async fn update(&self, id: TaskId, request: TaskRequest) -> WorkflowResult<Task> {
        let fields = request.into_fields()?;
        info!(task_id = %id, status = %fields.status(), "updating task");
        self.check_references(&fields).await?;
        let updated = self.store.update_task(id, &fields).await?;
        if updated.is_none() {
            warn!(task_id = %id, "no task updated");
        }
        found(updated, EntityRef::Task(id))
    }

    /// Deletes a task and its tag links, leaving dependency edges for the
    /// caller to remove through
    /// [`DependencyGraphService::delete_by_task_id`](super::DependencyGraphService::delete_by_task_id).
    ///
    /// Prefer [`Self::delete_cascading`].
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when no task matched.
    pub async fn delete(&self, id: TaskId) -> WorkflowResult<()> {
        info!(task_id = %id, "deleting task");
        if self.store.delete_task(id).await? {
            return Ok(());
        }
        warn!(task_id = %id, "no task deleted");
        Err(WorkflowError::NotFound(EntityRef::Task(id)))
    }

    /// Deletes a task together with every dependency edge naming it, as one
    /// atomic store operation. Returns the number of edges removed.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the task does not exist; in
    /// that case nothing is removed.
    pub async fn delete_cascading(&self, id: TaskId) -> WorkflowResult<usize> {
        info!(task_id = %id, "deleting task with its dependency edges");
        let Some(edges) = self.store.delete_task_cascading(id).await? else {
            warn!(task_id = %id, "no task deleted");
            return Err(WorkflowError::NotFound(EntityRef::Task(id)));
        };
        info!(task_id = %id, edges, "deleted task");
        Ok(edges)
    }

    /// Finds a task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the task is missing.
    pub async fn find(&self, id: TaskId) -> WorkflowResult<Task> {
        found(self.store.find_task(id).await?, EntityRef::Task(id))
    }

    /// Lists every task in list order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the lookup fails.
    pub async fn list(&self) -> WorkflowResult<Vec<Task>> {
        Ok(self.store.list_tasks().await?)
    }

    /// Lists the tasks owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the lookup fails.
    pub async fn list_by_user(&self, owner: UserId) -> WorkflowResult<Vec<Task>> {
        let tasks = self.store.list_tasks_by_user(owner).await?;
        debug!(owner_id = %owner, count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Lists the tasks in `project`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the lookup fails.
    pub async fn list_by_project(&self, project: ProjectId) -> WorkflowResult<Vec<Task>> {
        let tasks = self.store.list_tasks_by_project(project).await?;
        debug!(project_id = %project, count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Lists the tasks in `context`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the lookup fails.
    pub async fn list_by_context(&self, context: ContextId) -> WorkflowResult<Vec<Task>> {
        let tasks = self.store.list_tasks_by_context(context).await?;
        debug!(context_id = %context, count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Lists the tasks in a status given as text.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidStatus`] for an unknown status.
    pub async fn list_by_status(&self, status: &str) -> WorkflowResult<Vec<Task>> {
        let parsed = status.parse::<TaskStatus>()?;
        let tasks = self.store.list_tasks_by_status(parsed).await?;
        debug!(status = %parsed, count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Lists the tasks owned by `owner` in a status given as text.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidStatus`] for an unknown status.
    pub async fn list_by_user_and_status(
        &self,
        owner: UserId,
        status: &str,
    ) -> WorkflowResult<Vec<Task>> {
        let parsed = status.parse::<TaskStatus>()?;
        let tasks = self
            .store
            .list_tasks_by_user_and_status(owner, parsed)
            .await?;
        debug!(owner_id = %owner, status = %parsed, count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Owner must exist; project and context, when given, must exist. Their
    /// ownership is not compared with the task's.
    async fn check_references(&self, fields: &TaskFields) -> WorkflowResult<()> {
        require_user(&*self.store, fields.owner_id()).await?;
        if let Some(project_id) = fields.project_id()
            && self.store.find_project(project_id).await?.is_none()
        {
            warn!(project_id = %project_id, "project not found");
            return Err(WorkflowError::NotFound(EntityRef::Project(project_id)));
        }
        if let Some(context_id) = fields.context_id()
            && self.store.find_context(context_id).await?.is_none()
        {
            warn!(context_id = %context_id, "context not found");
            return Err(WorkflowError::NotFound(EntityRef::Context(context_id)));
        }
        Ok(())
    }
}
