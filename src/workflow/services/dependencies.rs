//! Service layer for the task dependency graph.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::error::{EntityRef, WorkflowError, WorkflowResult};
use crate::workflow::{
    domain::{TaskDependency, TaskId},
    ports::{DependencyInsert, TaskDependencyRepository, TaskRepository},
};

/// Maintains directed edges between tasks.
///
/// Self-loops are rejected; longer cycles are accepted.
#[derive(Clone)]
pub struct DependencyGraphService<S>
where
    S: TaskRepository + TaskDependencyRepository,
{
    store: Arc<S>,
}

impl<S> DependencyGraphService<S>
where
    S: TaskRepository + TaskDependencyRepository,
{
    /// Creates a new dependency graph service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Records that `task_id` depends on `depends_on_task_id`.
    ///
    /// Both tasks are resolved before the self-loop check, and the store
    /// confirms them again while inserting the edge.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when either task is missing,
    /// [`WorkflowError::InvalidArgument`] when both ids are equal and
    /// [`WorkflowError::Conflict`] when the edge already exists.
    pub async fn create(
        &self,
        task_id: TaskId,
        depends_on_task_id: TaskId,
    ) -> WorkflowResult<TaskDependency> {
        info!(%task_id, %depends_on_task_id, "creating task dependency");
        for id in [task_id, depends_on_task_id] {
            if self.store.find_task(id).await?.is_none() {
                warn!(task_id = %id, "task not found for dependency");
                return Err(WorkflowError::NotFound(EntityRef::Task(id)));
            }
        }
        let edge = TaskDependency::new(task_id, depends_on_task_id)?;
        match self.store.insert_dependency(edge).await? {
            DependencyInsert::Inserted(stored) => {
                info!(%stored, "created task dependency");
                Ok(stored)
            }
            DependencyInsert::MissingTask(id) => {
                warn!(task_id = %id, "task removed before dependency was stored");
                Err(WorkflowError::NotFound(EntityRef::Task(id)))
            }
        }
    }

    /// Deletes one exact edge.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the edge does not exist.
    pub async fn delete(&self, task_id: TaskId, depends_on_task_id: TaskId) -> WorkflowResult<()> {
        info!(%task_id, %depends_on_task_id, "deleting task dependency");
        let missing = WorkflowError::NotFound(EntityRef::Dependency {
            task_id,
            depends_on_task_id,
        });
        let Ok(edge) = TaskDependency::new(task_id, depends_on_task_id) else {
            return Err(missing);
        };
        if self.store.delete_dependency(edge).await? {
            return Ok(());
        }
        warn!(%edge, "no task dependency deleted");
        Err(missing)
    }

    /// Deletes every edge naming `task_id` as either endpoint and returns
    /// how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the store fails.
    pub async fn delete_by_task_id(&self, task_id: TaskId) -> WorkflowResult<usize> {
        info!(%task_id, "deleting all dependencies of task");
        let removed = self.store.delete_dependencies_of(task_id).await?;
        info!(%task_id, removed, "deleted task dependencies");
        Ok(removed)
    }

    /// Finds one exact edge.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the edge does not exist.
    pub async fn find(
        &self,
        task_id: TaskId,
        depends_on_task_id: TaskId,
    ) -> WorkflowResult<TaskDependency> {
        self.store
            .find_dependency(task_id, depends_on_task_id)
            .await?
            .ok_or(WorkflowError::NotFound(EntityRef::Dependency {
                task_id,
                depends_on_task_id,
            }))
    }

    /// Lists every edge.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the store fails.
    pub async fn list(&self) -> WorkflowResult<Vec<TaskDependency>> {
        Ok(self.store.list_dependencies().await?)
    }

    /// Lists the prerequisites of `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the store fails.
    pub async fn list_by_task_id(&self, task_id: TaskId) -> WorkflowResult<Vec<TaskDependency>> {
        let edges = self.store.list_dependencies_by_task(task_id).await?;
        debug!(%task_id, count = edges.len(), "listed prerequisites");
        Ok(edges)
    }

    /// Lists the tasks waiting on `depends_on_task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the store fails.
    pub async fn list_by_depends_on_task_id(
        &self,
        depends_on_task_id: TaskId,
    ) -> WorkflowResult<Vec<TaskDependency>> {
        let edges = self.store.list_dependents_of(depends_on_task_id).await?;
        debug!(%depends_on_task_id, count = edges.len(), "listed dependents");
        Ok(edges)
    }
}
