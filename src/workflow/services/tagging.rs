//! Service layer for task-to-tag associations.
//!
//! Every operation resolves the task through the caller's owner id. A task
//! or tag owned by someone else is reported exactly like a missing one.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::error::{EntityRef, WorkflowError, WorkflowResult};
use crate::workflow::{
    domain::{Tag, TagId, Task, TaskId, UserId, owned_by},
    ports::{RepositoryError, TagRepository, TaskRepository, TaskTagRepository},
};

/// Maintains the many-to-many link between tasks and tags of one owner.
#[derive(Clone)]
pub struct TagAssociationService<S>
where
    S: TaskRepository + TagRepository + TaskTagRepository,
{
    store: Arc<S>,
}

impl<S> TagAssociationService<S>
where
    S: TaskRepository + TagRepository + TaskTagRepository,
{
    /// Creates a new tag association service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Links `tag_id` to `task_id`. Linking an already linked pair succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the task or tag is missing or
    /// not owned by `owner`.
    pub async fn add_tag(
        &self,
        owner: UserId,
        task_id: TaskId,
        tag_id: TagId,
    ) -> WorkflowResult<()> {
        info!(owner_id = %owner, %task_id, %tag_id, "adding tag to task");
        self.owned_task(owner, task_id).await?;
        if owned_by(self.store.find_tag(tag_id).await?, owner).is_none() {
            warn!(owner_id = %owner, %tag_id, "tag not found for owner");
            return Err(WorkflowError::NotFound(EntityRef::Tag(tag_id)));
        }
        match self.store.link_tag(task_id, tag_id).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::Duplicate(detail)) => {
                debug!(%task_id, %tag_id, %detail, "tag already linked");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Unlinks `tag_id` from `task_id`. Removing an absent link succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the task is missing or not
    /// owned by `owner`.
    pub async fn remove_tag(
        &self,
        owner: UserId,
        task_id: TaskId,
        tag_id: TagId,
    ) -> WorkflowResult<()> {
        info!(owner_id = %owner, %task_id, %tag_id, "removing tag from task");
        self.owned_task(owner, task_id).await?;
        if !self.store.unlink_tag(task_id, tag_id).await? {
            debug!(%task_id, %tag_id, "tag was not linked");
        }
        Ok(())
    }

    /// Lists the tags linked to `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the task is missing or not
    /// owned by `owner`.
    pub async fn list_tags(&self, owner: UserId, task_id: TaskId) -> WorkflowResult<Vec<Tag>> {
        self.owned_task(owner, task_id).await?;
        let tags = self.store.list_tags_for_task(task_id).await?;
        debug!(%task_id, count = tags.len(), "listed task tags");
        Ok(tags)
    }

    async fn owned_task(&self, owner: UserId, task_id: TaskId) -> WorkflowResult<Task> {
        let task = owned_by(self.store.find_task(task_id).await?, owner);
        task.ok_or_else(|| {
            warn!(owner_id = %owner, %task_id, "task not found for owner");
            WorkflowError::NotFound(EntityRef::Task(task_id))
        })
    }
}
