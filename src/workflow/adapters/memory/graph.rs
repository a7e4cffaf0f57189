//! In-memory dependency edges and task-tag links.

use async_trait::async_trait;

use super::InMemoryGtdStore;
use crate::workflow::{
    domain::{Tag, TagId, TaskDependency, TaskId},
    ports::{
        DependencyInsert, RepositoryError, RepositoryResult, TaskDependencyRepository,
        TaskTagRepository,
    },
};

#[async_trait]
impl TaskDependencyRepository for InMemoryGtdStore {
    async fn insert_dependency(&self, edge: TaskDependency) -> RepositoryResult<DependencyInsert> {
        let mut state = self.write()?;
        for endpoint in [edge.task_id(), edge.depends_on_task_id()] {
            if !state.tasks.contains_key(&endpoint) {
                return Ok(DependencyInsert::MissingTask(endpoint));
            }
        }
        if !state.dependencies.insert(edge) {
            return Err(RepositoryError::Duplicate(format!("dependency {edge}")));
        }
        Ok(DependencyInsert::Inserted(edge))
    }

    async fn delete_dependency(&self, edge: TaskDependency) -> RepositoryResult<bool> {
        Ok(self.write()?.dependencies.remove(&edge))
    }

    async fn delete_dependencies_of(&self, task: TaskId) -> RepositoryResult<usize> {
        Ok(self.write()?.remove_edges_of(task))
    }

    async fn find_dependency(
        &self,
        task_id: TaskId,
        depends_on_task_id: TaskId,
    ) -> RepositoryResult<Option<TaskDependency>> {
        let state = self.read()?;
        Ok(state
            .dependencies
            .iter()
            .find(|edge| {
                edge.task_id() == task_id && edge.depends_on_task_id() == depends_on_task_id
            })
            .copied())
    }

    async fn list_dependencies(&self) -> RepositoryResult<Vec<TaskDependency>> {
        Ok(self.read()?.dependencies.iter().copied().collect())
    }

    async fn list_dependencies_by_task(
        &self,
        task: TaskId,
    ) -> RepositoryResult<Vec<TaskDependency>> {
        let state = self.read()?;
        Ok(state
            .dependencies
            .iter()
            .filter(|edge| edge.task_id() == task)
            .copied()
            .collect())
    }

    async fn list_dependents_of(&self, task: TaskId) -> RepositoryResult<Vec<TaskDependency>> {
        let state = self.read()?;
        Ok(state
            .dependencies
            .iter()
            .filter(|edge| edge.depends_on_task_id() == task)
            .copied()
            .collect())
    }
}

#[async_trait]
impl TaskTagRepository for InMemoryGtdStore {
    async fn link_tag(&self, task: TaskId, tag: TagId) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&task) || !state.tags.contains_key(&tag) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "task {task} or tag {tag} does not exist"
            )));
        }
        if !state.task_tags.insert((task, tag)) {
            return Err(RepositoryError::Duplicate(format!("tag {tag} on task {task}")));
        }
        Ok(())
    }

    async fn unlink_tag(&self, task: TaskId, tag: TagId) -> RepositoryResult<bool> {
        Ok(self.write()?.task_tags.remove(&(task, tag)))
    }

    async fn list_tags_for_task(&self, task: TaskId) -> RepositoryResult<Vec<Tag>> {
        let state = self.read()?;
        Ok(state
            .task_tags
            .iter()
            .filter(|(linked, _)| *linked == task)
            .filter_map(|(_, tag)| state.tags.get(tag).cloned())
            .collect())
    }
}
