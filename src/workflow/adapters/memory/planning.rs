//! In-memory projects and tasks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{InMemoryGtdStore, StoreState, next_id};
use crate::workflow::{
    domain::{
        AreaId, ContextId, Project, ProjectFields, ProjectId, ProjectStatus, Task, TaskFields,
        TaskId, TaskStatus, UserId, completion_timestamp,
    },
    ports::{ProjectRepository, RepositoryResult, TaskRepository},
};

impl StoreState {
    /// Removes a project, detaching its tasks.
    pub(super) fn remove_project(&mut self, id: ProjectId) -> bool {
        if self.projects.remove(&id).is_none() {
            return false;
        }
        for task in self.tasks.values_mut() {
            if task.fields().project_id() == Some(id) {
                task.detach_project();
            }
        }
        true
    }

    fn projects_where(&self, predicate: impl Fn(&Project) -> bool) -> Vec<Project> {
        self.projects
            .values()
            .filter(|project| predicate(project))
            .cloned()
            .collect()
    }

    /// Collects matching tasks in list order.
    fn tasks_where(&self, predicate: impl Fn(&Task) -> bool) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .values()
            .filter(|task| predicate(task))
            .cloned()
            .collect();
        tasks.sort_by_key(|task| {
            let order = task.fields().order_index();
            (order.is_none(), order, task.created_at(), task.id())
        });
        tasks
    }
}

#[async_trait]
impl ProjectRepository for InMemoryGtdStore {
    async fn insert_project(
        &self,
        fields: &ProjectFields,
        created_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
    ) -> RepositoryResult<Project> {
        let mut state = self.write()?;
        let id = ProjectId::new(next_id(&mut state.sequences.project));
        let project = Project::from_persisted(id, fields.clone(), created_at, completed_at);
        state.projects.insert(id, project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        id: ProjectId,
        fields: &ProjectFields,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Option<Project>> {
        let mut state = self.write()?;
        let Some(existing) = state.projects.get_mut(&id) else {
            return Ok(None);
        };
        let completed_at = completion_timestamp(Some(&*existing), fields.status(), now);
        *existing =
            Project::from_persisted(id, fields.clone(), existing.created_at(), completed_at);
        Ok(Some(existing.clone()))
    }

    async fn delete_project(&self, id: ProjectId) -> RepositoryResult<bool> {
        Ok(self.write()?.remove_project(id))
    }

    async fn find_project(&self, id: ProjectId) -> RepositoryResult<Option<Project>> {
        Ok(self.read()?.projects.get(&id).cloned())
    }

    async fn list_projects(&self) -> RepositoryResult<Vec<Project>> {
        Ok(self.read()?.projects.values().cloned().collect())
    }

    async fn list_projects_by_user(&self, owner: UserId) -> RepositoryResult<Vec<Project>> {
        Ok(self
            .read()?
            .projects_where(|project| project.fields().owner_id() == owner))
    }

    async fn list_projects_by_area(&self, area: AreaId) -> RepositoryResult<Vec<Project>> {
        Ok(self
            .read()?
            .projects_where(|project| project.fields().area_id() == Some(area)))
    }

    async fn list_projects_by_status(
        &self,
        status: ProjectStatus,
    ) -> RepositoryResult<Vec<Project>> {
        Ok(self
            .read()?
            .projects_where(|project| project.status() == status))
    }
}

#[async_trait]
impl TaskRepository for InMemoryGtdStore {
    async fn insert_task(
        &self,
        fields: &TaskFields,
        created_at: DateTime<Utc>,
    ) -> RepositoryResult<Task> {
        let mut state = self.write()?;
        let id = TaskId::new(next_id(&mut state.sequences.task));
        let task = Task::from_persisted(id, fields.clone(), created_at);
        state.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update_task(
        &self,
        id: TaskId,
        fields: &TaskFields,
    ) -> RepositoryResult<Option<Task>> {
        let mut state = self.write()?;
        let Some(existing) = state.tasks.get_mut(&id) else {
            return Ok(None);
        };
        *existing = Task::from_persisted(id, fields.clone(), existing.created_at());
        Ok(Some(existing.clone()))
    }

    async fn delete_task(&self, id: TaskId) -> RepositoryResult<bool> {
        Ok(self.write()?.remove_task(id))
    }

    async fn delete_task_cascading(&self, id: TaskId) -> RepositoryResult<Option<usize>> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&id) {
            return Ok(None);
        }
        let removed = state.remove_edges_of(id);
        state.remove_task(id);
        Ok(Some(removed))
    }

    async fn find_task(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        Ok(self.read()?.tasks.get(&id).cloned())
    }

    async fn list_tasks(&self) -> RepositoryResult<Vec<Task>> {
        Ok(self.read()?.tasks_where(|_| true))
    }

    async fn list_tasks_by_user(&self, owner: UserId) -> RepositoryResult<Vec<Task>> {
        Ok(self
            .read()?
            .tasks_where(|task| task.fields().owner_id() == owner))
    }

    async fn list_tasks_by_project(&self, project: ProjectId) -> RepositoryResult<Vec<Task>> {
        Ok(self
            .read()?
            .tasks_where(|task| task.fields().project_id() == Some(project)))
    }

    async fn list_tasks_by_context(&self, context: ContextId) -> RepositoryResult<Vec<Task>> {
        Ok(self
            .read()?
            .tasks_where(|task| task.fields().context_id() == Some(context)))
    }

    async fn list_tasks_by_status(&self, status: TaskStatus) -> RepositoryResult<Vec<Task>> {
        Ok(self.read()?.tasks_where(|task| task.status() == status))
    }

    async fn list_tasks_by_user_and_status(
        &self,
        owner: UserId,
        status: TaskStatus,
    ) -> RepositoryResult<Vec<Task>> {
        Ok(self
            .read()?
            .tasks_where(|task| task.fields().owner_id() == owner && task.status() == status))
    }
}
