//! `PostgreSQL` projects and tasks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::{
    PostgresGtdStore,
    models::{ProjectRow, ProjectValues, TaskRow, TaskValues},
    schema::{projects, task_dependencies, tasks},
};
use crate::workflow::{
    domain::{
        AreaId, ContextId, Project, ProjectFields, ProjectId, ProjectStatus, Task, TaskFields,
        TaskId, TaskStatus, UserId, completion_timestamp,
    },
    ports::{ProjectRepository, RepositoryError, RepositoryResult, TaskRepository},
};

/// Task list ordering: manual order first (absent last), then age.
macro_rules! task_order {
    () => {
        (
            tasks::order_index.asc(),
            tasks::created_at.asc(),
            tasks::id.asc(),
        )
    };
}

fn into_projects(rows: Vec<ProjectRow>) -> RepositoryResult<Vec<Project>> {
    rows.into_iter().map(ProjectRow::into_domain).collect()
}

fn into_tasks(rows: Vec<TaskRow>) -> RepositoryResult<Vec<Task>> {
    rows.into_iter().map(TaskRow::into_domain).collect()
}

#[async_trait]
impl ProjectRepository for PostgresGtdStore {
    async fn insert_project(
        &self,
        fields: &ProjectFields,
        created_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
    ) -> RepositoryResult<Project> {
        let values = ProjectValues::new(fields, completed_at);
        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values((&values, projects::created_at.eq(created_at)))
                .returning(ProjectRow::as_returning())
                .get_result::<ProjectRow>(connection)?
                .into_domain()
        })
        .await
    }

    async fn update_project(
        &self,
        id: ProjectId,
        fields: &ProjectFields,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Option<Project>> {
        let fields = fields.clone();
        let key = id.value();
        self.run_blocking(move |connection| {
            connection.transaction::<_, RepositoryError, _>(|tx_conn| {
                let locked = projects::table
                    .find(key)
                    .select(ProjectRow::as_select())
                    .for_update()
                    .first::<ProjectRow>(tx_conn)
                    .optional()?;
                let Some(current) = locked.map(ProjectRow::into_domain).transpose()? else {
                    return Ok(None);
                };
                let completed_at = completion_timestamp(Some(&current), fields.status(), now);
                let values = ProjectValues::new(&fields, completed_at);
                diesel::update(projects::table.find(key))
                    .set(&values)
                    .returning(ProjectRow::as_returning())
                    .get_result::<ProjectRow>(tx_conn)?
                    .into_domain()
                    .map(Some)
            })
        })
        .await
    }

    async fn delete_project(&self, id: ProjectId) -> RepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(projects::table.find(id.value())).execute(connection)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn find_project(&self, id: ProjectId) -> RepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            projects::table
                .find(id.value())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()?
                .map(ProjectRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn list_projects(&self) -> RepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let query = projects::table
                .order(projects::id.asc())
                .select(ProjectRow::as_select());
            into_projects(query.load::<ProjectRow>(connection)?)
        })
        .await
    }

    async fn list_projects_by_user(&self, owner: UserId) -> RepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let query = projects::table
                .filter(projects::user_id.eq(owner.value()))
                .order(projects::id.asc())
                .select(ProjectRow::as_select());
            into_projects(query.load::<ProjectRow>(connection)?)
        })
        .await
    }

    async fn list_projects_by_area(&self, area: AreaId) -> RepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let query = projects::table
                .filter(projects::area_id.eq(area.value()))
                .order(projects::id.asc())
                .select(ProjectRow::as_select());
            into_projects(query.load::<ProjectRow>(connection)?)
        })
        .await
    }

    async fn list_projects_by_status(
        &self,
        status: ProjectStatus,
    ) -> RepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let query = projects::table
                .filter(projects::status.eq(status.as_str()))
                .order(projects::id.asc())
                .select(ProjectRow::as_select());
            into_projects(query.load::<ProjectRow>(connection)?)
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresGtdStore {
    async fn insert_task(
        &self,
        fields: &TaskFields,
        created_at: DateTime<Utc>,
    ) -> RepositoryResult<Task> {
        let values = TaskValues::from(fields);
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values((&values, tasks::created_at.eq(created_at)))
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)?
                .into_domain()
        })
        .await
    }

    async fn update_task(
        &self,
        id: TaskId,
        fields: &TaskFields,
    ) -> RepositoryResult<Option<Task>> {
        let values = TaskValues::from(fields);
        self.run_blocking(move |connection| {
            diesel::update(tasks::table.find(id.value()))
                .set(&values)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()?
                .map(TaskRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> RepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.value())).execute(connection)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn delete_task_cascading(&self, id: TaskId) -> RepositoryResult<Option<usize>> {
        let key = id.value();
        self.run_blocking(move |connection| {
            connection.transaction::<_, RepositoryError, _>(|tx_conn| {
                let locked = tasks::table
                    .find(key)
                    .select(tasks::id)
                    .for_update()
                    .first::<i64>(tx_conn)
                    .optional()?;
                if locked.is_none() {
                    return Ok(None);
                }
                let edges = diesel::delete(
                    task_dependencies::table.filter(
                        task_dependencies::task_id
                            .eq(key)
                            .or(task_dependencies::depends_on_task_id.eq(key)),
                    ),
                )
                .execute(tx_conn)?;
                diesel::delete(tasks::table.find(key)).execute(tx_conn)?;
                Ok(Some(edges))
            })
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?
                .map(TaskRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn list_tasks(&self) -> RepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let query = tasks::table
                .order(task_order!())
                .select(TaskRow::as_select());
            into_tasks(query.load::<TaskRow>(connection)?)
        })
        .await
    }

    async fn list_tasks_by_user(&self, owner: UserId) -> RepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let query = tasks::table
                .filter(tasks::user_id.eq(owner.value()))
                .order(task_order!())
                .select(TaskRow::as_select());
            into_tasks(query.load::<TaskRow>(connection)?)
        })
        .await
    }

    async fn list_tasks_by_project(&self, project: ProjectId) -> RepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let query = tasks::table
                .filter(tasks::project_id.eq(project.value()))
                .order(task_order!())
                .select(TaskRow::as_select());
            into_tasks(query.load::<TaskRow>(connection)?)
        })
        .await
    }

    async fn list_tasks_by_context(&self, context: ContextId) -> RepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let query = tasks::table
                .filter(tasks::context_id.eq(context.value()))
                .order(task_order!())
                .select(TaskRow::as_select());
            into_tasks(query.load::<TaskRow>(connection)?)
        })
        .await
    }

    async fn list_tasks_by_status(&self, status: TaskStatus) -> RepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let query = tasks::table
                .filter(tasks::status.eq(status.as_str()))
                .order(task_order!())
                .select(TaskRow::as_select());
            into_tasks(query.load::<TaskRow>(connection)?)
        })
        .await
    }

    async fn list_tasks_by_user_and_status(
        &self,
        owner: UserId,
        status: TaskStatus,
    ) -> RepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let query = tasks::table
                .filter(tasks::user_id.eq(owner.value()))
                .filter(tasks::status.eq(status.as_str()))
                .order(task_order!())
                .select(TaskRow::as_select());
            into_tasks(query.load::<TaskRow>(connection)?)
        })
        .await
    }
}
