//! `PostgreSQL` dependency edges and task-tag links.

use async_trait::async_trait;
use diesel::prelude::*;

use super::{
    PostgresGtdStore,
    models::TagRow,
    schema::{tags, task_dependencies, task_tags, tasks},
};
use crate::workflow::{
    domain::{Tag, TagId, TaskDependency, TaskId},
    ports::{
        DependencyInsert, RepositoryError, RepositoryResult, TaskDependencyRepository,
        TaskTagRepository,
    },
};

fn edge_from_row((task_id, depends_on_task_id): (i64, i64)) -> RepositoryResult<TaskDependency> {
    TaskDependency::new(TaskId::new(task_id), TaskId::new(depends_on_task_id))
        .map_err(RepositoryError::invalid_persisted_data)
}

fn edges_from_rows(rows: Vec<(i64, i64)>) -> RepositoryResult<Vec<TaskDependency>> {
    rows.into_iter().map(edge_from_row).collect()
}

#[async_trait]
impl TaskDependencyRepository for PostgresGtdStore {
    async fn insert_dependency(&self, edge: TaskDependency) -> RepositoryResult<DependencyInsert> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, RepositoryError, _>(|tx_conn| {
                let endpoints = [edge.task_id(), edge.depends_on_task_id()];
                let present = tasks::table
                    .filter(tasks::id.eq_any(endpoints.map(TaskId::value)))
                    .select(tasks::id)
                    .for_share()
                    .load::<i64>(tx_conn)?;
                if let Some(missing) = endpoints
                    .into_iter()
                    .find(|endpoint| !present.contains(&endpoint.value()))
                {
                    return Ok(DependencyInsert::MissingTask(missing));
                }
                diesel::insert_into(task_dependencies::table)
                    .values((
                        task_dependencies::task_id.eq(edge.task_id().value()),
                        task_dependencies::depends_on_task_id
                            .eq(edge.depends_on_task_id().value()),
                    ))
                    .execute(tx_conn)
                    .map_err(|err| match RepositoryError::from(err) {
                        RepositoryError::Duplicate(_) => {
                            RepositoryError::Duplicate(format!("dependency {edge}"))
                        }
                        other => other,
                    })?;
                Ok(DependencyInsert::Inserted(edge))
            })
        })
        .await
    }

    async fn delete_dependency(&self, edge: TaskDependency) -> RepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                task_dependencies::table
                    .find((edge.task_id().value(), edge.depends_on_task_id().value())),
            )
            .execute(connection)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn delete_dependencies_of(&self, task: TaskId) -> RepositoryResult<usize> {
        let key = task.value();
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                task_dependencies::table.filter(
                    task_dependencies::task_id
                        .eq(key)
                        .or(task_dependencies::depends_on_task_id.eq(key)),
                ),
            )
            .execute(connection)?;
            Ok(deleted)
        })
        .await
    }

    async fn find_dependency(
        &self,
        task_id: TaskId,
        depends_on_task_id: TaskId,
    ) -> RepositoryResult<Option<TaskDependency>> {
        self.run_blocking(move |connection| {
            task_dependencies::table
                .find((task_id.value(), depends_on_task_id.value()))
                .first::<(i64, i64)>(connection)
                .optional()?
                .map(edge_from_row)
                .transpose()
        })
        .await
    }

    async fn list_dependencies(&self) -> RepositoryResult<Vec<TaskDependency>> {
        self.run_blocking(move |connection| {
            let rows = task_dependencies::table
                .order((
                    task_dependencies::task_id.asc(),
                    task_dependencies::depends_on_task_id.asc(),
                ))
                .load::<(i64, i64)>(connection)?;
            edges_from_rows(rows)
        })
        .await
    }

    async fn list_dependencies_by_task(
        &self,
        task: TaskId,
    ) -> RepositoryResult<Vec<TaskDependency>> {
        self.run_blocking(move |connection| {
            let rows = task_dependencies::table
                .filter(task_dependencies::task_id.eq(task.value()))
                .order(task_dependencies::depends_on_task_id.asc())
                .load::<(i64, i64)>(connection)?;
            edges_from_rows(rows)
        })
        .await
    }

    async fn list_dependents_of(&self, task: TaskId) -> RepositoryResult<Vec<TaskDependency>> {
        self.run_blocking(move |connection| {
            let rows = task_dependencies::table
                .filter(task_dependencies::depends_on_task_id.eq(task.value()))
                .order(task_dependencies::task_id.asc())
                .load::<(i64, i64)>(connection)?;
            edges_from_rows(rows)
        })
        .await
    }
}

#[async_trait]
impl TaskTagRepository for PostgresGtdStore {
    async fn link_tag(&self, task: TaskId, tag: TagId) -> RepositoryResult<()> {
        self.run_blocking(move |connection| {
            diesel::insert_into(task_tags::table)
                .values((
                    task_tags::task_id.eq(task.value()),
                    task_tags::tag_id.eq(tag.value()),
                ))
                .execute(connection)
                .map_err(|err| match RepositoryError::from(err) {
                    RepositoryError::Duplicate(_) => {
                        RepositoryError::Duplicate(format!("tag {tag} on task {task}"))
                    }
                    other => other,
                })?;
            Ok(())
        })
        .await
    }

    async fn unlink_tag(&self, task: TaskId, tag: TagId) -> RepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(task_tags::table.find((task.value(), tag.value())))
                .execute(connection)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn list_tags_for_task(&self, task: TaskId) -> RepositoryResult<Vec<Tag>> {
        self.run_blocking(move |connection| {
            let tag_ids = task_tags::table
                .filter(task_tags::task_id.eq(task.value()))
                .select(task_tags::tag_id)
                .load::<i64>(connection)?;
            tags::table
                .filter(tags::id.eq_any(tag_ids))
                .order(tags::id.asc())
                .select(TagRow::as_select())
                .load::<TagRow>(connection)?
                .into_iter()
                .map(TagRow::into_domain)
                .collect()
        })
        .await
    }
}
