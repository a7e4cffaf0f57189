//! In-memory store for workflow tests and embedding.
//!
//! All tables sit behind one lock, so every repository call (including the
//! cascading task delete) is atomic with respect to other calls.

mod catalog;
mod graph;
mod planning;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::workflow::{
    domain::{
        Area, AreaId, Context, ContextId, Project, ProjectId, Reference, ReferenceId, Tag, TagId,
        Task, TaskDependency, TaskId, User, UserId,
    },
    ports::{RepositoryError, RepositoryResult},
};

/// Thread-safe in-memory implementation of every workflow repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGtdStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    users: BTreeMap<UserId, User>,
    areas: BTreeMap<AreaId, Area>,
    contexts: BTreeMap<ContextId, Context>,
    references: BTreeMap<ReferenceId, Reference>,
    tags: BTreeMap<TagId, Tag>,
    projects: BTreeMap<ProjectId, Project>,
    tasks: BTreeMap<TaskId, Task>,
    dependencies: BTreeSet<TaskDependency>,
    task_tags: BTreeSet<(TaskId, TagId)>,
    sequences: Sequences,
}

/// Last identifier handed out per table.
#[derive(Debug, Default)]
struct Sequences {
    user: i64,
    area: i64,
    context: i64,
    reference: i64,
    tag: i64,
    project: i64,
    task: i64,
}

fn next_id(last: &mut i64) -> i64 {
    *last += 1;
    *last
}

impl InMemoryGtdStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }
}

impl StoreState {
    /// Removes a task and its tag links, leaving dependency edges untouched.
    fn remove_task(&mut self, id: TaskId) -> bool {
        if self.tasks.remove(&id).is_none() {
            return false;
        }
        self.task_tags.retain(|(task, _)| *task != id);
        true
    }

    /// Removes every dependency edge touching `task`.
    fn remove_edges_of(&mut self, task: TaskId) -> usize {
        let before = self.dependencies.len();
        self.dependencies.retain(|edge| !edge.touches(task));
        before - self.dependencies.len()
    }
}
