//! Directed dependency edges between tasks.

use super::{GtdDomainError, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Edge meaning `task_id` cannot proceed until `depends_on_task_id` is done.
///
/// The ordered pair is the edge identity. Cycles longer than one edge are not
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskDependency {
    task_id: TaskId,
    depends_on_task_id: TaskId,
}

impl TaskDependency {
    /// Creates a validated dependency edge.
    ///
    /// # Errors
    ///
    /// Returns [`GtdDomainError::SelfDependency`] when both endpoints are the
    /// same task.
    pub fn new(task_id: TaskId, depends_on_task_id: TaskId) -> Result<Self, GtdDomainError> {
        if task_id == depends_on_task_id {
            return Err(GtdDomainError::SelfDependency(task_id));
        }
        Ok(Self {
            task_id,
            depends_on_task_id,
        })
    }

    /// Returns the dependent task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the prerequisite task.
    #[must_use]
    pub const fn depends_on_task_id(&self) -> TaskId {
        self.depends_on_task_id
    }

    /// Returns `true` when `task` is either endpoint.
    #[must_use]
    pub fn touches(&self, task: TaskId) -> bool {
        self.task_id == task || self.depends_on_task_id == task
    }
}

impl fmt::Display for TaskDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.task_id, self.depends_on_task_id)
    }
}
