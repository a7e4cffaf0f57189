//! Errors reported by workflow managers.

use std::fmt;

use thiserror::Error;

use crate::workflow::{
    domain::{
        AreaId, ContextId, GtdDomainError, ParseStatusError, ProjectId, ReferenceId, TagId,
        TaskId, UserId,
    },
    ports::RepositoryError,
};

/// Identifies the entity a [`WorkflowError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    /// A user account.
    User(UserId),
    /// An area of focus.
    Area(AreaId),
    /// A situational context.
    Context(ContextId),
    /// A reference item.
    Reference(ReferenceId),
    /// A tag.
    Tag(TagId),
    /// A project.
    Project(ProjectId),
    /// A task.
    Task(TaskId),
    /// A dependency edge.
    Dependency {
        /// Dependent task.
        task_id: TaskId,
        /// Prerequisite task.
        depends_on_task_id: TaskId,
    },
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "user {id}"),
            Self::Area(id) => write!(f, "area {id}"),
            Self::Context(id) => write!(f, "context {id}"),
            Self::Reference(id) => write!(f, "reference {id}"),
            Self::Tag(id) => write!(f, "tag {id}"),
            Self::Project(id) => write!(f, "project {id}"),
            Self::Task(id) => write!(f, "task {id}"),
            Self::Dependency {
                task_id,
                depends_on_task_id,
            } => write!(f, "dependency {task_id} -> {depends_on_task_id}"),
        }
    }
}

/// Coarse failure category for callers mapping errors onto a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced entity is absent or hidden by ownership masking.
    NotFound,
    /// Input failed validation.
    InvalidArgument,
    /// A uniqueness or referential constraint rejected the write.
    Conflict,
    /// Infrastructure failure.
    Internal,
}

/// Service-level errors for workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The referenced entity does not exist or is not visible to the caller.
    #[error("{0} not found")]
    NotFound(EntityRef),

    /// Domain validation failed.
    #[error(transparent)]
    InvalidArgument(#[from] GtdDomainError),

    /// A status string could not be parsed.
    #[error(transparent)]
    InvalidStatus(#[from] ParseStatusError),

    /// A uniqueness or referential constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl WorkflowError {
    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidArgument(_) | Self::InvalidStatus(_) => ErrorKind::InvalidArgument,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Repository(_) => ErrorKind::Internal,
        }
    }
}

impl From<RepositoryError> for WorkflowError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate(detail) | RepositoryError::ConstraintViolation(detail) => {
                Self::Conflict(detail)
            }
            other => Self::Repository(other),
        }
    }
}

/// Result type for workflow service operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Turns a missing lookup into [`WorkflowError::NotFound`].
pub(crate) fn found<T>(value: Option<T>, entity: EntityRef) -> WorkflowResult<T> {
    value.ok_or(WorkflowError::NotFound(entity))
}
