//! Tasks, the unit of GTD workflow status.

use super::{ContextId, GtdDomainError, Owned, ParseStatusError, ProjectId, TaskId, UserId, text};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const TITLE_MAX: usize = 500;
const NOTES_MAX: usize = 2000;
const WAITING_ON_MAX: usize = 200;
const ENERGY_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

/// Task workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Captured but not yet clarified.
    Inbox,
    /// The next physical action.
    Next,
    /// Delegated or blocked on someone else.
    Waiting,
    /// Tied to a date.
    Scheduled,
    /// Parked for later consideration.
    Someday,
    /// Kept as reference material.
    Reference,
    /// Finished.
    Done,
    /// Abandoned.
    Dropped,
}

impl TaskStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Inbox,
        Self::Next,
        Self::Waiting,
        Self::Scheduled,
        Self::Someday,
        Self::Reference,
        Self::Done,
        Self::Dropped,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Next => "next",
            Self::Waiting => "waiting",
            Self::Scheduled => "scheduled",
            Self::Someday => "someday",
            Self::Reference => "reference",
            Self::Done => "done",
            Self::Dropped => "dropped",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseStatusError::new("task", value))
    }
}

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Parameter object for [`TaskFields::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFieldsInput {
    /// Owning user.
    pub owner_id: UserId,
    /// Project the task belongs to.
    pub project_id: Option<ProjectId>,
    /// Context the task can be done in.
    pub context_id: Option<ContextId>,
    /// Task title.
    pub title: String,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Workflow status.
    pub status: TaskStatus,
    /// Priority, 1 or greater.
    pub priority: Option<i32>,
    /// Energy required, 1 to 5.
    pub energy: Option<i32>,
    /// Estimated duration in minutes, 1 or greater.
    pub duration_est_min: Option<i32>,
    /// Due timestamp.
    pub due_at: Option<DateTime<Utc>>,
    /// Hidden from next-action lists until this timestamp.
    pub defer_until: Option<DateTime<Utc>>,
    /// Who or what the task is waiting on.
    pub waiting_on: Option<String>,
    /// When waiting started.
    pub waiting_since: Option<DateTime<Utc>>,
    /// Caller-supplied completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Manual ordering hint.
    pub order_index: Option<i32>,
}

/// Validated, caller-supplied fields of a task.
///
/// Updates replace every field. `completed_at` is stored exactly as given and
/// is never derived from the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFields {
    owner_id: UserId,
    project_id: Option<ProjectId>,
    context_id: Option<ContextId>,
    title: String,
    notes: Option<String>,
    status: TaskStatus,
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

impl TaskFields {
    /// Validates task fields.
    ///
    /// # Errors
    ///
    /// Returns [`GtdDomainError`] when the title is blank, a text field is
    /// too long, or a numeric field is out of range.
    pub fn new(input: TaskFieldsInput) -> Result<Self, GtdDomainError> {
        let TaskFieldsInput {
            owner_id,
            project_id,
            context_id,
            title,
            notes,
            status,
            priority,
            energy,
            duration_est_min,
            due_at,
            defer_until,
            waiting_on,
            waiting_since,
            completed_at,
            order_index,
        } = input;

        if let Some(level) = energy
            && !ENERGY_RANGE.contains(&level)
        {
            return Err(GtdDomainError::EnergyOutOfRange(level));
        }

        Ok(Self {
            owner_id,
            project_id,
            context_id,
            title: text::required("task title", title, Some(TITLE_MAX))?,
            notes: text::optional("task notes", notes, Some(NOTES_MAX))?,
            status,
            priority: text::at_least("priority", priority, 1)?,
            energy,
            duration_est_min: text::at_least("duration estimate", duration_est_min, 1)?,
            due_at,
            defer_until,
            waiting_on: text::optional("waiting on", waiting_on, Some(WAITING_ON_MAX))?,
            waiting_since,
            completed_at,
            order_index,
        })
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the context, if any.
    #[must_use]
    pub const fn context_id(&self) -> Option<ContextId> {
        self.context_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the notes, if any.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<i32> {
        self.priority
    }

    /// Returns the energy level, if any.
    #[must_use]
    pub const fn energy(&self) -> Option<i32> {
        self.energy
    }

    /// Returns the duration estimate in minutes, if any.
    #[must_use]
    pub const fn duration_est_min(&self) -> Option<i32> {
        self.duration_est_min
    }

    /// Returns the due timestamp, if any.
    #[must_use]
    pub const fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }

    /// Returns the defer-until timestamp, if any.
    #[must_use]
    pub const fn defer_until(&self) -> Option<DateTime<Utc>> {
        self.defer_until
    }

    /// Returns who or what the task waits on, if anyone.
    #[must_use]
    pub fn waiting_on(&self) -> Option<&str> {
        self.waiting_on.as_deref()
    }

    /// Returns when waiting started, if it has.
    #[must_use]
    pub const fn waiting_since(&self) -> Option<DateTime<Utc>> {
        self.waiting_since
    }

    /// Returns the caller-supplied completion timestamp, if any.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the manual ordering hint, if any.
    #[must_use]
    pub const fn order_index(&self) -> Option<i32> {
        self.order_index
    }
}

/// Persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    #[serde(flatten)]
    fields: TaskFields,
    created_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub const fn from_persisted(id: TaskId, fields: TaskFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            fields,
            created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task fields.
    #[must_use]
    pub const fn fields(&self) -> &TaskFields {
        &self.fields
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.fields.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Owned for Task {
    fn owner_id(&self) -> UserId {
        self.fields.owner_id
    }
}

impl Task {
    /// Clears the project reference after the project is deleted.
    pub(crate) fn detach_project(&mut self) {
        self.fields.project_id = None;
    }

    /// Clears the context reference after the context is deleted.
    pub(crate) fn detach_context(&mut self) {
        self.fields.context_id = None;
    }
}
