//! Projects and their completion-timestamp rule.

use super::{AreaId, GtdDomainError, Owned, ParseStatusError, ProjectId, UserId, text};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const TITLE_MAX: usize = 200;
const OUTCOME_MAX: usize = 500;
const NOTES_MAX: usize = 2000;

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Project is being worked on.
    Active,
    /// Project is paused.
    OnHold,
    /// Project may be picked up some day.
    Someday,
    /// Project outcome has been achieved.
    Completed,
    /// Project has been abandoned.
    Dropped,
}

impl ProjectStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Active,
        Self::OnHold,
        Self::Someday,
        Self::Completed,
        Self::Dropped,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OnHold => "on_hold",
            Self::Someday => "someday",
            Self::Completed => "completed",
            Self::Dropped => "dropped",
        }
    }

    /// Returns `true` for [`ProjectStatus::Completed`].
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProjectStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseStatusError::new("project", value))
    }
}

impl FromStr for ProjectStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Validated, caller-supplied fields of a project.
///
/// Updates replace every field, so absent optional values clear what was
/// stored before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFields {
    owner_id: UserId,
    area_id: Option<AreaId>,
    title: String,
    outcome: Option<String>,
    notes: Option<String>,
    status: ProjectStatus,
    due_date: Option<NaiveDate>,
}

/// Parameter object for [`ProjectFields::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFieldsInput {
    /// Owning user.
    pub owner_id: UserId,
    /// Optional grouping area.
    pub area_id: Option<AreaId>,
    /// Project title.
    pub title: String,
    /// Desired outcome statement.
    pub outcome: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
}

impl ProjectFields {
    /// Validates project fields.
    ///
    /// # Errors
    ///
    /// Returns [`GtdDomainError`] when the title is blank or any text field
    /// exceeds its limit.
    pub fn new(input: ProjectFieldsInput) -> Result<Self, GtdDomainError> {
        let ProjectFieldsInput {
            owner_id,
            area_id,
            title,
            outcome,
            notes,
            status,
            due_date,
        } = input;
        Ok(Self {
            owner_id,
            area_id,
            title: text::required("project title", title, Some(TITLE_MAX))?,
            outcome: text::optional("project outcome", outcome, Some(OUTCOME_MAX))?,
            notes: text::optional("project notes", notes, Some(NOTES_MAX))?,
            status,
            due_date,
        })
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the grouping area, if any.
    #[must_use]
    pub const fn area_id(&self) -> Option<AreaId> {
        self.area_id
    }

    /// Returns the project title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the outcome statement, if any.
    #[must_use]
    pub fn outcome(&self) -> Option<&str> {
        self.outcome.as_deref()
    }

    /// Returns the notes, if any.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }
}

/// Persisted project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    #[serde(flatten)]
    fields: ProjectFields,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: ProjectId,
        fields: ProjectFields,
        created_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            fields,
            created_at,
            completed_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project fields.
    #[must_use]
    pub const fn fields(&self) -> &ProjectFields {
        &self.fields
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.fields.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the project entered `completed`, if it is completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}

impl Owned for Project {
    fn owner_id(&self) -> UserId {
        self.fields.owner_id
    }
}

/// Derives the completion timestamp for a project moving to `next`.
///
/// `previous` is the stored project, or `None` on creation.
///
/// | previous status | next status | result                  |
/// |-----------------|-------------|-------------------------|
/// | not completed   | completed   | now                     |
/// | completed       | completed   | previous `completed_at` |
/// | any             | other       | `None`                  |
///
/// A stored completed project without a timestamp is stamped with now so the
/// result always satisfies `completed_at.is_some() == next.is_completed()`.
#[must_use]
pub fn completion_timestamp(
    previous: Option<&Project>,
    next: ProjectStatus,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if !next.is_completed() {
        return None;
    }
    let preserved = previous
        .filter(|project| project.status().is_completed())
        .and_then(Project::completed_at);
    Some(preserved.unwrap_or(now))
}

impl Project {
    /// Clears the area reference after the area is deleted.
    pub(crate) fn detach_area(&mut self) {
        self.fields.area_id = None;
    }
}
