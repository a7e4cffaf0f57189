//! Diesel row models for workflow persistence.
//!
//! `*Row` types are read back from the database and re-validated through the
//! domain constructors. `*Values` types carry the mutable columns for both
//! inserts and full-replacement updates.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{areas, contexts, projects, reference_items, tags, tasks, users};
use crate::workflow::{
    domain::{
        Area, AreaFields, AreaId, Context, ContextFields, ContextId, Project, ProjectFields,
        ProjectFieldsInput, ProjectId, ProjectStatus, Reference, ReferenceFields, ReferenceId,
        Tag, TagFields, TagId, Task, TaskFields, TaskFieldsInput, TaskId, TaskStatus, User,
        UserFields, UserId,
    },
    ports::{RepositoryError, RepositoryResult},
};

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Generated identifier.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Optional display name.
    pub display_name: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Rebuilds the domain user.
    pub fn into_domain(self) -> RepositoryResult<User> {
        let fields = UserFields::new(self.username, self.email, self.display_name)
            .map_err(RepositoryError::invalid_persisted_data)?;
        Ok(User::from_persisted(UserId::new(self.id), fields, self.created_at))
    }
}

/// Mutable user columns.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub struct UserValues {
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Optional display name.
    pub display_name: Option<String>,
}

impl From<&UserFields> for UserValues {
    fn from(fields: &UserFields) -> Self {
        Self {
            username: fields.username().to_owned(),
            email: fields.email().to_owned(),
            display_name: fields.display_name().map(str::to_owned),
        }
    }
}

/// Query result row for area records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = areas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AreaRow {
    /// Generated identifier.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Area name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl AreaRow {
    /// Rebuilds the domain area.
    pub fn into_domain(self) -> RepositoryResult<Area> {
        let fields = AreaFields::new(UserId::new(self.user_id), self.name, self.description)
            .map_err(RepositoryError::invalid_persisted_data)?;
        Ok(Area::from_persisted(AreaId::new(self.id), fields, self.created_at))
    }
}

/// Mutable area columns.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = areas)]
#[diesel(treat_none_as_null = true)]
pub struct AreaValues {
    /// Owning user.
    pub user_id: i64,
    /// Area name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

impl From<&AreaFields> for AreaValues {
    fn from(fields: &AreaFields) -> Self {
        Self {
            user_id: fields.owner_id().value(),
            name: fields.name().to_owned(),
            description: fields.description().map(str::to_owned),
        }
    }
}

/// Query result row for context records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contexts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ContextRow {
    /// Generated identifier.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Context name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Location flag.
    pub is_location: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ContextRow {
    /// Rebuilds the domain context.
    pub fn into_domain(self) -> RepositoryResult<Context> {
        let fields = ContextFields::new(
            UserId::new(self.user_id),
            self.name,
            self.description,
            self.is_location,
        )
        .map_err(RepositoryError::invalid_persisted_data)?;
        Ok(Context::from_persisted(
            ContextId::new(self.id),
            fields,
            self.created_at,
        ))
    }
}

/// Mutable context columns.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = contexts)]
#[diesel(treat_none_as_null = true)]
pub struct ContextValues {
    /// Owning user.
    pub user_id: i64,
    /// Context name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Location flag.
    pub is_location: bool,
}

impl From<&ContextFields> for ContextValues {
    fn from(fields: &ContextFields) -> Self {
        Self {
            user_id: fields.owner_id().value(),
            name: fields.name().to_owned(),
            description: fields.description().map(str::to_owned),
            is_location: fields.is_location(),
        }
    }
}

/// Query result row for reference records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reference_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReferenceRow {
    /// Generated identifier.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Reference title.
    pub title: String,
    /// Optional body.
    pub body: Option<String>,
    /// Optional link.
    pub url: Option<String>,
    /// Optional file hint.
    pub file_hint: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ReferenceRow {
    /// Rebuilds the domain reference.
    pub fn into_domain(self) -> RepositoryResult<Reference> {
        let fields = ReferenceFields::new(
            UserId::new(self.user_id),
            self.title,
            self.body,
            self.url,
            self.file_hint,
        )
        .map_err(RepositoryError::invalid_persisted_data)?;
        Ok(Reference::from_persisted(
            ReferenceId::new(self.id),
            fields,
            self.created_at,
        ))
    }
}

/// Mutable reference columns.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = reference_items)]
#[diesel(treat_none_as_null = true)]
pub struct ReferenceValues {
    /// Owning user.
    pub user_id: i64,
    /// Reference title.
    pub title: String,
    /// Optional body.
    pub body: Option<String>,
    /// Optional link.
    pub url: Option<String>,
    /// Optional file hint.
    pub file_hint: Option<String>,
}

impl From<&ReferenceFields> for ReferenceValues {
    fn from(fields: &ReferenceFields) -> Self {
        Self {
            user_id: fields.owner_id().value(),
            title: fields.title().to_owned(),
            body: fields.body().map(str::to_owned),
            url: fields.url().map(str::to_owned),
            file_hint: fields.file_hint().map(str::to_owned),
        }
    }
}

/// Query result row for tag records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TagRow {
    /// Generated identifier.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Tag name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TagRow {
    /// Rebuilds the domain tag.
    pub fn into_domain(self) -> RepositoryResult<Tag> {
        let fields = TagFields::new(UserId::new(self.user_id), self.name)
            .map_err(RepositoryError::invalid_persisted_data)?;
        Ok(Tag::from_persisted(TagId::new(self.id), fields, self.created_at))
    }
}

/// Mutable tag columns.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tags)]
pub struct TagValues {
    /// Owning user.
    pub user_id: i64,
    /// Tag name.
    pub name: String,
}

impl From<&TagFields> for TagValues {
    fn from(fields: &TagFields) -> Self {
        Self {
            user_id: fields.owner_id().value(),
            name: fields.name().to_owned(),
        }
    }
}

/// Query result row for project records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Generated identifier.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Optional area.
    pub area_id: Option<i64>,
    /// Project title.
    pub title: String,
    /// Optional outcome.
    pub outcome: Option<String>,
    /// Optional notes.
    pub notes: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

impl ProjectRow {
    /// Rebuilds the domain project.
    pub fn into_domain(self) -> RepositoryResult<Project> {
        let status = ProjectStatus::try_from(self.status.as_str())
            .map_err(RepositoryError::invalid_persisted_data)?;
        let fields = ProjectFields::new(ProjectFieldsInput {
            owner_id: UserId::new(self.user_id),
            area_id: self.area_id.map(AreaId::new),
            title: self.title,
            outcome: self.outcome,
            notes: self.notes,
            status,
            due_date: self.due_date,
        })
        .map_err(RepositoryError::invalid_persisted_data)?;
        Ok(Project::from_persisted(
            ProjectId::new(self.id),
            fields,
            self.created_at,
            self.completed_at,
        ))
    }
}

/// Mutable project columns, including the completion timestamp.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub struct ProjectValues {
    /// Owning user.
    pub user_id: i64,
    /// Optional area.
    pub area_id: Option<i64>,
    /// Project title.
    pub title: String,
    /// Optional outcome.
    pub outcome: Option<String>,
    /// Optional notes.
    pub notes: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

impl ProjectValues {
    /// Builds column values from validated fields.
    pub fn new(fields: &ProjectFields, completed_at: Option<DateTime<Utc>>) -> Self {
        Self {
            user_id: fields.owner_id().value(),
            area_id: fields.area_id().map(AreaId::value),
            title: fields.title().to_owned(),
            outcome: fields.outcome().map(str::to_owned),
            notes: fields.notes().map(str::to_owned),
            status: fields.status().as_str().to_owned(),
            due_date: fields.due_date(),
            completed_at,
        }
    }
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Generated identifier.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Optional project.
    pub project_id: Option<i64>,
    /// Optional context.
    pub context_id: Option<i64>,
    /// Task title.
    pub title: String,
    /// Optional notes.
    pub notes: Option<String>,
    /// Workflow status.
    pub status: String,
    /// Optional priority.
    pub priority: Option<i32>,
    /// Optional energy.
    pub energy: Option<i32>,
    /// Optional duration estimate.
    pub duration_est_min: Option<i32>,
    /// Optional due timestamp.
    pub due_at: Option<DateTime<Utc>>,
    /// Optional defer timestamp.
    pub defer_until: Option<DateTime<Utc>>,
    /// Optional waited-on party.
    pub waiting_on: Option<String>,
    /// Optional waiting start.
    pub waiting_since: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Optional ordering key.
    pub order_index: Option<i32>,
}

impl TaskRow {
    /// Rebuilds the domain task.
    pub fn into_domain(self) -> RepositoryResult<Task> {
        let status = TaskStatus::try_from(self.status.as_str())
            .map_err(RepositoryError::invalid_persisted_data)?;
        let fields = TaskFields::new(TaskFieldsInput {
            owner_id: UserId::new(self.user_id),
            project_id: self.project_id.map(ProjectId::new),
            context_id: self.context_id.map(ContextId::new),
            title: self.title,
            notes: self.notes,
            status,
            priority: self.priority,
            energy: self.energy,
            duration_est_min: self.duration_est_min,
            due_at: self.due_at,
            defer_until: self.defer_until,
            waiting_on: self.waiting_on,
            waiting_since: self.waiting_since,
            completed_at: self.completed_at,
            order_index: self.order_index,
        })
        .map_err(RepositoryError::invalid_persisted_data)?;
        Ok(Task::from_persisted(
            TaskId::new(self.id),
            fields,
            self.created_at,
        ))
    }
}

/// Mutable task columns.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskValues {
    /// Owning user.
    pub user_id: i64,
    /// Optional project.
    pub project_id: Option<i64>,
    /// Optional context.
    pub context_id: Option<i64>,
    /// Task title.
    pub title: String,
    /// Optional notes.
    pub notes: Option<String>,
    /// Workflow status.
    pub status: String,
    /// Optional priority.
    pub priority: Option<i32>,
    /// Optional energy.
    pub energy: Option<i32>,
    /// Optional duration estimate.
    pub duration_est_min: Option<i32>,
    /// Optional due timestamp.
    pub due_at: Option<DateTime<Utc>>,
    /// Optional defer timestamp.
    pub defer_until: Option<DateTime<Utc>>,
    /// Optional waited-on party.
    pub waiting_on: Option<String>,
    /// Optional waiting start.
    pub waiting_since: Option<DateTime<Utc>>,
    /// Optional completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Optional ordering key.
    pub order_index: Option<i32>,
}

impl From<&TaskFields> for TaskValues {
    fn from(fields: &TaskFields) -> Self {
        Self {
            user_id: fields.owner_id().value(),
            project_id: fields.project_id().map(ProjectId::value),
            context_id: fields.context_id().map(ContextId::value),
            title: fields.title().to_owned(),
            notes: fields.notes().map(str::to_owned),
            status: fields.status().as_str().to_owned(),
            priority: fields.priority(),
            energy: fields.energy(),
            duration_est_min: fields.duration_est_min(),
            due_at: fields.due_at(),
            defer_until: fields.defer_until(),
            waiting_on: fields.waiting_on().map(str::to_owned),
            waiting_since: fields.waiting_since(),
            completed_at: fields.completed_at(),
            order_index: fields.order_index(),
        }
    }
}
