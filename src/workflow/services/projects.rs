//! Service layer for project lifecycle orchestration.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use tracing::{debug, info, warn};

use super::{
    error::{EntityRef, WorkflowError, WorkflowResult, found},
    require_user,
};
use crate::workflow::{
    domain::{
        AreaId, Project, ProjectFields, ProjectFieldsInput, ProjectId, ProjectStatus, UserId,
        completion_timestamp,
    },
    ports::{AreaRepository, ProjectRepository, UserRepository},
};

/// Request payload for creating or replacing a project.
///
/// The status is accepted as text and parsed case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequest {
    owner_id: UserId,
    title: String,
    status: String,
    area_id: Option<AreaId>,
    outcome: Option<String>,
    notes: Option<String>,
    due_date: Option<NaiveDate>,
}

impl ProjectRequest {
    /// Creates a request with the required project fields.
    #[must_use]
    pub fn new(owner_id: UserId, title: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            owner_id,
            title: title.into(),
            status: status.into(),
            area_id: None,
            outcome: None,
            notes: None,
            due_date: None,
        }
    }

    /// Sets the grouping area.
    #[must_use]
    pub const fn with_area(mut self, area_id: AreaId) -> Self {
        self.area_id = Some(area_id);
        self
    }

    /// Sets the outcome statement.
    #[must_use]
    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = Some(outcome.into());
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    fn into_fields(self) -> WorkflowResult<ProjectFields> {
        let status = self.status.parse::<ProjectStatus>()?;
        Ok(ProjectFields::new(ProjectFieldsInput {
            owner_id: self.owner_id,
            area_id: self.area_id,
            title: self.title,
            outcome: self.outcome,
            notes: self.notes,
            status,
            due_date: self.due_date,
        })?)
    }
}

/// Project lifecycle orchestration service.
///
/// Derives `completed_at` from status transitions; see
/// [`completion_timestamp`].
#[derive(Clone)]
pub struct ProjectLifecycleService<S, C>
where
    S: UserRepository + AreaRepository + ProjectRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> ProjectLifecycleService<S, C>
where
    S: UserRepository + AreaRepository + ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project lifecycle service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates a project, stamping `completed_at` when it starts completed.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidArgument`] or
    /// [`WorkflowError::InvalidStatus`] for malformed input and
    /// [`WorkflowError::NotFound`] when the owner or area does not exist.
    pub async fn create(&self, request: ProjectRequest) -> WorkflowResult<Project> {
        let fields = request.into_fields()?;
        info!(owner_id = %fields.owner_id(), status = %fields.status(), "creating project");
        self.check_references(&fields).await?;

        let now = self.clock.utc();
        let completed_at = completion_timestamp(None, fields.status(), now);
        let project = self.store.insert_project(&fields, now, completed_at).await?;
        info!(project_id = %project.id(), "created project");
        Ok(project)
    }

    /// Replaces every field of a project; the store re-derives `completed_at`
    /// from the status it holds at write time.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the project, its owner or its
    /// area does not exist.
    pub async fn update(&self, id: ProjectId, request: ProjectRequest) -> WorkflowResult<Project> {
        let fields = request.into_fields()?;
        info!(project_id = %id, status = %fields.status(), "updating project");
        self.check_references(&fields).await?;

        let Some(updated) = self
            .store
            .update_project(id, &fields, self.clock.utc())
            .await?
        else {
            warn!(project_id = %id, "project not found for update");
            return Err(WorkflowError::NotFound(EntityRef::Project(id)));
        };
        debug!(
            project_id = %id,
            status = %updated.status(),
            completed_at = ?updated.completed_at(),
            "project updated"
        );
        Ok(updated)
    }

    /// Deletes a project; its tasks lose their project reference.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when no project matched.
    pub async fn delete(&self, id: ProjectId) -> WorkflowResult<()> {
        info!(project_id = %id, "deleting project");
        if self.store.delete_project(id).await? {
            return Ok(());
        }
        warn!(project_id = %id, "no project deleted");
        Err(WorkflowError::NotFound(EntityRef::Project(id)))
    }

    /// Finds a project.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the project is missing.
    pub async fn find(&self, id: ProjectId) -> WorkflowResult<Project> {
        found(self.store.find_project(id).await?, EntityRef::Project(id))
    }

    /// Lists every project.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the lookup fails.
    pub async fn list(&self) -> WorkflowResult<Vec<Project>> {
        Ok(self.store.list_projects().await?)
    }

    /// Lists the projects owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the lookup fails.
    pub async fn list_by_user(&self, owner: UserId) -> WorkflowResult<Vec<Project>> {
        let projects = self.store.list_projects_by_user(owner).await?;
        debug!(owner_id = %owner, count = projects.len(), "listed projects");
        Ok(projects)
    }

    /// Lists the projects grouped under `area`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the lookup fails.
    pub async fn list_by_area(&self, area: AreaId) -> WorkflowResult<Vec<Project>> {
        let projects = self.store.list_projects_by_area(area).await?;
        debug!(area_id = %area, count = projects.len(), "listed projects");
        Ok(projects)
    }

    /// Lists the projects in a status given as text.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidStatus`] for an unknown status.
    pub async fn list_by_status(&self, status: &str) -> WorkflowResult<Vec<Project>> {
        let parsed = status.parse::<ProjectStatus>()?;
        let projects = self.store.list_projects_by_status(parsed).await?;
        debug!(status = %parsed, count = projects.len(), "listed projects");
        Ok(projects)
    }

    /// Owner must exist; the area, when given, must exist. Area ownership is
    /// not compared.
    async fn check_references(&self, fields: &ProjectFields) -> WorkflowResult<()> {
        require_user(&*self.store, fields.owner_id()).await?;
        if let Some(area_id) = fields.area_id()
            && self.store.find_area(area_id).await?.is_none()
        {
            warn!(area_id = %area_id, "area not found");
            return Err(WorkflowError::NotFound(EntityRef::Area(area_id)));
        }
        Ok(())
    }
}
