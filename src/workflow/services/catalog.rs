//! Service layer for the organising catalog: areas, contexts, references and
//! tags.
//!
//! Every write checks that the owning user exists. Updates replace the whole
//! row.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info, warn};

use super::{
    error::{EntityRef, WorkflowError, WorkflowResult, found},
    require_user,
};
use crate::workflow::{
    domain::{
        Area, AreaFields, AreaId, Context, ContextFields, ContextId, Reference, ReferenceFields,
        ReferenceId, Tag, TagFields, TagId, UserId,
    },
    ports::{AreaRepository, ContextRepository, ReferenceRepository, TagRepository, UserRepository},
};

/// Request payload for creating or replacing an area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaRequest {
    owner_id: UserId,
    name: String,
    description: Option<String>,
}

impl AreaRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(owner_id: UserId, name: impl Into<String>) -> Self {
        Self {
            owner_id,
            name: name.into(),
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for creating or replacing a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextRequest {
    owner_id: UserId,
    name: String,
    description: Option<String>,
    is_location: bool,
}

impl ContextRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(owner_id: UserId, name: impl Into<String>) -> Self {
        Self {
            owner_id,
            name: name.into(),
            description: None,
            is_location: false,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the context as a physical location.
    #[must_use]
    pub const fn as_location(mut self) -> Self {
        self.is_location = true;
        self
    }
}

/// Request payload for creating or replacing a reference item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRequest {
    owner_id: UserId,
    title: String,
    body: Option<String>,
    url: Option<String>,
    file_hint: Option<String>,
}

impl ReferenceRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(owner_id: UserId, title: impl Into<String>) -> Self {
        Self {
            owner_id,
            title: title.into(),
            body: None,
            url: None,
            file_hint: None,
        }
    }

    /// Sets the body text.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the link.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the file location hint.
    #[must_use]
    pub fn with_file_hint(mut self, file_hint: impl Into<String>) -> Self {
        self.file_hint = Some(file_hint.into());
        self
    }
}

/// Request payload for creating or replacing a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRequest {
    owner_id: UserId,
    name: String,
}

impl TagRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(owner_id: UserId, name: impl Into<String>) -> Self {
        Self {
            owner_id,
            name: name.into(),
        }
    }
}

/// Area, context, reference and tag management.
#[derive(Clone)]
pub struct CatalogService<S, C>
where
    S: UserRepository + AreaRepository + ContextRepository + ReferenceRepository + TagRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> CatalogService<S, C>
where
    S: UserRepository + AreaRepository + ContextRepository + ReferenceRepository + TagRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new catalog service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates an area.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidArgument`] for malformed fields and
    /// [`WorkflowError::NotFound`] when the owner does not exist.
    pub async fn create_area(&self, request: AreaRequest) -> WorkflowResult<Area> {
        let fields = AreaFields::new(request.owner_id, request.name, request.description)?;
        info!(owner_id = %fields.owner_id(), "creating area");
        require_user(&*self.store, fields.owner_id()).await?;
        let area = self.store.insert_area(&fields, self.clock.utc()).await?;
        info!(area_id = %area.id(), "created area");
        Ok(area)
    }

    /// Replaces every field of an area.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the owner or the area is
    /// missing.
    pub async fn update_area(&self, id: AreaId, request: AreaRequest) -> WorkflowResult<Area> {
        let fields = AreaFields::new(request.owner_id, request.name, request.description)?;
        info!(area_id = %id, "updating area");
        require_user(&*self.store, fields.owner_id()).await?;
        found(self.store.update_area(id, &fields).await?, EntityRef::Area(id))
    }

    /// Deletes an area; its projects lose their area reference.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when no area matched.
    pub async fn delete_area(&self, id: AreaId) -> WorkflowResult<()> {
        info!(area_id = %id, "deleting area");
        if self.store.delete_area(id).await? {
            return Ok(());
        }
        warn!(area_id = %id, "no area deleted");
        Err(WorkflowError::NotFound(EntityRef::Area(id)))
    }

    /// Finds an area.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the area is missing.
    pub async fn find_area(&self, id: AreaId) -> WorkflowResult<Area> {
        found(self.store.find_area(id).await?, EntityRef::Area(id))
    }

    /// Lists every area.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the lookup fails.
    pub async fn list_areas(&self) -> WorkflowResult<Vec<Area>> {
        Ok(self.store.list_areas().await?)
    }

    /// Lists the areas owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the lookup fails.
    pub async fn list_areas_by_user(&self, owner: UserId) -> WorkflowResult<Vec<Area>> {
        let areas = self.store.list_areas_by_user(owner).await?;
        debug!(owner_id = %owner, count = areas.len(), "listed areas");
        Ok(areas)
    }

    /// Creates a context.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidArgument`] for malformed fields and
    /// [`WorkflowError::NotFound`] when the owner does not exist.
    pub async fn create_context(&self, request: ContextRequest) -> WorkflowResult<Context> {
        let fields = context_fields(request)?;
        info!(owner_id = %fields.owner_id(), "creating context");
        require_user(&*self.store, fields.owner_id()).await?;
        let context = self.store.insert_context(&fields, self.clock.utc()).await?;
        info!(context_id = %context.id(), "created context");
        Ok(context)
    }

    /// Replaces every field of a context.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the owner or the context is
    /// missing.
    pub async fn update_context(
        &self,
        id: ContextId,
        request: ContextRequest,
    ) -> WorkflowResult<Context> {
        let fields = context_fields(request)?;
        info!(context_id = %id, "updating context");
        require_user(&*self.store, fields.owner_id()).await?;
        found(
            self.store.update_context(id, &fields).await?,
            EntityRef::Context(id),
        )
    }

    /// Deletes a context; its tasks lose their context reference.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when no context matched.
    pub async fn delete_context(&self, id: ContextId) -> WorkflowResult<()> {
        info!(context_id = %id, "deleting context");
        if self.store.delete_context(id).await? {
            return Ok(());
        }
        warn!(context_id = %id, "no context deleted");
        Err(WorkflowError::NotFound(EntityRef::Context(id)))
    }

    /// Finds a context.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the context is missing.
    pub async fn find_context(&self, id: ContextId) -> WorkflowResult<Context> {
        found(self.store.find_context(id).await?, EntityRef::Context(id))
    }

    /// Lists every context.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the lookup fails.
    pub async fn list_contexts(&self) -> WorkflowResult<Vec<Context>> {
        Ok(self.store.list_contexts().await?)
    }

    /// Lists the contexts owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the lookup fails.
    pub async fn list_contexts_by_user(&self, owner: UserId) -> WorkflowResult<Vec<Context>> {
        let contexts = self.store.list_contexts_by_user(owner).await?;
        debug!(owner_id = %owner, count = contexts.len(), "listed contexts");
        Ok(contexts)
    }

    /// Creates a reference item.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidArgument`] for a blank title and
    /// [`WorkflowError::NotFound`] when the owner does not exist.
    pub async fn create_reference(&self, request: ReferenceRequest) -> WorkflowResult<Reference> {
        let fields = reference_fields(request)?;
        info!(owner_id = %fields.owner_id(), "creating reference");
        require_user(&*self.store, fields.owner_id()).await?;
        let reference = self
            .store
            .insert_reference(&fields, self.clock.utc())
            .await?;
        info!(reference_id = %reference.id(), "created reference");
        Ok(reference)
    }

    /// Replaces every field of a reference item.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the owner or the reference is
    /// missing.
    pub async fn update_reference(
        &self,
        id: ReferenceId,
        request: ReferenceRequest,
    ) -> WorkflowResult<Reference> {
        let fields = reference_fields(request)?;
        info!(reference_id = %id, "updating reference");
        require_user(&*self.store, fields.owner_id()).await?;
        found(
            self.store.update_reference(id, &fields).await?,
            EntityRef::Reference(id),
        )
    }

    /// Deletes a reference item.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when no reference matched.
    pub async fn delete_reference(&self, id: ReferenceId) -> WorkflowResult<()> {
        info!(reference_id = %id, "deleting reference");
        if self.store.delete_reference(id).await? {
            return Ok(());
        }
        warn!(reference_id = %id, "no reference deleted");
        Err(WorkflowError::NotFound(EntityRef::Reference(id)))
    }

    /// Finds a reference item.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the reference is missing.
    pub async fn find_reference(&self, id: ReferenceId) -> WorkflowResult<Reference> {
        found(
            self.store.find_reference(id).await?,
            EntityRef::Reference(id),
        )
    }

    /// Lists every reference item.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the lookup fails.
    pub async fn list_references(&self) -> WorkflowResult<Vec<Reference>> {
        Ok(self.store.list_references().await?)
    }

    /// Lists the reference items owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the lookup fails.
    pub async fn list_references_by_user(&self, owner: UserId) -> WorkflowResult<Vec<Reference>> {
        let references = self.store.list_references_by_user(owner).await?;
        debug!(owner_id = %owner, count = references.len(), "listed references");
        Ok(references)
    }

    /// Creates a tag.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidArgument`] for a malformed name and
    /// [`WorkflowError::NotFound`] when the owner does not exist.
    pub async fn create_tag(&self, request: TagRequest) -> WorkflowResult<Tag> {
        let fields = TagFields::new(request.owner_id, request.name)?;
        info!(owner_id = %fields.owner_id(), "creating tag");
        require_user(&*self.store, fields.owner_id()).await?;
        let tag = self.store.insert_tag(&fields, self.clock.utc()).await?;
        info!(tag_id = %tag.id(), "created tag");
        Ok(tag)
    }

    /// Replaces every field of a tag.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the owner or the tag is
    /// missing.
    pub async fn update_tag(&self, id: TagId, request: TagRequest) -> WorkflowResult<Tag> {
        let fields = TagFields::new(request.owner_id, request.name)?;
        info!(tag_id = %id, "updating tag");
        require_user(&*self.store, fields.owner_id()).await?;
        found(self.store.update_tag(id, &fields).await?, EntityRef::Tag(id))
    }

    /// Deletes a tag and its task links.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when no tag matched.
    pub async fn delete_tag(&self, id: TagId) -> WorkflowResult<()> {
        info!(tag_id = %id, "deleting tag");
        if self.store.delete_tag(id).await? {
            return Ok(());
        }
        warn!(tag_id = %id, "no tag deleted");
        Err(WorkflowError::NotFound(EntityRef::Tag(id)))
    }

    /// Finds a tag.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the tag is missing.
    pub async fn find_tag(&self, id: TagId) -> WorkflowResult<Tag> {
        found(self.store.find_tag(id).await?, EntityRef::Tag(id))
    }

    /// Lists every tag.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the lookup fails.
    pub async fn list_tags(&self) -> WorkflowResult<Vec<Tag>> {
        Ok(self.store.list_tags().await?)
    }

    /// Lists the tags owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the lookup fails.
    pub async fn list_tags_by_user(&self, owner: UserId) -> WorkflowResult<Vec<Tag>> {
        let tags = self.store.list_tags_by_user(owner).await?;
        debug!(owner_id = %owner, count = tags.len(), "listed tags");
        Ok(tags)
    }
}

fn context_fields(request: ContextRequest) -> WorkflowResult<ContextFields> {
    Ok(ContextFields::new(
        request.owner_id,
        request.name,
        request.description,
        request.is_location,
    )?)
}

fn reference_fields(request: ReferenceRequest) -> WorkflowResult<ReferenceFields> {
    Ok(ReferenceFields::new(
        request.owner_id,
        request.title,
        request.body,
        request.url,
        request.file_hint,
    )?)
}
