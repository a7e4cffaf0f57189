//! In-memory users, areas, contexts, references and tags.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{InMemoryGtdStore, StoreState, next_id};
use crate::workflow::{
    domain::{
        Area, AreaFields, AreaId, Context, ContextFields, ContextId, Owned, Reference,
        ReferenceFields, ReferenceId, Tag, TagFields, TagId, User, UserFields, UserId,
    },
    ports::{
        AreaRepository, ContextRepository, ReferenceRepository, RepositoryError,
        RepositoryResult, TagRepository, UserRepository,
    },
};

impl StoreState {
    /// Rejects a username or email already held by a user other than `except`.
    fn check_user_unique(
        &self,
        fields: &UserFields,
        except: Option<UserId>,
    ) -> RepositoryResult<()> {
        for user in self.users.values().filter(|u| Some(u.id()) != except) {
            if user.fields().username() == fields.username() {
                return Err(RepositoryError::Duplicate(format!(
                    "username: {}",
                    fields.username()
                )));
            }
            if user.fields().email() == fields.email() {
                return Err(RepositoryError::Duplicate(format!("email: {}", fields.email())));
            }
        }
        Ok(())
    }

    fn remove_area(&mut self, id: AreaId) -> bool {
        if self.areas.remove(&id).is_none() {
            return false;
        }
        for project in self.projects.values_mut() {
            if project.fields().area_id() == Some(id) {
                project.detach_area();
            }
        }
        true
    }

    fn remove_context(&mut self, id: ContextId) -> bool {
        if self.contexts.remove(&id).is_none() {
            return false;
        }
        for task in self.tasks.values_mut() {
            if task.fields().context_id() == Some(id) {
                task.detach_context();
            }
        }
        true
    }

    fn remove_tag(&mut self, id: TagId) -> bool {
        if self.tags.remove(&id).is_none() {
            return false;
        }
        self.task_tags.retain(|(_, tag)| *tag != id);
        true
    }

    /// Removes a user and every row the user owns.
    fn remove_user(&mut self, id: UserId) -> bool {
        if self.users.remove(&id).is_none() {
            return false;
        }
        let tasks = owned_keys(&self.tasks, id);
        for task in tasks {
            self.remove_task(task);
        }
        let projects = owned_keys(&self.projects, id);
        for project in projects {
            self.remove_project(project);
        }
        let tags = owned_keys(&self.tags, id);
        for tag in tags {
            self.remove_tag(tag);
        }
        let contexts = owned_keys(&self.contexts, id);
        for context in contexts {
            self.remove_context(context);
        }
        let areas = owned_keys(&self.areas, id);
        for area in areas {
            self.remove_area(area);
        }
        self.references.retain(|_, reference| reference.owner_id() != id);
        true
    }
}

/// Collects the keys of rows owned by `owner`.
fn owned_keys<K: Copy + Ord, V: Owned>(
    table: &std::collections::BTreeMap<K, V>,
    owner: UserId,
) -> Vec<K> {
    table
        .iter()
        .filter(|(_, row)| row.owner_id() == owner)
        .map(|(key, _)| *key)
        .collect()
}

fn owned_rows<K, V: Owned + Clone>(
    table: &std::collections::BTreeMap<K, V>,
    owner: UserId,
) -> Vec<V> {
    table
        .values()
        .filter(|row| row.owner_id() == owner)
        .cloned()
        .collect()
}

#[async_trait]
impl UserRepository for InMemoryGtdStore {
    async fn insert_user(
        &self,
        fields: &UserFields,
        created_at: DateTime<Utc>,
    ) -> RepositoryResult<User> {
        let mut state = self.write()?;
        state.check_user_unique(fields, None)?;
        let id = UserId::new(next_id(&mut state.sequences.user));
        let user = User::from_persisted(id, fields.clone(), created_at);
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update_user(
        &self,
        id: UserId,
        fields: &UserFields,
    ) -> RepositoryResult<Option<User>> {
        let mut state = self.write()?;
        let Some(created_at) = state.users.get(&id).map(User::created_at) else {
            return Ok(None);
        };
        state.check_user_unique(fields, Some(id))?;
        let user = User::from_persisted(id, fields.clone(), created_at);
        state.users.insert(id, user.clone());
        Ok(Some(user))
    }

    async fn delete_user(&self, id: UserId) -> RepositoryResult<bool> {
        Ok(self.write()?.remove_user(id))
    }

    async fn find_user(&self, id: UserId) -> RepositoryResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state
            .users
            .values()
            .find(|user| user.fields().username() == username)
            .cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state
            .users
            .values()
            .find(|user| user.fields().email() == email)
            .cloned())
    }

    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        Ok(self.read()?.users.values().cloned().collect())
    }
}

#[async_trait]
impl AreaRepository for InMemoryGtdStore {
    async fn insert_area(
        &self,
        fields: &AreaFields,
        created_at: DateTime<Utc>,
    ) -> RepositoryResult<Area> {
        let mut state = self.write()?;
        let id = AreaId::new(next_id(&mut state.sequences.area));
        let area = Area::from_persisted(id, fields.clone(), created_at);
        state.areas.insert(id, area.clone());
        Ok(area)
    }

    async fn update_area(
        &self,
        id: AreaId,
        fields: &AreaFields,
    ) -> RepositoryResult<Option<Area>> {
        let mut state = self.write()?;
        let Some(existing) = state.areas.get_mut(&id) else {
            return Ok(None);
        };
        *existing = Area::from_persisted(id, fields.clone(), existing.created_at());
        Ok(Some(existing.clone()))
    }

    async fn delete_area(&self, id: AreaId) -> RepositoryResult<bool> {
        Ok(self.write()?.remove_area(id))
    }

    async fn find_area(&self, id: AreaId) -> RepositoryResult<Option<Area>> {
        Ok(self.read()?.areas.get(&id).cloned())
    }

    async fn list_areas(&self) -> RepositoryResult<Vec<Area>> {
        Ok(self.read()?.areas.values().cloned().collect())
    }

    async fn list_areas_by_user(&self, owner: UserId) -> RepositoryResult<Vec<Area>> {
        Ok(owned_rows(&self.read()?.areas, owner))
    }
}

#[async_trait]
impl ContextRepository for InMemoryGtdStore {
    async fn insert_context(
        &self,
        fields: &ContextFields,
        created_at: DateTime<Utc>,
    ) -> RepositoryResult<Context> {
        let mut state = self.write()?;
        let id = ContextId::new(next_id(&mut state.sequences.context));
        let context = Context::from_persisted(id, fields.clone(), created_at);
        state.contexts.insert(id, context.clone());
        Ok(context)
    }

    async fn update_context(
        &self,
        id: ContextId,
        fields: &ContextFields,
    ) -> RepositoryResult<Option<Context>> {
        let mut state = self.write()?;
        let Some(existing) = state.contexts.get_mut(&id) else {
            return Ok(None);
        };
        *existing = Context::from_persisted(id, fields.clone(), existing.created_at());
        Ok(Some(existing.clone()))
    }

    async fn delete_context(&self, id: ContextId) -> RepositoryResult<bool> {
        Ok(self.write()?.remove_context(id))
    }

    async fn find_context(&self, id: ContextId) -> RepositoryResult<Option<Context>> {
        Ok(self.read()?.contexts.get(&id).cloned())
    }

    async fn list_contexts(&self) -> RepositoryResult<Vec<Context>> {
        Ok(self.read()?.contexts.values().cloned().collect())
    }

    async fn list_contexts_by_user(&self, owner: UserId) -> RepositoryResult<Vec<Context>> {
        Ok(owned_rows(&self.read()?.contexts, owner))
    }
}

#[async_trait]
impl ReferenceRepository for InMemoryGtdStore {
    async fn insert_reference(
        &self,
        fields: &ReferenceFields,
        created_at: DateTime<Utc>,
    ) -> RepositoryResult<Reference> {
        let mut state = self.write()?;
        let id = ReferenceId::new(next_id(&mut state.sequences.reference));
        let reference = Reference::from_persisted(id, fields.clone(), created_at);
        state.references.insert(id, reference.clone());
        Ok(reference)
    }

    async fn update_reference(
        &self,
        id: ReferenceId,
        fields: &ReferenceFields,
    ) -> RepositoryResult<Option<Reference>> {
        let mut state = self.write()?;
        let Some(existing) = state.references.get_mut(&id) else {
            return Ok(None);
        };
        *existing = Reference::from_persisted(id, fields.clone(), existing.created_at());
        Ok(Some(existing.clone()))
    }

    async fn delete_reference(&self, id: ReferenceId) -> RepositoryResult<bool> {
        Ok(self.write()?.references.remove(&id).is_some())
    }

    async fn find_reference(&self, id: ReferenceId) -> RepositoryResult<Option<Reference>> {
        Ok(self.read()?.references.get(&id).cloned())
    }

    async fn list_references(&self) -> RepositoryResult<Vec<Reference>> {
        Ok(self.read()?.references.values().cloned().collect())
    }

    async fn list_references_by_user(&self, owner: UserId) -> RepositoryResult<Vec<Reference>> {
        Ok(owned_rows(&self.read()?.references, owner))
    }
}

#[async_trait]
impl TagRepository for InMemoryGtdStore {
    async fn insert_tag(
        &self,
        fields: &TagFields,
        created_at: DateTime<Utc>,
    ) -> RepositoryResult<Tag> {
        let mut state = self.write()?;
        let id = TagId::new(next_id(&mut state.sequences.tag));
        let tag = Tag::from_persisted(id, fields.clone(), created_at);
        state.tags.insert(id, tag.clone());
        Ok(tag)
    }

    async fn update_tag(&self, id: TagId, fields: &TagFields) -> RepositoryResult<Option<Tag>> {
        let mut state = self.write()?;
        let Some(existing) = state.tags.get_mut(&id) else {
            return Ok(None);
        };
        *existing = Tag::from_persisted(id, fields.clone(), existing.created_at());
        Ok(Some(existing.clone()))
    }

    async fn delete_tag(&self, id: TagId) -> RepositoryResult<bool> {
        Ok(self.write()?.remove_tag(id))
    }

    async fn find_tag(&self, id: TagId) -> RepositoryResult<Option<Tag>> {
        Ok(self.read()?.tags.get(&id).cloned())
    }

    async fn list_tags(&self) -> RepositoryResult<Vec<Tag>> {
        Ok(self.read()?.tags.values().cloned().collect())
    }

    async fn list_tags_by_user(&self, owner: UserId) -> RepositoryResult<Vec<Tag>> {
        Ok(owned_rows(&self.read()?.tags, owner))
    }
}
