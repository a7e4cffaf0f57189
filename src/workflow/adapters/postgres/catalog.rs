//! `PostgreSQL` users, areas, contexts, references and tags.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::{
    PostgresGtdStore,
    models::{
        AreaRow, AreaValues, ContextRow, ContextValues, ReferenceRow, ReferenceValues, TagRow,
        TagValues, UserRow, UserValues,
    },
    schema::{areas, contexts, reference_items, tags, users},
};
use crate::workflow::{
    domain::{
        Area, AreaFields, AreaId, Context, ContextFields, ContextId, Reference, ReferenceFields,
        ReferenceId, Tag, TagFields, TagId, User, UserFields, UserId,
    },
    ports::{
        AreaRepository, ContextRepository, ReferenceRepository, RepositoryResult, TagRepository,
        UserRepository,
    },
};

#[async_trait]
impl UserRepository for PostgresGtdStore {
    async fn insert_user(
        &self,
        fields: &UserFields,
        created_at: DateTime<Utc>,
    ) -> RepositoryResult<User> {
        let values = UserValues::from(fields);
        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values((&values, users::created_at.eq(created_at)))
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(connection)?
                .into_domain()
        })
        .await
    }

    async fn update_user(
        &self,
        id: UserId,
        fields: &UserFields,
    ) -> RepositoryResult<Option<User>> {
        let values = UserValues::from(fields);
        self.run_blocking(move |connection| {
            diesel::update(users::table.find(id.value()))
                .set(&values)
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(connection)
                .optional()?
                .map(UserRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn delete_user(&self, id: UserId) -> RepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(users::table.find(id.value())).execute(connection)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn find_user(&self, id: UserId) -> RepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            users::table
                .find(id.value())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()?
                .map(UserRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn find_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        let lookup = username.to_owned();
        self.run_blocking(move |connection| {
            users::table
                .filter(users::username.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()?
                .map(UserRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let lookup = email.to_owned();
        self.run_blocking(move |connection| {
            users::table
                .filter(users::email.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()?
                .map(UserRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        self.run_blocking(move |connection| {
            users::table
                .order(users::id.asc())
                .select(UserRow::as_select())
                .load::<UserRow>(connection)?
                .into_iter()
                .map(UserRow::into_domain)
                .collect()
        })
        .await
    }
}

#[async_trait]
impl AreaRepository for PostgresGtdStore {
    async fn insert_area(
        &self,
        fields: &AreaFields,
        created_at: DateTime<Utc>,
    ) -> RepositoryResult<Area> {
        let values = AreaValues::from(fields);
        self.run_blocking(move |connection| {
            diesel::insert_into(areas::table)
                .values((&values, areas::created_at.eq(created_at)))
                .returning(AreaRow::as_returning())
                .get_result::<AreaRow>(connection)?
                .into_domain()
        })
        .await
    }

    async fn update_area(
        &self,
        id: AreaId,
        fields: &AreaFields,
    ) -> RepositoryResult<Option<Area>> {
        let values = AreaValues::from(fields);
        self.run_blocking(move |connection| {
            diesel::update(areas::table.find(id.value()))
                .set(&values)
                .returning(AreaRow::as_returning())
                .get_result::<AreaRow>(connection)
                .optional()?
                .map(AreaRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn delete_area(&self, id: AreaId) -> RepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(areas::table.find(id.value())).execute(connection)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn find_area(&self, id: AreaId) -> RepositoryResult<Option<Area>> {
        self.run_blocking(move |connection| {
            areas::table
                .find(id.value())
                .select(AreaRow::as_select())
                .first::<AreaRow>(connection)
                .optional()?
                .map(AreaRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn list_areas(&self) -> RepositoryResult<Vec<Area>> {
        self.run_blocking(move |connection| {
            areas::table
                .order(areas::id.asc())
                .select(AreaRow::as_select())
                .load::<AreaRow>(connection)?
                .into_iter()
                .map(AreaRow::into_domain)
                .collect()
        })
        .await
    }

    async fn list_areas_by_user(&self, owner: UserId) -> RepositoryResult<Vec<Area>> {
        self.run_blocking(move |connection| {
            areas::table
                .filter(areas::user_id.eq(owner.value()))
                .order(areas::id.asc())
                .select(AreaRow::as_select())
                .load::<AreaRow>(connection)?
                .into_iter()
                .map(AreaRow::into_domain)
                .collect()
        })
        .await
    }
}

#[async_trait]
impl ContextRepository for PostgresGtdStore {
    async fn insert_context(
        &self,
        fields: &ContextFields,
        created_at: DateTime<Utc>,
    ) -> RepositoryResult<Context> {
        let values = ContextValues::from(fields);
        self.run_blocking(move |connection| {
            diesel::insert_into(contexts::table)
                .values((&values, contexts::created_at.eq(created_at)))
                .returning(ContextRow::as_returning())
                .get_result::<ContextRow>(connection)?
                .into_domain()
        })
        .await
    }

    async fn update_context(
        &self,
        id: ContextId,
        fields: &ContextFields,
    ) -> RepositoryResult<Option<Context>> {
        let values = ContextValues::from(fields);
        self.run_blocking(move |connection| {
            diesel::update(contexts::table.find(id.value()))
                .set(&values)
                .returning(ContextRow::as_returning())
                .get_result::<ContextRow>(connection)
                .optional()?
                .map(ContextRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn delete_context(&self, id: ContextId) -> RepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(contexts::table.find(id.value())).execute(connection)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn find_context(&self, id: ContextId) -> RepositoryResult<Option<Context>> {
        self.run_blocking(move |connection| {
            contexts::table
                .find(id.value())
                .select(ContextRow::as_select())
                .first::<ContextRow>(connection)
                .optional()?
                .map(ContextRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn list_contexts(&self) -> RepositoryResult<Vec<Context>> {
        self.run_blocking(move |connection| {
            contexts::table
                .order(contexts::id.asc())
                .select(ContextRow::as_select())
                .load::<ContextRow>(connection)?
                .into_iter()
                .map(ContextRow::into_domain)
                .collect()
        })
        .await
    }

    async fn list_contexts_by_user(&self, owner: UserId) -> RepositoryResult<Vec<Context>> {
        self.run_blocking(move |connection| {
            contexts::table
                .filter(contexts::user_id.eq(owner.value()))
                .order(contexts::id.asc())
                .select(ContextRow::as_select())
                .load::<ContextRow>(connection)?
                .into_iter()
                .map(ContextRow::into_domain)
                .collect()
        })
        .await
    }
}

#[async_trait]
impl ReferenceRepository for PostgresGtdStore {
    async fn insert_reference(
        &self,
        fields: &ReferenceFields,
        created_at: DateTime<Utc>,
    ) -> RepositoryResult<Reference> {
        let values = ReferenceValues::from(fields);
        self.run_blocking(move |connection| {
            diesel::insert_into(reference_items::table)
                .values((&values, reference_items::created_at.eq(created_at)))
                .returning(ReferenceRow::as_returning())
                .get_result::<ReferenceRow>(connection)?
                .into_domain()
        })
        .await
    }

    async fn update_reference(
        &self,
        id: ReferenceId,
        fields: &ReferenceFields,
    ) -> RepositoryResult<Option<Reference>> {
        let values = ReferenceValues::from(fields);
        self.run_blocking(move |connection| {
            diesel::update(reference_items::table.find(id.value()))
                .set(&values)
                .returning(ReferenceRow::as_returning())
                .get_result::<ReferenceRow>(connection)
                .optional()?
                .map(ReferenceRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn delete_reference(&self, id: ReferenceId) -> RepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(reference_items::table.find(id.value())).execute(connection)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn find_reference(&self, id: ReferenceId) -> RepositoryResult<Option<Reference>> {
        self.run_blocking(move |connection| {
            reference_items::table
                .find(id.value())
                .select(ReferenceRow::as_select())
                .first::<ReferenceRow>(connection)
                .optional()?
                .map(ReferenceRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn list_references(&self) -> RepositoryResult<Vec<Reference>> {
        self.run_blocking(move |connection| {
            reference_items::table
                .order(reference_items::id.asc())
                .select(ReferenceRow::as_select())
                .load::<ReferenceRow>(connection)?
                .into_iter()
                .map(ReferenceRow::into_domain)
                .collect()
        })
        .await
    }

    async fn list_references_by_user(&self, owner: UserId) -> RepositoryResult<Vec<Reference>> {
        self.run_blocking(move |connection| {
            reference_items::table
                .filter(reference_items::user_id.eq(owner.value()))
                .order(reference_items::id.asc())
                .select(ReferenceRow::as_select())
                .load::<ReferenceRow>(connection)?
                .into_iter()
                .map(ReferenceRow::into_domain)
                .collect()
        })
        .await
    }
}

#[async_trait]
impl TagRepository for PostgresGtdStore {
    async fn insert_tag(
        &self,
        fields: &TagFields,
        created_at: DateTime<Utc>,
    ) -> RepositoryResult<Tag> {
        let values = TagValues::from(fields);
        self.run_blocking(move |connection| {
            diesel::insert_into(tags::table)
                .values((&values, tags::created_at.eq(created_at)))
                .returning(TagRow::as_returning())
                .get_result::<TagRow>(connection)?
                .into_domain()
        })
        .await
    }

    async fn update_tag(&self, id: TagId, fields: &TagFields) -> RepositoryResult<Option<Tag>> {
        let values = TagValues::from(fields);
        self.run_blocking(move |connection| {
            diesel::update(tags::table.find(id.value()))
                .set(&values)
                .returning(TagRow::as_returning())
                .get_result::<TagRow>(connection)
                .optional()?
                .map(TagRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn delete_tag(&self, id: TagId) -> RepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tags::table.find(id.value())).execute(connection)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn find_tag(&self, id: TagId) -> RepositoryResult<Option<Tag>> {
        self.run_blocking(move |connection| {
            tags::table
                .find(id.value())
                .select(TagRow::as_select())
                .first::<TagRow>(connection)
                .optional()?
                .map(TagRow::into_domain)
                .transpose()
        })
        .await
    }

    async fn list_tags(&self) -> RepositoryResult<Vec<Tag>> {
        self.run_blocking(move |connection| {
            tags::table
                .order(tags::id.asc())
                .select(TagRow::as_select())
                .load::<TagRow>(connection)?
                .into_iter()
                .map(TagRow::into_domain)
                .collect()
        })
        .await
    }

    async fn list_tags_by_user(&self, owner: UserId) -> RepositoryResult<Vec<Tag>> {
        self.run_blocking(move |connection| {
            tags::table
                .filter(tags::user_id.eq(owner.value()))
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
