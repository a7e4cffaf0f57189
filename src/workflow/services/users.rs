//! Service layer for user accounts.

use std::sync::Arc;

use mockable::Clock;
use tracing::{info, warn};

use super::error::{EntityRef, WorkflowError, WorkflowResult, found};
use crate::workflow::{
    domain::{User, UserFields, UserId},
    ports::UserRepository,
};

/// Request payload for creating or replacing a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRequest {
    username: String,
    email: String,
    display_name: Option<String>,
}

impl UserRequest {
    /// Creates a request with the required account fields.
    #[must_use]
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            display_name: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    fn into_fields(self) -> WorkflowResult<UserFields> {
        Ok(UserFields::new(
            self.username,
            self.email,
            self.display_name,
        )?)
    }
}

/// User account management.
#[derive(Clone)]
pub struct UserService<S, C>
where
    S: UserRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> UserService<S, C>
where
    S: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new user service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates a user after checking username and email are free.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidArgument`] for malformed fields and
    /// [`WorkflowError::Conflict`] when the username or email is taken.
    pub async fn create(&self, request: UserRequest) -> WorkflowResult<User> {
        let fields = request.into_fields()?;
        info!(username = fields.username(), "creating user");
        if self
            .store
            .find_user_by_username(fields.username())
            .await?
            .is_some()
        {
            warn!(username = fields.username(), "username already taken");
            return Err(WorkflowError::Conflict(format!(
                "username already exists: {}",
                fields.username()
            )));
        }
        if self.store.find_user_by_email(fields.email()).await?.is_some() {
            warn!(email = fields.email(), "email already taken");
            return Err(WorkflowError::Conflict(format!(
                "email already exists: {}",
                fields.email()
            )));
        }
        let user = self.store.insert_user(&fields, self.clock.utc()).await?;
        info!(user_id = %user.id(), "created user");
        Ok(user)
    }

    /// Replaces every field of a user.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the user is missing and
    /// [`WorkflowError::Conflict`] when the store rejects a duplicate.
    pub async fn update(&self, id: UserId, request: UserRequest) -> WorkflowResult<User> {
        let fields = request.into_fields()?;
        info!(user_id = %id, "updating user");
        let updated = self.store.update_user(id, &fields).await?;
        found(updated, EntityRef::User(id))
    }

    /// Deletes a user and everything the user owns.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when no user matched.
    pub async fn delete(&self, id: UserId) -> WorkflowResult<()> {
        info!(user_id = %id, "deleting user");
        if self.store.delete_user(id).await? {
            Ok(())
        } else {
            warn!(user_id = %id, "no user deleted");
            Err(WorkflowError::NotFound(EntityRef::User(id)))
        }
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when the user is missing.
    pub async fn find(&self, id: UserId) -> WorkflowResult<User> {
        found(self.store.find_user(id).await?, EntityRef::User(id))
    }

    /// Lists every user.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when the lookup fails.
    pub async fn list(&self) -> WorkflowResult<Vec<User>> {
        Ok(self.store.list_users().await?)
    }
}
