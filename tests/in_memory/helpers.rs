//! Shared test helpers for in-memory workflow integration tests.

use std::sync::Arc;

use gtd_core::workflow::{
    adapters::memory::InMemoryGtdStore,
    domain::UserId,
    services::{
        CatalogService, DependencyGraphService, ProjectLifecycleService, TagAssociationService,
        TaskLifecycleService, UserRequest, UserService,
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Every workflow service sharing one in-memory store.
pub struct Workspace {
    pub users: UserService<InMemoryGtdStore, DefaultClock>,
    pub catalog: CatalogService<InMemoryGtdStore, DefaultClock>,
    pub projects: ProjectLifecycleService<InMemoryGtdStore, DefaultClock>,
    pub tasks: TaskLifecycleService<InMemoryGtdStore, DefaultClock>,
    pub graph: DependencyGraphService<InMemoryGtdStore>,
    pub tagging: TagAssociationService<InMemoryGtdStore>,
}

impl Workspace {
    /// Wires every service over a fresh store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryGtdStore::new());
        let clock = Arc::new(DefaultClock);
        Self {
            users: UserService::new(Arc::clone(&store), Arc::clone(&clock)),
            catalog: CatalogService::new(Arc::clone(&store), Arc::clone(&clock)),
            projects: ProjectLifecycleService::new(Arc::clone(&store), Arc::clone(&clock)),
            tasks: TaskLifecycleService::new(Arc::clone(&store), clock),
            graph: DependencyGraphService::new(Arc::clone(&store)),
            tagging: TagAssociationService::new(store),
        }
    }

    /// Registers a user with a name-derived email.
    ///
    /// # Errors
    ///
    /// Returns an error if the user cannot be created.
    pub async fn register(&self, username: &str) -> Result<UserId, eyre::Report> {
        let user = self
            .users
            .create(UserRequest::new(username, format!("{username}@example.com")))
            .await?;
        Ok(user.id())
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Provides a fresh workspace for each test.
#[fixture]
pub fn workspace() -> Workspace {
    Workspace::new()
}
