//! Shared world state for project completion BDD scenarios.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use gtd_core::workflow::{
    adapters::memory::InMemoryGtdStore,
    domain::{Project, UserId},
    services::{ProjectLifecycleService, UserService, WorkflowResult},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Scenario world for project completion behaviour tests.
pub struct ProjectCompletionWorld {
    pub users: UserService<InMemoryGtdStore, DefaultClock>,
    pub projects: ProjectLifecycleService<InMemoryGtdStore, DefaultClock>,
    pub owner: Option<UserId>,
    pub project: Option<Project>,
    pub previous_completed_at: Option<DateTime<Utc>>,
    pub last_update: Option<WorkflowResult<Project>>,
}

impl ProjectCompletionWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryGtdStore::new());
        let clock = Arc::new(DefaultClock);
        Self {
            users: UserService::new(Arc::clone(&store), Arc::clone(&clock)),
            projects: ProjectLifecycleService::new(store, clock),
            owner: None,
            project: None,
            previous_completed_at: None,
            last_update: None,
        }
    }

    /// Returns the project created by the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no project has been created yet.
    pub fn project(&self) -> Result<&Project, eyre::Report> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Returns the scenario's user.
    ///
    /// # Errors
    ///
    /// Returns an error when no user has been created yet.
    pub fn owner(&self) -> Result<UserId, eyre::Report> {
        self.owner
            .ok_or_else(|| eyre::eyre!("missing user in scenario world"))
    }
}

impl Default for ProjectCompletionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ProjectCompletionWorld {
    ProjectCompletionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
