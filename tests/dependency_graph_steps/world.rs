//! Shared world state for dependency graph BDD scenarios.

use std::{collections::HashMap, sync::Arc};

use gtd_core::workflow::{
    adapters::memory::InMemoryGtdStore,
    domain::{TaskDependency, TaskId},
    services::{DependencyGraphService, TaskLifecycleService, UserService, WorkflowResult},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Scenario world for dependency graph behaviour tests.
pub struct DependencyGraphWorld {
    pub users: UserService<InMemoryGtdStore, DefaultClock>,
    pub tasks: TaskLifecycleService<InMemoryGtdStore, DefaultClock>,
    pub graph: DependencyGraphService<InMemoryGtdStore>,
    pub task_ids: HashMap<String, TaskId>,
    pub last_create: Option<WorkflowResult<TaskDependency>>,
    pub removed_edges: Option<usize>,
}

impl DependencyGraphWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryGtdStore::new());
        let clock = Arc::new(DefaultClock);
        Self {
            users: UserService::new(Arc::clone(&store), Arc::clone(&clock)),
            tasks: TaskLifecycleService::new(Arc::clone(&store), clock),
            graph: DependencyGraphService::new(store),
            task_ids: HashMap::new(),
            last_create: None,
            removed_edges: None,
        }
    }

    /// Resolves a task title used in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no task with that title was created.
    pub fn task(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.task_ids
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown task in scenario: {title}"))
    }
}

impl Default for DependencyGraphWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DependencyGraphWorld {
    DependencyGraphWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
