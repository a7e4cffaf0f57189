//! Port contracts for workflow management.
//!
//! Ports define infrastructure-agnostic interfaces used by workflow services.

pub mod repository;

pub use repository::{
    AreaRepository, ContextRepository, DependencyInsert, GtdStore, ProjectRepository, ReferenceRepository,
    RepositoryError, RepositoryResult, TagRepository, TaskDependencyRepository, TaskRepository,
    TaskTagRepository, UserRepository,
};
