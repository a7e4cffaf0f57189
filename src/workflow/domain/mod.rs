//! Domain model for GTD workflow management.
//!
//! The workflow domain models users, their organising entities, projects,
//! tasks and the dependency graph between tasks. Lifecycle rules live here;
//! storage and orchestration stay outside the domain boundary.

mod catalog;
mod dependency;
mod error;
mod ids;
mod ownership;
mod project;
mod task;
mod text;
mod user;

pub use catalog::{
    Area, AreaFields, Context, ContextFields, Reference, ReferenceFields, Tag, TagFields,
};
pub use dependency::TaskDependency;
pub use error::{GtdDomainError, ParseStatusError};
pub use ids::{AreaId, ContextId, ProjectId, ReferenceId, TagId, TaskId, UserId};
pub use ownership::{Owned, owned_by, owners_match};
pub use project::{
    Project, ProjectFields, ProjectFieldsInput, ProjectStatus, completion_timestamp,
};
pub use task::{Task, TaskFields, TaskFieldsInput, TaskStatus};
pub use user::{User, UserFields};
