//! Application services for GTD workflow orchestration.
//!
//! One concrete manager per concern. Each validates its inputs against the
//! store, applies its rule, performs the write and returns the stored view.

mod catalog;
mod dependencies;
mod error;
mod projects;
mod tagging;
mod tasks;
mod users;

pub use catalog::{AreaRequest, CatalogService, ContextRequest, ReferenceRequest, TagRequest};
pub use dependencies::DependencyGraphService;
pub use error::{EntityRef, ErrorKind, WorkflowError, WorkflowResult};
pub use projects::{ProjectLifecycleService, ProjectRequest};
pub use tagging::TagAssociationService;
pub use tasks::{TaskLifecycleService, TaskRequest};
pub use users::{UserRequest, UserService};

use tracing::warn;

use crate::workflow::{domain::UserId, ports::UserRepository};

/// Fails with [`WorkflowError::NotFound`] unless the user exists.
async fn require_user<S>(store: &S, id: UserId) -> WorkflowResult<()>
where
    S: UserRepository + ?Sized,
{
    if store.find_user(id).await?.is_some() {
        return Ok(());
    }
    warn!(user_id = %id, "owning user not found");
    Err(WorkflowError::NotFound(EntityRef::User(id)))
}
