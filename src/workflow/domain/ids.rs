//! Store-generated identifiers for workflow entities.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw store key.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw store key.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a user account.
    UserId
);
entity_id!(
    /// Identifier of an area of focus.
    AreaId
);
entity_id!(
    /// Identifier of a task context such as `@Home`.
    ContextId
);
entity_id!(
    /// Identifier of a reference item.
    ReferenceId
);
entity_id!(
    /// Identifier of a tag.
    TagId
);
entity_id!(
    /// Identifier of a project.
    ProjectId
);
entity_id!(
    /// Identifier of a task.
    TaskId
);
