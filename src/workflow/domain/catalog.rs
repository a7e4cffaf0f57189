//! Supporting entities that organise work: areas, contexts, references and
//! tags.

use super::{AreaId, ContextId, GtdDomainError, Owned, ReferenceId, TagId, UserId, text};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const AREA_NAME_MAX: usize = 100;
const CONTEXT_NAME_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 500;
const TAG_NAME_MAX: usize = 50;

/// Validated fields of an area of focus such as "Health" or "Work".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaFields {
    owner_id: UserId,
    name: String,
    description: Option<String>,
}

impl AreaFields {
    /// Validates area fields.
    ///
    /// # Errors
    ///
    /// Returns [`GtdDomainError`] when the name is blank or a field is too
    /// long.
    pub fn new(
        owner_id: UserId,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, GtdDomainError> {
        Ok(Self {
            owner_id,
            name: text::required("area name", name, Some(AREA_NAME_MAX))?,
            description: text::optional("area description", description, Some(DESCRIPTION_MAX))?,
        })
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the area name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Validated fields of a situational context such as `@Home`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextFields {
    owner_id: UserId,
    name: String,
    description: Option<String>,
    is_location: bool,
}

impl ContextFields {
    /// Validates context fields.
    ///
    /// # Errors
    ///
    /// Returns [`GtdDomainError`] when the name is blank or a field is too
    /// long.
    pub fn new(
        owner_id: UserId,
        name: impl Into<String>,
        description: Option<String>,
        is_location: bool,
    ) -> Result<Self, GtdDomainError> {
        Ok(Self {
            owner_id,
            name: text::required("context name", name, Some(CONTEXT_NAME_MAX))?,
            description: text::optional(
                "context description",
                description,
                Some(DESCRIPTION_MAX),
            )?,
            is_location,
        })
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the context name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether the context names a physical place.
    #[must_use]
    pub const fn is_location(&self) -> bool {
        self.is_location
    }
}

/// Validated fields of a reference item kept for later lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceFields {
    owner_id: UserId,
    title: String,
    body: Option<String>,
    url: Option<String>,
    file_hint: Option<String>,
}

impl ReferenceFields {
    /// Validates reference fields.
    ///
    /// # Errors
    ///
    /// Returns [`GtdDomainError::BlankField`] when the title is blank.
    pub fn new(
        owner_id: UserId,
        title: impl Into<String>,
        body: Option<String>,
        url: Option<String>,
        file_hint: Option<String>,
    ) -> Result<Self, GtdDomainError> {
        Ok(Self {
            owner_id,
            title: text::required("reference title", title, None)?,
            body: text::optional("reference body", body, None)?,
            url: text::optional("reference url", url, None)?,
            file_hint: text::optional("file hint", file_hint, None)?,
        })
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the reference title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the free-form body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the linked URL, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns a hint to where a file is kept, if any.
    #[must_use]
    pub fn file_hint(&self) -> Option<&str> {
        self.file_hint.as_deref()
    }
}

/// Validated fields of a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFields {
    owner_id: UserId,
    name: String,
}

impl TagFields {
    /// Validates tag fields.
    ///
    /// # Errors
    ///
    /// Returns [`GtdDomainError`] when the name is blank or too long.
    pub fn new(owner_id: UserId, name: impl Into<String>) -> Result<Self, GtdDomainError> {
        Ok(Self {
            owner_id,
            name: text::required("tag name", name, Some(TAG_NAME_MAX))?,
        })
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

macro_rules! catalog_entity {
    ($(#[$meta:meta])* $name:ident, $id:ty, $fields:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            id: $id,
            #[serde(flatten)]
            fields: $fields,
            created_at: DateTime<Utc>,
        }

        impl $name {
            /// Reconstructs the entity from persisted storage.
            #[must_use]
            pub const fn from_persisted(id: $id, fields: $fields, created_at: DateTime<Utc>) -> Self {
                Self {
                    id,
                    fields,
                    created_at,
                }
            }

            /// Returns the store-generated identifier.
            #[must_use]
            pub const fn id(&self) -> $id {
                self.id
            }

            /// Returns the entity fields.
            #[must_use]
            pub const fn fields(&self) -> &$fields {
                &self.fields
            }

            /// Returns the creation timestamp.
            #[must_use]
            pub const fn created_at(&self) -> DateTime<Utc> {
                self.created_at
            }
        }

        impl Owned for $name {
            fn owner_id(&self) -> UserId {
                self.fields.owner_id()
            }
        }
    };
}

catalog_entity!(
    /// Persisted area of focus.
    Area,
    AreaId,
    AreaFields
);
catalog_entity!(
    /// Persisted task context.
    Context,
    ContextId,
    ContextFields
);
catalog_entity!(
    /// Persisted reference item.
    Reference,
    ReferenceId,
    ReferenceFields
);
catalog_entity!(
    /// Persisted tag.
    Tag,
    TagId,
    TagFields
);
