//! User accounts.

use super::{GtdDomainError, UserId, text};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const USERNAME_MAX: usize = 50;
const EMAIL_MAX: usize = 100;
const DISPLAY_NAME_MAX: usize = 100;

/// Validated, mutable fields of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    username: String,
    email: String,
    display_name: Option<String>,
}

impl UserFields {
    /// Validates user account fields.
    ///
    /// # Errors
    ///
    /// Returns [`GtdDomainError`] when the username or email is blank or too
    /// long, the email is malformed, or the display name is too long.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        display_name: Option<String>,
    ) -> Result<Self, GtdDomainError> {
        let username = text::required("username", username, Some(USERNAME_MAX))?;
        let email = text::required("email", email, Some(EMAIL_MAX))?;
        if !is_plausible_email(&email) {
            return Err(GtdDomainError::InvalidEmail(email));
        }
        let display_name = text::optional("display name", display_name, Some(DISPLAY_NAME_MAX))?;
        Ok(Self {
            username,
            email,
            display_name,
        })
    }

    /// Returns the unique login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the unique email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the display name, if any.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Persisted user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    #[serde(flatten)]
    fields: UserFields,
    created_at: DateTime<Utc>,
}

impl User {
    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub const fn from_persisted(id: UserId, fields: UserFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            fields,
            created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the account fields.
    #[must_use]
    pub const fn fields(&self) -> &UserFields {
        &self.fields
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
