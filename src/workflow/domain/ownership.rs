//! Ownership checks shared by every cross-entity operation.
//!
//! Ownership mismatches are deliberately indistinguishable from absence:
//! callers receive `None` and report the entity as not found.

use super::UserId;

/// An entity tied to the user who created it.
pub trait Owned {
    /// Returns the owning user.
    fn owner_id(&self) -> UserId;
}

/// Returns `true` when both owning-user identifiers are equal.
#[must_use]
pub fn owners_match(left: UserId, right: UserId) -> bool {
    left == right
}

/// Keeps `entity` only when it belongs to `owner`.
///
/// A missing entity and an entity owned by someone else both yield `None`.
#[must_use]
pub fn owned_by<E: Owned>(entity: Option<E>, owner: UserId) -> Option<E> {
    entity.filter(|found| owners_match(found.owner_id(), owner))
}
