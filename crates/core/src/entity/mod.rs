// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    ops::Deref,
    str::FromStr,
};

use thiserror::Error;
use ulid::Ulid;

use crate::prelude::*;

///////////////////////////////////////////////////////////////////////
// EntityUid
///////////////////////////////////////////////////////////////////////

/// Globally unique, sortable identifier of an entity.
///
/// Encoded as a 26 character Crockford Base32 string.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityUid(Ulid);

#[derive(Debug, Error)]
#[error("invalid entity UID: {0}")]
pub struct DecodeError(#[from] ulid::DecodeError);

impl EntityUid {
    pub const STR_LEN: usize = ulid::ULID_LEN;

    /// Generate a new, random UID.
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    #[must_use]
    pub const fn nil() -> Self {
        Self(Ulid::nil())
    }

    #[must_use]
    pub const fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    #[must_use]
    pub const fn to_ulid(self) -> Ulid {
        let Self(ulid) = self;
        ulid
    }

    pub fn decode_from(encoded: &str) -> Result<Self, DecodeError> {
        Ulid::from_string(encoded).map(Self).map_err(Into::into)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntityUidInvalidity {
    Nil,
}

impl Validate for EntityUid {
    type Invalidity = EntityUidInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(self.0.is_nil(), EntityUidInvalidity::Nil)
            .into()
    }
}

impl fmt::Display for EntityUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EntityUid {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode_from(s)
    }
}

impl AsRef<EntityUid> for EntityUid {
    fn as_ref(&self) -> &EntityUid {
        self
    }
}

///////////////////////////////////////////////////////////////////////
// EntityUidTyped
///////////////////////////////////////////////////////////////////////

/// An [`EntityUid`] tagged with the type of the referenced entity.
///
/// Prevents accidentally mixing up identifiers of different entities.
pub struct EntityUidTyped<T: 'static> {
    untyped: EntityUid,
    _phantom: PhantomData<&'static T>,
}

impl<T> EntityUidTyped<T> {
    #[must_use]
    pub const fn from_untyped(untyped: EntityUid) -> Self {
        Self {
            untyped,
            _phantom: PhantomData,
        }
    }

    #[must_use]
    pub const fn into_untyped(self) -> EntityUid {
        self.untyped
    }

    #[must_use]
    pub fn new() -> Self {
        Self::from_untyped(EntityUid::new())
    }
}

impl<T> fmt::Debug for EntityUidTyped<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityUidTyped").field(&self.untyped).finish()
    }
}

impl<T> Default for EntityUidTyped<T> {
    fn default() -> Self {
        Self::from_untyped(EntityUid::default())
    }
}

impl<T> Clone for EntityUidTyped<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntityUidTyped<T> {}

impl<T> PartialEq for EntityUidTyped<T> {
    fn eq(&self, other: &Self) -> bool {
        self.untyped == other.untyped
    }
}

impl<T> Eq for EntityUidTyped<T> {}

impl<T> Hash for EntityUidTyped<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.untyped.hash(state);
    }
}

impl<T> Deref for EntityUidTyped<T> {
    type Target = EntityUid;

    fn deref(&self) -> &Self::Target {
        &self.untyped
    }
}

impl<T> AsRef<EntityUid> for EntityUidTyped<T> {
    fn as_ref(&self) -> &EntityUid {
        &self.untyped
    }
}

impl<T> From<EntityUid> for EntityUidTyped<T> {
    fn from(from: EntityUid) -> Self {
        Self::from_untyped(from)
    }
}

impl<T> From<EntityUidTyped<T>> for EntityUid {
    fn from(from: EntityUidTyped<T>) -> Self {
        from.into_untyped()
    }
}

impl<T> fmt::Display for EntityUidTyped<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.untyped.fmt(f)
    }
}

impl<T> FromStr for EntityUidTyped<T> {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityUid::decode_from(s).map(Self::from_untyped)
    }
}

impl<T> Validate for EntityUidTyped<T> {
    type Invalidity = EntityUidInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        self.untyped.validate()
    }
}

///////////////////////////////////////////////////////////////////////
// Entity
///////////////////////////////////////////////////////////////////////

#[derive(Debug)]
pub struct Entity<T: 'static, B> {
    pub uid: EntityUidTyped<T>,
    pub body: B,
}

impl<T, B> Entity<T, B> {
    pub fn new(uid: impl Into<EntityUidTyped<T>>, body: impl Into<B>) -> Self {
        Self {
            uid: uid.into(),
            body: body.into(),
        }
    }
}

impl<T, B: Clone> Clone for Entity<T, B> {
    fn clone(&self) -> Self {
        Self {
            uid: self.uid,
            body: self.body.clone(),
        }
    }
}

impl<T, B: PartialEq> PartialEq for Entity<T, B> {
    fn eq(&self, other: &Self) -> bool {
        self.uid == other.uid && self.body == other.body
    }
}

impl<T, B: Eq> Eq for Entity<T, B> {}

impl<T, B> From<Entity<T, B>> for (EntityUidTyped<T>, B) {
    fn from(from: Entity<T, B>) -> Self {
        let Entity { uid, body } = from;
        (uid, body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityInvalidity<V> {
    Uid(EntityUidInvalidity),
    Body(V),
}

impl<T, B> Validate for Entity<T, B>
where
    B: Validate,
{
    type Invalidity = EntityInvalidity<B::Invalidity>;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .validate_with(&self.uid, EntityInvalidity::Uid)
            .validate_with(&self.body, EntityInvalidity::Body)
            .into()
    }
}

#[cfg(test)]
mod tests;
