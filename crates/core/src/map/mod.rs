// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::{prelude::*, user::UserId};

/// Arbitrary JSON object payload of a map.
pub type MapData = serde_json::Map<String, serde_json::Value>;

pub const NAME_MAX_LEN: usize = 256;

#[derive(Clone, Debug, PartialEq)]
pub struct Map {
    /// Immutable after creation.
    pub owner: UserId,

    pub name: String,

    pub private: bool,

    pub data: MapData,

    pub last_played_at: Option<UtcDateTimeMs>,
}

impl Map {
    /// Decides if the map may be viewed by the given requester.
    ///
    /// Public maps are visible to everyone, including anonymous
    /// requesters. Private maps are only visible to their owner.
    #[must_use]
    pub fn is_visible_to(&self, requester: Option<UserId>) -> bool {
        !self.private || requester.is_some_and(|user_id| self.is_owned_by(user_id))
    }

    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner == user_id
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MapInvalidity {
    NameEmpty,
    NameTooLong,
}

impl Validate for Map {
    type Invalidity = MapInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let name = self.name.trim();
        ValidationContext::new()
            .invalidate_if(name.is_empty(), Self::Invalidity::NameEmpty)
            .invalidate_if(
                name.chars().count() > NAME_MAX_LEN,
                Self::Invalidity::NameTooLong,
            )
            .into()
    }
}

#[derive(Debug)]
pub struct EntityType;

pub type EntityUid = EntityUidTyped<EntityType>;

pub type Entity = crate::entity::Entity<EntityType, Map>;

#[cfg(test)]
mod tests;
