// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::{MapEntity, UserId, util::clock::UtcDateTimeMs};

/// Selects which maps are listed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapFilter {
    /// All public maps, optionally excluding those of a single owner.
    Public { exclude_owner: Option<UserId> },

    /// All maps of a single owner, both public and private.
    OwnedBy(UserId),
}

/// A map as presented to a particular requester.
///
/// The `favorited` flag is specific to the requester and never
/// persisted together with the map.
#[derive(Clone, Debug, PartialEq)]
pub struct MapView {
    pub entity: MapEntity,
    pub created_at: UtcDateTimeMs,
    pub updated_at: UtcDateTimeMs,
    pub owner_username: Option<String>,
    pub favorited: bool,
}

/// Controls whether the potentially large JSON payload of a map
/// is included in responses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadScope {
    #[default]
    Entity,
    EntityWithData,
}

impl LoadScope {
    #[must_use]
    pub const fn from_include_data(include_data: bool) -> Self {
        if include_data {
            Self::EntityWithData
        } else {
            Self::Entity
        }
    }
}
