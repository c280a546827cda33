// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashSet;

use citygen_core::{UserId, util::clock::UtcDateTimeMs};

use crate::{map::RecordId as MapId, prelude::*};

/// Favorite relations between users and maps.
///
/// At most one record exists per pair of map and user.
pub trait FavoriteRepo {
    fn is_map_favorited(&mut self, map_id: MapId, user_id: UserId) -> RepoResult<bool>;

    /// Fails with [`RepoError::Conflict`] if the pair already exists.
    fn insert_map_favorite(
        &mut self,
        created_at: UtcDateTimeMs,
        map_id: MapId,
        user_id: UserId,
    ) -> RepoResult<()>;

    /// Returns the number of deleted records.
    fn delete_map_favorites(&mut self, map_id: MapId, user_id: UserId) -> RepoResult<usize>;

    /// Batched existence check.
    ///
    /// Returns the subset of `map_ids` that have been favorited by the user.
    fn load_favorited_map_ids(
        &mut self,
        user_id: UserId,
        map_ids: &[MapId],
    ) -> RepoResult<HashSet<MapId>>;
}
