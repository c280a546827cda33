// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashSet;

use citygen_core::UserId;
use citygen_repo::{favorite::FavoriteRepo, map::RecordId as MapId};

use crate::{
    db::map_favorite::{models::*, schema::*},
    prelude::*,
};

/// Upper bound for the number of bind parameters in a single `IN` clause.
const MAX_MAP_IDS_PER_QUERY: usize = 500;

impl FavoriteRepo for crate::Connection<'_> {
    fn is_map_favorited(&mut self, map_id: MapId, user_id: UserId) -> RepoResult<bool> {
        diesel::select(diesel::dsl::exists(
            map_favorite::table
                .filter(map_favorite::map_id.eq(RowId::from(map_id)))
                .filter(map_favorite::user_id.eq(user_id.to_inner())),
        ))
        .get_result(self.as_mut())
        .map_err(repo_error)
    }

    fn insert_map_favorite(
        &mut self,
        created_at: UtcDateTimeMs,
        map_id: MapId,
        user_id: UserId,
    ) -> RepoResult<()> {
        let insertable = InsertableRecord::bind(created_at, map_id, user_id);
        let rows_affected = diesel::insert_into(map_favorite::table)
            .values(&insertable)
            .execute(self.as_mut())
            .map_err(repo_error)?;
        debug_assert_eq!(1, rows_affected);
        Ok(())
    }

    fn delete_map_favorites(&mut self, map_id: MapId, user_id: UserId) -> RepoResult<usize> {
        let target = map_favorite::table
            .filter(map_favorite::map_id.eq(RowId::from(map_id)))
            .filter(map_favorite::user_id.eq(user_id.to_inner()));
        diesel::delete(target)
            .execute(self.as_mut())
            .map_err(repo_error)
    }

    fn load_favorited_map_ids(
        &mut self,
        user_id: UserId,
        map_ids: &[MapId],
    ) -> RepoResult<HashSet<MapId>> {
        let mut favorited = HashSet::new();
        for chunk in map_ids.chunks(MAX_MAP_IDS_PER_QUERY) {
            let row_ids = chunk.iter().copied().map(RowId::from);
            let loaded = map_favorite::table
                .select(map_favorite::map_id)
                .filter(map_favorite::user_id.eq(user_id.to_inner()))
                .filter(map_favorite::map_id.eq_any(row_ids))
                .load::<RowId>(self.as_mut())
                .map_err(repo_error)?;
            favorited.extend(loaded.into_iter().map(MapId::new));
        }
        Ok(favorited)
    }
}

#[cfg(test)]
mod tests;
