// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::{MapUid, UserId, util::clock::UtcDateTimeMs};
use citygen_repo::{
    favorite::FavoriteRepo,
    map::{EntityRepo, RecordId as MapId},
};

use super::*;

/// How the favorite state has been reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The current state already matched the desired state.
    Unchanged,

    /// A new favorite record has been inserted.
    Inserted,

    /// The existing favorite record(s) have been deleted.
    Deleted,

    /// A concurrent request established the desired state first.
    Concurrent,
}

pub fn is_favorited<Repo>(repo: &mut Repo, map_id: MapId, user_id: UserId) -> Result<bool>
where
    Repo: FavoriteRepo + ?Sized,
{
    repo.is_map_favorited(map_id, user_id).map_err(Into::into)
}

/// Establish the desired favorite state for the pair of map and user.
///
/// Idempotent: repeated invocations with the same desired state have
/// the same effect as a single invocation. The caller must have passed
/// the visibility check for the map with the user as requester and is
/// responsible for wrapping the invocation into a transaction.
pub fn set_favorited<Repo>(
    repo: &mut Repo,
    map_id: MapId,
    user_id: UserId,
    desired: bool,
) -> Result<Outcome>
where
    Repo: FavoriteRepo + ?Sized,
{
    let current = repo.is_map_favorited(map_id, user_id)?;
    if current == desired {
        return Ok(Outcome::Unchanged);
    }
    if desired {
        match repo.insert_map_favorite(UtcDateTimeMs::now(), map_id, user_id) {
            Ok(()) => Ok(Outcome::Inserted),
            Err(RepoError::Conflict) => {
                log::debug!("Map {map_id:?} has already been favorited by user {user_id}");
                Ok(Outcome::Concurrent)
            }
            Err(err) => Err(err.into()),
        }
    } else {
        let deleted = repo.delete_map_favorites(map_id, user_id)?;
        if deleted == 0 {
            log::debug!("Map {map_id:?} has already been unfavorited by user {user_id}");
            return Ok(Outcome::Concurrent);
        }
        Ok(Outcome::Deleted)
    }
}

/// Check the visibility of the map for the user and then set the
/// desired favorite state.
pub fn toggle_favorite<Repo>(
    repo: &mut Repo,
    uid: &MapUid,
    user_id: UserId,
    desired: bool,
) -> Result<Outcome>
where
    Repo: EntityRepo + FavoriteRepo,
{
    let (header, _) = map::resolve_visible_map(repo, uid, Some(user_id))?;
    let outcome = set_favorited(repo, header.id, user_id, desired)?;
    log::debug!("Set favorited = {desired} for map {uid} and user {user_id}: {outcome:?}");
    Ok(outcome)
}

#[cfg(test)]
mod tests;
