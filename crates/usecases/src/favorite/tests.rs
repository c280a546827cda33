// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashSet;

use citygen_repo::favorite::FavoriteRepo;

use super::*;
use crate::tests::InMemoryRepo;

/// Simulates a concurrent request that changes the state between
/// the check and the subsequent modification.
struct RacingRepo(InMemoryRepo);

impl FavoriteRepo for RacingRepo {
    fn is_map_favorited(&mut self, map_id: MapId, user_id: UserId) -> RepoResult<bool> {
        let current = self.0.is_map_favorited(map_id, user_id)?;
        // Report the opposite of the actual state
        Ok(!current)
    }

    fn insert_map_favorite(
        &mut self,
        created_at: UtcDateTimeMs,
        map_id: MapId,
        user_id: UserId,
    ) -> RepoResult<()> {
        self.0.insert_map_favorite(created_at, map_id, user_id)
    }

    fn delete_map_favorites(&mut self, map_id: MapId, user_id: UserId) -> RepoResult<usize> {
        self.0.delete_map_favorites(map_id, user_id)
    }

    fn load_favorited_map_ids(
        &mut self,
        user_id: UserId,
        map_ids: &[MapId],
    ) -> RepoResult<HashSet<MapId>> {
        self.0.load_favorited_map_ids(user_id, map_ids)
    }
}

#[test]
fn favorite_is_idempotent() {
    let mut repo = InMemoryRepo::default();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");
    let uid = repo.add_map(alice, "Public", false);

    assert_eq!(Outcome::Inserted, toggle_favorite(&mut repo, &uid, bob, true).unwrap());
    assert_eq!(Outcome::Unchanged, toggle_favorite(&mut repo, &uid, bob, true).unwrap());
    assert_eq!(1, repo.favorite_count());

    assert_eq!(Outcome::Deleted, toggle_favorite(&mut repo, &uid, bob, false).unwrap());
    assert_eq!(Outcome::Unchanged, toggle_favorite(&mut repo, &uid, bob, false).unwrap());
    assert_eq!(0, repo.favorite_count());
}

#[test]
fn owner_may_favorite_own_private_map() {
    let mut repo = InMemoryRepo::default();
    let alice = repo.add_user("alice");
    let uid = repo.add_map(alice, "Private", true);
    assert_eq!(Outcome::Inserted, toggle_favorite(&mut repo, &uid, alice, true).unwrap());
    let map_id = repo.resolve_map_id(&uid).unwrap();
    assert!(is_favorited(&mut repo, map_id, alice).unwrap());
}

#[test]
fn favorite_invisible_map_fails_without_side_effects() {
    let mut repo = InMemoryRepo::default();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");
    let uid = repo.add_map(alice, "Private", true);
    for desired in [true, false] {
        assert!(matches!(
            toggle_favorite(&mut repo, &uid, bob, desired),
            Err(Error::MapNotVisible)
        ));
    }
    assert!(matches!(
        toggle_favorite(&mut repo, &MapUid::new(), bob, true),
        Err(Error::MapNotFound)
    ));
    assert_eq!(0, repo.favorite_count());
}

#[test]
fn concurrent_insert_is_not_an_error() {
    let mut repo = InMemoryRepo::default();
    let alice = repo.add_user("alice");
    let uid = repo.add_map(alice, "Public", false);
    let map_id = repo.resolve_map_id(&uid).unwrap();
    repo.insert_map_favorite(UtcDateTimeMs::now(), map_id, alice)
        .unwrap();

    let mut racing = RacingRepo(repo);
    assert_eq!(
        Outcome::Concurrent,
        set_favorited(&mut racing, map_id, alice, true).unwrap()
    );
    assert_eq!(1, racing.0.favorite_count());
}

#[test]
fn concurrent_delete_is_not_an_error() {
    let mut repo = InMemoryRepo::default();
    let alice = repo.add_user("alice");
    let uid = repo.add_map(alice, "Public", false);
    let map_id = repo.resolve_map_id(&uid).unwrap();

    let mut racing = RacingRepo(repo);
    assert_eq!(
        Outcome::Concurrent,
        set_favorited(&mut racing, map_id, alice, false).unwrap()
    );
    assert_eq!(0, racing.0.favorite_count());
}
