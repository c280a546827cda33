// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use test_log::test;

use super::*;
use crate::{
    prelude::tests::*,
    repo::tests::{insert_map, insert_user},
};

#[test]
fn insert_query_delete_favorite() -> TestResult<()> {
    let mut db = establish_connection()?;
    let mut db = crate::Connection::new(&mut db);
    let owner = insert_user(&mut db, "alice")?;
    let user = insert_user(&mut db, "bob")?;
    let (map_id, _) = insert_map(&mut db, owner, false)?;

    assert!(!db.is_map_favorited(map_id, user)?);
    db.insert_map_favorite(UtcDateTimeMs::now(), map_id, user)?;
    assert!(db.is_map_favorited(map_id, user)?);
    // Favorites are per user
    assert!(!db.is_map_favorited(map_id, owner)?);

    assert_eq!(1, db.delete_map_favorites(map_id, user)?);
    assert!(!db.is_map_favorited(map_id, user)?);
    assert_eq!(0, db.delete_map_favorites(map_id, user)?);
    Ok(())
}

#[test]
fn duplicate_favorite_conflicts_and_keeps_single_record() -> TestResult<()> {
    let mut db = establish_connection()?;
    let mut db = crate::Connection::new(&mut db);
    let owner = insert_user(&mut db, "alice")?;
    let (map_id, _) = insert_map(&mut db, owner, false)?;

    db.insert_map_favorite(UtcDateTimeMs::now(), map_id, owner)?;
    assert!(matches!(
        db.insert_map_favorite(UtcDateTimeMs::now(), map_id, owner),
        Err(RepoError::Conflict)
    ));
    assert_eq!(1, db.delete_map_favorites(map_id, owner)?);
    Ok(())
}

#[test]
fn load_favorited_map_ids_batched() -> TestResult<()> {
    let mut db = establish_connection()?;
    let mut db = crate::Connection::new(&mut db);
    let owner = insert_user(&mut db, "alice")?;
    let user = insert_user(&mut db, "bob")?;
    let map_ids = (0..(MAX_MAP_IDS_PER_QUERY + 3))
        .map(|_| insert_map(&mut db, owner, false).map(|(id, _)| id))
        .collect::<TestResult<Vec<_>>>()?;

    let favorited_ids = [map_ids[0], map_ids[MAX_MAP_IDS_PER_QUERY + 1]];
    for map_id in favorited_ids {
        db.insert_map_favorite(UtcDateTimeMs::now(), map_id, user)?;
    }
    // Favorites of other users are ignored
    db.insert_map_favorite(UtcDateTimeMs::now(), map_ids[1], owner)?;

    let loaded = db.load_favorited_map_ids(user, &map_ids)?;
    assert_eq!(favorited_ids.into_iter().collect::<HashSet<_>>(), loaded);
    for map_id in &map_ids {
        assert_eq!(loaded.contains(map_id), db.is_map_favorited(*map_id, user)?);
    }
    assert!(db.load_favorited_map_ids(user, &[])?.is_empty());
    Ok(())
}

#[test]
fn deleting_map_owner_cascades_to_favorites() -> TestResult<()> {
    let mut db = establish_connection()?;
    let mut db = crate::Connection::new(&mut db);
    let owner = insert_user(&mut db, "alice")?;
    let user = insert_user(&mut db, "bob")?;
    let (map_id, _) = insert_map(&mut db, owner, false)?;
    db.insert_map_favorite(UtcDateTimeMs::now(), map_id, user)?;

    diesel::delete(crate::db::users::schema::users::table)
        .filter(crate::db::users::schema::users::row_id.eq(owner.to_inner()))
        .execute(db.as_mut())?;
    assert!(!db.is_map_favorited(map_id, user)?);
    assert_eq!(
        0_i64,
        map_favorite::table.count().get_result::<i64>(db.as_mut())?
    );
    Ok(())
}
