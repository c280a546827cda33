// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use test_log::test;

use super::*;
use crate::{prelude::tests::*, repo::tests::new_user};

#[test]
fn insert_and_resolve_user() -> TestResult<()> {
    let mut db = establish_connection()?;
    let mut db = crate::Connection::new(&mut db);
    let user = new_user("alice");
    let password_hash = PasswordHash("hash".to_owned());
    let created_at = UtcDateTimeMs::from_unix_timestamp_millis(1_000);
    let id = db.insert_user(created_at, &user, &password_hash)?;

    let (header, loaded) = db.load_user(id)?;
    assert_eq!(id, header.id);
    assert_eq!(created_at, header.created_at);
    assert_eq!(user, loaded);

    let (header, loaded) = db.resolve_user_by_username("alice")?;
    assert_eq!(id, header.id);
    assert_eq!(user, loaded);

    let (header, loaded, loaded_hash) = db.resolve_user_by_email("alice@example.com")?;
    assert_eq!(id, header.id);
    assert_eq!(user, loaded);
    assert_eq!(password_hash, loaded_hash);

    assert!(db.username_exists("alice")?);
    assert!(!db.username_exists("bob")?);
    assert!(db.email_exists("alice@example.com")?);
    assert!(!db.email_exists("bob@example.com")?);
    Ok(())
}

#[test]
fn duplicate_username_or_email_conflicts() -> TestResult<()> {
    let mut db = establish_connection()?;
    let mut db = crate::Connection::new(&mut db);
    let password_hash = PasswordHash("hash".to_owned());
    db.insert_user(UtcDateTimeMs::now(), &new_user("alice"), &password_hash)?;

    let same_username = User {
        email: "other@example.com".to_owned(),
        ..new_user("alice")
    };
    assert!(matches!(
        db.insert_user(UtcDateTimeMs::now(), &same_username, &password_hash),
        Err(RepoError::Conflict)
    ));

    let same_email = User {
        email: "alice@example.com".to_owned(),
        ..new_user("bob")
    };
    assert!(matches!(
        db.insert_user(UtcDateTimeMs::now(), &same_email, &password_hash),
        Err(RepoError::Conflict)
    ));
    Ok(())
}

#[test]
fn update_password_hash() -> TestResult<()> {
    let mut db = establish_connection()?;
    let mut db = crate::Connection::new(&mut db);
    let id = db.insert_user(
        UtcDateTimeMs::from_unix_timestamp_millis(1_000),
        &new_user("alice"),
        &PasswordHash("old".to_owned()),
    )?;
    let updated_at = UtcDateTimeMs::from_unix_timestamp_millis(2_000);
    db.update_user_password_hash(id, updated_at, &PasswordHash("new".to_owned()))?;
    let (header, _, password_hash) = db.resolve_user_by_email("alice@example.com")?;
    assert_eq!(updated_at, header.updated_at);
    assert_eq!(PasswordHash("new".to_owned()), password_hash);

    assert!(matches!(
        db.update_user_password_hash(UserId::new(-1), updated_at, &password_hash),
        Err(RepoError::NotFound)
    ));
    Ok(())
}
