// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    num::NonZeroU32,
    sync::Barrier,
    thread,
};

use anyhow::anyhow;
use diesel::{
    Connection as _, RunQueryDsl as _,
    sql_types::{BigInt, Text},
};

use citygen_core::{MapData, image::ImageData, user::Password};
use citygen_storage_sqlite::connection::{
    Storage,
    pool::{create_connection_pool, get_pooled_connection},
};
use citygen_usecases::{
    avatar::PixelAvatarGenerator, favorite::Outcome, map::NewMap, session::DEFAULT_LIFETIME,
    user::NewUser,
};

use super::*;

#[derive(diesel::QueryableByName)]
struct Count {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

fn count_rows(connection: &mut DbConnection, table: &str) -> anyhow::Result<i64> {
    let Count { count } = diesel::sql_query(format!("SELECT COUNT(*) AS count FROM {table}"))
        .get_result::<Count>(connection)?;
    Ok(count)
}

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        first_name: String::new(),
        last_name: String::new(),
        password: Password::new("secret"),
    }
}

struct DbFixture {
    connection: DbConnection,
}

impl DbFixture {
    fn new() -> anyhow::Result<Self> {
        let mut connection = DbConnection::establish(":memory:")?;
        database::initialize(&mut connection, true)?;
        Ok(Self { connection })
    }

    fn register(&mut self, username: &str) -> anyhow::Result<uc::user::UserRecord> {
        user::register(&mut self.connection, new_user(username), &PixelAvatarGenerator)
            .map_err(Into::into)
    }

    fn create_map(
        &mut self,
        owner: &uc::user::UserRecord,
        private: bool,
    ) -> anyhow::Result<citygen_core::MapUid> {
        let new_map = NewMap {
            name: if private { "Private" } else { "Public" }.to_owned(),
            private,
            data: MapData::new(),
            thumbnail: ImageData::jpeg(vec![0xff, 0xd8, 0xff, 0xd9]),
        };
        let view = map::create(&mut self.connection, owner.id(), new_map)?;
        Ok(view.entity.uid)
    }

    fn backdate_access_tokens(&mut self) -> anyhow::Result<()> {
        diesel::sql_query("UPDATE access_token SET created_ms = ?")
            .bind::<BigInt, _>(0)
            .execute(&mut self.connection)?;
        Ok(())
    }

    fn access_token_exists(&mut self, token: &str) -> anyhow::Result<bool> {
        let Count { count } =
            diesel::sql_query("SELECT COUNT(*) AS count FROM access_token WHERE token = ?")
                .bind::<Text, _>(token)
                .get_result::<Count>(&mut self.connection)?;
        Ok(count > 0)
    }
}

#[test_log::test]
fn visibility_gate() -> anyhow::Result<()> {
    let mut fixture = DbFixture::new()?;
    let alice = fixture.register("alice")?;
    let bob = fixture.register("bob")?;
    let public_map = fixture.create_map(&alice, false)?;
    let private_map = fixture.create_map(&alice, true)?;

    for requester in [None, Some(bob.id()), Some(alice.id())] {
        let view = map::load_one(&mut fixture.connection, &public_map, requester)?;
        assert_eq!(Some("alice"), view.owner_username.as_deref());
    }
    for requester in [None, Some(bob.id())] {
        assert!(matches!(
            map::load_one(&mut fixture.connection, &private_map, requester),
            Err(Error::MapNotVisible)
        ));
        assert!(matches!(
            map::load_thumbnail(&mut fixture.connection, &private_map, requester),
            Err(Error::MapNotVisible)
        ));
    }
    assert!(map::load_one(&mut fixture.connection, &private_map, Some(alice.id())).is_ok());
    assert!(matches!(
        map::load_one(&mut fixture.connection, &citygen_core::MapUid::new(), None),
        Err(Error::MapNotFound)
    ));
    Ok(())
}

#[test_log::test]
fn favorite_and_list() -> anyhow::Result<()> {
    let mut fixture = DbFixture::new()?;
    let alice = fixture.register("alice")?;
    let bob = fixture.register("bob")?;
    let public_map = fixture.create_map(&alice, false)?;
    let private_map = fixture.create_map(&alice, true)?;

    assert_eq!(
        Outcome::Inserted,
        favorite::toggle(&mut fixture.connection, &public_map, bob.id(), true)?
    );
    assert_eq!(
        Outcome::Unchanged,
        favorite::toggle(&mut fixture.connection, &public_map, bob.id(), true)?
    );
    assert!(matches!(
        favorite::toggle(&mut fixture.connection, &private_map, bob.id(), true),
        Err(Error::MapNotVisible)
    ));

    let for_bob = map::load_public(&mut fixture.connection, Some(bob.id()), false)?;
    assert_eq!(1, for_bob.len());
    assert!(for_bob[0].favorited);

    let for_anonymous = map::load_public(&mut fixture.connection, None, false)?;
    assert_eq!(1, for_anonymous.len());
    assert!(!for_anonymous[0].favorited);

    // Public maps of the requester are excluded by default
    let for_alice = map::load_public(&mut fixture.connection, Some(alice.id()), false)?;
    assert!(for_alice.is_empty());

    let owned = map::load_owned(&mut fixture.connection, alice.id())?;
    assert_eq!(2, owned.len());
    Ok(())
}

#[test_log::test]
fn session_lifecycle() -> anyhow::Result<()> {
    let mut fixture = DbFixture::new()?;
    let alice = fixture.register("alice")?;
    assert!(
        !avatar::load(&mut fixture.connection, "alice")?
            .is_empty()
    );

    assert!(matches!(
        session::login(
            &mut fixture.connection,
            "alice@example.com",
            &Password::new("wrong"),
            DEFAULT_LIFETIME,
        ),
        Err(Error::InvalidCredentials)
    ));
    let (record, token) = session::login(
        &mut fixture.connection,
        "alice@example.com",
        &Password::new("secret"),
        DEFAULT_LIFETIME,
    )?;
    assert_eq!(alice, record);

    let requester =
        session::require_requester(&mut fixture.connection, Some(&token), DEFAULT_LIFETIME)?;
    assert_eq!(alice.id(), requester.id());

    session::logout(&mut fixture.connection, &token)?;
    assert!(matches!(
        session::require_requester(&mut fixture.connection, Some(&token), DEFAULT_LIFETIME),
        Err(Error::Unauthorized)
    ));
    Ok(())
}

#[test]
fn rollback_transaction_on_error() -> anyhow::Result<()> {
    let mut fixture = DbFixture::new()?;
    let result = fixture.connection.transaction::<(), TransactionError, _>(|connection| {
        user::register(connection, new_user("alice"), &PixelAvatarGenerator)?;
        Err(Error::Other(anyhow!("abort")).into())
    });
    assert!(result.is_err());
    assert!(matches!(
        user::load_by_username(&mut fixture.connection, "alice"),
        Err(Error::UserNotFound)
    ));
    Ok(())
}

#[test_log::test]
fn expired_session_within_transaction_keeps_token_until_next_login() -> anyhow::Result<()> {
    let mut fixture = DbFixture::new()?;
    let alice = fixture.register("alice")?;
    let bob = fixture.register("bob")?;
    let expired = session::open(&mut fixture.connection, &alice, DEFAULT_LIFETIME)?;
    fixture.backdate_access_tokens()?;

    let result = fixture
        .connection
        .transaction::<_, TransactionError, _>(|connection| {
            session::require_requester(connection, Some(&expired), DEFAULT_LIFETIME)
                .map_err(Into::into)
        })
        .map_err(TransactionError::into_inner);
    assert!(matches!(result, Err(Error::Unauthorized)));
    // Rejecting the token does not write anything.
    assert!(fixture.access_token_exists(&expired)?);

    let fresh = session::open(&mut fixture.connection, &bob, DEFAULT_LIFETIME)?;
    assert!(!fixture.access_token_exists(&expired)?);
    assert!(fixture.access_token_exists(&fresh)?);
    assert_eq!(1, count_rows(&mut fixture.connection, "access_token")?);
    Ok(())
}

fn favorite_on_contended_connection(
    connection: &mut DbConnection,
    uid: &citygen_core::MapUid,
    user_id: citygen_core::UserId,
) -> Outcome {
    const MAX_ATTEMPTS: usize = 1_000;
    for _ in 0..MAX_ATTEMPTS {
        match favorite::toggle(connection, uid, user_id, true) {
            Ok(outcome) => return outcome,
            // Shared-cache connections fail immediately on table locks
            // instead of waiting for them.
            Err(err @ (Error::Repository(_) | Error::Storage(_) | Error::Other(_))) => {
                log::debug!("Retrying favorite after lock contention: {err}");
                thread::yield_now();
            }
            Err(err) => panic!("unexpected error: {err}"),
        }
    }
    panic!("favorite not settled after {MAX_ATTEMPTS} attempts");
}

#[test_log::test]
fn concurrent_favorites_on_pooled_connections() -> anyhow::Result<()> {
    const THREADS: usize = 2;
    // One more than the number of threads for the setup connection
    let pool = create_connection_pool(&Storage::InMemory, NonZeroU32::MIN.saturating_add(2))?;
    let (uid, bob) = {
        let mut connection = get_pooled_connection(&pool)?;
        database::initialize(&mut connection, true)?;
        let alice = user::register(&mut connection, new_user("alice"), &PixelAvatarGenerator)?;
        let bob = user::register(&mut connection, new_user("bob"), &PixelAvatarGenerator)?;
        let new_map = NewMap {
            name: "Shared".to_owned(),
            private: false,
            data: MapData::new(),
            thumbnail: ImageData::jpeg(vec![0xff, 0xd8, 0xff, 0xd9]),
        };
        let view = map::create(&mut connection, alice.id(), new_map)?;
        (view.entity.uid, bob.id())
    };

    let mut connections = (0..THREADS)
        .map(|_| get_pooled_connection(&pool))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let barrier = Barrier::new(THREADS);
    let mut outcomes = thread::scope(|scope| {
        let handles = connections
            .iter_mut()
            .map(|connection| {
                let (barrier, uid) = (&barrier, &uid);
                scope.spawn(move || {
                    barrier.wait();
                    favorite_on_contended_connection(connection, uid, bob)
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|err| std::panic::resume_unwind(err)))
            .collect::<Vec<_>>()
    });
    outcomes.sort_by_key(|outcome| *outcome != Outcome::Inserted);
    assert_eq!(Outcome::Inserted, outcomes[0]);
    assert!(matches!(outcomes[1], Outcome::Unchanged | Outcome::Concurrent));

    let mut connection = connections.pop().expect("pooled connection");
    assert_eq!(1, count_rows(&mut connection, "map_favorite")?);
    Ok(())
}
