// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::Connection as _;
use serde_json::json;

use citygen_usecases::{avatar::PixelAvatarGenerator, session::DEFAULT_LIFETIME};

use super::*;
use crate::{
    auth::Authenticated,
    map::{MapRead, decode_map_uid},
};

fn establish_connection() -> anyhow::Result<DbConnection> {
    let mut connection = DbConnection::establish(":memory:")?;
    uc::database::initialize(&mut connection, true)?;
    Ok(connection)
}

fn register(connection: &mut DbConnection, username: &str) -> anyhow::Result<Authenticated> {
    let request_body = serde_json::from_value(json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "firstName": "First",
        "lastName": "Last",
        "password": "secret",
    }))?;
    Ok(auth::register::handle_request(
        connection,
        request_body,
        DEFAULT_LIFETIME,
        &PixelAvatarGenerator,
    )?)
}

fn session(token: &str) -> Session<'_> {
    Session {
        token: Some(token),
        lifetime: DEFAULT_LIFETIME,
    }
}

const ANONYMOUS: Session<'static> = Session {
    token: None,
    lifetime: DEFAULT_LIFETIME,
};

fn create_map(
    connection: &mut DbConnection,
    token: &str,
    private: bool,
) -> anyhow::Result<MapRead> {
    let request_body = serde_json::from_value(json!({
        "name": "Harbor",
        "private": private,
        "thumbnailBase64": BASE64.encode(&[0xff, 0xd8, 0xff, 0xd9]),
        "data": { "seed": 42 },
    }))?;
    Ok(map::create::handle_request(
        connection,
        session(token),
        request_body,
    )?)
}

#[test]
fn image_format_from_accept_header() {
    assert_eq!(ImageFormat::Binary, ImageFormat::from_accept(None));
    assert_eq!(ImageFormat::Binary, ImageFormat::from_accept(Some("image/jpeg")));
    assert_eq!(ImageFormat::Json, ImageFormat::from_accept(Some("application/json")));
}

#[test]
fn reject_invalid_base64() {
    assert!(matches!(
        decode_base64_image("not base64!", mime::IMAGE_JPEG),
        Err(Error::BadRequest(_))
    ));
}

#[test_log::test]
fn register_and_login() -> anyhow::Result<()> {
    let mut connection = establish_connection()?;
    let registered = register(&mut connection, "alice")?;
    assert_eq!("alice", registered.user.username);
    assert!(!registered.token.is_empty());

    let login = auth::login::RequestBody {
        email: "alice@example.com".to_owned(),
        password: "secret".to_owned(),
    };
    let logged_in = auth::login::handle_request(&mut connection, login, DEFAULT_LIFETIME)?;
    assert_eq!(registered.user, logged_in.user);
    assert_ne!(registered.token, logged_in.token);

    let user_self = user::load_self::handle_request(&mut connection, session(&logged_in.token))?;
    assert_eq!(registered.user, user_self);

    auth::logout::handle_request(&mut connection, session(&logged_in.token))?;
    assert!(matches!(
        user::load_self::handle_request(&mut connection, session(&logged_in.token)),
        Err(Error::UseCase(uc::Error::Unauthorized))
    ));
    Ok(())
}

#[test_log::test]
fn user_json_is_camel_case() -> anyhow::Result<()> {
    let mut connection = establish_connection()?;
    let registered = register(&mut connection, "alice")?;
    let json = serde_json::to_value(&registered.user)?;
    assert_eq!(json!("alice"), json["username"]);
    assert_eq!(json!("First"), json["firstName"]);
    assert_eq!(json!(false), json["isSuperuser"]);
    assert!(json["createdAt"].is_string());
    assert!(json.get("password").is_none());
    Ok(())
}

#[test_log::test]
fn private_map_detail_and_favorite() -> anyhow::Result<()> {
    let mut connection = establish_connection()?;
    let alice = register(&mut connection, "alice")?;
    let bob = register(&mut connection, "bob")?;
    let created = create_map(&mut connection, &alice.token, true)?;
    assert!(!created.favorited);
    assert!(created.data.is_none());
    let uid = decode_map_uid(&created.id)?;

    let with_data = map::load_one::handle_request(
        &mut connection,
        session(&alice.token),
        &uid,
        map::load_one::QueryParams { include_data: true },
    )?;
    assert_eq!(Some(&json!(42)), with_data.data.as_ref().and_then(|data| data.get("seed")));
    assert_eq!(Some("alice"), with_data.user.as_ref().map(|user| user.username.as_str()));

    for unauthorized in [ANONYMOUS, session(&bob.token)] {
        assert!(matches!(
            map::load_one::handle_request(&mut connection, unauthorized, &uid, Default::default()),
            Err(Error::UseCase(uc::Error::MapNotVisible))
        ));
    }
    assert!(matches!(
        map::favorite::handle_request(
            &mut connection,
            session(&bob.token),
            &uid,
            map::favorite::RequestBody { favorited: true },
        ),
        Err(Error::UseCase(uc::Error::MapNotVisible))
    ));
    assert!(matches!(
        map::favorite::handle_request(
            &mut connection,
            ANONYMOUS,
            &uid,
            map::favorite::RequestBody { favorited: true },
        ),
        Err(Error::UseCase(uc::Error::Unauthorized))
    ));

    map::favorite::handle_request(
        &mut connection,
        session(&alice.token),
        &uid,
        map::favorite::RequestBody { favorited: true },
    )?;
    let owned = map::load_owned::handle_request(&mut connection, session(&alice.token))?;
    assert_eq!(1, owned.len());
    assert!(owned[0].favorited);
    Ok(())
}

#[test_log::test]
fn thumbnail_formats() -> anyhow::Result<()> {
    let mut connection = establish_connection()?;
    let alice = register(&mut connection, "alice")?;
    let created = create_map(&mut connection, &alice.token, false)?;
    let uid = decode_map_uid(&created.id)?;

    let map::load_thumbnail::ResponseBody::Binary(image) = map::load_thumbnail::handle_request(
        &mut connection,
        ANONYMOUS,
        &uid,
        ImageFormat::Binary,
    )?
    else {
        anyhow::bail!("expected binary response");
    };
    assert_eq!(mime::IMAGE_JPEG, image.content_type);
    assert_eq!(vec![0xff, 0xd8, 0xff, 0xd9], image.data);

    let map::load_thumbnail::ResponseBody::Json(thumbnail) =
        map::load_thumbnail::handle_request(&mut connection, ANONYMOUS, &uid, ImageFormat::Json)?
    else {
        anyhow::bail!("expected JSON response");
    };
    assert_eq!(created.id, thumbnail.map_id);
    let json = serde_json::to_value(&thumbnail)?;
    assert_eq!(json!("/9j/2Q=="), json["data"]);
    assert_eq!(json!("image/jpeg"), json["mimetype"]);
    Ok(())
}

#[test_log::test]
fn list_public_maps() -> anyhow::Result<()> {
    let mut connection = establish_connection()?;
    let alice = register(&mut connection, "alice")?;
    let bob = register(&mut connection, "bob")?;
    create_map(&mut connection, &alice.token, false)?;
    create_map(&mut connection, &alice.token, true)?;

    let anonymous =
        map::load_public::handle_request(&mut connection, ANONYMOUS, Default::default())?;
    assert_eq!(1, anonymous.len());

    let for_alice = map::load_public::handle_request(
        &mut connection,
        session(&alice.token),
        Default::default(),
    )?;
    assert!(for_alice.is_empty());
    let for_alice = map::load_public::handle_request(
        &mut connection,
        session(&alice.token),
        map::load_public::QueryParams { include_self: true },
    )?;
    assert_eq!(1, for_alice.len());

    let for_bob =
        map::load_public::handle_request(&mut connection, session(&bob.token), Default::default())?;
    assert_eq!(1, for_bob.len());
    assert!(!for_bob[0].favorited);
    let json = serde_json::to_value(&for_bob[0])?;
    assert!(json.get("data").is_none());
    assert!(json.get("lastPlayedAt").is_none());
    assert_eq!(json!("alice"), json["user"]["username"]);
    Ok(())
}

#[test_log::test]
fn avatar_permissions() -> anyhow::Result<()> {
    let mut connection = establish_connection()?;
    let alice = register(&mut connection, "alice")?;
    let bob = register(&mut connection, "bob")?;
    let png = ImageData {
        content_type: mime::IMAGE_PNG,
        data: vec![0x89, b'P', b'N', b'G'],
    };

    assert!(matches!(
        user::replace_avatar::handle_request(
            &mut connection,
            session(&bob.token),
            "alice",
            png.clone(),
        ),
        Err(Error::UseCase(uc::Error::Forbidden(_)))
    ));
    let replaced = user::replace_avatar::handle_request(
        &mut connection,
        session(&alice.token),
        "alice",
        png.clone(),
    )?;
    assert_eq!("image/png", replaced.image.mimetype);

    let user::AvatarResponse::Binary(avatar) =
        user::load_avatar::handle_request(&mut connection, "alice", ImageFormat::Binary)?
    else {
        anyhow::bail!("expected binary response");
    };
    assert_eq!(png, avatar);

    let randomized = user::randomize_avatar::handle_request(
        &mut connection,
        session(&alice.token),
        "alice",
        &PixelAvatarGenerator,
    )?;
    assert_eq!("image/jpeg", randomized.image.mimetype);

    assert!(matches!(
        user::load_avatar::handle_request(&mut connection, "nobody", ImageFormat::Json),
        Err(Error::UseCase(uc::Error::UserNotFound))
    ));
    assert_eq!(
        "alice",
        user::load_public::handle_request(&mut connection, "alice")?.username
    );
    Ok(())
}
