// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

const CONFIG: CookieConfig = CookieConfig {
    secure: false,
    max_age: Duration::from_secs(3600),
};

#[tokio::test]
async fn token_from_cookie() {
    let token = warp::test::request()
        .header("cookie", "other=1; citygen_session=abc")
        .filter(&session_token())
        .await
        .unwrap();
    assert_eq!(Some("abc".to_owned()), token);
}

#[tokio::test]
async fn token_from_bearer_header() {
    let token = warp::test::request()
        .header("authorization", "Bearer xyz")
        .filter(&session_token())
        .await
        .unwrap();
    assert_eq!(Some("xyz".to_owned()), token);

    let token = warp::test::request()
        .header("authorization", "Basic xyz")
        .filter(&session_token())
        .await
        .unwrap();
    assert_eq!(None, token);
}

#[tokio::test]
async fn cookie_takes_precedence() {
    let token = warp::test::request()
        .header("cookie", "citygen_session=abc")
        .header("authorization", "Bearer xyz")
        .filter(&session_token())
        .await
        .unwrap();
    assert_eq!(Some("abc".to_owned()), token);
}

#[tokio::test]
async fn no_token() {
    let token = warp::test::request()
        .filter(&session_token())
        .await
        .unwrap();
    assert_eq!(None, token);
}

#[test]
fn session_cookie_attributes() {
    assert_eq!(
        "citygen_session=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=3600",
        set_session_cookie("abc", CONFIG)
    );
    assert_eq!(
        "citygen_session=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=3600; Secure",
        set_session_cookie(
            "abc",
            CookieConfig {
                secure: true,
                ..CONFIG
            }
        )
    );
    assert_eq!(
        "citygen_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        clear_session_cookie(CONFIG)
    );
}
