// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Session tokens are transported in an `HttpOnly` cookie.
//!
//! Clients that cannot handle cookies may present the token as
//! a bearer token in the `Authorization` header instead.

use std::time::Duration;

use warp::{Filter, Rejection};

pub const SESSION_COOKIE_NAME: &str = "citygen_session";

const BEARER_PREFIX: &str = "Bearer ";

fn bearer_token(authorization: &str) -> Option<&str> {
    authorization
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Extract the session token from the request, if any.
///
/// The cookie takes precedence over the `Authorization` header.
pub fn session_token() -> impl Filter<Extract = (Option<String>,), Error = Rejection> + Clone {
    warp::cookie::optional::<String>(SESSION_COOKIE_NAME)
        .and(warp::header::optional::<String>("authorization"))
        .map(|cookie: Option<String>, authorization: Option<String>| {
            cookie.filter(|token| !token.is_empty()).or_else(|| {
                authorization
                    .as_deref()
                    .and_then(bearer_token)
                    .map(ToOwned::to_owned)
            })
        })
}

/// Properties of the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieConfig {
    /// Only transmit the cookie over HTTPS.
    pub secure: bool,

    pub max_age: Duration,
}

/// The value of the `Set-Cookie` header for opening a session.
#[must_use]
pub fn set_session_cookie(token: &str, config: CookieConfig) -> String {
    let CookieConfig { secure, max_age } = config;
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}",
        max_age = max_age.as_secs()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// The value of the `Set-Cookie` header for closing a session.
#[must_use]
pub fn clear_session_cookie(config: CookieConfig) -> String {
    set_session_cookie(
        "",
        CookieConfig {
            max_age: Duration::ZERO,
            ..config
        },
    )
}

#[cfg(test)]
mod tests;
