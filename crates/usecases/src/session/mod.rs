// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::time::Duration;

use data_encoding::BASE64URL_NOPAD;
use rand::RngCore as _;

use citygen_core::{UserId, util::clock::UtcDateTimeMs};
use citygen_repo::{
    access_token::{AccessToken, AccessTokenRepo},
    user::UserRepo,
};

use super::*;
use crate::user::UserRecord;

/// Sessions expire 30 days after login.
pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(30 * 24 * 60 * 60);

const TOKEN_BYTES: usize = 32;

/// Length of the encoded token string.
pub const TOKEN_LEN: usize = 43;

/// Generate a new, unguessable session token.
#[must_use]
pub fn generate_token() -> String {
    let mut bytes = [0; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    BASE64URL_NOPAD.encode(&bytes)
}

fn expired_before(lifetime: Duration) -> UtcDateTimeMs {
    let lifetime_millis = i64::try_from(lifetime.as_millis()).unwrap_or(i64::MAX);
    let now = UtcDateTimeMs::now().unix_timestamp_millis();
    UtcDateTimeMs::from_unix_timestamp_millis(now.saturating_sub(lifetime_millis))
}

fn is_expired(access_token: &AccessToken, lifetime: Duration) -> bool {
    access_token.created_at < expired_before(lifetime)
}

/// Open a new session for an authenticated user.
///
/// Expired tokens of all users are purged on this occasion.
pub fn login<Repo>(repo: &mut Repo, user_id: UserId, lifetime: Duration) -> Result<String>
where
    Repo: AccessTokenRepo + ?Sized,
{
    let purged = repo.purge_access_tokens_created_before(expired_before(lifetime))?;
    if purged > 0 {
        log::debug!("Purged {purged} expired access token(s)");
    }
    let token = generate_token();
    let access_token = AccessToken {
        user_id,
        created_at: UtcDateTimeMs::now(),
    };
    repo.insert_access_token(&token, &access_token)?;
    log::info!("User {user_id} logged in");
    Ok(token)
}

/// Close the session.
///
/// Unknown tokens are silently ignored.
pub fn logout<Repo>(repo: &mut Repo, token: &str) -> Result<()>
where
    Repo: AccessTokenRepo + ?Sized,
{
    let deleted = repo.delete_access_token(token)?;
    log::debug!("Deleted {deleted} access token(s) on logout");
    Ok(())
}

/// Resolve the identity of the requester from an optional session token.
///
/// Missing, unknown, or expired tokens and inactive users all result
/// in an anonymous requester. This never writes: expired tokens stay
/// in place until they are purged by the next [`login()`].
pub fn resolve_requester<Repo>(
    repo: &mut Repo,
    token: Option<&str>,
    lifetime: Duration,
) -> Result<Option<UserRecord>>
where
    Repo: AccessTokenRepo + UserRepo,
{
    let Some(token) = token.filter(|token| !token.is_empty()) else {
        return Ok(None);
    };
    let Some(access_token) = repo.load_access_token(token).optional()? else {
        log::debug!("Unknown access token");
        return Ok(None);
    };
    if is_expired(&access_token, lifetime) {
        log::debug!("Access token of user {} has expired", access_token.user_id);
        return Ok(None);
    }
    let Some(record) = repo
        .load_user(access_token.user_id)
        .optional()?
        .map(UserRecord::from)
    else {
        return Ok(None);
    };
    if !record.user.is_active {
        log::debug!("User {} is inactive", record.id());
        return Ok(None);
    }
    Ok(Some(record))
}

/// Same as [`resolve_requester()`], but fails with [`Error::Unauthorized`]
/// for anonymous requesters.
pub fn require_requester<Repo>(
    repo: &mut Repo,
    token: Option<&str>,
    lifetime: Duration,
) -> Result<UserRecord>
where
    Repo: AccessTokenRepo + UserRepo,
{
    resolve_requester(repo, token, lifetime)?.ok_or(Error::Unauthorized)
}
