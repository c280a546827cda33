// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::time::Duration;

use citygen_core::user::Password;
use citygen_usecases::{
    session as uc,
    user::{self as user_uc, UserRecord},
};

use super::*;

/// Verify the credentials and open a new session.
///
/// Returns the authenticated user and the session token.
pub fn login(
    connection: &mut DbConnection,
    email: &str,
    password: &Password,
    lifetime: Duration,
) -> Result<(UserRecord, String)> {
    let mut repo = RepoConnection::new(connection);
    let record = user_uc::authenticate(&mut repo, email, password)?;
    let token = uc::login(&mut repo, record.id(), lifetime)?;
    Ok((record, token))
}

/// Open a new session for a user that has just been authenticated.
pub fn open(connection: &mut DbConnection, record: &UserRecord, lifetime: Duration) -> Result<String> {
    let mut repo = RepoConnection::new(connection);
    uc::login(&mut repo, record.id(), lifetime).map_err(Into::into)
}

pub fn logout(connection: &mut DbConnection, token: &str) -> Result<()> {
    let mut repo = RepoConnection::new(connection);
    uc::logout(&mut repo, token).map_err(Into::into)
}

pub fn resolve_requester(
    connection: &mut DbConnection,
    token: Option<&str>,
    lifetime: Duration,
) -> Result<Option<UserRecord>> {
    let mut repo = RepoConnection::new(connection);
    uc::resolve_requester(&mut repo, token, lifetime).map_err(Into::into)
}

pub fn require_requester(
    connection: &mut DbConnection,
    token: Option<&str>,
    lifetime: Duration,
) -> Result<UserRecord> {
    let mut repo = RepoConnection::new(connection);
    uc::require_requester(&mut repo, token, lifetime).map_err(Into::into)
}
