// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::{UserId, user::Password};
use citygen_usecases::{
    avatar::AvatarGenerator,
    user::{self as uc, NewUser, UserRecord},
};

use super::*;

pub fn register(
    connection: &mut DbConnection,
    new_user: NewUser,
    avatar_generator: &dyn AvatarGenerator,
) -> Result<UserRecord> {
    let mut repo = RepoConnection::new(connection);
    uc::register(&mut repo, new_user, avatar_generator).map_err(Into::into)
}

pub fn authenticate(
    connection: &mut DbConnection,
    email: &str,
    password: &Password,
) -> Result<UserRecord> {
    let mut repo = RepoConnection::new(connection);
    uc::authenticate(&mut repo, email, password).map_err(Into::into)
}

pub fn reset_password(
    connection: &mut DbConnection,
    user_id: UserId,
    password: &Password,
) -> Result<()> {
    let mut repo = RepoConnection::new(connection);
    uc::reset_password(&mut repo, user_id, password).map_err(Into::into)
}

pub fn load_by_username(connection: &mut DbConnection, username: &str) -> Result<UserRecord> {
    let mut repo = RepoConnection::new(connection);
    uc::load_by_username(&mut repo, username).map_err(Into::into)
}
