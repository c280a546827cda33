// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::image::ImageData;
use citygen_usecases::{
    avatar::{self as uc, AvatarGenerator},
    user::UserRecord,
};

use super::*;

pub fn load(connection: &mut DbConnection, username: &str) -> Result<ImageData> {
    let mut repo = RepoConnection::new(connection);
    let (_, avatar) = uc::load(&mut repo, username)?;
    Ok(avatar)
}

pub fn replace(
    connection: &mut DbConnection,
    requester: &UserRecord,
    username: &str,
    avatar: ImageData,
) -> Result<ImageData> {
    let mut repo = RepoConnection::new(connection);
    uc::replace(&mut repo, requester, username, avatar).map_err(Into::into)
}

pub fn randomize(
    connection: &mut DbConnection,
    requester: &UserRecord,
    username: &str,
    avatar_generator: &dyn AvatarGenerator,
) -> Result<ImageData> {
    let mut repo = RepoConnection::new(connection);
    uc::randomize(&mut repo, requester, username, avatar_generator).map_err(Into::into)
}
