// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::result::Result as StdResult;

use citygen_repo::prelude::*;
use thiserror::Error;

pub mod avatar;
pub mod favorite;
pub mod map;
pub mod password;
pub mod session;
pub mod user;

#[derive(Error, Debug)]
#[error(transparent)]
pub struct InputError(#[from] pub anyhow::Error);

pub type InputResult<T> = StdResult<T, InputError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("map does not exist")]
    MapNotFound,

    /// The map exists but is private and the requester is not its owner.
    #[error("map is not public")]
    MapNotVisible,

    #[error("user does not exist")]
    UserNotFound,

    #[error("username already exists")]
    UsernameAlreadyExists,

    #[error("email already exists")]
    EmailAlreadyExists,

    #[error("password is too short")]
    PasswordTooShort,

    #[error("invalid credentials")]
    InvalidCredentials,

    /// Authentication is required.
    #[error("unauthorized")]
    Unauthorized,

    /// The authenticated user lacks the required permission.
    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = StdResult<T, Error>;
