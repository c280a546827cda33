// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use thiserror::Error;

use citygen_repo::prelude::RepoError;
use citygen_repo_sqlite::prelude::DieselTransactionError;
use citygen_storage_sqlite::Error as StorageError;

use citygen_usecases as uc;

pub use citygen_repo_sqlite::{DbConnection, prelude::Connection as RepoConnection};

pub mod avatar;
pub mod database;
pub mod favorite;
pub mod map;
pub mod session;
pub mod user;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Input(anyhow::Error),

    #[error("map does not exist")]
    MapNotFound,

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

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    DatabaseMigration(anyhow::Error),

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl<E> From<DieselTransactionError<E>> for Error
where
    E: Into<Error>,
{
    fn from(err: DieselTransactionError<E>) -> Self {
        err.into_inner().into()
    }
}

impl From<uc::Error> for Error {
    fn from(err: uc::Error) -> Self {
        use uc::Error as UcError;
        match err {
            UcError::Input(uc::InputError(err)) => Self::Input(err),
            UcError::MapNotFound => Self::MapNotFound,
            UcError::MapNotVisible => Self::MapNotVisible,
            UcError::UserNotFound => Self::UserNotFound,
            UcError::UsernameAlreadyExists => Self::UsernameAlreadyExists,
            UcError::EmailAlreadyExists => Self::EmailAlreadyExists,
            UcError::PasswordTooShort => Self::PasswordTooShort,
            UcError::InvalidCredentials => Self::InvalidCredentials,
            UcError::Unauthorized => Self::Unauthorized,
            UcError::Forbidden(reason) => Self::Forbidden(reason),
            UcError::Repository(err) => Self::Repository(err),
            UcError::Other(err) => Self::Other(err),
        }
    }
}

pub type TransactionError = DieselTransactionError<Error>;

impl From<Error> for TransactionError {
    fn from(err: Error) -> Self {
        Self::new(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests;
