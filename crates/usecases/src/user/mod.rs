// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::{
    User, UserId,
    prelude::*,
    user::Password,
    util::clock::UtcDateTimeMs,
};
use citygen_repo::{
    avatar::AvatarRepo,
    user::{RecordHeader, UserRepo},
};

use super::*;
use crate::{
    avatar::AvatarGenerator,
    password::{hash_password, verify_password},
};

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub header: RecordHeader,
    pub user: User,
}

impl UserRecord {
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.header.id
    }
}

impl From<(RecordHeader, User)> for UserRecord {
    fn from((header, user): (RecordHeader, User)) -> Self {
        Self { header, user }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: Password,
}

#[derive(Debug)]
pub struct ValidatedInput {
    user: User,
    password: Password,
}

fn validate_password(password: &Password) -> Result<()> {
    // Too short is the only possible invalidity
    if password.is_valid() {
        Ok(())
    } else {
        Err(Error::PasswordTooShort)
    }
}

pub fn validate_input(new_user: NewUser) -> Result<ValidatedInput> {
    let NewUser {
        username,
        email,
        first_name,
        last_name,
        password,
    } = new_user;
    validate_password(&password)?;
    let user = User {
        username: username.trim().to_owned(),
        email: email.trim().to_owned(),
        first_name,
        last_name,
        is_active: true,
        is_verified: false,
        is_superuser: false,
    };
    if let Err(err) = user.validate() {
        return Err(InputError(anyhow::anyhow!("Invalid user input: {err:?}")).into());
    }
    Ok(ValidatedInput { user, password })
}

/// Register a new user with a generated avatar.
///
/// Must be invoked within a single transaction.
pub fn register<Repo>(
    repo: &mut Repo,
    new_user: NewUser,
    avatar_generator: &dyn AvatarGenerator,
) -> Result<UserRecord>
where
    Repo: UserRepo + AvatarRepo,
{
    let ValidatedInput { user, password } = validate_input(new_user)?;
    if repo.username_exists(&user.username)? {
        return Err(Error::UsernameAlreadyExists);
    }
    if repo.email_exists(&user.email)? {
        return Err(Error::EmailAlreadyExists);
    }
    let password_hash = hash_password(&password)?;
    let created_at = UtcDateTimeMs::now();
    let id = repo.insert_user(created_at, &user, &password_hash)?;
    let avatar = avatar_generator.generate_avatar()?;
    repo.upsert_user_avatar(created_at, id, &avatar)?;
    log::info!("Registered user {username} with id {id}", username = user.username);
    load(repo, id)
}

/// Verify the credentials of a user.
///
/// The password is hashed even if no user with the given email
/// exists to keep the timing of both failure cases similar.
pub fn authenticate<Repo>(repo: &mut Repo, email: &str, password: &Password) -> Result<UserRecord>
where
    Repo: UserRepo + ?Sized,
{
    let Some((header, user, password_hash)) =
        repo.resolve_user_by_email(email.trim()).optional()?
    else {
        hash_password(password)?;
        return Err(Error::UserNotFound);
    };
    if !verify_password(password, &password_hash)? || !user.is_active {
        log::debug!("Authentication of user {id} failed", id = header.id);
        return Err(Error::InvalidCredentials);
    }
    Ok(UserRecord { header, user })
}

pub fn reset_password<Repo>(repo: &mut Repo, user_id: UserId, password: &Password) -> Result<()>
where
    Repo: UserRepo + ?Sized,
{
    validate_password(password)?;
    let password_hash = hash_password(password)?;
    repo.update_user_password_hash(user_id, UtcDateTimeMs::now(), &password_hash)
        .map_err(user_not_found)
}

pub(crate) fn user_not_found(err: RepoError) -> Error {
    match err {
        RepoError::NotFound => Error::UserNotFound,
        err => err.into(),
    }
}

pub fn load<Repo>(repo: &mut Repo, id: UserId) -> Result<UserRecord>
where
    Repo: UserRepo + ?Sized,
{
    repo.load_user(id).map(Into::into).map_err(user_not_found)
}

pub fn load_by_username<Repo>(repo: &mut Repo, username: &str) -> Result<UserRecord>
where
    Repo: UserRepo + ?Sized,
{
    repo.resolve_user_by_username(username)
        .map(Into::into)
        .map_err(user_not_found)
}
