// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use mime::Mime;

use crate::prelude::*;

/// Identifies a registered user.
///
/// Also used as the identity of the requester.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i64);

impl UserId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn to_inner(self) -> i64 {
        let Self(value) = self;
        value
    }
}

impl From<i64> for UserId {
    fn from(from: i64) -> Self {
        Self::new(from)
    }
}

impl From<UserId> for i64 {
    fn from(from: UserId) -> Self {
        from.to_inner()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

pub const USERNAME_MAX_LEN: usize = 64;

pub const MIN_PASSWORD_LEN: usize = 4;

/// Media types accepted for uploaded avatars.
#[must_use]
pub fn is_supported_avatar_type(content_type: &Mime) -> bool {
    *content_type == mime::IMAGE_JPEG || *content_type == mime::IMAGE_PNG
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_superuser: bool,
}

impl User {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UserInvalidity {
    UsernameEmpty,
    UsernameTooLong,
    UsernameWhitespace,
    EmailInvalid,
}

impl Validate for User {
    type Invalidity = UserInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            username, email, ..
        } = self;
        ValidationContext::new()
            .invalidate_if(username.is_empty(), Self::Invalidity::UsernameEmpty)
            .invalidate_if(
                username.chars().count() > USERNAME_MAX_LEN,
                Self::Invalidity::UsernameTooLong,
            )
            .invalidate_if(
                username.chars().any(char::is_whitespace),
                Self::Invalidity::UsernameWhitespace,
            )
            .invalidate_if(!is_valid_email(email), Self::Invalidity::EmailInvalid)
            .into()
    }
}

fn is_valid_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PasswordInvalidity {
    TooShort,
}

/// A clear text password as submitted by a user.
///
/// Never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

impl Validate for Password {
    type Invalidity = PasswordInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(
                self.0.chars().count() < MIN_PASSWORD_LEN,
                Self::Invalidity::TooShort,
            )
            .into()
    }
}

#[cfg(test)]
mod tests;
