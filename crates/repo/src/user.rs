// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::{User, UserId, util::clock::UtcDateTimeMs};

use crate::prelude::*;

pub type RecordHeader = crate::RecordHeader<UserId>;

/// An encoded password hash in PHC string format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordHash(pub String);

pub trait UserRepo {
    fn insert_user(
        &mut self,
        created_at: UtcDateTimeMs,
        user: &User,
        password_hash: &PasswordHash,
    ) -> RepoResult<UserId>;

    fn load_user(&mut self, id: UserId) -> RepoResult<(RecordHeader, User)>;

    fn resolve_user_by_username(&mut self, username: &str) -> RepoResult<(RecordHeader, User)>;

    fn resolve_user_by_email(
        &mut self,
        email: &str,
    ) -> RepoResult<(RecordHeader, User, PasswordHash)>;

    fn username_exists(&mut self, username: &str) -> RepoResult<bool> {
        self.resolve_user_by_username(username)
            .optional()
            .map(|found| found.is_some())
    }

    fn email_exists(&mut self, email: &str) -> RepoResult<bool> {
        self.resolve_user_by_email(email)
            .optional()
            .map(|found| found.is_some())
    }

    fn update_user_password_hash(
        &mut self,
        id: UserId,
        updated_at: UtcDateTimeMs,
        password_hash: &PasswordHash,
    ) -> RepoResult<()>;
}
