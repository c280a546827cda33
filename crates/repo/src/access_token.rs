// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::{UserId, util::clock::UtcDateTimeMs};

use crate::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
    pub user_id: UserId,
    pub created_at: UtcDateTimeMs,
}

pub trait AccessTokenRepo {
    fn insert_access_token(
        &mut self,
        token: &str,
        access_token: &AccessToken,
    ) -> RepoResult<()>;

    fn load_access_token(&mut self, token: &str) -> RepoResult<AccessToken>;

    /// Returns the number of deleted records.
    fn delete_access_token(&mut self, token: &str) -> RepoResult<usize>;

    /// Delete all tokens that have been created before the given time.
    fn purge_access_tokens_created_before(&mut self, created_before: UtcDateTimeMs)
    -> RepoResult<usize>;
}
