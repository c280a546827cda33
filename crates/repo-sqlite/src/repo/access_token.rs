// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_repo::access_token::{AccessToken, AccessTokenRepo};

use crate::{
    db::access_token::{models::*, schema::*},
    prelude::*,
};

impl AccessTokenRepo for crate::Connection<'_> {
    fn insert_access_token(&mut self, token: &str, access_token: &AccessToken) -> RepoResult<()> {
        let insertable = InsertableRecord::bind(token, access_token);
        let rows_affected = diesel::insert_into(access_token::table)
            .values(&insertable)
            .execute(self.as_mut())
            .map_err(repo_error)?;
        debug_assert_eq!(1, rows_affected);
        Ok(())
    }

    fn load_access_token(&mut self, token: &str) -> RepoResult<AccessToken> {
        access_token::table
            .filter(access_token::token.eq(token))
            .first::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)
            .map(Into::into)
    }

    fn delete_access_token(&mut self, token: &str) -> RepoResult<usize> {
        diesel::delete(access_token::table.filter(access_token::token.eq(token)))
            .execute(self.as_mut())
            .map_err(repo_error)
    }

    fn purge_access_tokens_created_before(
        &mut self,
        created_before: UtcDateTimeMs,
    ) -> RepoResult<usize> {
        let target = access_token::table
            .filter(access_token::created_ms.lt(created_before.unix_timestamp_millis()));
        let rows_affected = diesel::delete(target)
            .execute(self.as_mut())
            .map_err(repo_error)?;
        log::debug!("Purged {rows_affected} expired access token(s)");
        Ok(rows_affected)
    }
}
