// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::{User, UserId};
use citygen_repo::user::*;

use crate::{
    db::users::{models::*, schema::*},
    prelude::*,
};

impl UserRepo for crate::Connection<'_> {
    fn insert_user(
        &mut self,
        created_at: UtcDateTimeMs,
        user: &User,
        password_hash: &PasswordHash,
    ) -> RepoResult<UserId> {
        let insertable = InsertableRecord::bind(created_at, user, password_hash);
        diesel::insert_into(users::table)
            .values(&insertable)
            .returning(users::row_id)
            .get_result::<RowId>(self.as_mut())
            .map_err(repo_error)
            .map(UserId::new)
    }

    fn load_user(&mut self, id: UserId) -> RepoResult<(RecordHeader, User)> {
        users::table
            .filter(users::row_id.eq(id.to_inner()))
            .first::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)
            .map(|record| {
                let (header, user, _) = record.into();
                (header, user)
            })
    }

    fn resolve_user_by_username(&mut self, username: &str) -> RepoResult<(RecordHeader, User)> {
        users::table
            .filter(users::username.eq(username))
            .first::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)
            .map(|record| {
                let (header, user, _) = record.into();
                (header, user)
            })
    }

    fn resolve_user_by_email(
        &mut self,
        email: &str,
    ) -> RepoResult<(RecordHeader, User, PasswordHash)> {
        users::table
            .filter(users::email.eq(email))
            .first::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)
            .map(Into::into)
    }

    fn update_user_password_hash(
        &mut self,
        id: UserId,
        updated_at: UtcDateTimeMs,
        password_hash: &PasswordHash,
    ) -> RepoResult<()> {
        let target = users::table.filter(users::row_id.eq(id.to_inner()));
        let rows_affected = diesel::update(target)
            .set((
                users::row_updated_ms.eq(updated_at.unix_timestamp_millis()),
                users::password_hash.eq(&password_hash.0),
            ))
            .execute(self.as_mut())
            .map_err(repo_error)?;
        debug_assert!(rows_affected <= 1);
        if rows_affected < 1 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
