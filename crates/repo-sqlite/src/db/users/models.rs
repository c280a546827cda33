// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::{User, UserId};
use citygen_repo::user::{PasswordHash, RecordHeader};

use super::schema::*;
use crate::prelude::*;

#[derive(Debug, Queryable)]
pub(crate) struct QueryableRecord {
    pub(crate) row_id: RowId,
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) password_hash: String,
    pub(crate) is_active: bool,
    pub(crate) is_verified: bool,
    pub(crate) is_superuser: bool,
}

impl From<QueryableRecord> for (RecordHeader, User, PasswordHash) {
    fn from(from: QueryableRecord) -> Self {
        let QueryableRecord {
            row_id,
            row_created_ms,
            row_updated_ms,
            username,
            email,
            first_name,
            last_name,
            password_hash,
            is_active,
            is_verified,
            is_superuser,
        } = from;
        let header = RecordHeader {
            id: UserId::new(row_id),
            created_at: timestamp_from_sql(row_created_ms),
            updated_at: timestamp_from_sql(row_updated_ms),
        };
        let user = User {
            username,
            email,
            first_name,
            last_name,
            is_active,
            is_verified,
            is_superuser,
        };
        (header, user, PasswordHash(password_hash))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) username: &'a str,
    pub(crate) email: &'a str,
    pub(crate) first_name: &'a str,
    pub(crate) last_name: &'a str,
    pub(crate) password_hash: &'a str,
    pub(crate) is_active: bool,
    pub(crate) is_verified: bool,
    pub(crate) is_superuser: bool,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(
        created_at: UtcDateTimeMs,
        user: &'a User,
        password_hash: &'a PasswordHash,
    ) -> Self {
        let row_created_updated_ms = created_at.unix_timestamp_millis();
        let User {
            username,
            email,
            first_name,
            last_name,
            is_active,
            is_verified,
            is_superuser,
        } = user;
        Self {
            row_created_ms: row_created_updated_ms,
            row_updated_ms: row_created_updated_ms,
            username,
            email,
            first_name,
            last_name,
            password_hash: &password_hash.0,
            is_active: *is_active,
            is_verified: *is_verified,
            is_superuser: *is_superuser,
        }
    }
}
