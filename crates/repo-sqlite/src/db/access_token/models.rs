// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::UserId;
use citygen_repo::access_token::AccessToken;

use super::schema::*;
use crate::prelude::*;

#[derive(Debug, Queryable)]
pub(crate) struct QueryableRecord {
    pub(crate) token: String,
    pub(crate) user_id: RowId,
    pub(crate) created_ms: TimestampMillis,
}

impl From<QueryableRecord> for AccessToken {
    fn from(from: QueryableRecord) -> Self {
        let QueryableRecord {
            token: _,
            user_id,
            created_ms,
        } = from;
        Self {
            user_id: UserId::new(user_id),
            created_at: timestamp_from_sql(created_ms),
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = access_token)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) token: &'a str,
    pub(crate) user_id: RowId,
    pub(crate) created_ms: TimestampMillis,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(token: &'a str, access_token: &AccessToken) -> Self {
        let AccessToken {
            user_id,
            created_at,
        } = access_token;
        Self {
            token,
            user_id: user_id.to_inner(),
            created_ms: created_at.unix_timestamp_millis(),
        }
    }
}
