// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::{UserId, image::ImageData};

use super::schema::*;
use crate::prelude::*;

#[derive(Debug, Insertable)]
#[diesel(table_name = user_avatar)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) user_id: RowId,
    pub(crate) content_type: &'a str,
    pub(crate) data: &'a [u8],
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(created_at: UtcDateTimeMs, user_id: UserId, avatar: &'a ImageData) -> Self {
        let row_created_updated_ms = created_at.unix_timestamp_millis();
        let ImageData { content_type, data } = avatar;
        Self {
            row_created_ms: row_created_updated_ms,
            row_updated_ms: row_created_updated_ms,
            user_id: user_id.to_inner(),
            content_type: content_type.as_ref(),
            data,
        }
    }
}
