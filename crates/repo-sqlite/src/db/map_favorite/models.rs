// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::UserId;
use citygen_repo::map::RecordId as MapId;

use super::schema::*;
use crate::prelude::*;

#[derive(Debug, Insertable)]
#[diesel(table_name = map_favorite)]
pub(crate) struct InsertableRecord {
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) map_id: RowId,
    pub(crate) user_id: RowId,
}

impl InsertableRecord {
    pub(crate) fn bind(created_at: UtcDateTimeMs, map_id: MapId, user_id: UserId) -> Self {
        Self {
            row_created_ms: created_at.unix_timestamp_millis(),
            map_id: map_id.into(),
            user_id: user_id.into(),
        }
    }
}
