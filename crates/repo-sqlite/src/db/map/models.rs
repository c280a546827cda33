// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use anyhow::anyhow;

use citygen_core::{Map, MapEntity, MapUid, UserId};
use citygen_repo::map::RecordHeader;

use super::schema::*;
use crate::prelude::*;

#[derive(Debug, Queryable)]
pub(crate) struct QueryableRecord {
    pub(crate) row_id: RowId,
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) entity_uid: String,
    pub(crate) owner_id: RowId,
    pub(crate) name: String,
    pub(crate) private: bool,
    pub(crate) data: String,
    pub(crate) last_played_ms: Option<TimestampMillis>,
}

impl TryFrom<QueryableRecord> for (RecordHeader, MapEntity) {
    type Error = anyhow::Error;

    fn try_from(from: QueryableRecord) -> anyhow::Result<Self> {
        let QueryableRecord {
            row_id,
            row_created_ms,
            row_updated_ms,
            entity_uid,
            owner_id,
            name,
            private,
            data,
            last_played_ms,
        } = from;
        let header = RecordHeader {
            id: row_id.into(),
            created_at: timestamp_from_sql(row_created_ms),
            updated_at: timestamp_from_sql(row_updated_ms),
        };
        let uid = entity_uid.parse::<MapUid>()?;
        let data = match serde_json::from_str(&data)? {
            serde_json::Value::Object(data) => data,
            _ => return Err(anyhow!("map data of {uid} is not a JSON object")),
        };
        let map = Map {
            owner: UserId::new(owner_id),
            name,
            private,
            data,
            last_played_at: last_played_ms.map(timestamp_from_sql),
        };
        Ok((header, MapEntity::new(uid, map)))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = map)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) entity_uid: String,
    pub(crate) owner_id: RowId,
    pub(crate) name: &'a str,
    pub(crate) private: bool,
    pub(crate) data: String,
    pub(crate) last_played_ms: Option<TimestampMillis>,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(created_at: UtcDateTimeMs, entity: &'a MapEntity) -> anyhow::Result<Self> {
        let row_created_updated_ms = created_at.unix_timestamp_millis();
        let MapEntity { uid, body } = entity;
        let Map {
            owner,
            name,
            private,
            data,
            last_played_at,
        } = body;
        Ok(Self {
            row_created_ms: row_created_updated_ms,
            row_updated_ms: row_created_updated_ms,
            entity_uid: uid.to_string(),
            owner_id: owner.to_inner(),
            name: name.trim(),
            private: *private,
            data: serde_json::to_string(data)?,
            last_played_ms: last_played_at.map(|at| at.unix_timestamp_millis()),
        })
    }
}
