// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::image::ImageData;
use citygen_repo::map::RecordId as MapId;

use super::schema::*;
use crate::prelude::*;

#[derive(Debug, Insertable)]
#[diesel(table_name = map_thumbnail)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) map_id: RowId,
    pub(crate) content_type: &'a str,
    pub(crate) data: &'a [u8],
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(map_id: MapId, thumbnail: &'a ImageData) -> Self {
        let ImageData { content_type, data } = thumbnail;
        Self {
            map_id: map_id.into(),
            content_type: content_type.as_ref(),
            data,
        }
    }
}
