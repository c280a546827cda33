// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::{MapEntity, MapUid, image::ImageData, util::clock::UtcDateTimeMs};
use citygen_core_api::map::MapFilter;

use crate::prelude::*;

record_id_newtype!(RecordId);

pub type RecordHeader = crate::RecordHeader<RecordId>;

/// A map entity together with the username of its owner.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityWithOwner {
    pub entity: MapEntity,
    pub owner_username: String,
}

pub trait EntityRepo {
    fn resolve_map_id(&mut self, uid: &MapUid) -> RepoResult<RecordId>;

    fn load_map_entity(&mut self, id: RecordId) -> RepoResult<(RecordHeader, EntityWithOwner)>;

    fn load_map_entity_by_uid(
        &mut self,
        uid: &MapUid,
    ) -> RepoResult<(RecordHeader, EntityWithOwner)> {
        let id = self.resolve_map_id(uid)?;
        self.load_map_entity(id)
    }

    fn insert_map_entity(
        &mut self,
        created_at: UtcDateTimeMs,
        created_entity: &MapEntity,
    ) -> RepoResult<RecordId>;

    /// Load all maps matching the filter, most recently updated first.
    fn load_map_entities(
        &mut self,
        filter: &MapFilter,
        collector: &mut dyn ReservableRecordCollector<Header = RecordHeader, Record = EntityWithOwner>,
    ) -> RepoResult<()>;
}

/// Exactly one thumbnail per map.
pub trait ThumbnailRepo {
    fn insert_map_thumbnail(&mut self, map_id: RecordId, thumbnail: &ImageData) -> RepoResult<()>;

    fn load_map_thumbnail(&mut self, map_id: RecordId) -> RepoResult<ImageData>;
}
