// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::{MapEntity, MapUid, image::ImageData};
use citygen_core_api::map::MapFilter;
use citygen_repo::map::*;

use crate::{
    db::{
        map::{models::*, schema::*},
        map_thumbnail::{models::InsertableRecord as InsertableThumbnailRecord, schema::*},
        users::schema::*,
    },
    prelude::*,
};

impl EntityRepo for crate::Connection<'_> {
    fn resolve_map_id(&mut self, uid: &MapUid) -> RepoResult<RecordId> {
        map::table
            .select(map::row_id)
            .filter(map::entity_uid.eq(uid.to_string()))
            .first::<RowId>(self.as_mut())
            .map_err(repo_error)
            .map(Into::into)
    }

    fn load_map_entity(&mut self, id: RecordId) -> RepoResult<(RecordHeader, EntityWithOwner)> {
        let (record, owner_username) = map::table
            .inner_join(users::table)
            .select((map::all_columns, users::username))
            .filter(map::row_id.eq(RowId::from(id)))
            .first::<(QueryableRecord, String)>(self.as_mut())
            .map_err(repo_error)?;
        let (header, entity): (RecordHeader, MapEntity) = record.try_into()?;
        Ok((
            header,
            EntityWithOwner {
                entity,
                owner_username,
            },
        ))
    }

    fn insert_map_entity(
        &mut self,
        created_at: UtcDateTimeMs,
        created_entity: &MapEntity,
    ) -> RepoResult<RecordId> {
        let insertable = InsertableRecord::bind(created_at, created_entity)?;
        diesel::insert_into(map::table)
            .values(&insertable)
            .returning(map::row_id)
            .get_result::<RowId>(self.as_mut())
            .map_err(repo_error)
            .map(Into::into)
    }

    fn load_map_entities(
        &mut self,
        filter: &MapFilter,
        collector: &mut dyn ReservableRecordCollector<Header = RecordHeader, Record = EntityWithOwner>,
    ) -> RepoResult<()> {
        let mut query = map::table
            .inner_join(users::table)
            .select((map::all_columns, users::username))
            .order_by((map::row_updated_ms.desc(), map::row_id.desc()))
            .into_boxed();
        match *filter {
            MapFilter::Public { exclude_owner } => {
                query = query.filter(map::private.eq(false));
                if let Some(owner) = exclude_owner {
                    query = query.filter(map::owner_id.ne(owner.to_inner()));
                }
            }
            MapFilter::OwnedBy(owner) => {
                query = query.filter(map::owner_id.eq(owner.to_inner()));
            }
        }
        let records = query
            .load::<(QueryableRecord, String)>(self.as_mut())
            .map_err(repo_error)?;
        log::debug!("Loaded {} map(s) with filter {filter:?}", records.len());
        collector.reserve(records.len());
        for (record, owner_username) in records {
            let (header, entity): (RecordHeader, MapEntity) = record.try_into()?;
            collector.collect(
                header,
                EntityWithOwner {
                    entity,
                    owner_username,
                },
            );
        }
        Ok(())
    }
}

impl ThumbnailRepo for crate::Connection<'_> {
    fn insert_map_thumbnail(&mut self, map_id: RecordId, thumbnail: &ImageData) -> RepoResult<()> {
        let insertable = InsertableThumbnailRecord::bind(map_id, thumbnail);
        let rows_affected = diesel::insert_into(map_thumbnail::table)
            .values(&insertable)
            .execute(self.as_mut())
            .map_err(repo_error)?;
        debug_assert_eq!(1, rows_affected);
        Ok(())
    }

    fn load_map_thumbnail(&mut self, map_id: RecordId) -> RepoResult<ImageData> {
        let (content_type, data) = map_thumbnail::table
            .select((map_thumbnail::content_type, map_thumbnail::data))
            .filter(map_thumbnail::map_id.eq(RowId::from(map_id)))
            .first::<(String, Vec<u8>)>(self.as_mut())
            .map_err(repo_error)?;
        let content_type = content_type.parse().map_err(anyhow::Error::from)?;
        Ok(ImageData { content_type, data })
    }
}
