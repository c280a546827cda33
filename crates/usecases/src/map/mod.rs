// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::{
    Map, MapData, MapEntity, MapUid, UserId, image::ImageData, prelude::*,
    util::clock::UtcDateTimeMs,
};
use citygen_core_api::map::{MapFilter, MapView};
use citygen_repo::{
    favorite::FavoriteRepo,
    map::{EntityRepo, EntityWithOwner, RecordHeader, ThumbnailRepo},
};

use super::*;

#[derive(Debug, Clone)]
pub struct NewMap {
    pub name: String,
    pub private: bool,
    pub data: MapData,
    pub thumbnail: ImageData,
}

#[derive(Debug)]
pub struct ValidatedInput {
    map: Map,
    thumbnail: ImageData,
}

pub fn validate_input(owner: UserId, new_map: NewMap) -> InputResult<ValidatedInput> {
    let NewMap {
        name,
        private,
        data,
        thumbnail,
    } = new_map;
    let map = Map {
        owner,
        name: name.trim().to_owned(),
        private,
        data,
        last_played_at: None,
    };
    if let Err(err) = map.validate() {
        return Err(anyhow::anyhow!("Invalid map input: {err:?}").into());
    }
    if let Err(err) = thumbnail.validate() {
        return Err(anyhow::anyhow!("Invalid thumbnail input: {err:?}").into());
    }
    Ok(ValidatedInput { map, thumbnail })
}

pub fn create_entity(owner: UserId, new_map: NewMap) -> Result<(MapEntity, ImageData)> {
    let ValidatedInput { map, thumbnail } = validate_input(owner, new_map)?;
    let entity = MapEntity::new(MapUid::new(), map);
    Ok((entity, thumbnail))
}

/// Store a new map together with its thumbnail.
///
/// Must be invoked within a single transaction.
pub fn store_created_entity<Repo>(
    repo: &mut Repo,
    entity: &MapEntity,
    thumbnail: &ImageData,
) -> Result<MapView>
where
    Repo: EntityRepo + ThumbnailRepo,
{
    let created_at = UtcDateTimeMs::now();
    let id = repo.insert_map_entity(created_at, entity)?;
    repo.insert_map_thumbnail(id, thumbnail)?;
    log::info!("Created map {uid} with id {id:?}", uid = entity.uid);
    let (header, record) = repo.load_map_entity(id)?;
    Ok(new_view(header, record, false))
}

fn map_not_found(err: RepoError) -> Error {
    match err {
        RepoError::NotFound => Error::MapNotFound,
        err => err.into(),
    }
}

/// The single choke point for accessing an individual map.
///
/// Fails with [`Error::MapNotFound`] if no map exists and with
/// [`Error::MapNotVisible`] if the map is private and the requester
/// is not its owner.
pub fn resolve_visible_map<Repo>(
    repo: &mut Repo,
    uid: &MapUid,
    requester: Option<UserId>,
) -> Result<(RecordHeader, EntityWithOwner)>
where
    Repo: EntityRepo + ?Sized,
{
    let (header, record) = repo.load_map_entity_by_uid(uid).map_err(map_not_found)?;
    if !record.entity.body.is_visible_to(requester) {
        log::debug!("Map {uid} is not visible to requester {requester:?}");
        return Err(Error::MapNotVisible);
    }
    Ok((header, record))
}

fn new_view(header: RecordHeader, record: EntityWithOwner, favorited: bool) -> MapView {
    let RecordHeader {
        id: _,
        created_at,
        updated_at,
    } = header;
    let EntityWithOwner {
        entity,
        owner_username,
    } = record;
    MapView {
        entity,
        created_at,
        updated_at,
        owner_username: Some(owner_username),
        favorited,
    }
}

/// Attach the requester-specific `favorited` flag to each record.
///
/// Uses a single batched query instead of one query per record.
pub fn annotate<Repo>(
    repo: &mut Repo,
    requester: Option<UserId>,
    records: Vec<(RecordHeader, EntityWithOwner)>,
) -> Result<Vec<MapView>>
where
    Repo: FavoriteRepo + ?Sized,
{
    let Some(user_id) = requester else {
        return Ok(records
            .into_iter()
            .map(|(header, record)| new_view(header, record, false))
            .collect());
    };
    let map_ids = records.iter().map(|(header, _)| header.id).collect::<Vec<_>>();
    let favorited_ids = repo.load_favorited_map_ids(user_id, &map_ids)?;
    Ok(records
        .into_iter()
        .map(|(header, record)| {
            let favorited = favorited_ids.contains(&header.id);
            new_view(header, record, favorited)
        })
        .collect())
}

pub fn load_one<Repo>(
    repo: &mut Repo,
    uid: &MapUid,
    requester: Option<UserId>,
) -> Result<MapView>
where
    Repo: EntityRepo + FavoriteRepo,
{
    let record = resolve_visible_map(repo, uid, requester)?;
    let mut views = annotate(repo, requester, vec![record])?;
    debug_assert_eq!(1, views.len());
    views.pop().ok_or(Error::MapNotFound)
}

/// Load all maps matching the filter, most recently updated first.
pub fn load_many<Repo>(
    repo: &mut Repo,
    filter: &MapFilter,
    requester: Option<UserId>,
) -> Result<Vec<MapView>>
where
    Repo: EntityRepo + FavoriteRepo,
{
    let mut records = Vec::new();
    repo.load_map_entities(filter, &mut records)?;
    annotate(repo, requester, records)
}

/// Public maps for the requester.
///
/// Maps of an authenticated requester are excluded unless `include_self`
/// is set.
#[must_use]
pub fn public_filter(requester: Option<UserId>, include_self: bool) -> MapFilter {
    let exclude_owner = if include_self { None } else { requester };
    MapFilter::Public { exclude_owner }
}

pub fn load_thumbnail<Repo>(
    repo: &mut Repo,
    uid: &MapUid,
    requester: Option<UserId>,
) -> Result<ImageData>
where
    Repo: EntityRepo + ThumbnailRepo,
{
    let (header, _) = resolve_visible_map(repo, uid, requester)?;
    repo.load_map_thumbnail(header.id).map_err(Into::into)
}
