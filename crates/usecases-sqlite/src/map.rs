// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::{MapUid, UserId, image::ImageData};
use citygen_core_api::map::{MapFilter, MapView};
use citygen_usecases::map::{self as uc, NewMap};

use super::*;

pub fn create(connection: &mut DbConnection, owner: UserId, new_map: NewMap) -> Result<MapView> {
    let (created_entity, thumbnail) = uc::create_entity(owner, new_map)?;
    let mut repo = RepoConnection::new(connection);
    uc::store_created_entity(&mut repo, &created_entity, &thumbnail).map_err(Into::into)
}

pub fn load_one(
    connection: &mut DbConnection,
    uid: &MapUid,
    requester: Option<UserId>,
) -> Result<MapView> {
    let mut repo = RepoConnection::new(connection);
    uc::load_one(&mut repo, uid, requester).map_err(Into::into)
}

/// Public maps, excluding those of the requester unless `include_self`.
pub fn load_public(
    connection: &mut DbConnection,
    requester: Option<UserId>,
    include_self: bool,
) -> Result<Vec<MapView>> {
    let mut repo = RepoConnection::new(connection);
    let filter = uc::public_filter(requester, include_self);
    uc::load_many(&mut repo, &filter, requester).map_err(Into::into)
}

/// All maps of the requester including private ones.
pub fn load_owned(connection: &mut DbConnection, owner: UserId) -> Result<Vec<MapView>> {
    let mut repo = RepoConnection::new(connection);
    uc::load_many(&mut repo, &MapFilter::OwnedBy(owner), Some(owner)).map_err(Into::into)
}

pub fn load_thumbnail(
    connection: &mut DbConnection,
    uid: &MapUid,
    requester: Option<UserId>,
) -> Result<ImageData> {
    let mut repo = RepoConnection::new(connection);
    uc::load_thumbnail(&mut repo, uid, requester).map_err(Into::into)
}
