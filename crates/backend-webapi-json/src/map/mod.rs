// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::{Map, MapData, MapUid};
use citygen_core_api::map::{LoadScope, MapView};

use super::*;
use crate::user::UserReadPublic;

pub mod create;
pub mod favorite;
pub mod load_one;
pub mod load_owned;
pub mod load_public;
pub mod load_thumbnail;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRead {
    pub id: String,
    pub name: String,
    pub private: bool,

    /// Specific for the requester.
    pub favorited: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_played_at: Option<jiff::Timestamp>,

    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserReadPublic>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MapData>,
}

#[must_use]
pub fn export_map_view(view: MapView, scope: LoadScope) -> MapRead {
    let MapView {
        entity,
        created_at,
        updated_at,
        owner_username,
        favorited,
    } = view;
    let Map {
        owner: _,
        name,
        private,
        data,
        last_played_at,
    } = entity.body;
    let data = match scope {
        LoadScope::Entity => None,
        LoadScope::EntityWithData => Some(data),
    };
    MapRead {
        id: entity.uid.to_string(),
        name,
        private,
        favorited,
        last_played_at: last_played_at.map(export_timestamp),
        created_at: export_timestamp(created_at),
        updated_at: export_timestamp(updated_at),
        user: owner_username.map(|username| UserReadPublic { username }),
        data,
    }
}

fn export_map_views(views: Vec<MapView>) -> Vec<MapRead> {
    views
        .into_iter()
        .map(|view| export_map_view(view, LoadScope::Entity))
        .collect()
}

/// Parse the map identifier from a path segment.
pub fn decode_map_uid(encoded: &str) -> Result<MapUid> {
    encoded
        .parse()
        .map_err(|err| Error::BadRequest(anyhow::anyhow!("{err}")))
}
