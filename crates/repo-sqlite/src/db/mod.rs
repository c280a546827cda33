// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

pub(crate) mod access_token;
pub(crate) mod map;
pub(crate) mod map_favorite;
pub(crate) mod map_thumbnail;
pub(crate) mod user_avatar;
pub(crate) mod users;

mod join {
    use crate::db::{
        access_token::schema::*, map::schema::*, map_favorite::schema::*,
        map_thumbnail::schema::*, user_avatar::schema::*, users::schema::*,
    };

    diesel::allow_tables_to_appear_in_same_query!(
        access_token,
        map,
        map_favorite,
        map_thumbnail,
        user_avatar,
        users,
    );
}
