// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::db::map::schema::*;

diesel::table! {
    map_thumbnail (row_id) {
        row_id -> BigInt,
        map_id -> BigInt,
        content_type -> Text,
        data -> Binary,
    }
}

diesel::joinable!(map_thumbnail -> map (map_id));
