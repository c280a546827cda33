// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::db::map::schema::*;

diesel::table! {
    map_favorite (row_id) {
        row_id -> BigInt,
        row_created_ms -> BigInt,
        map_id -> BigInt,
        user_id -> BigInt,
    }
}

diesel::joinable!(map_favorite -> map (map_id));
