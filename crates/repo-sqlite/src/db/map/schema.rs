// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::db::users::schema::*;

diesel::table! {
    map (row_id) {
        row_id -> BigInt,
        row_created_ms -> BigInt,
        row_updated_ms -> BigInt,
        entity_uid -> Text,
        owner_id -> BigInt,
        name -> Text,
        private -> Bool,
        data -> Text,
        last_played_ms -> Nullable<BigInt>,
    }
}

diesel::joinable!(map -> users (owner_id));
