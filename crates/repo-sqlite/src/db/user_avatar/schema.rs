// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::db::users::schema::*;

diesel::table! {
    user_avatar (row_id) {
        row_id -> BigInt,
        row_created_ms -> BigInt,
        row_updated_ms -> BigInt,
        user_id -> BigInt,
        content_type -> Text,
        data -> Binary,
    }
}

diesel::joinable!(user_avatar -> users (user_id));
