// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::db::users::schema::*;

diesel::table! {
    access_token (token) {
        token -> Text,
        user_id -> BigInt,
        created_ms -> BigInt,
    }
}

diesel::joinable!(access_token -> users (user_id));
