// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::User;

use super::*;

pub mod load_avatar;
pub mod load_public;
pub mod load_self;
pub mod randomize_avatar;
pub mod replace_avatar;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReadPublic {
    pub username: String,
}

/// The full user record, only disclosed to the user itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRead {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_superuser: bool,
    pub created_at: jiff::Timestamp,
}

#[must_use]
pub fn export_user(record: UserRecord) -> UserRead {
    let UserRecord { header, user } = record;
    let User {
        username,
        email,
        first_name,
        last_name,
        is_active,
        is_verified,
        is_superuser,
    } = user;
    UserRead {
        id: header.id.into(),
        username,
        first_name,
        last_name,
        email,
        is_active,
        is_verified,
        is_superuser,
        created_at: export_timestamp(header.created_at),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarRead {
    pub username: String,

    #[serde(flatten)]
    pub image: ImageRead,
}

/// Either the raw image or its JSON representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarResponse {
    Binary(ImageData),
    Json(AvatarRead),
}
