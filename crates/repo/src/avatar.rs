// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::{UserId, image::ImageData, util::clock::UtcDateTimeMs};

use crate::prelude::*;

/// Exactly one avatar per user.
pub trait AvatarRepo {
    /// Insert or replace the avatar of a user.
    fn upsert_user_avatar(
        &mut self,
        updated_at: UtcDateTimeMs,
        user_id: UserId,
        avatar: &ImageData,
    ) -> RepoResult<()>;

    fn load_user_avatar(&mut self, user_id: UserId) -> RepoResult<ImageData>;
}
