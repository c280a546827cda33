// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_core::{MapUid, UserId};
use citygen_usecases::favorite::{self as uc, Outcome};

use super::*;

pub fn toggle(
    connection: &mut DbConnection,
    uid: &MapUid,
    user_id: UserId,
    desired: bool,
) -> Result<Outcome> {
    let mut repo = RepoConnection::new(connection);
    uc::toggle_favorite(&mut repo, uid, user_id, desired).map_err(Into::into)
}
