// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

pub type ResponseBody = UserReadPublic;

pub fn handle_request(connection: &mut DbConnection, username: &str) -> Result<ResponseBody> {
    let record = connection.transaction::<_, Error, _>(|connection| {
        uc::user::load_by_username(connection, username).map_err(Into::into)
    })?;
    Ok(UserReadPublic {
        username: record.user.username,
    })
}
