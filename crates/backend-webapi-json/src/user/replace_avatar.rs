// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

/// The raw image bytes together with the `Content-Type` header.
pub type RequestBody = ImageData;

pub type ResponseBody = AvatarRead;

pub fn handle_request(
    connection: &mut DbConnection,
    session: Session<'_>,
    username: &str,
    request_body: RequestBody,
) -> Result<ResponseBody> {
    let avatar = connection.transaction::<_, Error, _>(|connection| {
        let requester = session.require_requester(connection)?;
        uc::avatar::replace(connection, &requester, username, request_body).map_err(Into::into)
    })?;
    Ok(AvatarRead {
        username: username.to_owned(),
        image: (&avatar).into(),
    })
}
