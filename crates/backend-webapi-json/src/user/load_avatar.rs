// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

pub type ResponseBody = AvatarResponse;

pub fn handle_request(
    connection: &mut DbConnection,
    username: &str,
    format: ImageFormat,
) -> Result<ResponseBody> {
    let avatar = connection.transaction::<_, Error, _>(|connection| {
        uc::avatar::load(connection, username).map_err(Into::into)
    })?;
    let response = match format {
        ImageFormat::Binary => AvatarResponse::Binary(avatar),
        ImageFormat::Json => AvatarResponse::Json(AvatarRead {
            username: username.to_owned(),
            image: (&avatar).into(),
        }),
    };
    Ok(response)
}
