// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_usecases::avatar::AvatarGenerator;

use super::*;

pub type ResponseBody = AvatarRead;

pub fn handle_request(
    connection: &mut DbConnection,
    session: Session<'_>,
    username: &str,
    avatar_generator: &dyn AvatarGenerator,
) -> Result<ResponseBody> {
    let avatar = connection.transaction::<_, Error, _>(|connection| {
        let requester = session.require_requester(connection)?;
        uc::avatar::randomize(connection, &requester, username, avatar_generator)
            .map_err(Into::into)
    })?;
    Ok(AvatarRead {
        username: username.to_owned(),
        image: (&avatar).into(),
    })
}
