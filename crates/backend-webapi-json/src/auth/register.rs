// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_usecases::{avatar::AvatarGenerator, user::NewUser};

use super::*;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub password: String,
}

impl From<RequestBody> for NewUser {
    fn from(from: RequestBody) -> Self {
        let RequestBody {
            username,
            email,
            first_name,
            last_name,
            password,
        } = from;
        Self {
            username,
            email,
            first_name,
            last_name,
            password: Password::new(password),
        }
    }
}

pub type ResponseBody = UserRead;

/// Register a new user and open a session.
///
/// The user, the avatar, and the session are created in a single
/// transaction.
pub fn handle_request(
    connection: &mut DbConnection,
    request_body: RequestBody,
    session_lifetime: Duration,
    avatar_generator: &dyn AvatarGenerator,
) -> Result<Authenticated> {
    let (record, token) = connection.transaction::<_, Error, _>(|connection| {
        let record = uc::user::register(connection, request_body.into(), avatar_generator)?;
        let token = uc::session::open(connection, &record, session_lifetime)?;
        Ok((record, token))
    })?;
    Ok(Authenticated {
        user: export_user(record),
        token,
    })
}
