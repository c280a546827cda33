// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    pub email: String,
    pub password: String,
}

pub type ResponseBody = UserRead;

pub fn handle_request(
    connection: &mut DbConnection,
    request_body: RequestBody,
    session_lifetime: Duration,
) -> Result<Authenticated> {
    let RequestBody { email, password } = request_body;
    let password = Password::new(password);
    let (record, token) = connection.transaction::<_, Error, _>(|connection| {
        uc::session::login(connection, &email, &password, session_lifetime).map_err(Into::into)
    })?;
    Ok(Authenticated {
        user: export_user(record),
        token,
    })
}
