// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    pub password: String,
}

pub fn handle_request(
    connection: &mut DbConnection,
    session: Session<'_>,
    request_body: RequestBody,
) -> Result<()> {
    let password = Password::new(request_body.password);
    connection.transaction::<_, Error, _>(|connection| {
        let requester = session.require_requester(connection)?;
        uc::user::reset_password(connection, requester.id(), &password).map_err(Into::into)
    })
}
