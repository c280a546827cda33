// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

/// Close the current session.
///
/// Fails if the requester is not authenticated.
pub fn handle_request(connection: &mut DbConnection, session: Session<'_>) -> Result<()> {
    connection.transaction::<_, Error, _>(|connection| {
        session.require_requester(connection)?;
        let Some(token) = session.token else {
            return Ok(());
        };
        uc::session::logout(connection, token).map_err(Into::into)
    })
}
