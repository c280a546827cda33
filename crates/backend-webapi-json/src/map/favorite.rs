// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    pub favorited: bool,
}

/// Set the favorite state of a map for the authenticated requester.
///
/// The visibility check and the modification are executed within
/// a single transaction.
pub fn handle_request(
    connection: &mut DbConnection,
    session: Session<'_>,
    uid: &MapUid,
    request_body: RequestBody,
) -> Result<()> {
    let RequestBody { favorited } = request_body;
    let outcome = connection.transaction::<_, Error, _>(|connection| {
        let requester = session.require_requester(connection)?;
        uc::favorite::toggle(connection, uid, requester.id(), favorited).map_err(Into::into)
    })?;
    log::debug!("Favorite toggle for map {uid}: {outcome:?}");
    Ok(())
}
