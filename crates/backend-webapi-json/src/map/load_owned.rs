// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

pub type ResponseBody = Vec<MapRead>;

pub fn handle_request(connection: &mut DbConnection, session: Session<'_>) -> Result<ResponseBody> {
    connection
        .transaction::<_, Error, _>(|connection| {
            let requester = session.require_requester(connection)?;
            uc::map::load_owned(connection, requester.id()).map_err(Into::into)
        })
        .map(export_map_views)
}
