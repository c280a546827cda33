// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    /// Include the public maps of the requester.
    #[serde(default)]
    pub include_self: bool,
}

pub type ResponseBody = Vec<MapRead>;

pub fn handle_request(
    connection: &mut DbConnection,
    session: Session<'_>,
    query_params: QueryParams,
) -> Result<ResponseBody> {
    let QueryParams { include_self } = query_params;
    connection
        .transaction::<_, Error, _>(|connection| {
            let requester = session.resolve_requester(connection)?.map(|record| record.id());
            uc::map::load_public(connection, requester, include_self).map_err(Into::into)
        })
        .map(export_map_views)
}
