// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    /// Include the JSON payload of the map.
    #[serde(default)]
    pub include_data: bool,
}

pub type ResponseBody = MapRead;

pub fn handle_request(
    connection: &mut DbConnection,
    session: Session<'_>,
    uid: &MapUid,
    query_params: QueryParams,
) -> Result<ResponseBody> {
    let scope = LoadScope::from_include_data(query_params.include_data);
    connection
        .transaction::<_, Error, _>(|connection| {
            let requester = session.resolve_requester(connection)?.map(|record| record.id());
            uc::map::load_one(connection, uid, requester).map_err(Into::into)
        })
        .map(|view| export_map_view(view, scope))
}
