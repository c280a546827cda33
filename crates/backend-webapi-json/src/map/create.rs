// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_usecases::map::NewMap;

use super::*;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    pub name: String,

    #[serde(default)]
    pub private: bool,

    /// Standard base64 encoded JPEG image.
    pub thumbnail_base64: String,

    pub data: MapData,
}

pub type ResponseBody = MapRead;

pub fn handle_request(
    connection: &mut DbConnection,
    session: Session<'_>,
    request_body: RequestBody,
) -> Result<ResponseBody> {
    let RequestBody {
        name,
        private,
        thumbnail_base64,
        data,
    } = request_body;
    let thumbnail = decode_base64_image(&thumbnail_base64, mime::IMAGE_JPEG)?;
    let new_map = NewMap {
        name,
        private,
        data,
        thumbnail,
    };
    connection
        .transaction::<_, Error, _>(|connection| {
            let requester = session.require_requester(connection)?;
            uc::map::create(connection, requester.id(), new_map).map_err(Into::into)
        })
        .map(|view| export_map_view(view, LoadScope::Entity))
}
