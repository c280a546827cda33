// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailRead {
    pub map_id: String,

    #[serde(flatten)]
    pub image: ImageRead,
}

/// Either the raw image or its JSON representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    Binary(ImageData),
    Json(ThumbnailRead),
}

pub fn handle_request(
    connection: &mut DbConnection,
    session: Session<'_>,
    uid: &MapUid,
    format: ImageFormat,
) -> Result<ResponseBody> {
    let thumbnail = connection.transaction::<_, Error, _>(|connection| {
        let requester = session.resolve_requester(connection)?.map(|record| record.id());
        uc::map::load_thumbnail(connection, uid, requester).map_err(Into::into)
    })?;
    let response_body = match format {
        ImageFormat::Binary => ResponseBody::Binary(thumbnail),
        ImageFormat::Json => ResponseBody::Json(ThumbnailRead {
            map_id: uid.to_string(),
            image: (&thumbnail).into(),
        }),
    };
    Ok(response_body)
}
