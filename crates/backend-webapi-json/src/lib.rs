// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

#![cfg_attr(not(test), deny(clippy::panic_in_result_fn))]

use std::{result::Result as StdResult, time::Duration};

use data_encoding::BASE64;
use diesel::Connection as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use citygen_core::{image::ImageData, util::clock::UtcDateTimeMs};
use citygen_usecases::user::UserRecord;
use citygen_usecases_sqlite::{self as uc, DbConnection};

pub mod auth;
pub mod map;
pub mod user;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    BadRequest(anyhow::Error),

    #[error(transparent)]
    UseCase(uc::Error),

    #[error(transparent)]
    DatabaseTransaction(#[from] diesel::result::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<uc::Error> for Error {
    fn from(err: uc::Error) -> Self {
        Self::UseCase(err)
    }
}

impl From<citygen_usecases::Error> for Error {
    fn from(err: citygen_usecases::Error) -> Self {
        uc::Error::from(err).into()
    }
}

pub type Result<T> = StdResult<T, Error>;

/// The session as presented by the client.
#[derive(Debug, Clone, Copy)]
pub struct Session<'a> {
    /// Token from the session cookie or the `Authorization` header.
    pub token: Option<&'a str>,

    /// Tokens expire after this duration.
    pub lifetime: Duration,
}

impl Session<'_> {
    fn resolve_requester(&self, connection: &mut DbConnection) -> Result<Option<UserRecord>> {
        uc::session::resolve_requester(connection, self.token, self.lifetime).map_err(Into::into)
    }

    fn require_requester(&self, connection: &mut DbConnection) -> Result<UserRecord> {
        uc::session::require_requester(connection, self.token, self.lifetime).map_err(Into::into)
    }
}

/// A JSON representation of binary image data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRead {
    /// Standard base64 encoding.
    pub data: String,

    pub mimetype: String,
}

impl From<&ImageData> for ImageRead {
    fn from(from: &ImageData) -> Self {
        Self {
            data: BASE64.encode(&from.data),
            mimetype: from.content_type.to_string(),
        }
    }
}

/// Decode standard base64 encoded image data.
pub fn decode_base64_image(encoded: &str, content_type: mime::Mime) -> Result<ImageData> {
    let data = BASE64
        .decode(encoded.trim().as_bytes())
        .map_err(|err| Error::BadRequest(anyhow::anyhow!("invalid base64 data: {err}")))?;
    Ok(ImageData { content_type, data })
}

/// Response bodies may contain either raw bytes or their JSON representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Binary,
    Json,
}

impl ImageFormat {
    /// Select the format from the value of the `Accept` header.
    #[must_use]
    pub fn from_accept(accept: Option<&str>) -> Self {
        match accept {
            Some(accept) if accept.trim() == mime::APPLICATION_JSON.as_ref() => Self::Json,
            _ => Self::Binary,
        }
    }
}

fn export_timestamp(timestamp: UtcDateTimeMs) -> jiff::Timestamp {
    timestamp.to_timestamp()
}

#[cfg(test)]
mod tests;
