// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{convert::Infallible, error::Error as StdError, result::Result as StdResult};

use serde::Serialize;
use thiserror::Error;
use warp::{
    Reply,
    body::BodyDeserializeError,
    http::StatusCode,
    reject::{
        self, InvalidHeader, InvalidQuery, MethodNotAllowed, MissingHeader, PayloadTooLarge,
        Reject, Rejection, UnsupportedMediaType,
    },
};

use citygen_backend_webapi_json as api;
use citygen_repo::prelude::RepoError;
use citygen_storage_sqlite::{
    self as db,
    connection::pool::{PooledConnection, gatekeeper::Gatekeeper as DatabaseConnectionGatekeeper},
};
use citygen_usecases_sqlite as uc;

pub mod session;

/// Machine-readable codes that accompany error responses.
pub mod detail {
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const CONFLICT: &str = "CONFLICT";
    pub const MAP_DOES_NOT_EXIST: &str = "MAP__DOES_NOT_EXIST";
    pub const MAP_NOT_PUBLIC: &str = "MAP__NOT_PUBLIC";
    pub const USER_DOES_NOT_EXIST: &str = "USER__DOES_NOT_EXIST";
    pub const USER_USERNAME_ALREADY_EXISTS: &str = "USER__USERNAME_ALREADY_EXISTS";
    pub const USER_EMAIL_ALREADY_EXISTS: &str = "USER__EMAIL_ALREADY_EXISTS";
    pub const USER_PASSWORD_TOO_SHORT: &str = "USER__PASSWORD_TOO_SHORT";
    pub const USER_INVALID_CREDENTIALS: &str = "USER__INVALID_CREDENTIALS";
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    BadRequest(anyhow::Error),

    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("service unavailable")]
    ServiceUnavailable,

    #[error("timeout: {reason}")]
    Timeout { reason: String },

    /// A domain-specific failure that is reported with a detail code.
    #[error("{message}")]
    Rejected {
        status: StatusCode,
        detail: &'static str,
        message: String,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    fn rejected(status: StatusCode, detail: &'static str, err: &uc::Error) -> Self {
        Self::Rejected {
            status,
            detail,
            message: err.to_string(),
        }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            Self::Rejected { status, .. } => *status,
            Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn detail(&self) -> Option<&'static str> {
        match self {
            Self::BadRequest(_) => Some(detail::BAD_REQUEST),
            Self::Unauthorized => Some(detail::UNAUTHORIZED),
            Self::Forbidden(_) => Some(detail::FORBIDDEN),
            Self::Conflict => Some(detail::CONFLICT),
            Self::Rejected { detail, .. } => Some(*detail),
            Self::NotFound | Self::ServiceUnavailable | Self::Timeout { .. } | Self::Other(_) => {
                None
            }
        }
    }
}

impl From<api::Error> for Error {
    fn from(err: api::Error) -> Self {
        use api::Error as ApiError;
        match err {
            ApiError::BadRequest(err) => Self::BadRequest(err),
            ApiError::UseCase(err) => err.into(),
            ApiError::DatabaseTransaction(err) => Self::Other(err.into()),
            ApiError::Other(err) => Self::Other(err),
        }
    }
}

impl From<uc::Error> for Error {
    fn from(err: uc::Error) -> Self {
        use uc::Error as UcError;
        match err {
            UcError::Input(err) => Self::BadRequest(err),
            UcError::MapNotFound => {
                Self::rejected(StatusCode::NOT_FOUND, detail::MAP_DOES_NOT_EXIST, &err)
            }
            UcError::MapNotVisible => {
                Self::rejected(StatusCode::FORBIDDEN, detail::MAP_NOT_PUBLIC, &err)
            }
            UcError::UserNotFound => {
                Self::rejected(StatusCode::NOT_FOUND, detail::USER_DOES_NOT_EXIST, &err)
            }
            UcError::UsernameAlreadyExists => Self::rejected(
                StatusCode::BAD_REQUEST,
                detail::USER_USERNAME_ALREADY_EXISTS,
                &err,
            ),
            UcError::EmailAlreadyExists => Self::rejected(
                StatusCode::BAD_REQUEST,
                detail::USER_EMAIL_ALREADY_EXISTS,
                &err,
            ),
            UcError::PasswordTooShort => Self::rejected(
                StatusCode::BAD_REQUEST,
                detail::USER_PASSWORD_TOO_SHORT,
                &err,
            ),
            UcError::InvalidCredentials => Self::rejected(
                StatusCode::UNAUTHORIZED,
                detail::USER_INVALID_CREDENTIALS,
                &err,
            ),
            UcError::Unauthorized => Self::Unauthorized,
            UcError::Forbidden(reason) => Self::Forbidden(reason),
            UcError::Storage(err) => err.into(),
            UcError::Repository(err) => match err {
                RepoError::NotFound => Self::NotFound,
                RepoError::Conflict => Self::Conflict,
                RepoError::Aborted => Self::ServiceUnavailable,
                RepoError::Other(err) => Self::Other(err),
            },
            UcError::DatabaseMigration(err) | UcError::Other(err) => Self::Other(err),
        }
    }
}

impl From<db::Error> for Error {
    fn from(err: db::Error) -> Self {
        use db::Error as DbError;
        match err {
            DbError::Database(err) => Self::Other(err.into()),
            DbError::DatabaseConnection(err) => Self::Other(err.into()),
            DbError::DatabaseConnectionPool(err) => Self::Other(err.into()),
            DbError::TaskScheduling(err) => Self::Other(err.into()),
            DbError::TaskTimeout { reason } => Self::Timeout { reason },
            DbError::Other(err) => Self::Other(err),
        }
    }
}

pub type Result<T> = StdResult<T, Error>;

impl Reject for Error {}

pub fn reject_on_error(err: impl Into<Error>) -> Rejection {
    reject::custom(err.into())
}

pub fn after_blocking_task_finished<T, E1, E2>(
    res: StdResult<StdResult<T, E1>, E2>,
) -> StdResult<T, Rejection>
where
    E1: Into<Error>,
    E2: Into<Error>,
{
    res.map_err(reject_on_error)
        .and_then(|res| res.map_err(reject_on_error))
}

pub async fn spawn_blocking_write_task<H, T, E>(
    gatekeeper: &DatabaseConnectionGatekeeper,
    handler: H,
) -> StdResult<T, Rejection>
where
    H: FnOnce(PooledConnection) -> StdResult<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<Error> + Send + 'static,
{
    after_blocking_task_finished(gatekeeper.spawn_blocking_write_task(handler).await)
}

pub async fn spawn_blocking_read_task<H, T, E>(
    gatekeeper: &DatabaseConnectionGatekeeper,
    handler: H,
) -> StdResult<T, Rejection>
where
    H: FnOnce(PooledConnection) -> StdResult<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<Error> + Send + 'static,
{
    after_blocking_task_finished(gatekeeper.spawn_blocking_read_task(handler).await)
}

/// An API error serializable to JSON.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponseBody {
    code: u16,
    detail: Option<&'static str>,
    message: String,
}

fn status_code_to_string(code: StatusCode) -> String {
    code.canonical_reason()
        .unwrap_or_else(|| code.as_str())
        .to_string()
}

fn source_message(err: &dyn StdError) -> String {
    err.source()
        .map_or_else(|| err.to_string(), ToString::to_string)
}

#[allow(clippy::unused_async)] // async needed for warp filter
pub async fn handle_rejection(reject: Rejection) -> StdResult<impl Reply, Infallible> {
    let code;
    let detail;
    let message;

    if reject.is_not_found() {
        code = StatusCode::NOT_FOUND;
        detail = None;
        message = status_code_to_string(code);
    } else if let Some(err) = reject.find::<Error>() {
        code = err.status_code();
        detail = err.detail();
        message = match err {
            Error::NotFound
            | Error::Conflict
            | Error::Unauthorized
            | Error::ServiceUnavailable => status_code_to_string(code),
            err => err.to_string(),
        };
        if code.is_server_error() {
            log::warn!("Request failed: {err}");
        }
    } else if let Some(err) = reject.find::<MissingHeader>() {
        code = StatusCode::BAD_REQUEST;
        detail = Some(detail::BAD_REQUEST);
        message = err.to_string();
    } else if let Some(err) = reject.find::<InvalidHeader>() {
        code = StatusCode::BAD_REQUEST;
        detail = Some(detail::BAD_REQUEST);
        message = source_message(err);
    } else if let Some(err) = reject.find::<InvalidQuery>() {
        code = StatusCode::BAD_REQUEST;
        detail = Some(detail::BAD_REQUEST);
        message = source_message(err);
    } else if let Some(err) = reject.find::<BodyDeserializeError>() {
        code = StatusCode::BAD_REQUEST;
        detail = Some(detail::BAD_REQUEST);
        message = source_message(err);
    } else if let Some(err) = reject.find::<UnsupportedMediaType>() {
        code = StatusCode::UNSUPPORTED_MEDIA_TYPE;
        detail = None;
        message = err.to_string();
    } else if let Some(err) = reject.find::<PayloadTooLarge>() {
        code = StatusCode::PAYLOAD_TOO_LARGE;
        detail = None;
        message = err.to_string();
    } else if let Some(err) = reject.find::<MethodNotAllowed>() {
        // This must have the least priority, because most rejections
        // contain a MethodNotAllowed element!
        code = StatusCode::METHOD_NOT_ALLOWED;
        detail = None;
        message = err.to_string();
    } else {
        log::error!("Unhandled rejection {reject:?}");
        code = StatusCode::INTERNAL_SERVER_ERROR;
        detail = None;
        message = format!("{reject:?}");
    }

    let json_reply = warp::reply::json(&ErrorResponseBody {
        code: code.as_u16(),
        detail,
        message,
    });

    Ok(warp::reply::with_status(json_reply, code))
}
