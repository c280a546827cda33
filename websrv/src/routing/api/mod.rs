// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{sync::Arc, time::Duration};

use warp::{
    Filter, Rejection, Reply,
    filters::BoxedFilter,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, SET_COOKIE},
    },
};

use citygen_core::{MapUid, image::ImageData};
use citygen_storage_sqlite::connection::pool::gatekeeper::Gatekeeper as DatabaseConnectionGatekeeper;
use citygen_usecases::avatar::AvatarGenerator;
use citygen_websrv_warp_sqlite::{self as websrv, session::CookieConfig};

use citygen_backend_webapi_json as api;

/// Request bodies with a base64 encoded thumbnail and the map data.
const MAX_JSON_BODY_LENGTH: u64 = 16 * 1024 * 1024;

/// Raw avatar images.
const MAX_IMAGE_BODY_LENGTH: u64 = 4 * 1024 * 1024;

/// Settings shared by all request handlers.
#[derive(Clone)]
pub(crate) struct Context {
    pub(crate) session_lifetime: Duration,
    pub(crate) cookie: CookieConfig,
    pub(crate) avatar_generator: Arc<dyn AvatarGenerator>,
}

impl Context {
    fn session<'a>(&self, token: Option<&'a str>) -> api::Session<'a> {
        api::Session {
            token,
            lifetime: self.session_lifetime,
        }
    }
}

fn path_param_map_uid() -> impl Filter<Extract = (MapUid,), Error = Rejection> + Clone {
    warp::path::param::<String>().and_then(|encoded: String| async move {
        api::map::decode_map_uid(&encoded).map_err(websrv::reject_on_error)
    })
}

fn accept_image_format() -> impl Filter<Extract = (api::ImageFormat,), Error = Rejection> + Clone {
    warp::header::optional::<String>("accept")
        .map(|accept: Option<String>| api::ImageFormat::from_accept(accept.as_deref()))
}

fn image_reply(image: ImageData) -> warp::reply::Response {
    let ImageData { content_type, data } = image;
    warp::reply::with_header(data, CONTENT_TYPE, content_type.to_string()).into_response()
}

fn authenticated_reply(
    authenticated: api::auth::Authenticated,
    status: StatusCode,
    cookie: CookieConfig,
) -> impl Reply {
    let api::auth::Authenticated { user, token } = authenticated;
    warp::reply::with_header(
        warp::reply::with_status(warp::reply::json(&user), status),
        SET_COOKIE,
        websrv::session::set_session_cookie(&token, cookie),
    )
}

#[allow(clippy::too_many_lines)] // One definition per route
pub(crate) fn create_filters(
    shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>,
    context: Context,
) -> BoxedFilter<(impl Reply,)> {
    let shared_connection_gatekeeper =
        warp::any().map(move || Arc::clone(&shared_connection_gatekeeper));
    let context = warp::any().map(move || context.clone());
    let session_token = websrv::session::session_token();

    log::info!("Creating API routes");

    let maps_path = warp::path("maps");
    let auth_path = warp::path("auth");
    let users_path = warp::path("users");

    // Maps
    let maps_load_public = warp::get()
        .and(maps_path)
        .and(warp::path::end())
        .and(warp::query())
        .and(session_token.clone())
        .and(context.clone())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            move |query_params,
                  session_token: Option<String>,
                  context: Context,
                  shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                websrv::spawn_blocking_read_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::map::load_public::handle_request(
                            &mut pooled_connection,
                            context.session(session_token.as_deref()),
                            query_params,
                        )
                    },
                )
                .await
                .map(|response_body| warp::reply::json(&response_body))
            },
        );

    let maps_load_owned = warp::get()
        .and(maps_path)
        .and(warp::path("self"))
        .and(warp::path::end())
        .and(session_token.clone())
        .and(context.clone())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            move |session_token: Option<String>,
                  context: Context,
                  shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                websrv::spawn_blocking_read_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::map::load_owned::handle_request(
                            &mut pooled_connection,
                            context.session(session_token.as_deref()),
                        )
                    },
                )
                .await
                .map(|response_body| warp::reply::json(&response_body))
            },
        );

    let maps_create = warp::post()
        .and(maps_path)
        .and(warp::path::end())
        .and(warp::body::content_length_limit(MAX_JSON_BODY_LENGTH))
        .and(warp::body::json())
        .and(session_token.clone())
        .and(context.clone())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            move |request_body,
                  session_token: Option<String>,
                  context: Context,
                  shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                websrv::spawn_blocking_write_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::map::create::handle_request(
                            &mut pooled_connection,
                            context.session(session_token.as_deref()),
                            request_body,
                        )
                    },
                )
                .await
                .map(|response_body| {
                    warp::reply::with_status(
                        warp::reply::json(&response_body),
                        StatusCode::CREATED,
                    )
                })
            },
        );

    let maps_load_one = warp::get()
        .and(maps_path)
        .and(path_param_map_uid())
        .and(warp::path::end())
        .and(warp::query())
        .and(session_token.clone())
        .and(context.clone())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            move |uid: MapUid,
                  query_params,
                  session_token: Option<String>,
                  context: Context,
                  shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                websrv::spawn_blocking_read_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::map::load_one::handle_request(
                            &mut pooled_connection,
                            context.session(session_token.as_deref()),
                            &uid,
                            query_params,
                        )
                    },
                )
                .await
                .map(|response_body| warp::reply::json(&response_body))
            },
        );

    let maps_load_thumbnail = warp::get()
        .and(maps_path)
        .and(path_param_map_uid())
        .and(warp::path("thumbnail"))
        .and(warp::path::end())
        .and(accept_image_format())
        .and(session_token.clone())
        .and(context.clone())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            move |uid: MapUid,
                  format,
                  session_token: Option<String>,
                  context: Context,
                  shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                websrv::spawn_blocking_read_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::map::load_thumbnail::handle_request(
                            &mut pooled_connection,
                            context.session(session_token.as_deref()),
                            &uid,
                            format,
                        )
                    },
                )
                .await
                .map(|response_body| match response_body {
                    api::map::load_thumbnail::ResponseBody::Binary(image) => image_reply(image),
                    api::map::load_thumbnail::ResponseBody::Json(thumbnail) => {
                        warp::reply::json(&thumbnail).into_response()
                    }
                })
            },
        );

    let maps_favorite = warp::post()
        .and(maps_path)
        .and(path_param_map_uid())
        .and(warp::path("favorite"))
        .and(warp::path::end())
        .and(warp::body::content_length_limit(MAX_JSON_BODY_LENGTH))
        .and(warp::body::json())
        .and(session_token.clone())
        .and(context.clone())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            move |uid: MapUid,
                  request_body,
                  session_token: Option<String>,
                  context: Context,
                  shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                websrv::spawn_blocking_write_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::map::favorite::handle_request(
                            &mut pooled_connection,
                            context.session(session_token.as_deref()),
                            &uid,
                            request_body,
                        )
                    },
                )
                .await
                .map(|()| StatusCode::NO_CONTENT)
            },
        );

    let maps_filters = maps_load_owned
        .or(maps_load_public)
        .or(maps_create)
        .or(maps_load_thumbnail)
        .or(maps_favorite)
        .or(maps_load_one);

    // Authentication
    let auth_register = warp::post()
        .and(auth_path)
        .and(warp::path("register"))
        .and(warp::path::end())
        .and(warp::body::content_length_limit(MAX_JSON_BODY_LENGTH))
        .and(warp::body::json())
        .and(context.clone())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            move |request_body,
                  context: Context,
                  shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                let Context {
                    session_lifetime,
                    cookie,
                    avatar_generator,
                } = context;
                websrv::spawn_blocking_write_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::auth::register::handle_request(
                            &mut pooled_connection,
                            request_body,
                            session_lifetime,
                            avatar_generator.as_ref(),
                        )
                    },
                )
                .await
                .map(|authenticated| {
                    authenticated_reply(authenticated, StatusCode::CREATED, cookie)
                })
            },
        );

    let auth_login = warp::post()
        .and(auth_path)
        .and(warp::path("login"))
        .and(warp::path::end())
        .and(warp::body::content_length_limit(MAX_JSON_BODY_LENGTH))
        .and(warp::body::json())
        .and(context.clone())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            move |request_body,
                  context: Context,
                  shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                let Context {
                    session_lifetime,
                    cookie,
                    ..
                } = context;
                websrv::spawn_blocking_write_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::auth::login::handle_request(
                            &mut pooled_connection,
                            request_body,
                            session_lifetime,
                        )
                    },
                )
                .await
                .map(|authenticated| authenticated_reply(authenticated, StatusCode::OK, cookie))
            },
        );

    let auth_logout = warp::post()
        .and(auth_path)
        .and(warp::path("logout"))
        .and(warp::path::end())
        .and(session_token.clone())
        .and(context.clone())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            move |session_token: Option<String>,
                  context: Context,
                  shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                let cookie = context.cookie;
                websrv::spawn_blocking_write_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::auth::logout::handle_request(
                            &mut pooled_connection,
                            context.session(session_token.as_deref()),
                        )
                    },
                )
                .await
                .map(|()| {
                    warp::reply::with_header(
                        StatusCode::NO_CONTENT,
                        SET_COOKIE,
                        websrv::session::clear_session_cookie(cookie),
                    )
                })
            },
        );

    let auth_reset_password = warp::post()
        .and(auth_path)
        .and(warp::path("reset-password"))
        .and(warp::path::end())
        .and(warp::body::content_length_limit(MAX_JSON_BODY_LENGTH))
        .and(warp::body::json())
        .and(session_token.clone())
        .and(context.clone())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            move |request_body,
                  session_token: Option<String>,
                  context: Context,
                  shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                websrv::spawn_blocking_write_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::auth::reset_password::handle_request(
                            &mut pooled_connection,
                            context.session(session_token.as_deref()),
                            request_body,
                        )
                    },
                )
                .await
                .map(|()| StatusCode::NO_CONTENT)
            },
        );

    let auth_filters = auth_register
        .or(auth_login)
        .or(auth_logout)
        .or(auth_reset_password);

    // Users
    let users_load_self = warp::get()
        .and(users_path)
        .and(warp::path("self"))
        .and(warp::path::end())
        .and(session_token.clone())
        .and(context.clone())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            move |session_token: Option<String>,
                  context: Context,
                  shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                websrv::spawn_blocking_read_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::user::load_self::handle_request(
                            &mut pooled_connection,
                            context.session(session_token.as_deref()),
                        )
                    },
                )
                .await
                .map(|response_body| warp::reply::json(&response_body))
            },
        );

    let users_load_public = warp::get()
        .and(users_path)
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            move |username: String,
                  shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                websrv::spawn_blocking_read_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::user::load_public::handle_request(&mut pooled_connection, &username)
                    },
                )
                .await
                .map(|response_body| warp::reply::json(&response_body))
            },
        );

    let users_load_avatar = warp::get()
        .and(users_path)
        .and(warp::path::param::<String>())
        .and(warp::path("avatar"))
        .and(warp::path::end())
        .and(accept_image_format())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            move |username: String,
                  format,
                  shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                websrv::spawn_blocking_read_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::user::load_avatar::handle_request(
                            &mut pooled_connection,
                            &username,
                            format,
                        )
                    },
                )
                .await
                .map(|response_body| match response_body {
                    api::user::AvatarResponse::Binary(image) => image_reply(image),
                    api::user::AvatarResponse::Json(avatar) => {
                        warp::reply::json(&avatar).into_response()
                    }
                })
            },
        );

    let users_replace_avatar = warp::put()
        .and(users_path)
        .and(warp::path::param::<String>())
        .and(warp::path("avatar"))
        .and(warp::path::end())
        .and(warp::header::<mime::Mime>("content-type"))
        .and(warp::body::content_length_limit(MAX_IMAGE_BODY_LENGTH))
        .and(warp::body::bytes())
        .and(session_token.clone())
        .and(context.clone())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            move |username: String,
                  content_type: mime::Mime,
                  body: warp::hyper::body::Bytes,
                  session_token: Option<String>,
                  context: Context,
                  shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                let request_body = ImageData {
                    content_type,
                    data: body.to_vec(),
                };
                websrv::spawn_blocking_write_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::user::replace_avatar::handle_request(
                            &mut pooled_connection,
                            context.session(session_token.as_deref()),
                            &username,
                            request_body,
                        )
                    },
                )
                .await
                .map(|response_body| {
                    warp::reply::with_status(
                        warp::reply::json(&response_body),
                        StatusCode::CREATED,
                    )
                })
            },
        );

    let users_randomize_avatar = warp::put()
        .and(users_path)
        .and(warp::path::param::<String>())
        .and(warp::path("avatar"))
        .and(warp::path("random"))
        .and(warp::path::end())
        .and(session_token)
        .and(context)
        .and(shared_connection_gatekeeper)
        .and_then(
            move |username: String,
                  session_token: Option<String>,
                  context: Context,
                  shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                websrv::spawn_blocking_write_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::user::randomize_avatar::handle_request(
                            &mut pooled_connection,
                            context.session(session_token.as_deref()),
                            &username,
                            context.avatar_generator.as_ref(),
                        )
                    },
                )
                .await
                .map(|response_body| {
                    warp::reply::with_status(
                        warp::reply::json(&response_body),
                        StatusCode::CREATED,
                    )
                })
            },
        );

    let users_filters = users_load_self
        .or(users_load_public)
        .or(users_load_avatar)
        .or(users_replace_avatar)
        .or(users_randomize_avatar);

    maps_filters.or(auth_filters).or(users_filters).boxed()
}
