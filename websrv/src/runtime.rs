// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{sync::Arc, time::Duration};

use jiff::Timestamp;
use tokio::{sync::mpsc, time::sleep};
use warp::{Filter as _, http::StatusCode};

use citygen_storage_sqlite::connection::pool::{
    create_connection_pool, gatekeeper::Gatekeeper as DatabaseConnectionGatekeeper,
    get_pooled_connection,
};
use citygen_usecases::avatar::PixelAvatarGenerator;
use citygen_usecases_sqlite as uc;
use citygen_websrv_warp_sqlite::handle_rejection;

use crate::{
    config::{Config, DatabaseConfig, is_valid_origin},
    routing,
};

const WEB_SERVER_LISTENING_DELAY: Duration = Duration::from_millis(250);

const CORS_ALLOWED_METHODS: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];

const CORS_ALLOWED_HEADERS: [&str; 3] = ["accept", "authorization", "content-type"];

pub(crate) fn provision_database(config: &DatabaseConfig) -> anyhow::Result<DatabaseConnectionGatekeeper> {
    log::info!(
        "Commissioning SQLite database: {storage}",
        storage = config.connection.storage,
    );

    // The maximum size of the pool defines the maximum number of
    // allowed readers while writers require exclusive access.
    let pool_max_size = config.connection.pool.max_size;
    log::info!("Creating connection pool of max. size {pool_max_size}");
    let connection_pool = create_connection_pool(&config.connection.storage, pool_max_size)?;

    log::info!("Initializing database");
    uc::database::initialize(
        &mut *get_pooled_connection(&connection_pool)?,
        config.migrate_schema_on_startup,
    )?;

    Ok(DatabaseConnectionGatekeeper::new(
        connection_pool,
        config.connection.pool.gatekeeper,
    ))
}

async fn shutdown_signal(mut server_shutdown_rx: mpsc::UnboundedReceiver<()>) {
    tokio::select! {
        Some(()) = server_shutdown_rx.recv() => {
            log::info!("Shutdown requested");
        }
        Ok(()) = tokio::signal::ctrl_c() => {
            log::info!("Interrupted");
        }
        else => (),
    }
}

pub(crate) async fn run(config: Config) -> anyhow::Result<()> {
    let launched_at = Timestamp::now();

    log::info!("Launching");

    let shared_connection_gatekeeper = Arc::new(provision_database(&config.database)?);

    let about_json = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "version": env!("CARGO_PKG_VERSION"),
        "instance": {
            "launchedAt": launched_at,
            "config": config,
        },
    });

    log::info!("Creating service routes");

    // POST /shutdown
    let (server_shutdown_tx, server_shutdown_rx) = mpsc::unbounded_channel::<()>();
    let shutdown_filter = warp::post()
        .and(warp::path("shutdown"))
        .and(warp::path::end())
        .map(move || {
            server_shutdown_tx
                .send(())
                .map(|()| StatusCode::ACCEPTED)
                .unwrap_or_else(|_| {
                    log::warn!("Failed to forward shutdown request");
                    StatusCode::BAD_GATEWAY
                })
        });

    // GET /about
    let about_filter = warp::get()
        .and(warp::path("about"))
        .and(warp::path::end())
        .map(move || warp::reply::json(&about_json));

    let api_filters = warp::path("api")
        .and(warp::path("v1"))
        .and(routing::api::create_filters(
            Arc::clone(&shared_connection_gatekeeper),
            routing::api::Context {
                session_lifetime: config.auth.session_lifetime(),
                cookie: config.auth.cookie(),
                avatar_generator: Arc::new(PixelAvatarGenerator),
            },
        ));

    let allowed_origins = config
        .cors
        .allowed_origins
        .iter()
        .map(String::as_str)
        .filter(|origin| {
            let valid = is_valid_origin(origin);
            if !valid {
                log::warn!("Ignoring invalid CORS origin: {origin}");
            }
            valid
        });
    let cors = warp::cors()
        .allow_origins(allowed_origins)
        .allow_credentials(true)
        .allow_methods(CORS_ALLOWED_METHODS)
        .allow_headers(CORS_ALLOWED_HEADERS);

    let all_filters = api_filters.or(shutdown_filter).or(about_filter);

    log::info!("Initializing server");

    let server = warp::serve(
        all_filters
            .recover(handle_rejection)
            .with(cors)
            .with(warp::log(env!("CARGO_PKG_NAME"))),
    );

    log::info!("Starting");

    let (socket_addr, server_listener) = server.try_bind_with_graceful_shutdown(
        config.network.endpoint.socket_addr(),
        shutdown_signal(server_shutdown_rx),
    )?;

    // Warp does not signal when the server has actually started listening.
    sleep(WEB_SERVER_LISTENING_DELAY).await;

    log::info!("Listening on {socket_addr}");

    server_listener.await;

    log::info!("Stopping");

    shared_connection_gatekeeper.decommission();

    log::info!("Terminating");

    Ok(())
}
