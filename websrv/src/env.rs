// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{env, net::IpAddr, num::NonZeroU32, str::ParseBoolError};

use tracing::{Subscriber, subscriber::set_global_default};
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

use citygen_storage_sqlite::connection::Storage;

use crate::config::{Config, is_valid_origin};

pub(crate) fn init_environment() {
    if let Ok(path) = dotenvy::dotenv() {
        // Print to stderr because logging has not been initialized yet
        eprintln!("Loaded environment from dotenv file {}", path.display());
    }
}

const TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT: &str = "info";

fn create_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|err| {
        if let Some(rust_log_from_env) = env::var("RUST_LOG").ok().filter(|var| !var.is_empty()) {
            eprintln!("Failed to parse RUST_LOG environment variable '{rust_log_from_env}': {err}");
        }
        EnvFilter::new(TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT)
    })
}

fn create_tracing_subscriber() -> impl Subscriber {
    tracing_subscriber::fmt()
        .with_env_filter(create_env_filter())
        .with_writer(std::io::stderr)
        .finish()
}

pub(crate) fn init_tracing_and_logging() -> anyhow::Result<()> {
    // Capture and redirect all log messages as tracing events
    LogTracer::init()?;

    set_global_default(create_tracing_subscriber())?;

    Ok(())
}

const DEFAULT_CONFIG_ENV: &str = "DEFAULT_CONFIG";

const ENDPOINT_IP_ENV: &str = "ENDPOINT_IP";

const ENDPOINT_PORT_ENV: &str = "ENDPOINT_PORT";

const DATABASE_URL_ENV: &str = "DATABASE_URL";

const DATABASE_CONNECTION_POOL_SIZE_ENV: &str = "DATABASE_CONNECTION_POOL_SIZE";

const DATABASE_MIGRATE_SCHEMA_ON_STARTUP_ENV: &str = "DATABASE_MIGRATE_SCHEMA_ON_STARTUP";

const SESSION_LIFETIME_SECONDS_ENV: &str = "SESSION_LIFETIME_SECONDS";

const COOKIE_SECURE_ENV: &str = "COOKIE_SECURE";

const CORS_ALLOWED_ORIGINS_ENV: &str = "CORS_ALLOWED_ORIGINS";

pub(crate) fn parse_bool_var(var: &str) -> Result<bool, ParseBoolError> {
    var.trim().to_lowercase().parse::<bool>().or_else(|err| {
        match var.trim().parse::<u8>() {
            Ok(0) => Ok(false),
            Ok(1) => Ok(true),
            _ => Err(err),
        }
    })
}

/// Look up a non-empty variable.
fn lookup_var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    let var = lookup(key)?;
    let var = var.trim();
    if var.is_empty() {
        return None;
    }
    log::debug!("{key} = {var}");
    Some(var.to_owned())
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let var = lookup_var(lookup, key)?;
    var.parse()
        .map_err(|err| {
            log::warn!("Failed to parse {key} = {var}: {err}");
        })
        .ok()
}

fn parse_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    let var = lookup_var(lookup, key)?;
    parse_bool_var(&var)
        .map_err(|err| {
            log::warn!("Failed to parse {key} = {var}: {err}");
        })
        .ok()
}

pub(crate) fn parse_default_config() -> bool {
    parse_bool(&|key| env::var(key).ok(), DEFAULT_CONFIG_ENV).unwrap_or(false)
}

/// Override the configuration with environment variables.
pub(crate) fn parse_config_into(config: &mut Config) {
    patch_config(config, |key| env::var(key).ok());
}

/// Override the configuration with the given variables.
///
/// Missing, empty, or unparsable variables leave the corresponding
/// configuration value untouched.
pub(crate) fn patch_config(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(ip_addr) = parse_var::<IpAddr>(&lookup, ENDPOINT_IP_ENV) {
        config.network.endpoint.ip_addr = ip_addr;
    }
    if let Some(port) = parse_var::<u16>(&lookup, ENDPOINT_PORT_ENV) {
        config.network.endpoint.port = port;
    }
    if let Some(url) = lookup_var(&lookup, DATABASE_URL_ENV) {
        config.database.connection.storage = Storage::from_url(&url);
    }
    if let Some(max_size) = parse_var::<u32>(&lookup, DATABASE_CONNECTION_POOL_SIZE_ENV) {
        config.database.connection.pool.max_size = NonZeroU32::new(max_size).unwrap_or_else(|| {
            log::warn!("Invalid {DATABASE_CONNECTION_POOL_SIZE_ENV} = {max_size}");
            NonZeroU32::MIN
        });
    }
    if let Some(migrate) = parse_bool(&lookup, DATABASE_MIGRATE_SCHEMA_ON_STARTUP_ENV) {
        config.database.migrate_schema_on_startup = migrate;
    }
    if let Some(secs) = parse_var::<u64>(&lookup, SESSION_LIFETIME_SECONDS_ENV) {
        if secs > 0 {
            config.auth.session_lifetime_secs = secs;
        } else {
            log::warn!("Invalid {SESSION_LIFETIME_SECONDS_ENV} = {secs}");
        }
    }
    if let Some(secure) = parse_bool(&lookup, COOKIE_SECURE_ENV) {
        config.auth.cookie_secure = secure;
    }
    if let Some(origins) = lookup_var(&lookup, CORS_ALLOWED_ORIGINS_ENV) {
        config.cors.allowed_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .filter(|origin| {
                let valid = is_valid_origin(origin);
                if !valid {
                    log::warn!("Ignoring invalid origin in {CORS_ALLOWED_ORIGINS_ENV}: {origin}");
                }
                valid
            })
            .map(ToOwned::to_owned)
            .collect();
    }
}
