// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
    num::NonZeroU32,
    time::Duration,
};

use serde::{Deserialize, Serialize};

use citygen_storage_sqlite::connection::{
    Storage,
    pool::{
        Config as DatabaseConnectionPoolConfig,
        gatekeeper::Config as DatabaseConnectionGatekeeperConfig,
    },
};
use citygen_websrv_warp_sqlite::session::CookieConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Config {
    pub(crate) network: NetworkConfig,
    pub(crate) database: DatabaseConfig,
    pub(crate) auth: AuthConfig,
    pub(crate) cors: CorsConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct NetworkConfig {
    pub(crate) endpoint: EndpointConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct EndpointConfig {
    pub(crate) ip_addr: IpAddr,
    pub(crate) port: u16,
}

pub(crate) const DEFAULT_ENDPOINT_PORT: u16 = 8000;

impl EndpointConfig {
    pub(crate) const fn new_v6() -> Self {
        Self {
            ip_addr: IpAddr::V6(Ipv6Addr::UNSPECIFIED),
            port: DEFAULT_ENDPOINT_PORT,
        }
    }

    #[allow(unused)]
    pub(crate) const fn new_v4() -> Self {
        Self {
            ip_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_ENDPOINT_PORT,
        }
    }

    pub(crate) fn socket_addr(self) -> SocketAddr {
        let Self { ip_addr, port } = self;
        SocketAddr::new(ip_addr, port)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new_v6()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct DatabaseConnectionConfig {
    pub(crate) storage: Storage,
    pub(crate) pool: DatabaseConnectionPoolConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct DatabaseConfig {
    pub(crate) connection: DatabaseConnectionConfig,
    pub(crate) migrate_schema_on_startup: bool,
}

const DEFAULT_DATABASE_CONNECTION_POOL_SIZE: NonZeroU32 = match NonZeroU32::new(8) {
    Some(size) => size,
    None => NonZeroU32::MIN,
};

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            connection: DatabaseConnectionConfig {
                storage: Storage::InMemory,
                pool: DatabaseConnectionPoolConfig {
                    max_size: DEFAULT_DATABASE_CONNECTION_POOL_SIZE,
                    gatekeeper: DatabaseConnectionGatekeeperConfig::default(),
                },
            },
            migrate_schema_on_startup: true,
        }
    }
}

/// Sessions and their cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct AuthConfig {
    pub(crate) session_lifetime_secs: u64,

    /// Restrict the session cookie to HTTPS.
    pub(crate) cookie_secure: bool,
}

pub(crate) const DEFAULT_SESSION_LIFETIME_SECS: u64 = 30 * 24 * 60 * 60;

impl AuthConfig {
    pub(crate) const fn session_lifetime(self) -> Duration {
        Duration::from_secs(self.session_lifetime_secs)
    }

    pub(crate) const fn cookie(self) -> CookieConfig {
        CookieConfig {
            secure: self.cookie_secure,
            max_age: self.session_lifetime(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_lifetime_secs: DEFAULT_SESSION_LIFETIME_SECS,
            cookie_secure: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct CorsConfig {
    /// Origins that are permitted to send credentials.
    pub(crate) allowed_origins: Vec<String>,
}

pub(crate) const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_owned()],
        }
    }
}

/// Check that an origin consists only of scheme, host, and an optional port.
#[must_use]
pub(crate) fn is_valid_origin(origin: &str) -> bool {
    let Some(authority) = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"))
    else {
        return false;
    };
    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (authority, None),
    };
    if host.is_empty()
        || !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
    {
        return false;
    }
    port.is_none_or(|port| port.parse::<u16>().is_ok())
}
