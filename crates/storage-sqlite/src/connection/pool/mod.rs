// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroU32;

use diesel::{
    Connection as _, SqliteConnection,
    connection::SimpleConnection as _,
    r2d2::{self, CustomizeConnection},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Result;

use super::Storage;

pub type ConnectionManager = r2d2::ConnectionManager<SqliteConnection>;

pub type ConnectionPool = r2d2::Pool<ConnectionManager>;

pub type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

#[cfg(feature = "tokio")]
pub mod gatekeeper;

/// Per-connection settings that are not persisted in the database file.
#[derive(Debug, Clone, Copy)]
struct ConnectionCustomizer;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionCustomizer {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> std::result::Result<(), r2d2::Error> {
        connection
            .batch_execute(
                r"
PRAGMA foreign_keys = 1;       -- check foreign key constraints
PRAGMA recursive_triggers = 1; -- for recursive ON CASCADE DELETE actions
PRAGMA busy_timeout = 5000;    -- wait for locks held by other processes
",
            )
            .map_err(r2d2::Error::QueryError)
    }
}

pub fn create_connection_pool(storage: &Storage, max_size: NonZeroU32) -> Result<ConnectionPool> {
    let connection_string = storage.connection_string();
    // Establish a test connection before creating the connection pool to fail early.
    // If the given file is inaccessible r2d2 seems to do multiple retries
    // and logs errors instead of simply failing and returning and error immediately.
    std::mem::drop(SqliteConnection::establish(&connection_string)?);
    // The test connection is dropped immediately without using it
    // and missing files should have been created after reaching
    // this point.
    let manager = ConnectionManager::new(connection_string);
    let pool = ConnectionPool::builder()
        .max_size(max_size.get())
        // In-memory databases only live as long as at least one
        // connection is open.
        .min_idle(Some(1))
        .idle_timeout(None)
        .connection_customizer(Box::new(ConnectionCustomizer))
        .build(manager)?;
    log::info!("Created connection pool for database {storage} with max. size {max_size}");
    Ok(pool)
}

pub fn get_pooled_connection(pool: &ConnectionPool) -> Result<PooledConnection> {
    pool.get().map_err(Into::into)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub max_size: NonZeroU32,

    #[cfg(feature = "tokio")]
    pub gatekeeper: self::gatekeeper::Config,
}

#[cfg(test)]
mod tests {
    use diesel::{RunQueryDsl as _, sql_types::BigInt};

    use super::*;

    #[derive(diesel::QueryableByName)]
    struct Count {
        #[diesel(sql_type = BigInt)]
        count: i64,
    }

    #[test]
    fn in_memory_pool_connections_share_the_database() -> anyhow::Result<()> {
        let pool = create_connection_pool(&Storage::InMemory, NonZeroU32::MIN.saturating_add(1))?;
        let mut first = get_pooled_connection(&pool)?;
        let mut second = get_pooled_connection(&pool)?;
        first.batch_execute("CREATE TABLE t (x INTEGER); INSERT INTO t VALUES (1);")?;
        let Count { count } =
            diesel::sql_query("SELECT COUNT(*) AS count FROM t").get_result::<Count>(&mut *second)?;
        assert_eq!(1, count);
        Ok(())
    }
}
