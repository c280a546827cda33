// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    num::NonZeroU64,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use tokio::{sync::RwLock, task::spawn_blocking, time::timeout};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

use super::{ConnectionPool, PooledConnection, get_pooled_connection};

/// Manage database connections for asynchronous tasks
///
/// Only a single writer is allowed to access the `SQLite` database
/// at any given time, while multiple readers may proceed concurrently.
/// Read and write requests wait for a limited amount of time before
/// they are rejected.
#[allow(missing_debug_implementations)]
pub struct Gatekeeper {
    connection_pool: Arc<RwLock<ConnectionPool>>,
    acquire_read_timeout: Duration,
    acquire_write_timeout: Duration,
    request_counter_state: Arc<RequestCounterState>,
    decommissioned: AtomicBool,
}

#[derive(Debug, Default)]
struct RequestCounterState {
    read_count: AtomicUsize,
    write_count: AtomicUsize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestMode {
    Read,
    Write,
}

impl RequestMode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

struct RequestCounterScope {
    shared_state: Arc<RequestCounterState>,
    mode: RequestMode,
}

impl RequestCounterScope {
    fn counter(&self) -> &AtomicUsize {
        match self.mode {
            RequestMode::Read => &self.shared_state.read_count,
            RequestMode::Write => &self.shared_state.write_count,
        }
    }

    #[must_use]
    fn new(shared_state: Arc<RequestCounterState>, mode: RequestMode) -> Self {
        let scope = Self { shared_state, mode };
        let pending_before = scope.counter().fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "Starting {mode} request: {pending} pending {mode} request(s)",
            mode = mode.as_str(),
            pending = pending_before + 1,
        );
        scope
    }
}

impl Drop for RequestCounterScope {
    fn drop(&mut self) {
        let pending_before = self.counter().fetch_sub(1, Ordering::Relaxed);
        debug_assert!(pending_before > 0);
        log::debug!(
            "Finished {mode} request: {pending} pending {mode} request(s)",
            mode = self.mode.as_str(),
            pending = pending_before - 1,
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTasks {
    pub read: usize,
    pub write: usize,
}

impl Gatekeeper {
    #[must_use]
    pub fn new(connection_pool: ConnectionPool, config: Config) -> Self {
        let Config {
            acquire_read_timeout_millis,
            acquire_write_timeout_millis,
        } = config;
        Self {
            connection_pool: Arc::new(RwLock::new(connection_pool)),
            acquire_read_timeout: Duration::from_millis(acquire_read_timeout_millis.get()),
            acquire_write_timeout: Duration::from_millis(acquire_write_timeout_millis.get()),
            request_counter_state: Default::default(),
            decommissioned: AtomicBool::new(false),
        }
    }

    /// Reject all subsequent requests.
    pub fn decommission(&self) {
        self.decommissioned.store(true, Ordering::Release);
    }

    fn check_not_decommissioned(&self) -> Result<()> {
        if self.decommissioned.load(Ordering::Acquire) {
            return Err(Error::TaskTimeout {
                reason: "connection pool has been decommissioned".to_owned(),
            });
        }
        Ok(())
    }

    /// Run a read-only database task on a blocking thread.
    ///
    /// Multiple read tasks may run concurrently.
    pub async fn spawn_blocking_read_task<H, R>(&self, connection_handler: H) -> Result<R>
    where
        H: FnOnce(PooledConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.check_not_decommissioned()?;
        let _request_counter_scope =
            RequestCounterScope::new(Arc::clone(&self.request_counter_state), RequestMode::Read);
        let Ok(guard) = timeout(self.acquire_read_timeout, self.connection_pool.read()).await
        else {
            return Err(Error::TaskTimeout {
                reason: "database is locked".to_owned(),
            });
        };
        self.check_not_decommissioned()?;
        let connection = get_pooled_connection(&guard)?;
        let result = spawn_blocking(move || connection_handler(connection)).await;
        drop(guard);
        result.map_err(Error::TaskScheduling)
    }

    /// Run a database task that might modify the database on a blocking thread.
    ///
    /// Write tasks have exclusive access to the database.
    pub async fn spawn_blocking_write_task<H, R>(&self, connection_handler: H) -> Result<R>
    where
        H: FnOnce(PooledConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.check_not_decommissioned()?;
        let _request_counter_scope =
            RequestCounterScope::new(Arc::clone(&self.request_counter_state), RequestMode::Write);
        let Ok(guard) = timeout(self.acquire_write_timeout, self.connection_pool.write()).await
        else {
            return Err(Error::TaskTimeout {
                reason: "database is locked".to_owned(),
            });
        };
        self.check_not_decommissioned()?;
        let connection = get_pooled_connection(&guard)?;
        let result = spawn_blocking(move || connection_handler(connection)).await;
        drop(guard);
        result.map_err(Error::TaskScheduling)
    }

    #[must_use]
    pub fn pending_tasks(&self) -> PendingTasks {
        PendingTasks {
            read: self
                .request_counter_state
                .read_count
                .load(Ordering::Relaxed),
            write: self
                .request_counter_state
                .write_count
                .load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Config {
    pub acquire_read_timeout_millis: NonZeroU64,
    pub acquire_write_timeout_millis: NonZeroU64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            acquire_read_timeout_millis: NonZeroU64::new(10_000).unwrap_or(NonZeroU64::MIN),
            acquire_write_timeout_millis: NonZeroU64::new(30_000).unwrap_or(NonZeroU64::MIN),
        }
    }
}
