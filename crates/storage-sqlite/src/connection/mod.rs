// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    fmt,
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod pool;

pub const IN_MEMORY_STORAGE: &str = ":memory:";

/// Location of an `SQLite` database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Storage {
    #[default]
    InMemory,
    File { path: PathBuf },
}

impl Storage {
    /// Parse a database URL.
    ///
    /// Accepts either `:memory:`, a plain file path or a file path
    /// prefixed with `sqlite://`.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let url = url.trim();
        if url == IN_MEMORY_STORAGE {
            return Self::InMemory;
        }
        let path = url.strip_prefix("sqlite://").unwrap_or(url);
        Self::File { path: path.into() }
    }

    /// The connection string passed to `SQLite`.
    ///
    /// Every in-memory storage gets a unique, shared-cache URI that
    /// is visible to all connections of a single pool.
    #[must_use]
    pub(crate) fn connection_string(&self) -> String {
        static IN_MEMORY_COUNTER: AtomicUsize = AtomicUsize::new(0);
        match self {
            Self::InMemory => {
                let index = IN_MEMORY_COUNTER.fetch_add(1, Ordering::Relaxed);
                format!("file:citygen-memdb-{index}?mode=memory&cache=shared")
            }
            Self::File { path } => path.display().to_string(),
        }
    }
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InMemory => f.write_str(IN_MEMORY_STORAGE),
            Self::File { path } => path.display().fmt(f),
        }
    }
}
