// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use citygen_repo_sqlite::{initialize_database, run_migrations};

use super::*;

/// Configure the connection and migrate the schema if requested.
pub fn initialize(connection: &mut DbConnection, migrate_schema_on_startup: bool) -> Result<()> {
    initialize_database(connection).map_err(|err| Error::Other(err.into()))?;
    if migrate_schema_on_startup {
        migrate_schema(connection)?;
    }
    Ok(())
}

pub fn migrate_schema(connection: &mut DbConnection) -> Result<()> {
    for migration_version in run_migrations(connection)
        .map_err(|err| anyhow::anyhow!(err))
        .map_err(Error::DatabaseMigration)?
    {
        log::info!("Applied migration '{migration_version}'");
    }
    Ok(())
}
