//! Ordered schema migrations keyed by `PRAGMA user_version`.
//!
//! Pending steps run inside one transaction, so a failing script leaves the
//! file at its previous version.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "init_record_tables",
    sql: include_str!("0001_init.sql"),
}];

/// Highest schema version this build knows how to create.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings `conn` up to [`latest_version`].
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = current_user_version(conn)?;
    let latest = latest_version();

    if from_version > latest {
        error!(
            "event=db_migrate module=db status=error reason=newer_schema db_version={from_version} latest={latest}"
        );
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }
    if from_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS.iter().filter(|m| m.version > from_version) {
        run_step(&tx, migration)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from_version} to_version={latest}");
    Ok(())
}

fn run_step(conn: &Connection, migration: &Migration) -> DbResult<()> {
    let Migration { version, name, sql } = *migration;
    conn.execute_batch(sql)
        .and_then(|()| conn.pragma_update(None, "user_version", version))
        .map_err(|source| {
            error!(
                "event=db_migrate module=db status=error version={version} name={name} err={source}"
            );
            DbError::Migration {
                version,
                name,
                source,
            }
        })
}

/// Reads the schema version stored in `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
