//! SQLite-backed key-value store.
//!
//! # Responsibility
//! - Open file or in-memory SQLite databases for local persistence.
//! - Apply schema migrations before any data access.
//!
//! # Invariants
//! - Returned stores have migrations fully applied.
//! - `set` overwrites the previous value for the key unconditionally.

use super::migrations::apply_migrations;
use super::{KeyValueStore, StoreResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Key-value store persisted in a SQLite database.
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Opens (or creates) a store database file.
    ///
    /// # Side effects
    /// - Applies pending migrations.
    /// - Emits `store_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let started_at = Instant::now();
        info!("event=store_open module=store status=start mode=file");

        let conn = match Connection::open(path) {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=store_open module=store status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        match Self::bootstrap(conn) {
            Ok(store) => {
                info!(
                    "event=store_open module=store status=ok mode=file duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(store)
            }
            Err(err) => {
                error!(
                    "event=store_open module=store status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Opens an in-memory store, used by tests and the CLI probe.
    pub fn open_in_memory() -> StoreResult<Self> {
        info!("event=store_open module=store status=start mode=memory");
        let conn = Connection::open_in_memory()?;
        let store = Self::bootstrap(conn)?;
        info!("event=store_open module=store status=ok mode=memory");
        Ok(store)
    }

    fn bootstrap(mut conn: Connection) -> StoreResult<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1;", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }
}
