// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Local key/value store — the desktop counterpart of browser local storage.
//
// Schema:
//   kv(
//     key        TEXT PRIMARY KEY,
//     value      TEXT NOT NULL,
//     updated_at TEXT NOT NULL   -- RFC 3339
//   )

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use pandi_core::error::{PandiError, Result};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, instrument};

const CREATE_TABLE_SQL: &str = "
    CREATE TABLE IF NOT EXISTS kv (
        key        TEXT PRIMARY KEY,
        value      TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
";

/// Convert a `rusqlite::Error` into a `PandiError::Storage`.
fn db_err(e: rusqlite::Error) -> PandiError {
    PandiError::Storage(e.to_string())
}

/// String-keyed persistent store backed by SQLite.
///
/// All methods are synchronous; every call is a single indexed statement.
pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    /// Open (or create) the store at `path` in WAL mode.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref()).map_err(db_err)?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(db_err)?;
        conn.execute_batch(CREATE_TABLE_SQL).map_err(db_err)?;

        debug!("local store opened");
        Ok(Self { conn })
    }

    /// Open an in-memory store (useful for tests and as a fallback).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        conn.execute_batch(CREATE_TABLE_SQL).map_err(db_err)?;

        debug!("in-memory local store opened");
        Ok(Self { conn })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(db_err)
    }

    /// Insert or overwrite `key`.
    #[instrument(skip(self, value))]
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(db_err)?;
        Ok(())
    }

    /// Delete `key`. Deleting a missing key is not an error.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(db_err)?;
        Ok(())
    }

    pub fn len(&self) -> Result<u64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))
            .map_err(db_err)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// A store shared between the session and the role toggle.
#[derive(Clone)]
pub struct SharedStore(Arc<Mutex<LocalStore>>);

impl SharedStore {
    pub fn new(store: LocalStore) -> Self {
        Self(Arc::new(Mutex::new(store)))
    }

    /// Lock the store. A panic in another holder does not corrupt SQLite
    /// state, so a poisoned lock is recovered rather than propagated.
    pub fn lock(&self) -> MutexGuard<'_, LocalStore> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
