// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod counselors;
mod error;
mod notifications;
mod requests;
mod schema;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use rusqlite::Connection;
use tracing::info;

/// SQLite-backed storage for requests, notifications, and the counselor
/// directory.
///
/// One record per row, indexed by id; ids are assigned by the database
/// and are monotonic per table. All access goes through a single
/// connection, so callers serialize writers around this struct.
pub struct SqlitePersistence {
    conn: Connection,
}

impl SqlitePersistence {
    /// Creates a new in-memory persistence layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be created.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open_in_memory()
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        Self::initialize(conn)
    }

    /// Creates a new file-backed persistence layer.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be created.
    pub fn new_with_file(path: &str) -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open(path)
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self, PersistenceError> {
        conn.pragma_update(None, "foreign_keys", true)
            .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;
        schema::create_schema(&conn)?;
        info!("Persistence layer initialized");
        Ok(Self { conn })
    }

    /// Returns the underlying connection for module-level queries.
    pub(crate) const fn conn(&self) -> &Connection {
        &self.conn
    }
}
