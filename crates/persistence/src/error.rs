// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// The requested request record was not found.
    RequestNotFound {
        /// The request kind ("appointment" or "psych_test").
        kind: String,
        /// The missing id.
        id: i64,
    },
    /// The requested notification was not found.
    NotificationNotFound(i64),
    /// A record cannot be updated before it has been persisted.
    MissingRecordId,
    /// A stored record could not be reconstructed into a domain value.
    ReconstructionError(String),
    /// Serialization/deserialization error.
    SerializationError(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::RequestNotFound { kind, id } => {
                write!(f, "No {kind} request found with id {id}")
            }
            Self::NotificationNotFound(id) => write!(f, "Notification not found: {id}"),
            Self::MissingRecordId => {
                write!(f, "Record has no id; it must be persisted before updating")
            }
            Self::ReconstructionError(msg) => write!(f, "Record reconstruction error: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
