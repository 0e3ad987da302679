// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use rusqlite::Connection;

/// The database schema.
///
/// Appointments and psych tests are separate tables with separate
/// AUTOINCREMENT id spaces; slot lists and form snapshots are stored as
/// JSON text columns.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    control_number TEXT NOT NULL UNIQUE,
    status TEXT NOT NULL,
    student_user_id INTEGER NOT NULL,
    student_name TEXT NOT NULL,
    student_external_id TEXT NOT NULL,
    student_college TEXT,
    counselor_id INTEGER,
    requested_date TEXT NOT NULL,
    requested_slots TEXT NOT NULL,
    scheduled_date TEXT,
    scheduled_slot TEXT,
    note TEXT,
    is_urgent INTEGER NOT NULL,
    reason TEXT NOT NULL,
    phone_number TEXT NOT NULL,
    intake_form TEXT NOT NULL,
    session_form TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS psych_tests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    control_number TEXT NOT NULL UNIQUE,
    status TEXT NOT NULL,
    student_user_id INTEGER NOT NULL,
    student_name TEXT NOT NULL,
    student_external_id TEXT NOT NULL,
    student_college TEXT,
    counselor_id INTEGER,
    requested_date TEXT NOT NULL,
    requested_slots TEXT NOT NULL,
    scheduled_date TEXT,
    scheduled_slot TEXT,
    note TEXT,
    test_type TEXT NOT NULL,
    reason TEXT NOT NULL,
    phone_number TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS notifications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    recipient_id INTEGER,
    recipient_role TEXT,
    title TEXT NOT NULL,
    message TEXT NOT NULL,
    severity TEXT NOT NULL,
    link TEXT,
    read INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS counselors (
    user_id INTEGER PRIMARY KEY,
    display_name TEXT NOT NULL,
    college TEXT
);
";

/// Creates all tables if they do not exist.
///
/// # Errors
///
/// Returns an error if schema creation fails.
pub fn create_schema(conn: &Connection) -> Result<(), PersistenceError> {
    conn.execute_batch(SCHEMA)
        .map_err(|e| PersistenceError::InitializationError(e.to_string()))
}
