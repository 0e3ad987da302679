// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::SqlitePersistence;
use crate::error::PersistenceError;
use guidance_desk_domain::{College, CounselorProfile};
use rusqlite::params;
use tracing::debug;

impl SqlitePersistence {
    /// Inserts or replaces a counselor directory entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_counselor(&mut self, counselor: &CounselorProfile) -> Result<(), PersistenceError> {
        self.conn().execute(
            "INSERT INTO counselors (user_id, display_name, college) VALUES (?1, ?2, ?3) \
             ON CONFLICT(user_id) DO UPDATE SET display_name = ?2, college = ?3",
            params![
                counselor.user_id,
                counselor.display_name,
                counselor.college.as_ref().map(ToString::to_string),
            ],
        )?;
        debug!(user_id = counselor.user_id, "Upserted counselor");
        Ok(())
    }

    /// Lists the counselor directory in directory order (ascending user id).
    ///
    /// Directory order matters: counselor auto-assignment falls back to
    /// the first entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_counselors(&self) -> Result<Vec<CounselorProfile>, PersistenceError> {
        let mut stmt = self
            .conn()
            .prepare("SELECT user_id, display_name, college FROM counselors ORDER BY user_id")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        })?;

        rows.map(|row| {
            let (user_id, display_name, college) = row?;
            Ok(CounselorProfile {
                user_id,
                display_name,
                college: college.as_deref().map(College::new),
            })
        })
        .collect()
    }
}
