// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::SqlitePersistence;
use crate::error::PersistenceError;
use guidance_desk_domain::Role;
use guidance_desk_notify::{Notification, NotificationSink, NotifyError, Severity};
use rusqlite::{Row, params};
use tracing::debug;

fn notification_from_row(row: &Row<'_>) -> rusqlite::Result<(Notification, Option<String>)> {
    let severity: String = row.get(5)?;
    let role: Option<String> = row.get(2)?;
    Ok((
        Notification {
            id: Some(row.get(0)?),
            recipient_id: row.get(1)?,
            recipient_role: None,
            title: row.get(3)?,
            message: row.get(4)?,
            severity: Severity::parse_lossy(&severity),
            link: row.get(6)?,
            read: row.get(7)?,
            created_at: row.get(8)?,
        },
        role,
    ))
}

fn attach_role(
    (mut notification, role): (Notification, Option<String>),
) -> Result<Notification, PersistenceError> {
    notification.recipient_role = role
        .as_deref()
        .map(str::parse::<Role>)
        .transpose()
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
    Ok(notification)
}

const NOTIFICATION_COLUMNS: &str =
    "id, recipient_id, recipient_role, title, message, severity, link, read, created_at";

impl SqlitePersistence {
    /// Appends a notification and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_notification(
        &mut self,
        notification: &Notification,
    ) -> Result<i64, PersistenceError> {
        self.conn().execute(
            "INSERT INTO notifications (recipient_id, recipient_role, title, message, \
             severity, link, read, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                notification.recipient_id,
                notification.recipient_role.map(|r| r.as_str()),
                notification.title,
                notification.message,
                notification.severity.as_str(),
                notification.link,
                notification.read,
                notification.created_at,
            ],
        )?;
        let id: i64 = self.conn().last_insert_rowid();
        debug!(id, title = notification.title, "Stored notification");
        Ok(id)
    }

    /// Lists the notifications visible to a user, newest first.
    ///
    /// A notification is visible when it is not addressed to a different
    /// user and not addressed to a different role.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_notifications_for(
        &self,
        user_id: i64,
        role: Role,
    ) -> Result<Vec<Notification>, PersistenceError> {
        let sql: String = format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications \
             WHERE (recipient_id IS NULL OR recipient_id = ?1) \
             AND (recipient_role IS NULL OR recipient_role = ?2) \
             ORDER BY id DESC"
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map(params![user_id, role.as_str()], notification_from_row)?;

        rows.map(|row| attach_role(row.map_err(PersistenceError::from)?))
            .collect()
    }

    /// Counts the unread notifications visible to a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn unread_notification_count(
        &self,
        user_id: i64,
        role: Role,
    ) -> Result<i64, PersistenceError> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM notifications \
             WHERE (recipient_id IS NULL OR recipient_id = ?1) \
             AND (recipient_role IS NULL OR recipient_role = ?2) \
             AND read = 0",
            params![user_id, role.as_str()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Marks one notification as read.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotificationNotFound` if no such row
    /// exists.
    pub fn mark_notification_read(&mut self, id: i64) -> Result<(), PersistenceError> {
        let affected: usize = self
            .conn()
            .execute("UPDATE notifications SET read = 1 WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(PersistenceError::NotificationNotFound(id));
        }
        Ok(())
    }

    /// Marks every notification visible to a user as read.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn mark_all_notifications_read(
        &mut self,
        user_id: i64,
        role: Role,
    ) -> Result<(), PersistenceError> {
        self.conn().execute(
            "UPDATE notifications SET read = 1 \
             WHERE (recipient_id IS NULL OR recipient_id = ?1) \
             AND (recipient_role IS NULL OR recipient_role = ?2)",
            params![user_id, role.as_str()],
        )?;
        Ok(())
    }
}

impl NotificationSink for SqlitePersistence {
    fn deliver(&mut self, notification: &Notification) -> Result<i64, NotifyError> {
        self.insert_notification(notification)
            .map_err(|e| NotifyError::DeliveryFailed(e.to_string()))
    }
}
