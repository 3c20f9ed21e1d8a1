//! Notification repository for PitchDesk.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::types::Notification;
use crate::Result;

/// Repository for notification persistence.
pub struct NotificationRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> NotificationRepository<'a> {
    /// Create a new NotificationRepository with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a notification with `is_read = 0`. Returns its id.
    pub async fn create(&self, recipient_id: i64, title: &str, body: &str) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO notifications (recipient_id, title, body, is_read, created_at)
             VALUES (?, ?, ?, 0, ?)",
        )
        .bind(recipient_id)
        .bind(title)
        .bind(body)
        .bind(Utc::now())
        .execute(self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get a notification by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Notification>> {
        let row = sqlx::query(
            "SELECT id, recipient_id, title, body, is_read, created_at
             FROM notifications WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| map_row(&r)))
    }

    /// List unread notifications for a recipient, newest first.
    pub async fn list_unread(&self, recipient_id: i64, limit: i64) -> Result<Vec<Notification>> {
        let rows = sqlx::query(
            "SELECT id, recipient_id, title, body, is_read, created_at
             FROM notifications
             WHERE recipient_id = ? AND is_read = 0
             ORDER BY created_at DESC, id DESC
             LIMIT ?",
        )
        .bind(recipient_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.iter().map(map_row).collect())
    }

    /// Flip every unread notification for a recipient to read.
    ///
    /// Returns the number of rows changed.
    pub async fn mark_all_read(&self, recipient_id: i64) -> Result<u64> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = 1 WHERE recipient_id = ? AND is_read = 0")
                .bind(recipient_id)
                .execute(self.pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// Mark a single notification as read, scoped to its recipient.
    pub async fn mark_one(&self, id: i64, recipient_id: i64) -> Result<bool> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ? AND recipient_id = ?")
                .bind(id)
                .bind(recipient_id)
                .execute(self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn map_row(row: &SqliteRow) -> Notification {
    Notification {
        id: row.get("id"),
        recipient_id: row.get("recipient_id"),
        title: row.get("title"),
        body: row.get("body"),
        is_read: row.get("is_read"),
        created_at: row.get("created_at"),
    }
}
