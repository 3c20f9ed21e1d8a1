//! Message repository for PitchDesk.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::types::{Message, NewMessage};
use crate::identity::Identity;
use crate::{PitchdeskError, Result};

const MESSAGE_COLUMNS: &str = "m.id, m.sender_id, m.sender_type, m.recipient_id, \
     m.recipient_type, m.subject, m.body, m.is_read, m.created_at";

/// Repository for message persistence.
pub struct MessageRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MessageRepository<'a> {
    /// Create a new MessageRepository with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new message with `is_read = 0`.
    pub async fn create(&self, message: &NewMessage) -> Result<Message> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO messages
                 (sender_id, sender_type, recipient_id, recipient_type, subject, body, is_read, created_at)
             VALUES (?, ?, ?, ?, ?, ?, 0, ?)",
        )
        .bind(message.sender.id())
        .bind(message.sender.type_tag())
        .bind(message.recipient.id())
        .bind(message.recipient.type_tag())
        .bind(&message.subject)
        .bind(&message.body)
        .bind(created_at)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| PitchdeskError::NotFound("message".to_string()))
    }

    /// Get a message by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Message>> {
        let row = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages m WHERE m.id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| map_row(&r)).transpose()
    }

    /// List received messages, newest first.
    pub async fn list_inbox(&self, identity: Identity, limit: i64) -> Result<Vec<Message>> {
        let rows = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages m
             WHERE m.recipient_id = ? AND m.recipient_type = ?
             ORDER BY m.created_at DESC, m.id DESC
             LIMIT ?"
        ))
        .bind(identity.id())
        .bind(identity.type_tag())
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(map_row).collect()
    }

    /// List sent messages, newest first.
    pub async fn list_sent(&self, identity: Identity, limit: i64) -> Result<Vec<Message>> {
        let rows = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages m
             WHERE m.sender_id = ? AND m.sender_type = ?
             ORDER BY m.created_at DESC, m.id DESC
             LIMIT ?"
        ))
        .bind(identity.id())
        .bind(identity.type_tag())
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(map_row).collect()
    }

    /// Mark a message as read, scoped to its recipient.
    ///
    /// Returns whether a row changed. The flag is monotonic, so calling
    /// this twice is harmless.
    pub async fn mark_read(&self, id: i64, recipient: Identity) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = 1
             WHERE id = ? AND recipient_id = ? AND recipient_type = ? AND is_read = 0",
        )
        .bind(id)
        .bind(recipient.id())
        .bind(recipient.type_tag())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete a message, scoped to its participants.
    ///
    /// Returns whether a row was deleted. There is no tombstone; a second
    /// delete of the same id finds nothing.
    pub async fn delete_for_participant(&self, id: i64, identity: Identity) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM messages
             WHERE id = ?
               AND ((sender_id = ? AND sender_type = ?)
                 OR (recipient_id = ? AND recipient_type = ?))",
        )
        .bind(id)
        .bind(identity.id())
        .bind(identity.type_tag())
        .bind(identity.id())
        .bind(identity.type_tag())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count unread messages for a recipient.
    pub async fn count_unread(&self, identity: Identity) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages
             WHERE recipient_id = ? AND recipient_type = ? AND is_read = 0",
        )
        .bind(identity.id())
        .bind(identity.type_tag())
        .fetch_one(self.pool)
        .await?;
        Ok(count)
    }

    /// Case-insensitive substring search over an identity's inbox.
    ///
    /// Matches subject, body, and the sender's display name. Sent items
    /// are deliberately not searched.
    pub async fn search_inbox(
        &self,
        identity: Identity,
        term: &str,
        limit: i64,
    ) -> Result<Vec<Message>> {
        let pattern = format!("%{}%", term.to_lowercase());
        let rows = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages m
             LEFT JOIN professional_users pu
                 ON m.sender_type = 'professional' AND m.sender_id = pu.id
             LEFT JOIN player_registrations pr
                 ON m.sender_type = 'player' AND m.sender_id = pr.id
             WHERE m.recipient_id = ? AND m.recipient_type = ?
               AND (LOWER(COALESCE(m.subject, '')) LIKE ?
                 OR LOWER(m.body) LIKE ?
                 OR LOWER(COALESCE(pu.username, pr.first_name || ' ' || pr.last_name, '')) LIKE ?)
             ORDER BY m.created_at DESC, m.id DESC
             LIMIT ?"
        ))
        .bind(identity.id())
        .bind(identity.type_tag())
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(map_row).collect()
    }

    /// Distinct counterpart identities this identity has exchanged
    /// messages with, in either direction.
    pub async fn list_counterparts(&self, identity: Identity) -> Result<Vec<Identity>> {
        let rows = sqlx::query(
            "SELECT DISTINCT
                 CASE WHEN m.sender_id = ? AND m.sender_type = ?
                      THEN m.recipient_id ELSE m.sender_id END AS cp_id,
                 CASE WHEN m.sender_id = ? AND m.sender_type = ?
                      THEN m.recipient_type ELSE m.sender_type END AS cp_type
             FROM messages m
             WHERE (m.sender_id = ? AND m.sender_type = ?)
                OR (m.recipient_id = ? AND m.recipient_type = ?)",
        )
        .bind(identity.id())
        .bind(identity.type_tag())
        .bind(identity.id())
        .bind(identity.type_tag())
        .bind(identity.id())
        .bind(identity.type_tag())
        .bind(identity.id())
        .bind(identity.type_tag())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter()
            .map(|r| {
                let tag: String = r.get("cp_type");
                let id: i64 = r.get("cp_id");
                Identity::from_parts(&tag, id).ok_or_else(|| {
                    PitchdeskError::Database(format!("unknown identity tag: {tag}"))
                })
            })
            .collect()
    }

    /// Body and timestamp of the most recent message between two
    /// identities, in either direction.
    pub async fn last_message_between(
        &self,
        a: Identity,
        b: Identity,
    ) -> Result<Option<(String, DateTime<Utc>)>> {
        let row = sqlx::query(
            "SELECT body, created_at FROM messages
             WHERE (sender_id = ? AND sender_type = ? AND recipient_id = ? AND recipient_type = ?)
                OR (sender_id = ? AND sender_type = ? AND recipient_id = ? AND recipient_type = ?)
             ORDER BY created_at DESC, id DESC
             LIMIT 1",
        )
        .bind(a.id())
        .bind(a.type_tag())
        .bind(b.id())
        .bind(b.type_tag())
        .bind(b.id())
        .bind(b.type_tag())
        .bind(a.id())
        .bind(a.type_tag())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| (r.get("body"), r.get("created_at"))))
    }

    /// Unread messages sent by `sender` to `recipient`.
    pub async fn count_unread_from(&self, recipient: Identity, sender: Identity) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages
             WHERE recipient_id = ? AND recipient_type = ?
               AND sender_id = ? AND sender_type = ? AND is_read = 0",
        )
        .bind(recipient.id())
        .bind(recipient.type_tag())
        .bind(sender.id())
        .bind(sender.type_tag())
        .fetch_one(self.pool)
        .await?;
        Ok(count)
    }
}

/// Map a database row to a Message.
fn map_row(row: &SqliteRow) -> Result<Message> {
    let sender_type: String = row.get("sender_type");
    let recipient_type: String = row.get("recipient_type");

    let sender = Identity::from_parts(&sender_type, row.get("sender_id")).ok_or_else(|| {
        PitchdeskError::Database(format!("unknown identity tag: {sender_type}"))
    })?;
    let recipient =
        Identity::from_parts(&recipient_type, row.get("recipient_id")).ok_or_else(|| {
            PitchdeskError::Database(format!("unknown identity tag: {recipient_type}"))
        })?;

    Ok(Message {
        id: row.get("id"),
        sender,
        recipient,
        subject: row.get("subject"),
        body: row.get("body"),
        is_read: row.get("is_read"),
        created_at: row.get("created_at"),
    })
}
