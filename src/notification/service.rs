//! Notification service for PitchDesk.
//!
//! Two automatic-read policies coexist in this crate by design and must
//! not be unified: notifications are read-on-fetch (listing the feed bulk
//! flips everything it returned), while messages are read-on-view (only
//! fetching one message as its recipient flips that message).

use sqlx::SqlitePool;

use super::repository::NotificationRepository;
use super::types::Notification;
use crate::Result;

/// Service for the notification feed.
pub struct NotificationService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Emit a notification to a professional recipient.
    ///
    /// Callers on the message-send path treat a failure here as
    /// log-and-continue; it must never surface as a send failure.
    pub async fn notify(&self, recipient_id: i64, title: &str, body: &str) -> Result<i64> {
        NotificationRepository::new(self.pool)
            .create(recipient_id, title, body)
            .await
    }

    /// Fetch the recipient's unread feed and mark everything fetched as
    /// read in the same call (read-on-fetch).
    pub async fn list_and_mark_read(
        &self,
        recipient_id: i64,
        limit: i64,
    ) -> Result<Vec<Notification>> {
        let repo = NotificationRepository::new(self.pool);
        let feed = repo.list_unread(recipient_id, limit).await?;
        if !feed.is_empty() {
            repo.mark_all_read(recipient_id).await?;
        }
        Ok(feed)
    }

    /// Mark a single notification as read (explicit click-through).
    pub async fn mark_one(&self, id: i64, recipient_id: i64) -> Result<bool> {
        NotificationRepository::new(self.pool)
            .mark_one(id, recipient_id)
            .await
    }
}
