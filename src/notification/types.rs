//! Notification types for PitchDesk.

use chrono::{DateTime, Utc};

/// A notification record in a professional's feed.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Notification ID.
    pub id: i64,
    /// Recipient professional-user id.
    pub recipient_id: i64,
    /// Short title.
    pub title: String,
    /// Notification text.
    pub body: String,
    /// Whether the recipient has seen it.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}
