//! JSON records for the dashboard action API.
//!
//! Field names follow what the dashboard front-ends already consume:
//! flat records with `message` for the body text and resolved
//! `sender_name` / `recipient_name` columns alongside the raw ids.

use serde::Serialize;

use crate::messaging::{ConversationSummary, MessageView};
use crate::notification::Notification;

/// A message as returned by list/get/search actions.
#[derive(Debug, Serialize)]
pub struct MessageRecord {
    /// Message ID.
    pub id: i64,
    /// Sender id within its own table.
    pub sender_id: i64,
    /// Sender type tag.
    pub sender_type: String,
    /// Recipient id within its own table.
    pub recipient_id: i64,
    /// Recipient type tag.
    pub recipient_type: String,
    /// Subject, if any.
    pub subject: Option<String>,
    /// Message body.
    pub message: String,
    /// Read flag.
    pub is_read: bool,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Resolved sender display name.
    pub sender_name: String,
    /// Sender role, professionals only.
    pub sender_role: Option<String>,
    /// Sender organization, professionals only.
    pub sender_organization: Option<String>,
    /// Resolved recipient display name.
    pub recipient_name: String,
    /// Recipient role, professionals only.
    pub recipient_role: Option<String>,
    /// Recipient organization, professionals only.
    pub recipient_organization: Option<String>,
}

impl From<MessageView> for MessageRecord {
    fn from(view: MessageView) -> Self {
        let m = view.message;
        Self {
            id: m.id,
            sender_id: m.sender.id(),
            sender_type: m.sender.type_tag().to_string(),
            recipient_id: m.recipient.id(),
            recipient_type: m.recipient.type_tag().to_string(),
            subject: m.subject,
            message: m.body,
            is_read: m.is_read,
            created_at: m.created_at.to_rfc3339(),
            sender_name: view.sender.name,
            sender_role: view.sender.role,
            sender_organization: view.sender.organization,
            recipient_name: view.recipient.name,
            recipient_role: view.recipient.role,
            recipient_organization: view.recipient.organization,
        }
    }
}

/// A notification as returned by the feed.
#[derive(Debug, Serialize)]
pub struct NotificationRecord {
    /// Notification ID.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Notification text.
    pub message: String,
    /// Read flag as fetched (the feed flips it as a side effect).
    pub is_read: bool,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
}

impl From<Notification> for NotificationRecord {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            title: n.title,
            message: n.body,
            is_read: n.is_read,
            created_at: n.created_at.to_rfc3339(),
        }
    }
}

/// A conversation summary as returned by the conversations view.
#[derive(Debug, Serialize)]
pub struct ConversationRecord {
    /// Counterpart id within its own table.
    pub counterpart_id: i64,
    /// Counterpart type tag.
    pub counterpart_type: String,
    /// Resolved counterpart display name.
    pub counterpart_name: String,
    /// Body of the most recent message in either direction.
    pub last_message: String,
    /// Timestamp of the most recent message, RFC 3339.
    pub last_message_time: String,
    /// Unread messages from this counterpart.
    pub unread_count: i64,
}

impl From<ConversationSummary> for ConversationRecord {
    fn from(c: ConversationSummary) -> Self {
        Self {
            counterpart_id: c.counterpart.id(),
            counterpart_type: c.counterpart.type_tag().to_string(),
            counterpart_name: c.counterpart_name.name,
            last_message: c.last_message,
            last_message_time: c.last_message_time.to_rfc3339(),
            unread_count: c.unread_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{Identity, ResolvedIdentity};
    use crate::messaging::Message;
    use chrono::Utc;

    #[test]
    fn test_message_record_from_view() {
        let view = MessageView {
            message: Message {
                id: 1,
                sender: Identity::Professional(10),
                recipient: Identity::Player(42),
                subject: Some("Trial".to_string()),
                body: "Please attend Friday".to_string(),
                is_read: false,
                created_at: Utc::now(),
            },
            sender: ResolvedIdentity {
                name: "scout_anna".to_string(),
                role: Some("scout".to_string()),
                organization: Some("Northfield FC".to_string()),
            },
            recipient: ResolvedIdentity {
                name: "Jamie Okafor".to_string(),
                role: None,
                organization: None,
            },
        };

        let record = MessageRecord::from(view);
        assert_eq!(record.sender_type, "professional");
        assert_eq!(record.recipient_type, "player");
        assert_eq!(record.message, "Please attend Friday");
        assert_eq!(record.sender_name, "scout_anna");
        assert!(record.recipient_role.is_none());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["sender_name"], "scout_anna");
        assert_eq!(json["is_read"], false);
    }
}
