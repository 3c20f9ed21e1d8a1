//! Message types for PitchDesk.

use chrono::{DateTime, Utc};

use crate::identity::{Identity, ResolvedIdentity};

/// Maximum length for a message subject.
pub const MAX_SUBJECT_LENGTH: usize = 200;

/// Maximum length for a message body.
pub const MAX_BODY_LENGTH: usize = 10000;

/// A directed message between two identities.
#[derive(Debug, Clone)]
pub struct Message {
    /// Message ID.
    pub id: i64,
    /// Sender identity.
    pub sender: Identity,
    /// Recipient identity.
    pub recipient: Identity,
    /// Subject. Conversation-style messaging omits it.
    pub subject: Option<String>,
    /// Message body.
    pub body: String,
    /// Whether the recipient has read the message.
    pub is_read: bool,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Check whether the given identity is a participant of this message.
    pub fn is_participant(&self, identity: Identity) -> bool {
        self.sender == identity || self.recipient == identity
    }
}

/// New message for creation.
#[derive(Debug, Clone)]
pub struct NewMessage {
    /// Sender identity.
    pub sender: Identity,
    /// Recipient identity.
    pub recipient: Identity,
    /// Subject, if any.
    pub subject: Option<String>,
    /// Message body.
    pub body: String,
}

impl NewMessage {
    /// Create a new message.
    pub fn new(
        sender: Identity,
        recipient: Identity,
        subject: Option<impl Into<String>>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            sender,
            recipient,
            subject: subject.map(Into::into),
            body: body.into(),
        }
    }
}

/// A message enriched with resolved counterpart identities.
#[derive(Debug, Clone)]
pub struct MessageView {
    /// The underlying message.
    pub message: Message,
    /// Resolved sender display identity.
    pub sender: ResolvedIdentity,
    /// Resolved recipient display identity.
    pub recipient: ResolvedIdentity,
}

/// A derived per-counterpart conversation summary.
///
/// Not stored; recomputed on every fetch.
#[derive(Debug, Clone)]
pub struct ConversationSummary {
    /// Counterpart identity.
    pub counterpart: Identity,
    /// Resolved counterpart display identity.
    pub counterpart_name: ResolvedIdentity,
    /// Body of the most recent message in either direction.
    pub last_message: String,
    /// Timestamp of the most recent message.
    pub last_message_time: DateTime<Utc>,
    /// Messages where the caller is recipient and the read flag is unset.
    pub unread_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message() {
        let msg = NewMessage::new(
            Identity::Professional(1),
            Identity::Player(2),
            Some("Trial"),
            "Please attend Friday",
        );
        assert_eq!(msg.sender, Identity::Professional(1));
        assert_eq!(msg.recipient, Identity::Player(2));
        assert_eq!(msg.subject.as_deref(), Some("Trial"));
        assert_eq!(msg.body, "Please attend Friday");
    }

    #[test]
    fn test_new_message_without_subject() {
        let msg = NewMessage::new(
            Identity::Professional(1),
            Identity::Player(2),
            None::<String>,
            "How is the ankle?",
        );
        assert!(msg.subject.is_none());
    }

    #[test]
    fn test_is_participant() {
        let msg = Message {
            id: 1,
            sender: Identity::Professional(1),
            recipient: Identity::Player(2),
            subject: None,
            body: "Body".to_string(),
            is_read: false,
            created_at: Utc::now(),
        };
        assert!(msg.is_participant(Identity::Professional(1)));
        assert!(msg.is_participant(Identity::Player(2)));
        // Same id under the other type tag is not a participant
        assert!(!msg.is_participant(Identity::Player(1)));
        assert!(!msg.is_participant(Identity::Professional(2)));
    }
}
