//! Message service for PitchDesk.
//!
//! High-level messaging operations with validation, recipient checks,
//! access control, read-on-view semantics, and best-effort notification
//! fanout.

use sqlx::SqlitePool;

use crate::identity::{Identity, IdentityResolver};
use crate::notification::NotificationService;
use crate::{PitchdeskError, Result};

use super::repository::MessageRepository;
use super::types::{MessageView, NewMessage, MAX_BODY_LENGTH, MAX_SUBJECT_LENGTH};

/// Request to send a message.
#[derive(Debug, Clone)]
pub struct SendMessageRequest {
    /// Sender identity (session-derived, never client-supplied).
    pub sender: Identity,
    /// Recipient identity.
    pub recipient: Identity,
    /// Subject, where the caller's dashboard uses one.
    pub subject: Option<String>,
    /// Message body.
    pub body: String,
    /// Whether an empty subject is a validation failure.
    pub require_subject: bool,
}

/// Service for message operations.
pub struct MessageService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Send a message.
    ///
    /// Validates the request, persists the message unread, and emits a
    /// best-effort notification to professional recipients. A fanout
    /// failure is logged and never rolls back or fails the send.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Body is empty or too long
    /// - Subject is missing where required, or too long
    /// - Sender and recipient are the same identity
    /// - The recipient does not resolve to an active account
    pub async fn send(&self, request: &SendMessageRequest) -> Result<i64> {
        let body = request.body.trim();
        if body.is_empty() {
            return Err(PitchdeskError::Validation(
                "message body is required".to_string(),
            ));
        }
        if body.chars().count() > MAX_BODY_LENGTH {
            return Err(PitchdeskError::Validation(format!(
                "message body must be at most {MAX_BODY_LENGTH} characters"
            )));
        }

        let subject = request.subject.as_deref().map(str::trim).filter(|s| !s.is_empty());
        if request.require_subject && subject.is_none() {
            return Err(PitchdeskError::Validation(
                "subject is required".to_string(),
            ));
        }
        if let Some(subject) = subject {
            if subject.chars().count() > MAX_SUBJECT_LENGTH {
                return Err(PitchdeskError::Validation(format!(
                    "subject must be at most {MAX_SUBJECT_LENGTH} characters"
                )));
            }
        }

        if request.sender == request.recipient {
            return Err(PitchdeskError::Validation(
                "cannot send a message to yourself".to_string(),
            ));
        }

        let resolver = IdentityResolver::new(self.pool);
        if !resolver.is_active(request.recipient).await? {
            return Err(PitchdeskError::NotFound("recipient".to_string()));
        }

        let new_message = NewMessage::new(request.sender, request.recipient, subject, body);
        let message = MessageRepository::new(self.pool).create(&new_message).await?;

        // Fanout is best-effort and professional-scoped: player identities
        // have no notification feed, and an untyped insert could collide
        // across the two id spaces.
        if let Identity::Professional(recipient_id) = request.recipient {
            let preview = notification_preview(subject, body);
            if let Err(e) = NotificationService::new(self.pool)
                .notify(recipient_id, "New Message", &preview)
                .await
            {
                tracing::error!(
                    "Notification fanout failed for message {}: {}",
                    message.id,
                    e
                );
            }
        }

        Ok(message.id)
    }

    /// List received messages, enriched with resolved identities.
    pub async fn list_inbox(&self, identity: Identity, limit: i64) -> Result<Vec<MessageView>> {
        let messages = MessageRepository::new(self.pool)
            .list_inbox(identity, limit)
            .await?;
        self.enrich(messages).await
    }

    /// List sent messages, enriched with resolved identities.
    pub async fn list_sent(&self, identity: Identity, limit: i64) -> Result<Vec<MessageView>> {
        let messages = MessageRepository::new(self.pool)
            .list_sent(identity, limit)
            .await?;
        self.enrich(messages).await
    }

    /// Get a message by ID with access control.
    ///
    /// Only a participant can view the message, and a non-participant
    /// gets the same NotFound as a missing id. When the recipient views
    /// an unread message it is marked read as part of the fetch
    /// (read-on-view).
    pub async fn get_message(&self, id: i64, identity: Identity) -> Result<MessageView> {
        let repo = MessageRepository::new(self.pool);
        let mut message = repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| PitchdeskError::NotFound("message".to_string()))?;

        if !message.is_participant(identity) {
            return Err(PitchdeskError::NotFound("message".to_string()));
        }

        if message.recipient == identity && !message.is_read {
            repo.mark_read(id, identity).await?;
            message.is_read = true;
        }

        let mut views = self.enrich(vec![message]).await?;
        Ok(views.remove(0))
    }

    /// Mark a message as read.
    ///
    /// A no-op when the message is already read or the caller is not the
    /// recipient; idempotent either way.
    pub async fn mark_read(&self, id: i64, identity: Identity) -> Result<bool> {
        MessageRepository::new(self.pool).mark_read(id, identity).await
    }

    /// Hard-delete a message as one of its participants.
    ///
    /// # Errors
    ///
    /// Returns NotFound when the id does not exist or the caller is not
    /// a participant; deleting twice fails the same way.
    pub async fn delete(&self, id: i64, identity: Identity) -> Result<()> {
        let deleted = MessageRepository::new(self.pool)
            .delete_for_participant(id, identity)
            .await?;
        if !deleted {
            return Err(PitchdeskError::NotFound("message".to_string()));
        }
        Ok(())
    }

    /// Count unread messages for a recipient.
    pub async fn unread_count(&self, identity: Identity) -> Result<i64> {
        MessageRepository::new(self.pool).count_unread(identity).await
    }

    /// Search the caller's inbox.
    ///
    /// An empty or whitespace term returns an empty list rather than
    /// matching everything.
    pub async fn search(
        &self,
        identity: Identity,
        term: &str,
        limit: i64,
    ) -> Result<Vec<MessageView>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let messages = MessageRepository::new(self.pool)
            .search_inbox(identity, term, limit)
            .await?;
        self.enrich(messages).await
    }

    async fn enrich(&self, messages: Vec<super::types::Message>) -> Result<Vec<MessageView>> {
        let resolver = IdentityResolver::new(self.pool);
        let mut views = Vec::with_capacity(messages.len());
        for message in messages {
            let sender = resolver
                .resolve_or_unknown(message.sender, "Unknown Sender")
                .await;
            let recipient = resolver
                .resolve_or_unknown(message.recipient, "Unknown Recipient")
                .await;
            views.push(MessageView {
                message,
                sender,
                recipient,
            });
        }
        Ok(views)
    }
}

/// Notification text for a new message: the subject when present,
/// otherwise a body preview.
fn notification_preview(subject: Option<&str>, body: &str) -> String {
    let preview = match subject {
        Some(subject) => subject.to_string(),
        None => body.chars().take(80).collect(),
    };
    format!("You have a new message: {preview}")
}
