//! Conversation aggregation for PitchDesk.
//!
//! Derives a per-counterpart summary (last message, unread count) from the
//! message store. Nothing is materialized; every fetch recomputes the
//! list, one query per counterpart after the initial distinct scan. That
//! fan-out is acceptable at dashboard scale and callers get no pagination.

use sqlx::SqlitePool;

use crate::identity::{Identity, IdentityResolver};
use crate::Result;

use super::repository::MessageRepository;
use super::types::ConversationSummary;

/// Service for the conversations view.
pub struct ConversationService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ConversationService<'a> {
    /// Create a new ConversationService with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List conversation summaries for an identity, most recent first.
    ///
    /// Counterparts whose account record no longer resolves are dropped
    /// from the list entirely, unlike single-message views which render a
    /// placeholder.
    pub async fn list_conversations(&self, identity: Identity) -> Result<Vec<ConversationSummary>> {
        let repo = MessageRepository::new(self.pool);
        let resolver = IdentityResolver::new(self.pool);

        let counterparts = repo.list_counterparts(identity).await?;
        let mut conversations = Vec::with_capacity(counterparts.len());

        for counterpart in counterparts {
            let Some(resolved) = resolver.resolve(counterpart).await? else {
                continue;
            };
            // The counterpart came from the distinct scan, so at least one
            // message exists between the two identities.
            let Some((last_message, last_message_time)) =
                repo.last_message_between(identity, counterpart).await?
            else {
                continue;
            };
            let unread_count = repo.count_unread_from(identity, counterpart).await?;

            conversations.push(ConversationSummary {
                counterpart,
                counterpart_name: resolved,
                last_message,
                last_message_time,
                unread_count,
            });
        }

        conversations.sort_by(|a, b| {
            b.last_message_time
                .cmp(&a.last_message_time)
                .then_with(|| b.counterpart.id().cmp(&a.counterpart.id()))
        });
        Ok(conversations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::repository::MessageRepository;
    use crate::messaging::types::NewMessage;
    use crate::db;

    async fn setup_pool() -> SqlitePool {
        let pool = db::open_in_memory().await.unwrap();
        sqlx::query(
            "INSERT INTO professional_users (id, username, role) VALUES (1, 'medic_kim', 'medical')",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO users (id, email) VALUES (1, 'x@example.com'), (2, 'y@example.com')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO player_registrations (id, user_id, first_name, last_name) VALUES
                 (10, 1, 'Xavi', 'Mensah'),
                 (20, 2, 'Yara', 'Silva')",
        )
        .execute(&pool)
        .await
        .unwrap();
        pool
    }

    async fn send(pool: &SqlitePool, sender: Identity, recipient: Identity, body: &str) {
        MessageRepository::new(pool)
            .create(&NewMessage::new(sender, recipient, None::<String>, body))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_conversations_unread_counts_and_ordering() {
        let pool = setup_pool().await;
        let me = Identity::Professional(1);
        let x = Identity::Player(10);
        let y = Identity::Player(20);

        // Y first: one exchanged pair, everything read
        send(&pool, me, y, "Hello Y").await;
        send(&pool, y, me, "Hello back").await;
        sqlx::query("UPDATE messages SET is_read = 1")
            .execute(&pool)
            .await
            .unwrap();

        // X later: two unread messages to me
        send(&pool, x, me, "Checking in").await;
        send(&pool, x, me, "Any update?").await;

        let conversations = ConversationService::new(&pool)
            .list_conversations(me)
            .await
            .unwrap();

        assert_eq!(conversations.len(), 2);
        assert_eq!(conversations[0].counterpart, x);
        assert_eq!(conversations[0].unread_count, 2);
        assert_eq!(conversations[0].last_message, "Any update?");
        assert_eq!(conversations[0].counterpart_name.name, "Xavi Mensah");

        assert_eq!(conversations[1].counterpart, y);
        assert_eq!(conversations[1].unread_count, 0);
        assert_eq!(conversations[1].last_message, "Hello back");
    }

    #[tokio::test]
    async fn test_unread_count_ignores_my_own_unread_sends() {
        let pool = setup_pool().await;
        let me = Identity::Professional(1);
        let x = Identity::Player(10);

        // My outbound message is unread by the player, which must not
        // count towards my unread total for the conversation.
        send(&pool, me, x, "Outbound").await;

        let conversations = ConversationService::new(&pool)
            .list_conversations(me)
            .await
            .unwrap();
        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0].unread_count, 0);
    }

    #[tokio::test]
    async fn test_unresolvable_counterpart_is_dropped() {
        let pool = setup_pool().await;
        let me = Identity::Professional(1);
        let x = Identity::Player(10);
        let ghost = Identity::Player(99);

        send(&pool, x, me, "Real").await;
        send(&pool, ghost, me, "From a deleted registration").await;

        let conversations = ConversationService::new(&pool)
            .list_conversations(me)
            .await
            .unwrap();
        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0].counterpart, x);
    }

    #[tokio::test]
    async fn test_no_messages_means_no_conversations() {
        let pool = setup_pool().await;
        let conversations = ConversationService::new(&pool)
            .list_conversations(Identity::Professional(1))
            .await
            .unwrap();
        assert!(conversations.is_empty());
    }
}
