//! Action dispatch for the dashboard API.
//!
//! Every dashboard speaks the same shape: a form-encoded POST with an
//! `action` field, answered with JSON. All store-level failures are
//! caught here and converted to a uniform `{"success": false}` body —
//! a storage fault never crashes the request, and a caller can not tell
//! an inaccessible record from a missing one.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::identity::{Identity, IdentityResolver};
use crate::messaging::{ConversationService, MessageService, SendMessageRequest};
use crate::notification::NotificationService;
use crate::PitchdeskError;

use super::capabilities::DashboardRole;
use super::dto::{ConversationRecord, MessageRecord, NotificationRecord};
use super::session::CurrentUser;
use super::AppState;

/// Form fields accepted by the action endpoint.
///
/// Which fields are required depends on the action; everything else is
/// ignored. Id fields arrive as strings so that malformed input fails
/// inside the dispatch, as a uniform JSON failure, instead of a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct ActionForm {
    /// Action name.
    pub action: String,
    /// Recipient id for send_message.
    pub recipient_id: Option<String>,
    /// Subject for send_message.
    pub subject: Option<String>,
    /// Body for send_message.
    pub message: Option<String>,
    /// Target message id.
    pub message_id: Option<String>,
    /// Target notification id.
    pub notification_id: Option<String>,
    /// Search term for search_messages.
    pub search_term: Option<String>,
    /// Role filter for get_recipients.
    pub role_filter: Option<String>,
}

/// Parse an id field. Missing and malformed collapse to `None`.
fn parse_id(value: Option<&str>) -> Option<i64> {
    value?.trim().parse().ok()
}

const SERVER_ERROR: &str = "A server error occurred. Please try again later.";

fn failure(message: &str) -> Value {
    json!({"success": false, "message": message})
}

/// Convert a service error into the uniform failure body.
///
/// Validation messages are safe to echo; not-found and permission
/// failures collapse into one caller-supplied message so record
/// existence never leaks; anything else is logged and masked.
fn error_body(action: &str, e: PitchdeskError, not_found_message: &str) -> Value {
    match e {
        PitchdeskError::Validation(message) => failure(&message),
        PitchdeskError::NotFound(_) | PitchdeskError::Permission(_) => {
            failure(not_found_message)
        }
        other => {
            tracing::error!("Action {} failed: {}", action, other);
            failure(SERVER_ERROR)
        }
    }
}

/// POST /dashboard/{role} - dispatch a dashboard action.
pub async fn dispatch(
    State(state): State<Arc<AppState>>,
    Path(role): Path<String>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<ActionForm>,
) -> Json<Value> {
    let Some(role) = DashboardRole::parse(&role) else {
        return Json(failure("Unknown dashboard"));
    };
    if role != user.role {
        return Json(failure("Access denied"));
    }

    let caps = role.capabilities();
    let pool = &state.pool;
    let limits = &state.messaging;
    let me = user.identity;

    let body = match form.action.as_str() {
        "send_message" => {
            let Some(recipient_id) = parse_id(form.recipient_id.as_deref()) else {
                return Json(failure("Recipient is required"));
            };
            let recipient = if caps.messages_players {
                Identity::Player(recipient_id)
            } else {
                Identity::Professional(recipient_id)
            };
            let request = SendMessageRequest {
                sender: me,
                recipient,
                subject: form.subject,
                body: form.message.unwrap_or_default(),
                require_subject: caps.requires_subject,
            };
            match MessageService::new(pool).send(&request).await {
                Ok(_) => json!({"success": true, "message": "Message sent successfully"}),
                Err(e) => error_body(&form.action, e, "Invalid recipient selected"),
            }
        }

        "get_messages" => match MessageService::new(pool)
            .list_inbox(me, limits.inbox_limit)
            .await
        {
            Ok(views) => {
                let records: Vec<MessageRecord> =
                    views.into_iter().map(MessageRecord::from).collect();
                json!(records)
            }
            Err(e) => error_body(&form.action, e, SERVER_ERROR),
        },

        "get_sent_messages" => match MessageService::new(pool)
            .list_sent(me, limits.inbox_limit)
            .await
        {
            Ok(views) => {
                let records: Vec<MessageRecord> =
                    views.into_iter().map(MessageRecord::from).collect();
                json!(records)
            }
            Err(e) => error_body(&form.action, e, SERVER_ERROR),
        },

        "get_message" => {
            let Some(message_id) = parse_id(form.message_id.as_deref()) else {
                return Json(failure("Message not found"));
            };
            match MessageService::new(pool).get_message(message_id, me).await {
                Ok(view) => {
                    json!({"success": true, "message": MessageRecord::from(view)})
                }
                Err(e) => error_body(&form.action, e, "Message not found"),
            }
        }

        "delete_message" => {
            let Some(message_id) = parse_id(form.message_id.as_deref()) else {
                return Json(failure("Message not found"));
            };
            match MessageService::new(pool).delete(message_id, me).await {
                Ok(()) => json!({"success": true}),
                Err(e) => error_body(&form.action, e, "Message not found"),
            }
        }

        "mark_message_read" => {
            let Some(message_id) = parse_id(form.message_id.as_deref()) else {
                return Json(failure("Message not found"));
            };
            // Marking an already-read message, or one the caller does not
            // receive, is a harmless no-op.
            match MessageService::new(pool).mark_read(message_id, me).await {
                Ok(_) => json!({"success": true}),
                Err(e) => error_body(&form.action, e, SERVER_ERROR),
            }
        }

        "get_unread_count" => match MessageService::new(pool).unread_count(me).await {
            Ok(count) => json!({"count": count}),
            Err(e) => error_body(&form.action, e, SERVER_ERROR),
        },

        "get_recipients" if caps.recipient_directory => {
            match IdentityResolver::new(pool)
                .list_recipients(me.id(), form.role_filter.as_deref())
                .await
            {
                Ok(recipients) => json!(recipients),
                Err(e) => error_body(&form.action, e, SERVER_ERROR),
            }
        }

        "search_messages" => {
            let term = form.search_term.unwrap_or_default();
            match MessageService::new(pool)
                .search(me, &term, limits.search_limit)
                .await
            {
                Ok(views) => {
                    let records: Vec<MessageRecord> =
                        views.into_iter().map(MessageRecord::from).collect();
                    json!(records)
                }
                Err(e) => error_body(&form.action, e, SERVER_ERROR),
            }
        }

        "get_conversations" if caps.conversations => {
            match ConversationService::new(pool).list_conversations(me).await {
                Ok(conversations) => {
                    let records: Vec<ConversationRecord> = conversations
                        .into_iter()
                        .map(ConversationRecord::from)
                        .collect();
                    json!(records)
                }
                Err(e) => error_body(&form.action, e, SERVER_ERROR),
            }
        }

        "get_notifications" => {
            match NotificationService::new(pool)
                .list_and_mark_read(me.id(), limits.notification_feed_limit)
                .await
            {
                Ok(feed) => {
                    let records: Vec<NotificationRecord> =
                        feed.into_iter().map(NotificationRecord::from).collect();
                    json!(records)
                }
                Err(e) => error_body(&form.action, e, SERVER_ERROR),
            }
        }

        "mark_notification_read" => {
            let Some(notification_id) = parse_id(form.notification_id.as_deref()) else {
                return Json(failure("Notification not found"));
            };
            match NotificationService::new(pool)
                .mark_one(notification_id, me.id())
                .await
            {
                Ok(changed) => json!({"success": changed}),
                Err(e) => error_body(&form.action, e, SERVER_ERROR),
            }
        }

        _ => failure("Unknown action"),
    };

    Json(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(Some("42")), Some(42));
        assert_eq!(parse_id(Some(" 42 ")), Some(42));
        assert_eq!(parse_id(Some("abc")), None);
        assert_eq!(parse_id(Some("4.2")), None);
        assert_eq!(parse_id(Some("")), None);
        assert_eq!(parse_id(None), None);
    }

    #[test]
    fn test_failure_shape() {
        let body = failure("nope");
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "nope");
    }

    #[test]
    fn test_error_body_echoes_validation() {
        let body = error_body(
            "send_message",
            PitchdeskError::Validation("subject is required".to_string()),
            "Invalid recipient selected",
        );
        assert_eq!(body["message"], "subject is required");
    }

    #[test]
    fn test_error_body_masks_not_found_detail() {
        let body = error_body(
            "get_message",
            PitchdeskError::NotFound("message".to_string()),
            "Message not found",
        );
        assert_eq!(body["message"], "Message not found");
    }

    #[test]
    fn test_error_body_masks_store_errors() {
        let body = error_body(
            "get_messages",
            PitchdeskError::Database("UNIQUE constraint failed".to_string()),
            SERVER_ERROR,
        );
        assert_eq!(body["message"], SERVER_ERROR);
        assert!(!body["message"].as_str().unwrap().contains("UNIQUE"));
    }
}
