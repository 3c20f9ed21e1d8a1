//! PitchDesk - messaging backend for a football scouting platform
//!
//! One shared message store serves five role dashboards (admin, club,
//! coach, medical, scout) over a form-encoded action API.

pub mod config;
pub mod db;
pub mod error;
pub mod identity;
pub mod logging;
pub mod messaging;
pub mod notification;
pub mod web;

pub use config::Config;
pub use error::{PitchdeskError, Result};
pub use identity::{Identity, IdentityResolver, Recipient, ResolvedIdentity};
pub use messaging::{
    ConversationService, ConversationSummary, Message, MessageRepository, MessageService,
    MessageView, NewMessage, SendMessageRequest, MAX_BODY_LENGTH, MAX_SUBJECT_LENGTH,
};
pub use notification::{Notification, NotificationRepository, NotificationService};
pub use web::{AppState, DashboardRole, SessionStore, SessionUser};
