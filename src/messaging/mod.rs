//! Messaging subsystem for PitchDesk.
//!
//! One shared message store serves all five dashboards; per-role
//! differences (subject requirements, who can be addressed) live in the
//! web layer's capability flags, not in diverging copies of this code.

mod conversation;
mod repository;
mod service;
mod types;

pub use conversation::ConversationService;
pub use repository::MessageRepository;
pub use service::{MessageService, SendMessageRequest};
pub use types::{
    ConversationSummary, Message, MessageView, NewMessage, MAX_BODY_LENGTH, MAX_SUBJECT_LENGTH,
};
