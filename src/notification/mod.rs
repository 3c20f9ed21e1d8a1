//! Notification fanout for PitchDesk.
//!
//! Notifications are a side channel next to messaging: a successful send
//! emits a best-effort notification record to the recipient. They are
//! professional-scoped only and are never deleted here.

mod repository;
mod service;
mod types;

pub use repository::NotificationRepository;
pub use service::NotificationService;
pub use types::Notification;
