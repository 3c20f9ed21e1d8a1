//! Web layer: the dashboard action API.

pub mod actions;
pub mod capabilities;
pub mod cors;
pub mod dto;
pub mod router;
pub mod server;
pub mod session;

use sqlx::SqlitePool;

use crate::config::MessagingConfig;

pub use capabilities::{DashboardRole, RoleCapabilities};
pub use router::create_router;
pub use server::serve;
pub use session::{CurrentUser, SessionStore, SessionUser};

/// Shared state for all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: SqlitePool,
    /// Active dashboard sessions.
    pub sessions: SessionStore,
    /// Messaging limits.
    pub messaging: MessagingConfig,
}

impl AppState {
    pub fn new(pool: SqlitePool, messaging: MessagingConfig) -> Self {
        Self {
            pool,
            sessions: SessionStore::new(),
            messaging,
        }
    }
}
