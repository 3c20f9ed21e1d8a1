//! Session handling for the dashboard API.
//!
//! The login flow lives outside this crate; the embedding application
//! creates sessions through [`SessionStore`] after authenticating a user.
//! Handlers only ever see the session-derived identity — the caller can
//! never supply "who am I" as a request parameter.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use crate::identity::Identity;

use super::capabilities::DashboardRole;
use super::AppState;

/// An authenticated dashboard session.
#[derive(Debug, Clone, Copy)]
pub struct SessionUser {
    /// The caller's identity.
    pub identity: Identity,
    /// The dashboard role the session was opened for.
    pub role: DashboardRole,
}

/// In-memory session store keyed by opaque bearer tokens.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionUser>>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for a professional user. Returns the bearer token.
    pub fn create(&self, professional_id: i64, role: DashboardRole) -> String {
        let token = Uuid::new_v4().to_string();
        let user = SessionUser {
            identity: Identity::Professional(professional_id),
            role,
        };
        self.sessions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token.clone(), user);
        token
    }

    /// Look up a session by token.
    ///
    /// A poisoned lock is recovered rather than propagated: every write
    /// to the map is a single insert or remove, so the map is valid even
    /// if a holder panicked.
    pub fn get(&self, token: &str) -> Option<SessionUser> {
        self.sessions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(token)
            .copied()
    }

    /// Revoke a session.
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(token)
            .is_some()
    }
}

/// Extractor for the current session user.
pub struct CurrentUser(pub SessionUser);

/// 401 response in the dashboard's uniform JSON shape.
fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"success": false, "message": "Not authenticated"})),
    )
        .into_response()
}

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(unauthorized)?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(unauthorized)?;

        let user = state.sessions.get(token).ok_or_else(unauthorized)?;
        Ok(CurrentUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_get() {
        let store = SessionStore::new();
        let token = store.create(10, DashboardRole::Scout);

        let user = store.get(&token).unwrap();
        assert_eq!(user.identity, Identity::Professional(10));
        assert_eq!(user.role, DashboardRole::Scout);
    }

    #[test]
    fn test_unknown_token() {
        let store = SessionStore::new();
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn test_revoke() {
        let store = SessionStore::new();
        let token = store.create(10, DashboardRole::Admin);
        assert!(store.revoke(&token));
        assert!(store.get(&token).is_none());
        assert!(!store.revoke(&token));
    }

    #[test]
    fn test_store_survives_poisoned_lock() {
        let store = SessionStore::new();
        let token = store.create(10, DashboardRole::Scout);

        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.sessions.write().unwrap();
            panic!("poison the session lock");
        })
        .join();

        assert!(store.get(&token).is_some());
        assert!(store.revoke(&token));
        let replacement = store.create(11, DashboardRole::Coach);
        assert!(store.get(&replacement).is_some());
    }

    #[test]
    fn test_tokens_are_unique() {
        let store = SessionStore::new();
        let a = store.create(10, DashboardRole::Admin);
        let b = store.create(10, DashboardRole::Admin);
        assert_ne!(a, b);
    }
}
