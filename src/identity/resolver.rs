//! Identity resolution against the account tables.

use serde::Serialize;
use sqlx::{Row, SqlitePool};

use super::{Identity, ResolvedIdentity, PROFESSIONAL_ROLES};
use crate::Result;

/// An entry in the recipient directory.
#[derive(Debug, Clone, Serialize)]
pub struct Recipient {
    /// Professional user id.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Professional role.
    pub role: String,
    /// Organization, if set.
    pub organization: Option<String>,
}

/// Resolves tagged identities to display names and account state.
pub struct IdentityResolver<'a> {
    pool: &'a SqlitePool,
}

impl<'a> IdentityResolver<'a> {
    /// Create a new resolver over the given pool.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Resolve an identity to its display form.
    ///
    /// Returns `None` when the underlying record does not exist (for
    /// example, a hard-deleted counterpart).
    pub async fn resolve(&self, identity: Identity) -> Result<Option<ResolvedIdentity>> {
        match identity {
            Identity::Professional(id) => {
                let row = sqlx::query(
                    "SELECT username, role, organization FROM professional_users WHERE id = ?",
                )
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

                Ok(row.map(|r| ResolvedIdentity {
                    name: r.get("username"),
                    role: Some(r.get("role")),
                    organization: r.get("organization"),
                }))
            }
            Identity::Player(id) => {
                let row = sqlx::query(
                    "SELECT first_name || ' ' || last_name AS name
                     FROM player_registrations WHERE id = ?",
                )
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

                Ok(row.map(|r| ResolvedIdentity {
                    name: r.get("name"),
                    role: None,
                    organization: None,
                }))
            }
        }
    }

    /// Resolve an identity, degrading to a placeholder instead of failing.
    ///
    /// Messaging must keep rendering even if a counterpart record was
    /// hard-deleted, so a missing resolve never propagates to the caller.
    pub async fn resolve_or_unknown(&self, identity: Identity, fallback: &str) -> ResolvedIdentity {
        match self.resolve(identity).await {
            Ok(Some(resolved)) => resolved,
            Ok(None) => ResolvedIdentity::unknown(fallback),
            Err(e) => {
                tracing::warn!(
                    "Failed to resolve {} {}: {}",
                    identity.type_tag(),
                    identity.id(),
                    e
                );
                ResolvedIdentity::unknown(fallback)
            }
        }
    }

    /// Check whether an identity points at an active account.
    ///
    /// Players require both the registration and the backing user row to
    /// be active.
    pub async fn is_active(&self, identity: Identity) -> Result<bool> {
        let active: bool = match identity {
            Identity::Professional(id) => sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM professional_users
                 WHERE id = ? AND status = 'active')",
            )
            .bind(id)
            .fetch_one(self.pool)
            .await?,
            Identity::Player(id) => sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM player_registrations pr
                 JOIN users u ON pr.user_id = u.id
                 WHERE pr.id = ? AND pr.status = 'active' AND u.status = 'active')",
            )
            .bind(id)
            .fetch_one(self.pool)
            .await?,
        };
        Ok(active)
    }

    /// List addressable professionals, excluding the caller.
    ///
    /// An unknown role filter is ignored rather than rejected, matching
    /// dashboard behavior.
    pub async fn list_recipients(
        &self,
        exclude_id: i64,
        role_filter: Option<&str>,
    ) -> Result<Vec<Recipient>> {
        let role_filter = role_filter.filter(|r| PROFESSIONAL_ROLES.contains(r));

        let rows = if let Some(role) = role_filter {
            sqlx::query(
                "SELECT id, username, role, organization FROM professional_users
                 WHERE id != ? AND status = 'active' AND role = ?
                 ORDER BY role ASC, username ASC",
            )
            .bind(exclude_id)
            .bind(role)
            .fetch_all(self.pool)
            .await?
        } else {
            sqlx::query(
                "SELECT id, username, role, organization FROM professional_users
                 WHERE id != ? AND status = 'active'
                 ORDER BY role ASC, username ASC",
            )
            .bind(exclude_id)
            .fetch_all(self.pool)
            .await?
        };

        Ok(rows
            .into_iter()
            .map(|r| Recipient {
                id: r.get("id"),
                username: r.get("username"),
                role: r.get("role"),
                organization: r.get("organization"),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn setup_pool() -> SqlitePool {
        db::open_in_memory().await.unwrap()
    }

    async fn insert_professional(pool: &SqlitePool, username: &str, role: &str) -> i64 {
        sqlx::query(
            "INSERT INTO professional_users (username, role, organization) VALUES (?, ?, ?)",
        )
        .bind(username)
        .bind(role)
        .bind("Northfield FC")
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    async fn insert_player(pool: &SqlitePool, first: &str, last: &str) -> i64 {
        let user_id = sqlx::query("INSERT INTO users (email) VALUES (?)")
            .bind(format!("{first}.{last}@example.com"))
            .execute(pool)
            .await
            .unwrap()
            .last_insert_rowid();
        sqlx::query("INSERT INTO player_registrations (user_id, first_name, last_name) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(first)
            .bind(last)
            .execute(pool)
            .await
            .unwrap()
            .last_insert_rowid()
    }

    #[tokio::test]
    async fn test_resolve_professional() {
        let pool = setup_pool().await;
        let id = insert_professional(&pool, "scout_anna", "scout").await;

        let resolver = IdentityResolver::new(&pool);
        let resolved = resolver
            .resolve(Identity::Professional(id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.name, "scout_anna");
        assert_eq!(resolved.role.as_deref(), Some("scout"));
        assert_eq!(resolved.organization.as_deref(), Some("Northfield FC"));
    }

    #[tokio::test]
    async fn test_resolve_player_has_no_role() {
        let pool = setup_pool().await;
        let id = insert_player(&pool, "Jamie", "Okafor").await;

        let resolver = IdentityResolver::new(&pool);
        let resolved = resolver
            .resolve(Identity::Player(id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.name, "Jamie Okafor");
        assert!(resolved.role.is_none());
        assert!(resolved.organization.is_none());
    }

    #[tokio::test]
    async fn test_resolve_missing_returns_none() {
        let pool = setup_pool().await;
        let resolver = IdentityResolver::new(&pool);
        assert!(resolver
            .resolve(Identity::Professional(999))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_resolve_or_unknown_placeholder() {
        let pool = setup_pool().await;
        let resolver = IdentityResolver::new(&pool);
        let resolved = resolver
            .resolve_or_unknown(Identity::Player(999), "Unknown Sender")
            .await;
        assert_eq!(resolved.name, "Unknown Sender");
    }

    #[tokio::test]
    async fn test_is_active_professional() {
        let pool = setup_pool().await;
        let id = insert_professional(&pool, "coach_pat", "coach").await;
        let resolver = IdentityResolver::new(&pool);

        assert!(resolver.is_active(Identity::Professional(id)).await.unwrap());

        sqlx::query("UPDATE professional_users SET status = 'inactive' WHERE id = ?")
            .bind(id)
            .execute(&pool)
            .await
            .unwrap();
        assert!(!resolver.is_active(Identity::Professional(id)).await.unwrap());
    }

    #[tokio::test]
    async fn test_is_active_player_requires_backing_user() {
        let pool = setup_pool().await;
        let id = insert_player(&pool, "Sam", "Berg").await;
        let resolver = IdentityResolver::new(&pool);

        assert!(resolver.is_active(Identity::Player(id)).await.unwrap());

        // Deactivating the login account deactivates the player identity
        sqlx::query("UPDATE users SET status = 'inactive'")
            .execute(&pool)
            .await
            .unwrap();
        assert!(!resolver.is_active(Identity::Player(id)).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_recipients_excludes_caller_and_inactive() {
        let pool = setup_pool().await;
        let me = insert_professional(&pool, "admin_lee", "admin").await;
        insert_professional(&pool, "coach_pat", "coach").await;
        let inactive = insert_professional(&pool, "scout_old", "scout").await;
        sqlx::query("UPDATE professional_users SET status = 'inactive' WHERE id = ?")
            .bind(inactive)
            .execute(&pool)
            .await
            .unwrap();

        let resolver = IdentityResolver::new(&pool);
        let recipients = resolver.list_recipients(me, None).await.unwrap();
        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients[0].username, "coach_pat");
    }

    #[tokio::test]
    async fn test_list_recipients_role_filter() {
        let pool = setup_pool().await;
        let me = insert_professional(&pool, "admin_lee", "admin").await;
        insert_professional(&pool, "coach_pat", "coach").await;
        insert_professional(&pool, "medic_kim", "medical").await;

        let resolver = IdentityResolver::new(&pool);
        let recipients = resolver.list_recipients(me, Some("medical")).await.unwrap();
        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients[0].role, "medical");

        // Unknown filter values are ignored, not an error
        let recipients = resolver.list_recipients(me, Some("referee")).await.unwrap();
        assert_eq!(recipients.len(), 2);
    }
}
